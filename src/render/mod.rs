use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::{
    data::items::ItemKind,
    map::TileKind,
    snapshot::{PlayerSnapshot, WorldSnapshot},
};

pub const LOG_VISIBLE_LINES: usize = 8;

pub fn draw_hud(ctx: &mut BTerm, player: &PlayerSnapshot, potions: i32) {
    let width = ctx.get_char_size().0 as i32;
    ctx.draw_box(0, 0, width - 1, 3, RGB::named(GRAY), RGB::named(BLACK));
    let hp_color = if player.hp * 10 <= player.max_hp * 3 {
        RGB::named(ORANGE)
    } else {
        RGB::named(LIGHT_GREEN)
    };
    ctx.print_color(
        2,
        1,
        hp_color,
        RGB::named(BLACK),
        format!("HP {}/{}", player.hp, player.max_hp),
    );
    ctx.print_color(
        16,
        1,
        RGB::named(LIGHT_BLUE),
        RGB::named(BLACK),
        format!(
            "Lv {}  XP {}/{}  Gold {}  Potions {}",
            player.level,
            player.xp,
            player.level * 100,
            player.gold,
            potions
        ),
    );
    ctx.print_color(
        2,
        2,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
        "WASD/arrows move | Space attack | P potion | Esc quit",
    );
}

pub fn draw_map(ctx: &mut BTerm, snapshot: &WorldSnapshot, origin: Point) {
    let grid = &snapshot.grid;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let (fg, glyph) = match grid.tile_at(Point::new(x, y)) {
                Some(TileKind::Wall) => (RGB::from_u8(90, 90, 110), '#'),
                _ => (RGB::from_u8(50, 50, 80), '.'),
            };
            ctx.set(
                origin.x + x,
                origin.y + y,
                fg,
                RGB::named(BLACK),
                to_cp437(glyph),
            );
        }
    }

    for item in &snapshot.items {
        let (fg, glyph) = match item.kind {
            ItemKind::Gold => (RGB::named(GOLD), '$'),
            ItemKind::Potion => (RGB::named(MAGENTA), '!'),
        };
        ctx.set(
            origin.x + item.x,
            origin.y + item.y,
            fg,
            RGB::named(BLACK),
            to_cp437(glyph),
        );
    }

    for enemy in &snapshot.enemies {
        ctx.set(
            origin.x + enemy.x,
            origin.y + enemy.y,
            RGB::from_u8(255, 95, 86),
            RGB::named(BLACK),
            to_cp437('e'),
        );
    }

    let player = &snapshot.player;
    ctx.set(
        origin.x + player.x,
        origin.y + player.y,
        RGB::named(YELLOW),
        RGB::named(BLACK),
        to_cp437('@'),
    );
}

/// The journal keeps everything; the panel shows the newest lines.
pub fn draw_log(ctx: &mut BTerm, log: &[String], start_y: i32) {
    let width = ctx.get_char_size().0 as i32;
    let visible = log.len().min(LOG_VISIBLE_LINES);
    ctx.draw_box(
        0,
        start_y,
        width - 1,
        visible as i32 + 2,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
    );
    ctx.print_color(
        2,
        start_y + 1,
        RGB::named(WHITE),
        RGB::named(BLACK),
        "Adventure Journal",
    );
    let max_chars = (width as usize).saturating_sub(4);
    for (row, entry) in log[log.len() - visible..].iter().enumerate() {
        let line: String = entry.chars().take(max_chars).collect();
        ctx.print(2, start_y + 2 + row as i32, line);
    }
}

pub fn draw_game_over(ctx: &mut BTerm, y: i32) {
    ctx.print_color_centered(y, RGB::named(RED), RGB::named(BLACK), "GAME OVER");
    ctx.print_color_centered(
        y + 1,
        RGB::from_u8(255, 160, 160),
        RGB::named(BLACK),
        "Your hero has fallen. Press Esc to leave.",
    );
}

pub fn draw_snapshot(ctx: &mut BTerm, snapshot: &WorldSnapshot, map_origin: Point) {
    draw_hud(ctx, &snapshot.player, snapshot.potions);
    draw_map(ctx, snapshot, map_origin);
    let below_map = map_origin.y + snapshot.grid.height + 1;
    if snapshot.game_over {
        draw_game_over(ctx, below_map);
    }
    draw_log(ctx, &snapshot.log, below_map + 3);
}
