//! Game palette: soft near-white player and baize-green background,
//! with the four ball classes picked apart by strong hues.

use felt_engine::{Color, TableColors};

pub const WHITE: Color = Color::rgb8(240, 255, 240);
pub const BLACK: Color = Color::rgb8(20, 40, 20);
pub const RED: Color = Color::rgb8(220, 50, 50);
pub const YELLOW: Color = Color::rgb8(220, 220, 50);
pub const GREEN: Color = Color::rgb8(50, 200, 70);
pub const BLUE: Color = Color::rgb8(40, 20, 200);

pub const BACKGROUND: Color = GREEN;
pub const FOREGROUND: Color = BLACK;
pub const HIGHLIGHT: Color = WHITE;

pub fn table_colors() -> TableColors {
    TableColors {
        player: WHITE,
        wall: BLACK,
        hole: BLACK,
        red: RED,
        blue: BLUE,
        black: BLACK,
        gold: YELLOW,
    }
}
