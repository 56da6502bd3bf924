//! Default table layout: two rows of seven balls facing each other across
//! the cue ball, eight holes around the rim.

use felt_engine::{BallKind, BallSpawn, LayoutConfig};

pub const BOARD_W: f32 = 1200.0;
pub const BOARD_H: f32 = 800.0;

/// Holes on the edge midpoints are tucked into the rail a little so they
/// read as pockets rather than circles floating on the felt.
const HOLE_INSET: f32 = 5.0;

pub const HOLE_RADIUS: f32 = 20.0;

pub const STARTING_SHOTS: u32 = 10;

/// Ball kinds for one row, leftmost first.
const ROW_KINDS: [BallKind; 7] = [
    BallKind::Red,
    BallKind::Red,
    BallKind::Blue,
    BallKind::Black,
    BallKind::Red,
    BallKind::Red,
    BallKind::Red,
];

const ROW_XS: [f32; 7] = [0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.825];

pub fn default_layout() -> LayoutConfig {
    let mut balls = Vec::with_capacity(14);
    for (kind, x) in ROW_KINDS.iter().zip(ROW_XS) {
        balls.push(BallSpawn {
            kind: *kind,
            pos: [x, 0.25],
        });
    }
    // The bottom row swaps the penalty ball for the gold bonus ball.
    for (kind, x) in ROW_KINDS.iter().zip(ROW_XS) {
        let kind = match kind {
            BallKind::Black => BallKind::Gold,
            other => *other,
        };
        balls.push(BallSpawn {
            kind,
            pos: [x, 0.75],
        });
    }

    let dx = HOLE_INSET / BOARD_W;
    let dy = HOLE_INSET / BOARD_H;
    LayoutConfig {
        size: [BOARD_W, BOARD_H],
        holes: vec![
            [0.0, 0.0],
            [0.5, -dy],
            [1.0, 0.0],
            [-dx, 0.5],
            [1.0 + dx, 0.5],
            [0.0, 1.0],
            [0.5, 1.0 + dy],
            [1.0, 1.0],
        ],
        hole_radius: HOLE_RADIUS,
        player: [0.5, 0.5],
        balls,
        shots: STARTING_SHOTS,
    }
}
