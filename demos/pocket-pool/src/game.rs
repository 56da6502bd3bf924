//! Pocket Pool - arcade pool with limited shots and four ball classes.
//! The cue ball is struck toward the pointer; potted balls score, respawn
//! or penalize depending on class, and clearing every red pays a bonus.

use glam::Vec2;

use felt_engine::{
    DrawBuffer, EngineContext, Game, GameConfig, GameEvent, InputSnapshot, ShotState, Table,
};

use crate::layout::{default_layout, BOARD_H, BOARD_W};
use crate::palette;

/// Game event kinds forwarded to the host UI.
mod game_events {
    pub const SCORE: f32 = 1.0;
    pub const SHOTS_REMAINING: f32 = 2.0;
    pub const SHOT_PHASE: f32 = 3.0;
}

const HUD_TEXT_SIZE: f32 = 28.0;

pub struct PocketPool {
    table: Option<Table>,
}

impl PocketPool {
    pub fn new() -> Self {
        Self { table: None }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    fn phase_code(state: ShotState) -> f32 {
        match state {
            ShotState::Idle => 0.0,
            ShotState::ShotInProgress => 1.0,
            ShotState::Settling => 2.0,
            ShotState::GameOver => 3.0,
        }
    }

    fn draw_hud(&self, table: &Table, out: &mut DrawBuffer) {
        out.text(
            format!("SCORE {}", table.score()),
            Vec2::new(20.0, 12.0),
            HUD_TEXT_SIZE,
            palette::HIGHLIGHT,
        );
        out.text(
            format!("SHOTS {}", table.shots_remaining()),
            Vec2::new(table.width() - 180.0, 12.0),
            HUD_TEXT_SIZE,
            palette::HIGHLIGHT,
        );

        if table.shot_state() == ShotState::GameOver {
            let center_x = table.width() / 2.0;
            let center_y = table.height() / 2.0;
            out.fill_rect(
                Vec2::ZERO,
                table.bounds(),
                palette::FOREGROUND.with_alpha(0.6),
            );
            out.text(
                "GAME OVER",
                Vec2::new(center_x - 120.0, center_y - 60.0),
                HUD_TEXT_SIZE * 1.8,
                palette::HIGHLIGHT,
            );
            out.text(
                format!("FINAL SCORE {}", table.score()),
                Vec2::new(center_x - 110.0, center_y),
                HUD_TEXT_SIZE,
                palette::HIGHLIGHT,
            );
            out.text(
                "CLICK OR PRESS ANY KEY TO PLAY AGAIN",
                Vec2::new(center_x - 250.0, center_y + 50.0),
                HUD_TEXT_SIZE * 0.8,
                palette::HIGHLIGHT,
            );
        }
    }
}

impl Default for PocketPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PocketPool {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: BOARD_W,
            world_height: BOARD_H,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let table = Table::new(default_layout(), palette::table_colors(), ctx);
        log::info!(
            "table ready: {} bodies, {} shots",
            table.bodies().len(),
            table.shots_remaining()
        );
        self.table = Some(table);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot) {
        let dt = self.config().fixed_dt;
        let Some(table) = self.table.as_mut() else {
            return;
        };

        table.update(ctx, input, dt);
        ctx.effects.update(dt);

        ctx.emit_event(GameEvent {
            kind: game_events::SCORE,
            a: table.score() as f32,
            b: 0.0,
            c: 0.0,
        });
        ctx.emit_event(GameEvent {
            kind: game_events::SHOTS_REMAINING,
            a: table.shots_remaining() as f32,
            b: 0.0,
            c: 0.0,
        });
        ctx.emit_event(GameEvent {
            kind: game_events::SHOT_PHASE,
            a: Self::phase_code(table.shot_state()),
            b: table.cue_contact() as u32 as f32,
            c: 0.0,
        });
    }

    fn render(&self, ctx: &EngineContext, out: &mut DrawBuffer) {
        let Some(table) = self.table.as_ref() else {
            return;
        };
        out.fill_rect(Vec2::ZERO, table.bounds(), palette::BACKGROUND);
        table.draw(out);
        ctx.effects.draw(out);
        self.draw_hud(table, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use felt_engine::DrawCommand;

    fn pressed_at(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot::with_pointer(Vec2::new(x, y), true)
    }

    #[test]
    fn init_builds_the_full_table() {
        let mut ctx = EngineContext::new();
        let mut game = PocketPool::new();
        game.init(&mut ctx);

        let table = game.table().unwrap();
        // 14 balls + cue ball + 8 rail segments.
        assert_eq!(table.bodies().len(), 23);
        assert_eq!(table.shots_remaining(), 10);
        assert_eq!(table.score(), 0);
    }

    #[test]
    fn update_emits_hud_events_every_frame() {
        let mut ctx = EngineContext::new();
        let mut game = PocketPool::new();
        game.init(&mut ctx);

        game.update(&mut ctx, &InputSnapshot::idle());
        let kinds: Vec<f32> = ctx.events.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&game_events::SCORE));
        assert!(kinds.contains(&game_events::SHOTS_REMAINING));
        assert!(kinds.contains(&game_events::SHOT_PHASE));
    }

    #[test]
    fn render_paints_background_first_and_hud_text() {
        let mut ctx = EngineContext::new();
        let mut game = PocketPool::new();
        game.init(&mut ctx);

        let mut buf = DrawBuffer::new();
        game.render(&ctx, &mut buf);
        let first = buf.iter().next().unwrap();
        assert!(matches!(first, DrawCommand::Rect { .. }));
        let texts = buf
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(texts, 2);
    }

    #[test]
    fn a_full_shot_plays_out_and_settles() {
        let mut ctx = EngineContext::new();
        let mut game = PocketPool::new();
        game.init(&mut ctx);

        // Strike toward the top row, then release and let it play out.
        game.update(&mut ctx, &pressed_at(600.0, 200.0));
        assert_eq!(
            game.table().unwrap().shot_state(),
            ShotState::ShotInProgress
        );

        let mut settled = false;
        for _ in 0..5000 {
            game.update(&mut ctx, &InputSnapshot::idle());
            ctx.clear_frame_data();
            if game.table().unwrap().shot_state() == ShotState::Idle {
                settled = true;
                break;
            }
        }
        assert!(settled, "balls never settled");
        assert_eq!(game.table().unwrap().shots_remaining(), 9);
    }
}
