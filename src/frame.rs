//! Draw-ready snapshot of one frame
//!
//! The render sink never touches [`GameState`] directly. After every step the
//! driver captures a [`RenderFrame`] listing what to draw, back to front.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{SHEET_COLS, SHEET_ROWS};
use crate::sim::{Entity, GameEvent, GameState, RoundPhase};

/// Horizontal slack around the field inside which entities are still drawn
const DRAW_CULL_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Bullet,
}

/// One drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation frame (sheet column)
    pub frame: u32,
    /// Animation clip (sheet row)
    pub row: u32,
}

/// Layout of a loaded sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteSheet {
    pub image_size: Vec2,
    pub cols: u32,
    pub rows: u32,
}

impl SpriteSheet {
    /// Standard 8x3 character sheet
    pub fn new(image_size: Vec2) -> Self {
        Self {
            image_size,
            cols: SHEET_COLS,
            rows: SHEET_ROWS,
        }
    }

    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.image_size.x / self.cols as f32,
            self.image_size.y / self.rows as f32,
        )
    }

    /// Source rectangle (origin, size) for a sprite's frame/row
    pub fn source_rect(&self, sprite: &Sprite) -> (Vec2, Vec2) {
        let cell = self.cell_size();
        let col = sprite.frame % self.cols;
        let row = sprite.row.min(self.rows - 1);
        (Vec2::new(col as f32 * cell.x, row as f32 * cell.y), cell)
    }
}

/// Parallax layer as the sink needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerOffset {
    pub offset: f32,
    pub offset_y: f32,
}

/// Everything needed to draw one frame and refresh the HUD
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderFrame {
    /// Player first, then enemies, then bullets
    pub sprites: Vec<Sprite>,
    /// Player afterimages, newest first
    pub trail: Vec<Vec2>,
    pub score: u32,
    pub lives: Option<u32>,
    pub phase: RoundPhase,
    pub flash_alpha: f32,
    pub layers: Vec<LayerOffset>,
    pub ground_y: f32,
    /// `None` while the sheet is unavailable; draw placeholder rectangles
    pub sprite_sheet: Option<SpriteSheet>,
    /// Events produced since the previous frame
    pub events: Vec<GameEvent>,
}

impl RenderFrame {
    pub fn capture(
        state: &GameState,
        sprite_sheet: Option<SpriteSheet>,
        events: Vec<GameEvent>,
    ) -> Self {
        let width = state.tuning.field_width;
        let on_screen = |pos: Vec2, size: Vec2| {
            pos.x + size.x >= -DRAW_CULL_MARGIN && pos.x <= width + DRAW_CULL_MARGIN
        };

        let player = &state.player;
        let mut sprites = Vec::with_capacity(1 + state.enemies.len() + state.bullets.len());
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            pos: player.actor.pos,
            size: player.actor.size,
            frame: player.anim.frame,
            row: player.anim.state.row(),
        });

        let enemies = state
            .enemies
            .iter()
            .filter(|e| e.is_active())
            .map(|e| (SpriteKind::Enemy, e.actor()));
        let bullets = state
            .bullets
            .iter()
            .filter(|b| b.is_active())
            .map(|b| (SpriteKind::Bullet, b.actor()));
        sprites.extend(
            enemies
                .chain(bullets)
                .filter(|(_, actor)| on_screen(actor.pos, actor.size))
                .map(|(kind, actor)| Sprite {
                    kind,
                    pos: actor.pos,
                    size: actor.size,
                    frame: 0,
                    row: 0,
                }),
        );

        Self {
            sprites,
            trail: player.trail.iter().copied().collect(),
            score: state.round.score,
            lives: state.round.lives,
            phase: state.round.phase,
            flash_alpha: state.flash.alpha(),
            layers: state
                .layers
                .iter()
                .map(|l| LayerOffset {
                    offset: l.offset,
                    offset_y: l.offset_y,
                })
                .collect(),
            ground_y: state.tuning.ground_y(),
            sprite_sheet,
            events,
        }
    }

    /// Whether the sink must fall back to plain rectangles
    pub fn uses_placeholders(&self) -> bool {
        self.sprite_sheet.is_none()
    }

    pub fn game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }
}
