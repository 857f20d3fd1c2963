//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer, which is then diffed and flushed to the terminal. There are no
//! widgets or layout engines; the board is drawn two columns per cell to
//! compensate for the terminal glyph aspect ratio.

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetjeweled_core as core;
pub use tetjeweled_types as types;

pub use effects::{ClearEffect, ClearEffects, EffectKind, EFFECT_FRAMES};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_rgb, AnchorY, GameView, Viewport, NEUTRAL};
pub use renderer::{encode_diff_into, encode_full_into, restore_terminal, TerminalRenderer};
