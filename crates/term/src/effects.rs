//! Clear effects: short-lived overlays for removed cells.
//!
//! Match cells sparkle, line cells explode. Each effect starts fully opaque
//! and loses 0.05 alpha per rendered frame, so it lasts [`EFFECT_FRAMES`]
//! frames. The first half shows particles, the second half a fading block.
//! Effects are advanced only by the render loop and never touch game state.

use crate::types::{ClearEvent, ClearKind, Color};

/// Frames an effect stays visible (alpha 1.0 down to 0.05).
pub const EFFECT_FRAMES: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Sparkle,
    Explosion,
}

impl From<ClearKind> for EffectKind {
    fn from(kind: ClearKind) -> Self {
        match kind {
            ClearKind::Match => EffectKind::Sparkle,
            ClearKind::Line => EffectKind::Explosion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearEffect {
    pub row: u8,
    pub col: u8,
    pub color: Color,
    pub kind: EffectKind,
    frames_left: u8,
}

impl ClearEffect {
    pub fn from_event(event: &ClearEvent) -> Self {
        Self {
            row: event.row,
            col: event.col,
            color: event.color,
            kind: event.kind.into(),
            frames_left: EFFECT_FRAMES,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.frames_left as f32 / EFFECT_FRAMES as f32
    }

    /// Frames rendered since the effect started
    pub fn age(&self) -> u8 {
        EFFECT_FRAMES - self.frames_left
    }

    pub fn has_particles(&self) -> bool {
        self.alpha() > 0.5
    }

    pub fn glyph(&self) -> char {
        let age = self.age() as usize;
        match (self.kind, self.has_particles()) {
            (EffectKind::Sparkle, true) => ['✦', '✧'][age % 2],
            (EffectKind::Explosion, true) => ['✸', '✺', '∗'][age % 3],
            (_, false) if self.alpha() > 0.25 => '▒',
            (_, false) => '░',
        }
    }
}

/// All live clear effects
#[derive(Debug, Clone, Default)]
pub struct ClearEffects {
    active: Vec<ClearEffect>,
}

impl ClearEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_events(&mut self, events: &[ClearEvent]) {
        self.active.extend(events.iter().map(ClearEffect::from_event));
    }

    /// Advance one frame and drop finished effects.
    pub fn step(&mut self) {
        for effect in &mut self.active {
            effect.frames_left = effect.frames_left.saturating_sub(1);
        }
        self.active.retain(|e| e.frames_left > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClearEffect> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
