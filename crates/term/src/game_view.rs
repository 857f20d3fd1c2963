//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::effects::{ClearEffects, EffectKind};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, GRID_HEIGHT, GRID_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const SPARKLE: Rgb = Rgb::new(255, 255, 255);

/// Drawn for an occupied cell whose color is unknown.
pub const NEUTRAL: Rgb = Rgb::new(128, 128, 128);

const CONTROLS: [(&str, &str); 6] = [
    ("←/→", "move"),
    ("↓", "down"),
    ("↑", "rotate"),
    ("Space", "drop"),
    ("N/R", "new game"),
    ("Q", "quit"),
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Display color of a block; missing colors render neutral.
pub fn block_rgb(color: Option<Color>) -> Rgb {
    color.map(|c| Rgb::from_tuple(c.rgb())).unwrap_or(NEUTRAL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board geometry for one frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, None, viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: Option<&ClearEffects>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let board_px_h = (GRID_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => {
                        self.draw_board_cell(fb, frame, x as u16, y as u16, block_rgb(Some(*color)))
                    }
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, frame, &active);
        }

        if let Some(effects) = effects {
            self.draw_effects(fb, frame, effects);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            self.draw_game_over(fb, frame, snap);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: &ClearEffects,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_effects(snap, Some(effects), viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, fg: Rgb) {
        self.fill_cell_rect(fb, frame, x, y, '█', CellStyle::new(fg, BOARD_BG).bold());
    }

    /// Active piece cells above the top edge are not drawn.
    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &Piece) {
        for (x, y, color) in piece.board_cells() {
            if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                self.draw_board_cell(fb, frame, x as u16, y as u16, block_rgb(Some(color)));
            }
        }
    }

    fn draw_effects(&self, fb: &mut FrameBuffer, frame: Frame, effects: &ClearEffects) {
        for effect in effects.iter() {
            if effect.row >= GRID_HEIGHT || effect.col >= GRID_WIDTH {
                continue;
            }
            let tint = match effect.kind {
                EffectKind::Sparkle if effect.has_particles() => SPARKLE,
                _ => block_rgb(Some(effect.color)),
            };
            let style = CellStyle::new(tint.over(BOARD_BG, effect.alpha()), BOARD_BG).bold();
            self.fill_cell_rect(
                fb,
                frame,
                effect.col as u16,
                effect.row as u16,
                effect.glyph(),
                style,
            );
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, &snap.next);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, snap.elapsed_secs, value);
        fb.put_str(end, y, "s", value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, snap.drop_interval_ms, value);
        fb.put_str(end, y, "ms", value);
        y = y.saturating_add(2);

        let key = CellStyle::new(Rgb::new(160, 200, 255), SCREEN_BG);
        let dim = value.dim();
        for (keys, what) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, keys, key);
            fb.put_str(panel_x + 6, y, what, dim);
            y = y.saturating_add(1);
        }
    }

    /// Draw the next piece in a box sized for the largest shape.
    ///
    /// Returns the row below the box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) -> u16 {
        const BOX_CELLS: u16 = 4;
        let box_w = BOX_CELLS * self.cell_w;
        let box_h = 2 * self.cell_h;
        fb.fill_rect(x, y, box_w, box_h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));

        let shape = piece.shape();
        let offset_x = (BOX_CELLS - shape.cols() as u16) * self.cell_w / 2;
        for (r, c) in shape.occupied() {
            let style = CellStyle::new(block_rgb(piece.color_at(r, c)), BOARD_BG).bold();
            fb.fill_rect(
                x + offset_x + c as u16 * self.cell_w,
                y + r as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
        y.saturating_add(box_h)
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let text = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);

        let lines: [(&str, Option<u32>, &str, CellStyle); 5] = [
            ("GAME OVER", None, "", title),
            ("SCORE ", Some(snap.score), "", text),
            ("LEVEL ", Some(snap.level), "", text),
            ("TIME ", Some(snap.elapsed_secs), "s", text),
            ("N/R new game", None, "", text.dim()),
        ];

        let box_w = lines
            .iter()
            .map(|(head, n, tail, _)| line_width(head, *n, tail))
            .max()
            .unwrap_or(0)
            + 4;
        let box_h = lines.len() as u16 + 2;
        let box_x = frame.x.saturating_add(frame.w.saturating_sub(box_w) / 2);
        let box_y = frame.y.saturating_add(frame.h.saturating_sub(box_h) / 2);
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', text);

        for (i, (head, n, tail, style)) in lines.iter().enumerate() {
            let w = line_width(head, *n, tail);
            let x = frame.x.saturating_add(frame.w.saturating_sub(w) / 2);
            let y = box_y + 1 + i as u16;
            let mut end = fb.put_str(x, y, head, *style);
            if let Some(n) = n {
                end = fb.put_u32(end, y, *n, *style);
            }
            fb.put_str(end, y, tail, *style);
        }
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn line_width(head: &str, n: Option<u32>, tail: &str) -> u16 {
    let digits = n.map(digit_count).unwrap_or(0);
    head.chars().count() as u16 + digits + tail.chars().count() as u16
}
