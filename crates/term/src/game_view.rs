//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! The playfield is drawn the way the player perceives it: rotated
//! counter-clockwise by the gravity angle, snapped to whole quarter turns, so
//! gravity always points to the bottom of the screen once a transition has
//! finished. This module is pure (no I/O).

use crate::core::shapes::offsets;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GravityDirection, ShapeKind};

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

const FIELD_BG: Rgb = Rgb::new(24, 24, 34);
const PANEL_WIDTH: u16 = 16;

pub struct GameView {
    /// Terminal columns per grid cell.
    cell_w: u16,
    /// Terminal rows per grid cell.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as they are wide.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Grid cell → screen cell mapping for one presentation rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    grid_w: i32,
    grid_h: i32,
    quarter_turns: u8,
}

impl Projection {
    pub fn new(grid_w: u16, grid_h: u16, quarter_turns: u8) -> Self {
        Self {
            grid_w: grid_w as i32,
            grid_h: grid_h as i32,
            quarter_turns: quarter_turns % 4,
        }
    }

    /// Width and height of the field as seen on screen, in cells.
    pub fn screen_size(&self) -> (i32, i32) {
        if self.quarter_turns % 2 == 0 {
            (self.grid_w, self.grid_h)
        } else {
            (self.grid_h, self.grid_w)
        }
    }

    /// Screen column and row (row 0 at the top) of grid cell `(x, y)`.
    pub fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        let (w, h) = (self.grid_w, self.grid_h);
        // Rotate counter-clockwise inside the bounding box, +y up.
        let (sx, sy) = match self.quarter_turns {
            0 => (x, y),
            1 => (h - 1 - y, x),
            2 => (w - 1 - x, h - 1 - y),
            _ => (y, w - 1 - x),
        };
        let (_, screen_h) = self.screen_size();
        (sx, screen_h - 1 - sy)
    }

    /// Inverse of [`Projection::to_screen`].
    pub fn to_grid(&self, col: i32, row: i32) -> (i32, i32) {
        let (w, h) = (self.grid_w, self.grid_h);
        let (_, screen_h) = self.screen_size();
        let (sx, sy) = (col, screen_h - 1 - row);
        match self.quarter_turns {
            0 => (sx, sy),
            1 => (sy, h - 1 - sx),
            2 => (w - 1 - sx, h - 1 - sy),
            _ => (w - 1 - sy, sx),
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered field for a snapshot, in terminal cells.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let (w, h) = Projection::new(snap.width, snap.height, snap.gravity.quarter_turns).screen_size();
        let side = |cells: i32, scale: u16| {
            u16::try_from(cells)
                .unwrap_or(u16::MAX)
                .saturating_mul(scale)
                .saturating_add(2)
        };
        (side(w, self.cell_w), side(h, self.cell_h))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let projection = Projection::new(snap.width, snap.height, snap.gravity.quarter_turns);
        let (frame_w, frame_h) = self.frame_size(snap);
        let total_w = frame_w.saturating_add(2 + PANEL_WIDTH);
        let start_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let empty = CellStyle::new(Rgb::new(70, 70, 84), FIELD_BG).dim();
        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', empty);
        fb.draw_box(start_x, start_y, frame_w, frame_h, CellStyle::default());

        for x in 0..snap.width as i32 {
            for y in 0..snap.height as i32 {
                let (col, row) = projection.to_screen(x, y);
                match snap.kind_at(x, y) {
                    Some(kind) => {
                        let style = CellStyle::new(shape_color(kind), FIELD_BG);
                        let style = if snap.is_active_cell(x, y) { style.bold() } else { style };
                        self.fill_cell(fb, start_x, start_y, col, row, '█', style);
                    }
                    None => self.fill_cell(fb, start_x, start_y, col, row, '·', empty),
                }
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if snap.game_over {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(120, 20, 20)).bold();
            let mid_y = start_y.saturating_add(frame_h / 2);
            fb.put_str_centered(start_x, mid_y, frame_w, " GAME OVER ", style);
            let hint = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(0, 0, 0));
            fb.put_str_centered(start_x, mid_y.saturating_add(1), frame_w, " R to restart ", hint);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: i32,
        row: i32,
        ch: char,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 {
            return;
        }
        let offset = |cell: i32, scale: u16| {
            u16::try_from(cell).unwrap_or(u16::MAX).saturating_mul(scale)
        };
        let px = start_x.saturating_add(1).saturating_add(offset(col, self.cell_w));
        let py = start_y.saturating_add(1).saturating_add(offset(row, self.cell_h));
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "GRAVITY", label);
        let end = fb.put_str(panel_x, y + 1, gravity_arrow(snap.gravity.direction), value);
        fb.put_str(end + 1, y + 1, direction_label(snap.gravity.direction), value);
        y += 3;

        if snap.gravity.rotating {
            fb.put_str(panel_x, y, "ROTATING", label.dim());
        } else if !snap.game_over {
            fb.put_str(panel_x, y, "ROTATE IN", label);
            let end = fb.put_u32(panel_x, y + 1, snap.gravity.seconds_until_change, value);
            fb.put_char(end, y + 1, 's', value);
        }
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, snap.next, panel_x, y + 1);
    }

    /// Next shape in its spawn orientation, 2x2 terminal cells per block.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: ShapeKind, x: u16, y: u16) {
        let style = CellStyle::new(shape_color(kind), Rgb::new(0, 0, 0));
        let cells = offsets(kind, 0);
        let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
        let max_y = cells.iter().map(|c| c.y).max().unwrap_or(0);
        for cell in cells {
            let col = x + ((cell.x - min_x) as u16) * 2;
            let row = y + (max_y - cell.y) as u16;
            fb.fill_rect(col, row, 2, 1, '█', style);
        }
    }
}

pub fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

fn gravity_arrow(direction: GravityDirection) -> &'static str {
    match direction {
        GravityDirection::Down => "↓",
        GravityDirection::Left => "←",
        GravityDirection::Up => "↑",
        GravityDirection::Right => "→",
    }
}

fn direction_label(direction: GravityDirection) -> &'static str {
    match direction {
        GravityDirection::Down => "DOWN",
        GravityDirection::Left => "LEFT",
        GravityDirection::Up => "UP",
        GravityDirection::Right => "RIGHT",
    }
}
