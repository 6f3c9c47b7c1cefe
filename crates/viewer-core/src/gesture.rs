use crate::constants::DRAG_THRESHOLD_PX;
use glam::Vec2;

/// Screen-space rectangle of the drawing surface (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client-space point to normalised device coordinates: x and y in
    /// [-1, 1] across the rectangle, y pointing up. `None` for an empty rect.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = ((client.x - self.left) / self.width) * 2.0 - 1.0;
        let y = -((client.y - self.top) / self.height) * 2.0 + 1.0;
        Some(Vec2::new(x, y))
    }
}

/// Result of feeding one pointer-move into a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureMove {
    /// Travel since the previous move (or the press).
    pub delta: Vec2,
    pub dragging: bool,
}

/// How a press/release pair ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    Click,
    Drag,
}

/// Click-versus-drag tracking for a single pointer button.
#[derive(Clone, Copy, Debug)]
pub struct PointerGesture {
    down_pos: Vec2,
    last_pos: Vec2,
    threshold: f32,
    dragging: bool,
    button_down: bool,
}

impl Default for PointerGesture {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_PX)
    }
}

impl PointerGesture {
    pub fn new(threshold: f32) -> Self {
        Self {
            down_pos: Vec2::ZERO,
            last_pos: Vec2::ZERO,
            threshold,
            dragging: false,
            button_down: false,
        }
    }

    pub fn press(&mut self, pos: Vec2) {
        self.down_pos = pos;
        self.last_pos = pos;
        self.dragging = false;
        self.button_down = true;
    }

    /// Track a move. Once the pointer strays `threshold` pixels from the
    /// press point the gesture is a drag until the next press.
    pub fn move_to(&mut self, pos: Vec2) -> Option<GestureMove> {
        if !self.button_down {
            return None;
        }
        if pos.distance(self.down_pos) >= self.threshold {
            self.dragging = true;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(GestureMove {
            delta,
            dragging: self.dragging,
        })
    }

    /// Finish the gesture. A release with no preceding press is judged by
    /// whatever the last press left behind.
    pub fn release(&mut self) -> GestureEnd {
        self.button_down = false;
        if self.dragging {
            GestureEnd::Drag
        } else {
            GestureEnd::Click
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down
    }

    pub fn down_pos(&self) -> Vec2 {
        self.down_pos
    }

    pub fn last_pos(&self) -> Vec2 {
        self.last_pos
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
