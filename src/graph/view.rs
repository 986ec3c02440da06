//! Pan/zoom view transform
//!
//! A single affine transform applied uniformly to the whole tree. Panning
//! and zooming never touch node collapse state and never trigger layout
//! recomputation; the transform is simply re-applied.

/// Zoom bounds matching typical wheel-zoom behavior
const MIN_SCALE: f64 = 0.1;
const MAX_SCALE: f64 = 10.0;

/// The current pan/zoom transform of a rendered tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewState {
    /// Shift the view by a pointer drag delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Zoom by `factor`, keeping the pointer position (px, py) fixed on
    /// screen.
    pub fn zoom_at(&mut self, factor: f64, px: f64, py: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = new_scale / self.scale;
        self.translate_x = px - (px - self.translate_x) * applied;
        self.translate_y = py - (py - self.translate_y) * applied;
        self.scale = new_scale;
    }

    /// Back to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map a layout-space point to screen space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }
}
