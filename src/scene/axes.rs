use crate::math::hex_to_linear;
use crate::types::LineVertex;

pub const DEFAULT_AXES_SIZE: f32 = 50.0;
/// Lift above the grid plane
pub const AXES_Y_OFFSET: f32 = 0.03;

const X_COLOR: u32 = 0xff0000;
const Y_COLOR: u32 = 0x00ff00;
const Z_COLOR: u32 = 0x0000ff;

/// X/Y/Z axis lines from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesHelper {
    pub size: f32,
    pub y_offset: f32,
}

impl AxesHelper {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            y_offset: AXES_Y_OFFSET,
        }
    }

    pub fn vertices(&self) -> Vec<LineVertex> {
        let o = [0.0, self.y_offset, 0.0];
        let s = self.size;
        let y = self.y_offset;
        vec![
            LineVertex::new(o, hex_to_linear(X_COLOR)),
            LineVertex::new([s, y, 0.0], hex_to_linear(X_COLOR)),
            LineVertex::new(o, hex_to_linear(Y_COLOR)),
            LineVertex::new([0.0, y + s, 0.0], hex_to_linear(Y_COLOR)),
            LineVertex::new(o, hex_to_linear(Z_COLOR)),
            LineVertex::new([0.0, y, s], hex_to_linear(Z_COLOR)),
        ]
    }
}

impl Default for AxesHelper {
    fn default() -> Self {
        Self::new(DEFAULT_AXES_SIZE)
    }
}
