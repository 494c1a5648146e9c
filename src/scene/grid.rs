use crate::math::hex_to_linear;
use crate::types::LineVertex;

pub const DEFAULT_GRID_SIZE: f32 = 100.0;
pub const DEFAULT_GRID_DIVISIONS: u32 = 30;

/// Reference grid on the XZ plane, drawn as a line list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    /// Color of the x = 0 and z = 0 lines
    pub center_color: u32,
    pub line_color: u32,
}

impl GridHelper {
    pub fn new(size: f32, divisions: u32, center_color: u32, line_color: u32) -> Self {
        Self {
            size,
            divisions: divisions.max(1),
            center_color,
            line_color,
        }
    }

    /// Number of lines parallel to one axis
    pub fn lines_per_axis(&self) -> u32 {
        self.divisions + 1
    }

    /// Index of the line through the origin; only exists for even divisions
    pub fn center_index(&self) -> Option<u32> {
        (self.divisions % 2 == 0).then_some(self.divisions / 2)
    }

    pub fn vertices(&self) -> Vec<LineVertex> {
        let half = self.size * 0.5;
        let step = self.size / self.divisions as f32;
        let center = hex_to_linear(self.center_color);
        let line = hex_to_linear(self.line_color);
        let center_index = self.center_index();

        let mut vertices = Vec::with_capacity(self.lines_per_axis() as usize * 4);
        for i in 0..self.lines_per_axis() {
            let k = -half + i as f32 * step;
            let color = if Some(i) == center_index { center } else { line };

            // line parallel to Z at x = k, then parallel to X at z = k
            vertices.push(LineVertex::new([k, 0.0, -half], color));
            vertices.push(LineVertex::new([k, 0.0, half], color));
            vertices.push(LineVertex::new([-half, 0.0, k], color));
            vertices.push(LineVertex::new([half, 0.0, k], color));
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisions_clamped_to_one() {
        let grid = GridHelper::new(10.0, 0, 0, 0);
        assert_eq!(grid.divisions, 1);
        assert_eq!(grid.vertices().len(), 8);
    }

    #[test]
    fn test_center_index_even_and_odd() {
        assert_eq!(GridHelper::new(10.0, 10, 0, 0).center_index(), Some(5));
        assert_eq!(GridHelper::new(10.0, 30, 0, 0).center_index(), Some(15));
        assert_eq!(GridHelper::new(10.0, 7, 0, 0).center_index(), None);
    }
}
