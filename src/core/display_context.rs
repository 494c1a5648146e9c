/// Display context - surface size in physical pixels plus the DPI scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayContext {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Physical pixels per logical point
    pub scale_factor: f32,
}

impl DisplayContext {
    /// Create new display context
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// A minimized window reports a zero dimension; nothing can be drawn
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, 1.0 for an empty surface
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for DisplayContext {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_context_with_dimensions() {
        let ctx = DisplayContext::new(1920, 1080, 2.0);
        assert_eq!(ctx.width, 1920);
        assert_eq!(ctx.height, 1080);
        assert_eq!(ctx.scale_factor, 2.0);
    }

    #[test]
    fn test_aspect() {
        let ctx = DisplayContext::new(1600, 800, 1.0);
        assert_eq!(ctx.aspect(), 2.0);
    }

    #[test]
    fn test_zero_size_is_empty() {
        for (w, h) in [(0, 600), (800, 0), (0, 0)] {
            let ctx = DisplayContext::new(w, h, 1.0);
            assert!(ctx.is_empty());
            assert_eq!(ctx.aspect(), 1.0);
        }
    }

    #[test]
    fn test_from_physical_size() {
        let ctx = DisplayContext::from(winit::dpi::PhysicalSize::new(640, 480));
        assert_eq!((ctx.width, ctx.height), (640, 480));
        assert!(!ctx.is_empty());
    }
}
