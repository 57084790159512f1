/// Drawable size of the current surface, in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height.
    ///
    /// A degenerate viewport (minimized window) reports 1.0 so projection
    /// matrices stay finite.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(Viewport::new(1280.0, 720.0).aspect(), 1280.0 / 720.0);
    }

    #[test]
    fn degenerate_viewport_has_unit_aspect() {
        assert_eq!(Viewport::new(0.0, 720.0).aspect(), 1.0);
        assert_eq!(Viewport::new(640.0, 0.0).aspect(), 1.0);
        assert_eq!(Viewport::new(f32::NAN, 10.0).aspect(), 1.0);
    }
}
