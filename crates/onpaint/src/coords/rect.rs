use super::Vec2;

/// On-screen box of an element (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Self::from_origin_size(self.origin + by, self.size)
    }

    /// Absolute positioning declarations, in `top, left, width, height` order.
    pub fn to_css(self) -> String {
        format!(
            "top: {}px; left: {}px; width: {}px; height: {}px",
            self.top(),
            self.left(),
            self.width(),
            self.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_css_names() {
        let r = Rect::new(4.0, 8.0, 100.0, 50.0);
        assert_eq!(r.left(), 4.0);
        assert_eq!(r.top(), 8.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn css_drops_trailing_zero_fraction() {
        assert_eq!(
            Rect::new(10.0, 20.0, 300.0, 40.0).to_css(),
            "top: 20px; left: 10px; width: 300px; height: 40px"
        );
    }

    #[test]
    fn css_keeps_fractional_and_negative_values() {
        assert_eq!(
            Rect::new(-2.5, 0.25, 1.5, 0.0).to_css(),
            "top: 0.25px; left: -2.5px; width: 1.5px; height: 0px"
        );
    }

    #[test]
    fn translated_moves_origin_only() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).translated(Vec2::new(10.0, 20.0));
        assert_eq!(r, Rect::new(11.0, 22.0, 3.0, 4.0));
    }

    #[test]
    fn is_finite_rejects_nan() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_finite());
    }
}
