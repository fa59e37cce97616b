//! Page-level geometry.

use serde::{Deserialize, Serialize};

/// Display size of a page in PDF user-space units, treated as CSS pixels.
///
/// Rotation has already been applied: a `/Rotate 90` Letter page reports
/// 792 x 612.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRect {
    pub width: f32,
    pub height: f32,
}

impl PageRect {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// US Letter (8.5 x 11 inches), used when a page declares no box.
    pub const fn letter() -> Self {
        Self::new(612.0, 792.0)
    }
}

impl Default for PageRect {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rect() {
        let letter = PageRect::letter();
        assert_eq!(letter.width, 612.0);
        assert_eq!(letter.height, 792.0);
        assert_eq!(PageRect::default(), letter);
    }
}
