/// Pixel layout of a rendered QR code: the symbol, surrounded by a quiet zone of `border` modules
/// on every side, where each module is a square of `box_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    border: usize,
    width: usize,
    box_size: usize,
    pixel_size: usize,
}

impl Geometry {
    /// Compute the geometry of a symbol `width` modules wide.
    /// # Example
    /// ```
    /// use qrpix_core::Geometry;
    /// let geometry = Geometry::new(2, 21, 10);
    /// assert_eq!(geometry.pixel_size(), 250);
    /// ```
    /// # Panics
    /// Panics if the pixel size overflows `usize`.
    pub fn new(border: usize, width: usize, box_size: usize) -> Self {
        let pixel_size = border
            .checked_mul(2)
            .and_then(|quiet_zone| quiet_zone.checked_add(width))
            .and_then(|modules| modules.checked_mul(box_size))
            .unwrap_or_else(|| {
                panic!(
                    "pixel size overflow: border {}, width {}, box size {}",
                    border, width, box_size
                )
            });
        Self {
            border,
            width,
            box_size,
            pixel_size,
        }
    }

    /// Quiet zone width in modules.
    pub fn border(&self) -> usize {
        self.border
    }

    /// Symbol width in modules, quiet zone excluded.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixels per module.
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    /// Side of the whole square image in pixels.
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Get the box of pixels covering the module at `(row, col)` of the symbol.
    /// # Example
    /// ```
    /// use qrpix_core::{Geometry, PixelBox};
    /// let geometry = Geometry::new(2, 21, 10);
    /// assert_eq!(geometry.pixel_box(0, 1), PixelBox { x: 30, y: 20, size: 10 });
    /// ```
    pub fn pixel_box(&self, row: usize, col: usize) -> PixelBox {
        PixelBox {
            x: (col + self.border) * self.box_size,
            y: (row + self.border) * self.box_size,
            size: self.box_size,
        }
    }
}

/// Square of pixels with its upper-left corner at (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x: usize,
    pub y: usize,
    pub size: usize,
}

impl PixelBox {
    /// Check whether pixel (`x`, `y`) lies inside the box.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x..self.x + self.size).contains(&x) && (self.y..self.y + self.size).contains(&y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pixel_size() {
        for (border, width, box_size) in [(0, 21, 1), (4, 21, 1), (2, 177, 3), (1, 25, 10)] {
            let geometry = Geometry::new(border, width, box_size);
            assert_eq!(geometry.pixel_size(), (width + 2 * border) * box_size);
        }
    }

    #[test]
    fn test_zero_box_size_is_empty() {
        assert_eq!(Geometry::new(4, 21, 0).pixel_size(), 0);
    }

    #[test]
    #[should_panic(expected = "pixel size overflow")]
    fn test_overflow() {
        Geometry::new(usize::MAX / 2, 21, 1);
    }

    #[test]
    fn test_pixel_box_corners() {
        let geometry = Geometry::new(4, 21, 3);
        assert_eq!(geometry.pixel_box(0, 0), PixelBox { x: 12, y: 12, size: 3 });
        let last = geometry.pixel_box(20, 20);
        assert_eq!(last.x + last.size, geometry.pixel_size() - 12);
        assert!(last.contains(74, 74));
        assert!(!last.contains(75, 74));
    }
}
