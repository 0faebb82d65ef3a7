use tracing::trace;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// 64x32 monochrome pixel grid, row-major at `y * WIDTH + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bit_buffer: [bool; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.bit_buffer.chunks(WIDTH) {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [false; WIDTH * HEIGHT],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [false; WIDTH * HEIGHT];
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.bit_buffer[(y % HEIGHT) * WIDTH + (x % WIDTH)]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.bit_buffer
    }

    /// Flips one pixel and reports whether it went from on to off.
    fn toggle(&mut self, x: usize, y: usize) -> bool {
        let index = (y % HEIGHT) * WIDTH + (x % WIDTH);
        let previous = self.bit_buffer[index];
        self.bit_buffer[index] = !previous;
        previous
    }

    /// XORs an 8-pixel-wide sprite onto the grid.
    ///
    /// The origin wraps once on entry; each pixel then wraps on its own, so a
    /// sprite hanging off the right or bottom edge reappears on the opposite
    /// side. Returns true if any lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        trace!("painting sprite at ({x}, {y}): {sprite:02x?}");
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            for j in 0..8 {
                if (row >> (7 - j)) & 1 == 1 {
                    vf |= self.toggle(x + j, y + i);
                }
            }
        }
        vf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dark() {
        let fb = FrameBuffer::new();
        assert!(fb.pixels().iter().all(|&p| !p));
        assert_eq!(fb.pixels().len(), WIDTH * HEIGHT);
    }

    #[test]
    fn paint_sets_msb_first() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.paint(0, 0, &[0b1010_0000]));
        assert!(fb.is_on(0, 0));
        assert!(!fb.is_on(1, 0));
        assert!(fb.is_on(2, 0));
    }

    #[test]
    fn overlapping_paint_reports_collision() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.paint(10, 5, &[0xFF]));
        assert!(fb.paint(10, 5, &[0x80]));
        assert!(!fb.is_on(10, 5));
        assert!(fb.is_on(11, 5));
    }

    #[test]
    fn collision_is_sticky_across_rows() {
        let mut fb = FrameBuffer::new();
        fb.paint(0, 0, &[0x80]);
        // first row collides, second row does not
        assert!(fb.paint(0, 0, &[0x80, 0x80]));
    }

    #[test]
    fn horizontal_wrap_is_per_pixel() {
        let mut fb = FrameBuffer::new();
        fb.paint(60, 0, &[0xFF]);
        for col in [60, 61, 62, 63, 0, 1, 2, 3] {
            assert!(fb.is_on(col, 0), "column {col}");
        }
        assert!(!fb.is_on(4, 0));
        assert!(!fb.is_on(59, 0));
        assert!(!fb.is_on(0, 1));
    }

    #[test]
    fn vertical_wrap_is_per_row() {
        let mut fb = FrameBuffer::new();
        fb.paint(0, 31, &[0x80, 0x80, 0x80]);
        assert!(fb.is_on(0, 31));
        assert!(fb.is_on(0, 0));
        assert!(fb.is_on(0, 1));
    }

    #[test]
    fn origin_wraps_on_entry() {
        let mut fb = FrameBuffer::new();
        fb.paint(64 + 3, 32 + 2, &[0x80]);
        assert!(fb.is_on(3, 2));
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut fb = FrameBuffer::new();
        fb.paint(0, 0, &[0xFF; 15]);
        fb.clear_buffer();
        assert_eq!(fb, FrameBuffer::new());
    }
}
