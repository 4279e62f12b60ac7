use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame buffer
/// The Chip-8 display is composed of 64x32 black/white pixels, stored as 1/0 and indexed as
/// `[y][x]`. Only the clear and draw instructions ever write to it.
#[derive(Copy, Clone, PartialEq)]
pub struct FrameBuffer {
    pixels: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at (x, y) is lit; anything off-screen is unlit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .map_or(false, |&pixel| pixel == 1)
    }

    /// XORs an 8 pixel wide sprite onto the buffer with its top left corner at (x, y).
    ///
    /// Both the starting position and every pixel of the sprite wrap around the edges, so a
    /// sprite at x=63 continues in column 0. Returns true if any lit pixel was erased.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let left = x as usize % DISPLAY_WIDTH;
        let top = y as usize % DISPLAY_HEIGHT;
        let mut collision = 0;

        for (row, byte) in sprite.iter().enumerate() {
            let y = (top + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let x = (left + bit) % DISPLAY_WIDTH;
                let pixel = (byte >> (7 - bit)) & 1;
                collision |= pixel & self.pixels[y][x];
                self.pixels[y][x] ^= pixel;
            }
        }

        collision == 1
    }

    /// Rows of 1/0 pixels, top to bottom
    pub fn rows(&self) -> &[[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    /// One line per row, '#' for lit pixels
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.pixels.iter() {
            let line: String = row
                .iter()
                .map(|&pixel| if pixel == 1 { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_rows_top_to_bottom() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(1, 1, &[0xF0, 0x90]);
        assert!(!collision);
        assert_eq!(frame.rows()[1][0..6], [0, 1, 1, 1, 1, 0]);
        assert_eq!(frame.rows()[2][0..6], [0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_xors_existing_pixels() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(2, 0, &[0b0101_0000]);
        // 0 1 0 1 -> Set
        // 1 1 0 0 -> Draw xor
        let collision = frame.draw_sprite(2, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(frame.rows()[0][2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_double_draw_restores_buffer() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(10, 10, &[0x3C]);
        let before = frame;
        assert!(!frame.draw_sprite(20, 5, &[0xFF, 0x81, 0xFF]));
        assert!(frame.draw_sprite(20, 5, &[0xFF, 0x81, 0xFF]));
        assert_eq!(frame, before);
    }

    #[test]
    fn test_wraps_horizontally() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(63, 31, &[0xC0]);
        assert!(frame.pixel(63, 31));
        assert!(frame.pixel(0, 31));
        assert_eq!(
            frame.rows().iter().flatten().filter(|&&pixel| pixel == 1).count(),
            2
        );
    }

    #[test]
    fn test_wraps_vertically() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(frame.pixel(0, 31));
        assert!(frame.pixel(0, 0));
    }

    #[test]
    fn test_start_position_wraps() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(frame.pixel(3, 2));
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF; 15]);
        frame.clear();
        assert_eq!(frame, FrameBuffer::new());
    }

    #[test]
    fn test_pixel_off_screen_is_unlit() {
        let frame = FrameBuffer::new();
        assert!(!frame.pixel(64, 0));
        assert!(!frame.pixel(0, 32));
    }
}
