//=========================================================================
// Palette Image
//=========================================================================
//
// Small palette-indexed bitmap used for indicator glyphs and as an
// off-screen draw target.
//
// Colour 0 is transparent. Transparent blits skip it and clip to the
// destination.
//
//=========================================================================

//=== DrawTarget ==========================================================

/// Surface the render pipeline hands to draw callbacks.
pub trait DrawTarget {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Composites `image` at (`x`, `y`), skipping transparent pixels.
    fn draw_transparent_image(&mut self, image: &Image, x: i32, y: i32);
}

/// Palette index treated as fully transparent.
pub const TRANSPARENT: u8 = 0;

//=== Image ===============================================================

/// Palette-indexed bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

impl Image {
    //--- Construction -----------------------------------------------------

    /// Creates a fully transparent image.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is negative.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width >= 0 && height >= 0,
            "Image size must not be negative, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; (width * height) as usize],
        }
    }

    /// Builds an image from rows of hex digits; `.` is transparent.
    ///
    /// Rows shorter than the first row are padded with transparency.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as i32;
        let mut image = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate().take(width as usize) {
                let color = ch.to_digit(16).unwrap_or(0) as u8;
                image.set_pixel(x as i32, y as i32, color);
            }
        }

        image
    }

    //--- Pixel Access -----------------------------------------------------

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the colour at (`x`, `y`), or transparent outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        match self.offset(x, y) {
            Some(offset) => self.pixels[offset],
            None => TRANSPARENT,
        }
    }

    /// Sets a pixel. Writes outside the image are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
        }
    }

    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Counts pixels of `color`.
    pub fn count_color(&self, color: u8) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    //--- Transforms -------------------------------------------------------

    /// Returns a copy rotated a quarter turn clockwise.
    pub fn rotated_cw(&self) -> Self {
        let mut rotated = Self::new(self.height, self.width);
        for y in 0..rotated.height {
            for x in 0..rotated.width {
                rotated.set_pixel(x, y, self.pixel(y, self.height - 1 - x));
            }
        }
        rotated
    }

    /// Replaces every pixel of colour `from` with `to`.
    pub fn replace_color(&mut self, from: u8, to: u8) {
        for pixel in &mut self.pixels {
            if *pixel == from {
                *pixel = to;
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

impl DrawTarget for Image {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn draw_transparent_image(&mut self, image: &Image, x: i32, y: i32) {
        for sy in 0..image.height {
            for sx in 0..image.width {
                let color = image.pixel(sx, sy);
                if color != TRANSPARENT {
                    self.set_pixel(x.saturating_add(sx), y.saturating_add(sy), color);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
