//! Dense row-major pixel raster.

use crate::{Color, Error, Result};

/// A width × height raster of colors, row-major from the top-left.
///
/// One render pass owns the grid exclusively and writes every cell exactly
/// once; afterwards it is read-only input for the image writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Create a grid filled with black. Zero-sized grids are rejected.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        })
    }

    /// Assemble a grid from an already-populated row-major buffer.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Rows top to bottom, each a `width`-long slice.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Flat row-major pixel buffer.
    pub fn as_raw(&self) -> &[Color] {
        &self.pixels
    }
}
