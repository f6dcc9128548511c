//! Brute-force Voronoi diagram rendering.
//!
//! Every pixel of a grid takes the color of its nearest seed under a chosen
//! distance metric. The renderer is deliberately O(pixels × seeds) with no
//! spatial index: a correctness baseline, parallelized across rows with
//! Rayon and deterministic regardless of thread count.

mod grid;
mod ppm;
mod render;
mod seed;

pub use grid::PixelGrid;
pub use ppm::{save, write};
pub use render::{render, Metric};
pub use seed::{
    gradient_horizontal, gradient_vertical, random_colors, Color, Point, Seed, SeedSet,
};

/// Error type for Voronoi operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no seeds provided")]
    EmptySeedSet,

    #[error("degenerate grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("color channel {channel} out of range: {value} (expected 0..=255)")]
    ChannelOutOfRange { channel: &'static str, value: i32 },

    #[error("unknown metric {0:?} (expected euclidean or manhattan)")]
    UnknownMetric(String),

    #[error("writing {dest}: {source}")]
    Io {
        dest: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
