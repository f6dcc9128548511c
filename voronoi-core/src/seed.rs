//! Seed and color types, plus randomized seed-set generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Error, Result};

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// 24-bit RGB color, no alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from wide integer channels, rejecting values outside
    /// `0..=255` rather than clamping. Color functions are caller-supplied,
    /// so a bad channel surfaces as an error instead of a silently wrong
    /// pixel.
    pub fn try_from_channels(channels: [i32; 3]) -> Result<Self> {
        const NAMES: [&str; 3] = ["red", "green", "blue"];
        for (value, channel) in channels.into_iter().zip(NAMES) {
            if !(0..=255).contains(&value) {
                return Err(Error::ChannelOutOfRange { channel, value });
            }
        }
        Ok(Self::new(
            channels[0] as u8,
            channels[1] as u8,
            channels[2] as u8,
        ))
    }

    /// Clamp wide integer channels into range. Explicit opt-in to
    /// saturation, for callers that prefer it over an error.
    pub fn saturating(channels: [i32; 3]) -> Self {
        Self::new(
            channels[0].clamp(0, 255) as u8,
            channels[1].clamp(0, 255) as u8,
            channels[2].clamp(0, 255) as u8,
        )
    }
}

/// A labeled reference point: one Voronoi region's anchor and color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub position: Point,
    pub color: Color,
}

impl Seed {
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }
}

/// Ordered, immutable collection of seeds.
///
/// Order is irrelevant to which seed is nearest, but it decides ties, so it
/// must be stable for a fixed RNG sequence.
#[derive(Debug, Clone)]
pub struct SeedSet {
    seeds: Vec<Seed>,
}

impl SeedSet {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self { seeds }
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
        self.seeds.iter()
    }

    pub fn as_slice(&self) -> &[Seed] {
        &self.seeds
    }

    /// Generate `count` seeds at random positions inside `width`×`height`,
    /// colored by `color_fn`. The RNG is passed in so callers control
    /// reproducibility; a fixed RNG sequence yields the same set in the
    /// same order.
    pub fn generate(
        count: usize,
        width: u32,
        height: u32,
        mut color_fn: impl FnMut(Point) -> [i32; 3],
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        if count == 0 {
            return Err(Error::EmptySeedSet);
        }

        let mut seeds = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Point::new(rng.gen_range(0..width), rng.gen_range(0..height));
            let color = Color::try_from_channels(color_fn(position))?;
            seeds.push(Seed::new(position, color));
        }
        Ok(Self::new(seeds))
    }

    /// Generate from a fixed `u64` seed via a ChaCha8 RNG, for reproducible
    /// runs.
    pub fn random(
        count: usize,
        width: u32,
        height: u32,
        color_fn: impl FnMut(Point) -> [i32; 3],
        rng_seed: u64,
    ) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        Self::generate(count, width, height, color_fn, &mut rng)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> i32 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as i32
}

/// Left-to-right gradient between two colors across `width` columns.
pub fn gradient_horizontal(begin: Color, end: Color, width: u32) -> impl Fn(Point) -> [i32; 3] {
    move |p| {
        let t = f64::from(p.x) / f64::from(width);
        [
            lerp(begin.red, end.red, t),
            lerp(begin.green, end.green, t),
            lerp(begin.blue, end.blue, t),
        ]
    }
}

/// Top-to-bottom gradient between two colors across `height` rows.
pub fn gradient_vertical(begin: Color, end: Color, height: u32) -> impl Fn(Point) -> [i32; 3] {
    move |p| {
        let t = f64::from(p.y) / f64::from(height);
        [
            lerp(begin.red, end.red, t),
            lerp(begin.green, end.green, t),
            lerp(begin.blue, end.blue, t),
        ]
    }
}

/// Position-independent random colors from a seeded ChaCha8 stream.
pub fn random_colors(rng_seed: u64) -> impl FnMut(Point) -> [i32; 3] {
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    move |_| {
        [
            rng.gen_range(0..256),
            rng.gen_range(0..256),
            rng.gen_range(0..256),
        ]
    }
}
