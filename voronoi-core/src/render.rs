//! Distance metrics and the brute-force nearest-seed renderer.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::{Error, PixelGrid, Point, Result, Seed, SeedSet};

/// Built-in distance metrics.
///
/// The renderer itself accepts any `Fn(Point, Point) -> f64`; these are the
/// two metrics the binary exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Euclidean,
    Manhattan,
}

impl Metric {
    /// Distance between two points under this metric. Pure, symmetric,
    /// zero iff the points coincide.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        match self {
            // hypot avoids overflow in the intermediate squares
            Metric::Euclidean => f64::from(dx).hypot(f64::from(dy)),
            Metric::Manhattan => (u64::from(dx) + u64::from(dy)) as f64,
        }
    }

    /// Lowercase name, used for output file naming and CLI parsing.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

/// First seed (in set order) minimizing `distance` to `query`.
///
/// Strict `<` keeps the scan's first minimum, so equidistant seeds resolve
/// by set order no matter how cells are scheduled across threads.
fn nearest_seed<'a, F>(first: &'a Seed, rest: &'a [Seed], query: Point, distance: &F) -> &'a Seed
where
    F: Fn(Point, Point) -> f64,
{
    let mut best = first;
    let mut best_dist = distance(first.position, query);
    for seed in rest {
        let d = distance(seed.position, query);
        if d < best_dist {
            best = seed;
            best_dist = d;
        }
    }
    best
}

/// Render a Voronoi diagram: every cell of a `width`×`height` grid takes
/// the color of its nearest seed under `distance`.
///
/// Inputs are validated before any parallel work is dispatched. Rows are
/// computed in parallel; the ordered collect makes the output identical
/// for any thread count.
///
/// # Errors
///
/// `EmptySeedSet` if `seeds` is empty, `EmptyGrid` if either dimension is
/// zero.
pub fn render<F>(seeds: &SeedSet, width: u32, height: u32, distance: F) -> Result<PixelGrid>
where
    F: Fn(Point, Point) -> f64 + Sync,
{
    let (first, rest) = match seeds.as_slice().split_first() {
        Some(split) => split,
        None => return Err(Error::EmptySeedSet),
    };
    if width == 0 || height == 0 {
        return Err(Error::EmptyGrid { width, height });
    }

    let distance = &distance;
    let pixels: Vec<_> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| nearest_seed(first, rest, Point::new(x, y), distance).color)
        })
        .collect();

    Ok(PixelGrid::from_raw(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{random_colors, Color};

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn seed(x: u32, y: u32, color: Color) -> Seed {
        Seed::new(Point::new(x, y), color)
    }

    #[test]
    fn euclidean_distance() {
        let d = Metric::Euclidean.distance(Point::new(0, 0), Point::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(Metric::Euclidean.distance(Point::new(7, 7), Point::new(7, 7)), 0.0);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Metric::Manhattan.distance(Point::new(0, 0), Point::new(3, 4)), 7.0);
        assert_eq!(Metric::Manhattan.distance(Point::new(3, 4), Point::new(0, 0)), 7.0);
    }

    #[test]
    fn metric_parses_and_prints() {
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("Manhattan".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert!(matches!(
            "chebyshev".parse::<Metric>(),
            Err(Error::UnknownMetric(_))
        ));
        assert_eq!(Metric::Euclidean.to_string(), "euclidean");
    }

    #[test]
    fn empty_seed_set_is_rejected() {
        let seeds = SeedSet::new(vec![]);
        assert!(matches!(
            render(&seeds, 4, 4, |a, b| Metric::Euclidean.distance(a, b)),
            Err(Error::EmptySeedSet)
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let seeds = SeedSet::new(vec![seed(0, 0, RED)]);
        assert!(matches!(
            render(&seeds, 0, 4, |a, b| Metric::Euclidean.distance(a, b)),
            Err(Error::EmptyGrid { .. })
        ));
        assert!(matches!(
            render(&seeds, 4, 0, |a, b| Metric::Euclidean.distance(a, b)),
            Err(Error::EmptyGrid { .. })
        ));
    }

    #[test]
    fn single_seed_fills_grid_uniformly() {
        let seeds = SeedSet::new(vec![seed(2, 3, RED)]);
        for metric in [Metric::Euclidean, Metric::Manhattan] {
            let grid = render(&seeds, 8, 5, |a, b| metric.distance(a, b)).unwrap();
            assert!(grid.as_raw().iter().all(|&c| c == RED));
        }
    }

    #[test]
    fn one_by_one_grid() {
        let seeds = SeedSet::new(vec![seed(0, 0, BLUE)]);
        let grid = render(&seeds, 1, 1, |a, b| Metric::Manhattan.distance(a, b)).unwrap();
        assert_eq!(grid.get(0, 0), BLUE);
    }

    #[test]
    fn ties_resolve_to_first_seed_in_set_order() {
        // (1,0) is Manhattan distance 1 from both seeds; the first one wins.
        let cell = |seeds: SeedSet| {
            render(&seeds, 3, 1, |a, b| Metric::Manhattan.distance(a, b))
                .unwrap()
                .get(1, 0)
        };
        assert_eq!(cell(SeedSet::new(vec![seed(0, 0, RED), seed(2, 0, BLUE)])), RED);
        assert_eq!(cell(SeedSet::new(vec![seed(2, 0, BLUE), seed(0, 0, RED)])), BLUE);
    }

    #[test]
    fn metrics_can_disagree_on_nearest_seed() {
        // From (0,0): euclidean favors (2,2) (2.83 vs 3), manhattan favors
        // (0,3) (4 vs 3).
        let seeds = SeedSet::new(vec![seed(2, 2, RED), seed(0, 3, BLUE)]);

        let eucl = render(&seeds, 3, 4, |a, b| Metric::Euclidean.distance(a, b)).unwrap();
        let manh = render(&seeds, 3, 4, |a, b| Metric::Manhattan.distance(a, b)).unwrap();

        assert_eq!(eucl.get(0, 0), RED);
        assert_eq!(manh.get(0, 0), BLUE);
    }

    #[test]
    fn every_cell_takes_an_existing_seed_color() {
        let seeds = SeedSet::random(20, 40, 30, random_colors(3), 11).unwrap();
        let grid = render(&seeds, 40, 30, |a, b| Metric::Euclidean.distance(a, b)).unwrap();
        for &cell in grid.as_raw() {
            assert!(seeds.iter().any(|s| s.color == cell));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let seeds = SeedSet::random(64, 64, 48, random_colors(1), 5).unwrap();
        let a = render(&seeds, 64, 48, |p, q| Metric::Manhattan.distance(p, q)).unwrap();
        let b = render(&seeds, 64, 48, |p, q| Metric::Manhattan.distance(p, q)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_distance_strategies_plug_in() {
        // Chebyshev via closure: the renderer is metric-agnostic.
        let chebyshev =
            |a: Point, b: Point| f64::from(a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)));
        let seeds = SeedSet::new(vec![seed(0, 0, RED), seed(4, 4, BLUE)]);
        let grid = render(&seeds, 5, 5, chebyshev).unwrap();
        assert_eq!(grid.get(0, 0), RED);
        assert_eq!(grid.get(4, 4), BLUE);
    }
}
