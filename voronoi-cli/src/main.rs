//! Voronoi diagram CLI
//!
//! Renders one brute-force Voronoi pass per selected distance metric over a
//! shared seed set, concurrently, and writes each pass to its own
//! plain-text PPM file.
//!
//! Defaults reproduce the classic run: 800×600, 100 seeds, vertical
//! black-to-white gradient, both metrics:
//!
//!   voronoi
//!
//! produces `output_euclidean.ppm` and `output_manhattan.ppm`. Pass
//! `--seed` for a reproducible layout:
//!
//!   voronoi --width 1280 --height 720 --seeds 250 --seed 42 -o diagrams/run

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use voronoi_core::{
    gradient_horizontal, gradient_vertical, random_colors, render, save, Color, Metric, Point,
    SeedSet,
};

#[derive(Parser, Debug)]
#[command(name = "voronoi")]
#[command(about = "Render Voronoi diagrams to plain-text PPM", long_about = None)]
struct Args {
    /// Grid width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Grid height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Number of seeds to scatter
    #[arg(long, default_value = "100")]
    seeds: usize,

    /// Distance metrics to render, one pass and one output file each:
    /// euclidean | manhattan
    #[arg(short, long = "metric", default_values = ["euclidean", "manhattan"])]
    metrics: Vec<String>,

    /// Seed coloring: vertical | horizontal | random
    #[arg(long, default_value = "vertical")]
    colors: String,

    /// RNG seed for reproducibility (omitted: drawn from entropy and printed)
    #[arg(long)]
    seed: Option<u64>,

    /// Output path prefix; each pass writes <prefix>_<metric>.ppm
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
}

/// Build the seed coloring function for the requested mode.
fn make_color_fn(
    mode: &str,
    width: u32,
    height: u32,
    rng_seed: u64,
) -> anyhow::Result<Box<dyn FnMut(Point) -> [i32; 3]>> {
    match mode {
        "vertical" => Ok(Box::new(gradient_vertical(Color::BLACK, Color::WHITE, height))),
        "horizontal" => Ok(Box::new(gradient_horizontal(Color::BLACK, Color::WHITE, width))),
        "random" => Ok(Box::new(random_colors(rng_seed))),
        other => anyhow::bail!(
            "unknown color mode {:?} (expected vertical, horizontal, or random)",
            other
        ),
    }
}

fn output_path(prefix: &Path, metric: Metric) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!("_{}.ppm", metric.name()));
    PathBuf::from(name)
}

/// One full render pass: grid computation, then the file write. No I/O
/// happens until the grid is complete.
fn render_pass(
    seeds: &SeedSet,
    width: u32,
    height: u32,
    metric: Metric,
    dest: &Path,
) -> anyhow::Result<()> {
    let grid = render(seeds, width, height, |a, b| metric.distance(a, b))
        .with_context(|| format!("rendering {metric} pass"))?;
    save(&grid, dest).with_context(|| format!("writing {metric} output"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut metrics: Vec<Metric> = Vec::new();
    for name in &args.metrics {
        let metric = name.parse::<Metric>()?;
        if !metrics.contains(&metric) {
            metrics.push(metric);
        }
    }

    let rng_seed = args.seed.unwrap_or_else(rand::random);
    println!("Using RNG seed: {}", rng_seed);

    let color_fn = make_color_fn(&args.colors, args.width, args.height, rng_seed)?;
    let seeds = SeedSet::random(args.seeds, args.width, args.height, color_fn, rng_seed)
        .context("seed generation failed")?;
    println!(
        "Scattered {} seeds over {}x{} ({} colors)",
        seeds.len(),
        args.width,
        args.height,
        args.colors
    );

    // One pass per metric, each owning its grid and destination. Failures
    // are reported per pass; a bad pass never disturbs its sibling.
    let start = Instant::now();
    let (width, height) = (args.width, args.height);
    let mut failures = 0usize;
    thread::scope(|scope| {
        let seeds = &seeds;
        let handles: Vec<_> = metrics
            .iter()
            .map(|&metric| {
                let dest = output_path(&args.output, metric);
                let pass_dest = dest.clone();
                let handle =
                    scope.spawn(move || render_pass(seeds, width, height, metric, &pass_dest));
                (metric, dest, handle)
            })
            .collect();

        for (metric, dest, handle) in handles {
            match handle.join() {
                Ok(Ok(())) => println!("{}: wrote {}", metric, dest.display()),
                Ok(Err(e)) => {
                    eprintln!("{}: {:#}", metric, e);
                    failures += 1;
                }
                Err(_) => {
                    eprintln!("{}: render pass panicked", metric);
                    failures += 1;
                }
            }
        }
    });
    println!("Render time: {:.2}s", start.elapsed().as_secs_f64());

    if failures > 0 {
        anyhow::bail!("{} of {} render passes failed", failures, metrics.len());
    }
    Ok(())
}
