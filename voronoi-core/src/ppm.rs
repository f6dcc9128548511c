//! Plain-text PPM (P3) output.
//!
//! Header `P3`, dimensions, max channel value 255, then one `r g b` triple
//! per pixel, row-major from the top-left, one grid row per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{Error, PixelGrid, Result};

/// Serialize `grid` as P3 into `out`.
pub fn write<W: Write>(grid: &PixelGrid, out: &mut W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", grid.width(), grid.height())?;
    writeln!(out, "255")?;
    for row in grid.rows() {
        for (i, color) in row.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{} {} {}", color.red, color.green, color.blue)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write `grid` to a file at `path`, buffered. I/O failures carry the
/// destination path; the grid itself is untouched and can be retried
/// elsewhere.
pub fn save(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        dest: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write(grid, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)
}
