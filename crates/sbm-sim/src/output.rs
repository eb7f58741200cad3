use std::fmt::Display;
use std::io::{self, Write};

/// Writes the items on one line, each followed by a space.
pub fn write_vec<T: Display, W: Write + ?Sized>(items: &[T], writer: &mut W) -> io::Result<()> {
    for item in items {
        write!(writer, "{item} ")?;
    }
    writeln!(writer)
}

/// Writes one matrix row per line.
pub fn write_matrix<T: Display, W: Write + ?Sized>(rows: &[Vec<T>], writer: &mut W) -> io::Result<()> {
    for row in rows {
        write_vec(row, writer)?;
    }
    Ok(())
}
