//! Chart file writer
//!
//! Serializes notes to the flat chart format: one note per line,
//! `"<time_ms> <direction>"`, directions rendered as L, R, or U.

use super::Note;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Buffered chart writer
pub struct ChartWriter<W: Write> {
    out: W,
    notes_written: u64,
}

impl ChartWriter<BufWriter<File>> {
    /// Create a chart file, truncating any existing file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create chart file: {:?}", path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ChartWriter<W> {
    /// Wrap an arbitrary sink
    pub fn new(out: W) -> Self {
        Self {
            out,
            notes_written: 0,
        }
    }

    /// Get the number of notes written so far
    pub fn notes_written(&self) -> u64 {
        self.notes_written
    }

    /// Write a single note line
    pub fn write_note(&mut self, note: &Note) -> Result<()> {
        writeln!(self.out, "{} {}", note.time_ms, note.direction)
            .context("failed to write note")?;
        self.notes_written += 1;
        Ok(())
    }

    /// Write a whole chart in order
    pub fn write_all(&mut self, notes: &[Note]) -> Result<()> {
        for note in notes {
            self.write_note(note)?;
        }
        Ok(())
    }

    /// Flush buffered output and close the writer.
    pub fn finalize(mut self) -> Result<()> {
        self.out.flush().context("failed to flush chart file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Direction;
    use tempfile::NamedTempFile;

    fn sample_notes() -> Vec<Note> {
        vec![
            Note { time_ms: 0, direction: Direction::Left },
            Note { time_ms: 50, direction: Direction::Unbounded },
            Note { time_ms: 1234, direction: Direction::Right },
        ]
    }

    #[test]
    fn test_line_format() {
        let mut writer = ChartWriter::new(Vec::new());
        writer.write_all(&sample_notes()).unwrap();

        assert_eq!(writer.notes_written(), 3);
        assert_eq!(String::from_utf8(writer.out).unwrap(), "0 L\n50 U\n1234 R\n");
    }

    #[test]
    fn test_empty_chart_writes_nothing() {
        let mut writer = ChartWriter::new(Vec::new());
        writer.write_all(&[]).unwrap();

        assert_eq!(writer.notes_written(), 0);
        assert!(writer.out.is_empty());
    }

    #[test]
    fn test_create_and_finalize_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut writer = ChartWriter::create(&path).unwrap();
        writer.write_all(&sample_notes()).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0 L\n50 U\n1234 R\n");
    }

    #[test]
    fn test_create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("chart.txt");
        assert!(ChartWriter::create(&path).is_err());
    }
}
