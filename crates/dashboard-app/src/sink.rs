//! JSON-lines output of rendered frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dashboard_sim::frame::DashboardFrame;

use crate::error::AppError;

/// Writes one `DashboardFrame` per line.
pub struct FrameSink {
    writer: BufWriter<Box<dyn Write + Send>>,
    written: u64,
}

impl FrameSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Create (or truncate) `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    pub fn write_frame(&mut self, frame: &DashboardFrame) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), AppError> {
        self.writer.flush()?;
        Ok(())
    }
}
