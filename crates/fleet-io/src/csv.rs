//! CSV output backend.
//!
//! One row per schedule event, in replay order:
//!
//! ```csv
//! vehicle,time,station,load,drop,edge,next_station
//! Q1,0,A,K1,,E1,B
//! Q1,10,B,,,E2,C
//! Q1,15,C,,K1,,
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

const HEADER: [&str; 7] = ["vehicle", "time", "station", "load", "drop", "edge", "next_station"];

/// Writes schedule events as CSV rows.
pub struct CsvWriter<W: Write = File> {
    events:   Writer<W>,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap any sink and write the header row.
    pub fn from_writer(out: W) -> OutputResult<Self> {
        // Header by hand: an empty schedule still gets one.
        let mut events = WriterBuilder::new().has_headers(false).from_writer(out);
        events.write_record(HEADER)?;
        Ok(Self { events, finished: false })
    }
}

impl<W: Write> EventWriter for CsvWriter<W> {
    fn write_event(&mut self, row: &EventRow<'_>) -> OutputResult<()> {
        self.events.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}
