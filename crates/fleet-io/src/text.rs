//! Human-readable schedule output.
//!
//! ```text
//! Vehicle Q1
//! @0, n=A, q=Q1, load={K1}, drop={}, moving A->B:E1
//! @10, n=B, q=Q1, load={}, drop={}, moving B->C:E2
//! @15, n=C, q=Q1, load={}, drop={K1}
//!
//! ```
//!
//! One block per vehicle, each closed by a blank line.

use std::io::Write;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

/// Writes the schedule as text to any [`Write`] sink.
pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventWriter for TextWriter<W> {
    fn begin_vehicle(&mut self, vehicle: &str) -> OutputResult<()> {
        writeln!(self.out, "Vehicle {vehicle}")?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow<'_>) -> OutputResult<()> {
        write!(
            self.out,
            "@{}, n={}, q={}, load={{{}}}, drop={{{}}}",
            row.time,
            row.station,
            row.vehicle,
            row.load.unwrap_or_default(),
            row.drop.unwrap_or_default(),
        )?;
        if let (Some(edge), Some(next)) = (row.edge, row.next_station) {
            write!(self.out, ", moving {}->{}:{}", row.station, next, edge)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn end_vehicle(&mut self, _vehicle: &str) -> OutputResult<()> {
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
