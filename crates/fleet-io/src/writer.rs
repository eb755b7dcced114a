//! The `EventWriter` trait implemented by all schedule backends.

use crate::{EventRow, OutputResult};

/// Trait implemented by the text and CSV writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`OutputObserver::take_error`](crate::OutputObserver::take_error).
pub trait EventWriter {
    /// Called before the first event of every vehicle, idle ones included.
    fn begin_vehicle(&mut self, _vehicle: &str) -> OutputResult<()> {
        Ok(())
    }

    /// Write one event.
    fn write_event(&mut self, row: &EventRow<'_>) -> OutputResult<()>;

    fn end_vehicle(&mut self, _vehicle: &str) -> OutputResult<()> {
        Ok(())
    }

    /// Flush all underlying handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
