//! `fleet-io`: scenario input and schedule output for the fleet planner.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`input`]    | `parse_scenario`, `load_scenario`, `Scenario`, raw records   |
//! | [`row`]      | `EventRow`: one schedule event with every id resolved to a name |
//! | [`writer`]   | `EventWriter` trait                                          |
//! | [`text`]     | `TextWriter`: human-readable schedule                       |
//! | [`csv`]      | `CsvWriter`: one row per event                              |
//! | [`observer`] | `OutputObserver`: drives any `EventWriter` from a planner run |
//! | [`error`]    | `InputError`, `OutputError` and their result aliases         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_io::{parse_scenario, OutputObserver, TextWriter};
//!
//! let planner = parse_scenario(std::io::stdin())?.resolve()?.planner().build()?;
//! let mut obs = OutputObserver::new(TextWriter::new(std::io::stdout()), &planner);
//! planner.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod input;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{InputError, InputResult, OutputError, OutputResult};
pub use input::{
    load_scenario, parse_scenario, EdgeRecord, PackageRecord, ResolvedScenario, Scenario,
    VehicleRecord,
};
pub use observer::OutputObserver;
pub use row::EventRow;
pub use text::TextWriter;
pub use writer::EventWriter;
