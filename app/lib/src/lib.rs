//! # Tabconv
//!
//! Load tabular records from CSV, JSON, or YAML and write them back out in
//! any of the three formats.
//!
//! All formats share one in-memory model: a [`Dataset`] of ordered
//! [`Record`]s holding typed [`Value`]s. CSV cells are coerced into typed
//! scalars on load; JSON and YAML keep their native types. CSV can only
//! hold flat records, so saving nested values to CSV is rejected before
//! anything is written.
//!
//! ```no_run
//! use std::path::Path;
//! use tabconv::Converter;
//!
//! # fn main() -> tabconv::Result<()> {
//! let converter = Converter::new();
//! let records = converter.load(Path::new("people.csv"), None)?;
//! converter.save(&records, Path::new("people.json"), None)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod config;
pub mod convert;
pub mod display;
pub mod error;
pub mod record;

pub use config::ConverterConfig;
pub use convert::{
    detect_delimiter, resolve_format, Converter, CsvLoader, FormatKind, JsonLoader, Loader,
    YamlLoader, CSV_WRITE_DELIMITER, FORMAT_TABLE,
};
pub use display::render_grid;
pub use error::{ConvertError, Result};
pub use record::{Dataset, Nested, Record, Value};
