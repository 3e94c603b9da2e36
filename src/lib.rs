//! Convert the UN/LOCODE code lists into OpenClimate tables.

pub mod config;
pub mod coordinates;
pub mod csv_loader;
pub mod error;
pub mod logging;
pub mod tables;
pub mod transform;
pub mod writer;

pub use config::{CoordinatePolicy, InputEncoding, RunConfig};
pub use error::{ConvertError, Result};
pub use transform::{run, RunSummary};
