//! Result rendering
//!
//! Value typing, line protocol encoding and the four output formats.

pub mod dispatch;
pub mod error;
pub mod formats;
pub mod line_protocol;
pub mod traits;
pub mod value;

pub use dispatch::{render_all, worst_exit_code, write_result};
pub use error::{OutputError, OutputResult};
pub use traits::{OutputFormat, OutputFormatter};
pub use value::{get_value_types, MetricValue, TypedValue};

#[cfg(test)]
pub(crate) mod tests;
