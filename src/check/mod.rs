pub mod api;
pub mod args;
pub mod builtin;
pub mod command;
pub mod error;
pub mod result;
pub mod traits;

pub use api::{check_names, find_check, registered_checks};
pub use error::{CheckError, CheckOutcome};
pub use result::CheckResult;
pub use traits::Check;
