//! OpenStack API access for the `os_*` checks

pub mod client;
pub mod error;
pub mod types;

pub use client::{AuthSettings, OpenStack};
pub use error::{OpenStackError, OpenStackResult};

#[cfg(test)]
pub(crate) mod tests;
