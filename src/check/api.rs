//! Registration and lookup of built-in checks
//!
//! Checks register themselves with the `check!` macro and are collected at
//! link time, so adding a check never touches the CLI code.

use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::core::error_handling::log_exception;

/// Entry for a check in the registry
pub struct CheckEntry {
    pub factory: fn() -> Box<dyn Check>,
}

inventory::collect!(CheckEntry);

/// Macro for registering checks
#[macro_export]
macro_rules! check {
    ($factory_expr:expr) => {
        inventory::submit!($crate::check::api::CheckEntry {
            factory: $factory_expr
        });
    };
}

/// All registered checks, sorted by name
pub fn registered_checks() -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = inventory::iter::<CheckEntry>()
        .map(|entry| (entry.factory)())
        .collect();
    checks.sort_by_key(|check| check.name());
    checks
}

pub fn check_names() -> Vec<&'static str> {
    registered_checks().iter().map(|c| c.name()).collect()
}

pub fn find_check(name: &str) -> Option<Box<dyn Check>> {
    registered_checks().into_iter().find(|c| c.name() == name)
}

/// Mark `result` failed with `"<check> failed -- <error chain>"`
pub fn fail_with(result: &mut CheckResult, check: &str, error: &dyn std::error::Error) {
    let message = format!("{} failed -- {}", check, log_exception(error));
    result.fail(1, message);
}
