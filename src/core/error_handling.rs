//! Generic error handling utilities
//!
//! Every module error implements [`ContextualError`] so the startup path can
//! decide between a short user message and a generic context line, while the
//! full cause chain is always available at debug level.

use std::error::Error;

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: Error {
    /// Returns true if the error carries a message the user can act on
    /// (bad arguments, unknown format, missing config section)
    fn is_user_actionable(&self) -> bool;

    /// The user facing message for actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// supplied `operation_context`. Detail always goes to debug.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Collect `error` and its sources, outermost first
pub fn error_chain(error: &dyn Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

/// One line description of an error and its cause chain:
/// `Exception [ <top> ]: Trace: [ <top> -> <cause> -> ... ]`
pub fn error_chain_message(error: &dyn Error) -> String {
    let chain = error_chain(error);
    format!("Exception [ {} ]: Trace: [ {} ]", chain[0], chain.join(" -> "))
}

/// Log the cause chain of an error at error level and return the one line form
pub fn log_exception(error: &dyn Error) -> String {
    let message = error_chain_message(error);
    log::error!("{}", message);
    message
}
