//! CLI module containing argument parsing and the settings file

pub mod args;
pub mod settings;

#[cfg(test)]
mod tests;
