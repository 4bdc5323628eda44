//! Tests for CLI argument parsing and settings loading

pub mod settings_tests;
