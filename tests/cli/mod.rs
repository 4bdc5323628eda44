pub mod run_checks;
pub mod settings_file;
