//! Command line client for the water vending machine backend

/// Settings file and environment overrides
pub mod config;
/// One module per `aquavend` command
pub mod sub_commands;
