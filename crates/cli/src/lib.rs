//! ovhcli CLI library
//!
//! This module exports the CLI components for use in integration tests.

pub mod cli;
pub mod dispatcher;
pub mod exit_code;
