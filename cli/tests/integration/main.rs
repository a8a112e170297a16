//! Integration tests for qapush
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never reach git, the build tool, or a remote host.

mod check_command;
mod config_command;
mod push_command;
