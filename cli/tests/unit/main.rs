//! Unit tests for qapush
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod build_service;
mod config_check_service;
mod source_sync_service;
