//! CLI integration tests for story-checklist.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (check, rules)
//! - Stdin/stdout handling
//! - Exit codes
//! - Configuration discovery

mod check;
mod common;
mod rules;
