//! School records E2E test suite.
//!
//! Drives the full actix app against an in-memory SQLite database migrated per
//! test, with avatars written to a temporary directory.
//!
//! Run with: cargo test --test school_e2e

mod test_helpers;

mod test_aggregates;
mod test_students;
