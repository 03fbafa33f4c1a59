//! Test helpers module
//!
//! This module provides utilities and helpers for testing the StageCrew
//! application: a disposable Postgres database, data builders, and token
//! minting for exercising the HTTP layer.

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
