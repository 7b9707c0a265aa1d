//! Testing infrastructure for gemlist integration tests.
//!
//! - `TestWorld`: isolated data directory plus CLI invocation
//! - `fetcher`: scripted `Fetcher` for driving sessions without a network
//! - `fixtures`: canned API responses for each catalog
//! - `assertions`: checks over compiled params and CLI JSON output

pub mod assertions;
pub mod fetcher;
pub mod fixtures;
pub mod world;

pub use fetcher::ScriptedFetcher;
pub use world::{CliResult, TestWorld};
