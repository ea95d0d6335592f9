//! mapwire - compile-time mapper discovery and DI wiring
//!
//! Finds mapper declarations marked with `#[mapper]`, adapts each conversion
//! method to a uniform `Map<TIn, TOut>` contract and, when a DI container is
//! present, generates a one-call registration of every adapter plus a
//! `MapResolver` that dispatches through the container.

pub mod build;
pub mod cli;
pub mod compilation;
pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod models;
pub mod output;

pub use compilation::{Compilation, ModulePath, SourceUnit};
pub use config::Config;
pub use error::GenerateError;
pub use generator::{generate, Generation, Generator, RunStats};
pub use output::{GeneratedSources, WriteReport};
