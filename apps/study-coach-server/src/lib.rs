//! Study Coach Server Library
//!
//! Exposes the document export pipeline to the server binary (main.rs)
//! and to benchmarks.
//!
//! # Modules
//!
//! - `export`: flashcard and quiz PDF rendering

pub mod export;
