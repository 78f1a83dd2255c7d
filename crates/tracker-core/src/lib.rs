//! Core domain types for the grind-session monitor.
//!
//! Holds the decoded report model, the loot-scroll buff classifier, the
//! filename timestamp extractor, the id→name catalog, diagnostics, errors
//! and CLI settings. Everything here is presentation-free; the data layer
//! and the binary build on top of it.

pub mod catalog;
pub mod classifier;
pub mod diagnostics;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamp;
