//! Core functionality for hguard
//!
//! This crate provides:
//! - The built-in header guard styles and their resolution against user options
//! - The computation of header guards from file paths
//! - Configuration management
//! - File discovery and processing

pub mod check;
pub mod config;
pub mod discovery;
pub mod fs;
pub mod guard;
pub mod header_guard;
pub mod options;
pub mod report;
pub mod resolve;
pub mod settings;
pub mod style;
pub mod toml;
