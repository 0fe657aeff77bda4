pub mod config;
pub mod guard;
