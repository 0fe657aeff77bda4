//
// Adapted from Air
// https://github.com/posit-dev/air/blob/main/crates/workspace/src/settings.rs
//
// MIT License - Posit PBC

use crate::options::OptionMap;

/// Resolved configuration settings used within hguard
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub header_guard: HeaderGuardSettings,
}

#[derive(Debug, Default, Clone)]
pub struct HeaderGuardSettings {
    /// Options of the check, only the keys that were set in `hguard.toml`.
    pub options: OptionMap,
    pub exclude: Option<Vec<String>>,
    pub default_exclude: Option<bool>,
}
