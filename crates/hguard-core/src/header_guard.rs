use std::path::Path;

use crate::fs::normalize_path;
use crate::guard::compute;
use crate::options::{OptionReader, OptionWriter};
use crate::resolve::{EffectiveStyle, StyleOverrides, resolve};

/// The header guard check as seen by its host.
///
/// The style is resolved once when the options are loaded and never changes
/// afterwards, so a check can be shared between threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderGuardCheck {
    style: EffectiveStyle,
}

impl HeaderGuardCheck {
    /// Load the options of the check. Invalid options never make this fail.
    pub fn new<R: OptionReader + ?Sized>(options: &R) -> Self {
        Self { style: resolve(&StyleOverrides::read(options)) }
    }

    pub fn style(&self) -> &EffectiveStyle {
        &self.style
    }

    /// The guard `filename` should use.
    ///
    /// The existing guard does not influence the result.
    pub fn get_guard(&self, filename: &Path, _old_guard: &str) -> String {
        let absolute = normalize_path(filename);
        compute(&absolute.to_string_lossy(), &self.style)
    }

    pub fn should_suggest_endif_comment(&self, _filename: &Path) -> bool {
        self.style.suggest_endif_comment
    }

    pub fn store_options<W: OptionWriter + ?Sized>(&self, options: &mut W) {
        self.style.store(options);
    }
}
