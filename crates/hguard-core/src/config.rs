use crate::header_guard::HeaderGuardCheck;
use crate::options::{
    BASE_DIRS_KEY, END_IF_KEY, OptionMap, OptionValue, RENAME_DIRS_KEY, STYLE_KEY,
};
use crate::settings::Settings;
use air_workspace::resolve::PathResolver;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
/// Arguments provided in the CLI.
pub struct ArgsConfig {
    /// Paths to the files to compute guards for.
    pub files: Vec<PathBuf>,
    /// Name of the style, overrides `style` in `hguard.toml`.
    pub style: Option<String>,
    /// Overrides `base-dirs` in `hguard.toml`.
    pub base_dirs: Option<String>,
    /// Overrides `rename-dirs` in `hguard.toml`.
    pub rename_dirs: Option<String>,
    /// Overrides `end-if` in `hguard.toml`.
    pub end_if: Option<String>,
}

impl ArgsConfig {
    /// The options passed in the CLI, only the ones that were actually passed.
    pub fn overrides(&self) -> OptionMap {
        let mut options = OptionMap::new();
        for (key, value) in [
            (STYLE_KEY, &self.style),
            (BASE_DIRS_KEY, &self.base_dirs),
            (RENAME_DIRS_KEY, &self.rename_dirs),
            (END_IF_KEY, &self.end_if),
        ] {
            options.store_value(key, &OptionValue::from_optional(value.as_deref()));
        }
        options
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Paths to the headers.
    pub paths: Vec<PathBuf>,
    /// One check per directory containing a `hguard.toml`, deepest first.
    checks: Vec<(PathBuf, HeaderGuardCheck)>,
    /// The check used for files outside of any configured directory.
    fallback: HeaderGuardCheck,
}

impl Config {
    /// The check governing `path`, i.e. the one of the closest `hguard.toml`.
    pub fn check_for(&self, path: &Path) -> &HeaderGuardCheck {
        self.checks
            .iter()
            .find(|(directory, _)| path.starts_with(directory))
            .map_or(&self.fallback, |(_, check)| check)
    }
}

/// Build one check per configured directory of `resolver`.
///
/// `user_settings` are the ones of the user config directory, used for the
/// headers outside of every configured directory.
pub fn build_config(
    args_config: &ArgsConfig,
    resolver: &PathResolver<Settings>,
    user_settings: Option<&Settings>,
    paths: Vec<PathBuf>,
) -> Config {
    let overrides = args_config.overrides();

    let mut checks: Vec<(PathBuf, HeaderGuardCheck)> = resolver
        .items()
        .iter()
        .map(|item| {
            let check = build_check(&item.value().header_guard.options, &overrides);
            (item.path().to_path_buf(), check)
        })
        .collect();

    checks.sort_by_key(|(directory, _)| std::cmp::Reverse(directory.components().count()));

    let fallback = match user_settings {
        Some(settings) => build_check(&settings.header_guard.options, &overrides),
        None => build_check(&OptionMap::new(), &overrides),
    };

    Config { paths, checks, fallback }
}

/// Options of the CLI take precedence over the ones of `hguard.toml`.
fn build_check(toml_options: &OptionMap, overrides: &OptionMap) -> HeaderGuardCheck {
    let mut options = toml_options.clone();
    options.merge(overrides);
    HeaderGuardCheck::new(&options)
}
