//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml.rs
// and
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml_options.rs
//
// MIT License - Posit PBC

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::options::{
    BASE_DIRS_KEY, END_IF_KEY, OptionMap, OptionValue, RENAME_DIRS_KEY, STYLE_KEY,
};
use crate::settings::HeaderGuardSettings;
use crate::settings::Settings;

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // It's nicer if we don't make these paths relative, so we can quickly
            // jump to the TOML file to see what is wrong
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

pub fn parse_hguard_toml(path: &Path) -> Result<TomlOptions, ParseTomlError> {
    let toml =
        fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    pub header_guard: Option<HeaderGuardTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct HeaderGuardTomlOptions {
    /// # Name of the style to use
    ///
    /// One of `"default"` or `"llvm"`. An empty or unknown name selects the
    /// default style.
    pub style: Option<String>,

    /// # Base directories
    ///
    /// Comma-separated list of `marker=replacement` entries. When `marker` is
    /// found in the path of a header, everything up to and including it is
    /// replaced by `replacement`. `marker` alone is the same as `marker=`.
    ///
    /// Setting this to `""` removes the base directories of the style.
    pub base_dirs: Option<String>,

    /// # Renamed directories
    ///
    /// Comma-separated list of `marker=replacement` entries. When `marker` is
    /// found in the path of a header, it is replaced by `replacement`. This
    /// happens before the base directories are applied.
    pub rename_dirs: Option<String>,

    /// # Comment after `#endif`
    ///
    /// Any value containing a `+` enables the comment, any other value
    /// disables it. When unset, the style decides.
    pub end_if: Option<String>,

    /// # Patterns to exclude from discovery
    ///
    /// Exclude patterns are modeled after what you can provide in a
    /// [.gitignore](https://git-scm.com/docs/gitignore), and are resolved
    /// relative to the parent directory that your `hguard.toml` is contained
    /// within.
    pub exclude: Option<Vec<String>>,

    /// # Whether or not to use default exclude patterns
    ///
    /// hguard automatically excludes `.git/`, `build/` and `third_party/`. If
    /// this option is set to `false`, these files will be used as well.
    pub default_exclude: Option<bool>,
}

/// Return the path to the `hguard.toml` or `.hguard.toml` file in a given directory.
pub fn find_hguard_toml_in_directory<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    // Check for `hguard.toml` first, as we prioritize the "visible" one.
    let toml = path.as_ref().join("hguard.toml");
    if toml.is_file() {
        return Some(toml);
    }

    // Now check for `.hguard.toml` as well
    let toml = path.as_ref().join(".hguard.toml");
    if toml.is_file() {
        return Some(toml);
    }

    // Didn't find a configuration file
    None
}

impl TomlOptions {
    pub fn into_settings(self) -> Settings {
        let header_guard = self.header_guard.unwrap_or_default();

        let mut options = OptionMap::new();
        for (key, value) in [
            (STYLE_KEY, &header_guard.style),
            (BASE_DIRS_KEY, &header_guard.base_dirs),
            (RENAME_DIRS_KEY, &header_guard.rename_dirs),
            (END_IF_KEY, &header_guard.end_if),
        ] {
            options.store_value(key, &OptionValue::from_optional(value.as_deref()));
        }

        let header_guard = HeaderGuardSettings {
            options,
            exclude: header_guard.exclude,
            default_exclude: header_guard.default_exclude,
        };

        Settings { header_guard }
    }
}
