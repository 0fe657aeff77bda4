use crate::options::{
    BASE_DIRS_KEY, END_IF_KEY, OptionReader, OptionValue, OptionWriter, RENAME_DIRS_KEY,
    STYLE_KEY, read_option,
};
use crate::style::{self, DirectoryRule};

/// The raw option values a style is resolved from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub style: OptionValue,
    pub base_dirs: OptionValue,
    pub rename_dirs: OptionValue,
    pub end_if: OptionValue,
}

impl StyleOverrides {
    /// Read the four options, absent keys being unset.
    pub fn read<R: OptionReader + ?Sized>(reader: &R) -> Self {
        Self {
            style: read_option(reader, STYLE_KEY),
            base_dirs: read_option(reader, BASE_DIRS_KEY),
            rename_dirs: read_option(reader, RENAME_DIRS_KEY),
            end_if: read_option(reader, END_IF_KEY),
        }
    }
}

/// The four options as raw strings, ready to be persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedStyle {
    pub style: String,
    pub base_dirs: String,
    pub rename_dirs: String,
    pub end_if: String,
}

/// A built-in style merged with the user overrides.
///
/// The raw overrides are kept so that persisting the configuration gives
/// back exactly what was loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveStyle {
    /// Name of the catalog entry the rules were inherited from.
    pub name: &'static str,
    pub base_dirs: Vec<DirectoryRule>,
    pub rename_dirs: Vec<DirectoryRule>,
    pub suggest_endif_comment: bool,
    raw: StyleOverrides,
}

impl Default for EffectiveStyle {
    fn default() -> Self {
        resolve(&StyleOverrides::default())
    }
}

impl EffectiveStyle {
    pub fn serialize(&self) -> SerializedStyle {
        SerializedStyle {
            style: self.raw.style.as_raw().to_string(),
            base_dirs: self.raw.base_dirs.as_raw().to_string(),
            rename_dirs: self.raw.rename_dirs.as_raw().to_string(),
            end_if: self.raw.end_if.as_raw().to_string(),
        }
    }

    /// Write the four options, unset ones as the sentinel.
    pub fn store<W: OptionWriter + ?Sized>(&self, writer: &mut W) {
        let serialized = self.serialize();
        writer.store(BASE_DIRS_KEY, &serialized.base_dirs);
        writer.store(RENAME_DIRS_KEY, &serialized.rename_dirs);
        writer.store(STYLE_KEY, &serialized.style);
        writer.store(END_IF_KEY, &serialized.end_if);
    }
}

/// Merge the selected built-in style with the overrides.
///
/// This never fails: unknown style names fall back to the default style and
/// malformed rule lists are read as well as possible.
pub fn resolve(overrides: &StyleOverrides) -> EffectiveStyle {
    let selected = match &overrides.style {
        OptionValue::Unset | OptionValue::Empty => style::default_style(),
        OptionValue::Value(name) => style::find(name).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown header guard style '{name}', using '{}' instead. Available styles: {}",
                style::default_style().name,
                style::names().join(", ")
            );
            style::default_style()
        }),
    };
    tracing::debug!("Using header guard style '{}'", selected.name);

    let base_dirs = match &overrides.base_dirs {
        OptionValue::Unset => selected.base_dir_rules(),
        OptionValue::Empty => Vec::new(),
        OptionValue::Value(raw) => parse_rules(raw),
    };

    let rename_dirs = match &overrides.rename_dirs {
        OptionValue::Unset => selected.rename_dir_rules(),
        OptionValue::Empty => Vec::new(),
        OptionValue::Value(raw) => parse_rules(raw),
    };

    let suggest_endif_comment = match &overrides.end_if {
        OptionValue::Unset => selected.suggest_endif_comment,
        OptionValue::Empty => false,
        OptionValue::Value(raw) => raw.contains('+'),
    };

    EffectiveStyle {
        name: selected.name,
        base_dirs,
        rename_dirs,
        suggest_endif_comment,
        raw: overrides.clone(),
    }
}

/// Parse a `marker[=replacement],...` list.
///
/// Only the first `=` of an entry separates the marker from the replacement.
/// Entries with an empty marker would match at the end of every path, so they
/// are dropped.
pub fn parse_rules(raw: &str) -> Vec<DirectoryRule> {
    let normalized = raw.replace('\\', "/");

    normalized
        .split(',')
        .filter_map(|entry| {
            let (marker, replacement) = entry.split_once('=').unwrap_or((entry, ""));
            if marker.is_empty() {
                tracing::warn!("Ignoring directory rule with an empty marker: '{entry}'");
                return None;
            }
            Some(DirectoryRule::new(marker, replacement))
        })
        .collect()
}
