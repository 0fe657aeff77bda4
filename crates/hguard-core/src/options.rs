use std::collections::BTreeMap;

/// Raw value meaning "this option was never set by the user".
///
/// This is different from the empty string, which means "explicitly set to
/// nothing".
pub const SENTINEL: &str = "'";

pub const STYLE_KEY: &str = "Style";
pub const BASE_DIRS_KEY: &str = "BaseDirs";
pub const RENAME_DIRS_KEY: &str = "RenameDirs";
pub const END_IF_KEY: &str = "EndIf";

/// The state of a single configuration option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OptionValue {
    /// Never set, the selected style decides.
    #[default]
    Unset,
    /// Set to the empty string.
    Empty,
    /// Set to a non-empty value.
    Value(String),
}

impl OptionValue {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            SENTINEL => Self::Unset,
            "" => Self::Empty,
            value => Self::Value(value.to_string()),
        }
    }

    /// Same as [OptionValue::from_raw()] but `None` is also `Unset`.
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map_or(Self::Unset, Self::from_raw)
    }

    pub fn as_raw(&self) -> &str {
        match self {
            Self::Unset => SENTINEL,
            Self::Empty => "",
            Self::Value(value) => value,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Read access to the options of the check.
pub trait OptionReader {
    fn get(&self, key: &str) -> Option<&str>;
}

/// Write access to the options of the check.
pub trait OptionWriter {
    fn store(&mut self, key: &str, value: &str);
}

/// Read a key, falling back to the sentinel when it is absent.
pub fn read_option<R: OptionReader + ?Sized>(reader: &R, key: &str) -> OptionValue {
    OptionValue::from_raw(reader.get(key).unwrap_or(SENTINEL))
}

/// Ordered key/value store used to load and persist the check options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: BTreeMap<String, String>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` only if it was actually configured.
    pub fn store_value(&mut self, key: &str, value: &OptionValue) {
        if !value.is_unset() {
            self.store(key, value.as_raw());
        }
    }

    /// Keys set in `other` replace the ones in `self`.
    pub fn merge(&mut self, other: &OptionMap) {
        for (key, value) in other.iter() {
            self.store(key, value);
        }
    }
}

impl OptionReader for OptionMap {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl OptionWriter for OptionMap {
    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
