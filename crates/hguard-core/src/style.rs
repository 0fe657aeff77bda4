use std::fmt;

/// A `(marker, replacement)` pair used to rewrite a header path.
///
/// The same type is used for base directories (everything up to and
/// including the marker is dropped) and rename directories (the marker is
/// replaced in place). Which one it is depends on the list it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryRule {
    pub marker: String,
    pub replacement: String,
}

impl DirectoryRule {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self { marker: marker.into(), replacement: replacement.into() }
    }
}

impl fmt::Display for DirectoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.marker, self.replacement)
    }
}

/// A built-in, named style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub name: &'static str,
    pub base_dirs: &'static [(&'static str, &'static str)],
    pub rename_dirs: &'static [(&'static str, &'static str)],
    pub suggest_endif_comment: bool,
}

impl Style {
    pub fn base_dir_rules(&self) -> Vec<DirectoryRule> {
        to_rules(self.base_dirs)
    }

    pub fn rename_dir_rules(&self) -> Vec<DirectoryRule> {
        to_rules(self.rename_dirs)
    }
}

fn to_rules(pairs: &[(&str, &str)]) -> Vec<DirectoryRule> {
    pairs
        .iter()
        .map(|(marker, replacement)| DirectoryRule::new(*marker, *replacement))
        .collect()
}

/// All built-in styles. The first one is the fallback.
pub const STYLES: &[Style] = &[
    Style {
        name: "default",
        base_dirs: &[("include/", ""), ("src/", "_SRC_")],
        rename_dirs: &[],
        suggest_endif_comment: true,
    },
    // Headers of clang live in `include/clang/` but their guards start with
    // `LLVM_CLANG_`.
    Style {
        name: "llvm",
        base_dirs: &[("include/", "")],
        rename_dirs: &[
            ("tools/clang/", "tools/"),
            ("include/clang/", "include/llvm/clang/"),
        ],
        suggest_endif_comment: true,
    },
];

pub fn default_style() -> &'static Style {
    &STYLES[0]
}

/// Find a style by its exact name, falling back to the default style.
pub fn lookup(name: &str) -> &'static Style {
    find(name).unwrap_or_else(default_style)
}

/// Find a style by its exact name.
pub fn find(name: &str) -> Option<&'static Style> {
    if name.is_empty() {
        return None;
    }
    STYLES.iter().find(|style| style.name == name)
}

pub fn names() -> Vec<&'static str> {
    STYLES.iter().map(|style| style.name).collect()
}
