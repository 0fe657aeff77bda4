//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/discovery.rs
//
// MIT License - Posit PBC

use ignore::DirEntry;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use rustc_hash::FxHashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::fs;
use crate::fs::has_header_extension;
use crate::settings::{HeaderGuardSettings, Settings};
use crate::toml::find_hguard_toml_in_directory;
use crate::toml::parse_hguard_toml;
use air_workspace::resolve::PathResolver;
use etcetera::BaseStrategy;

/// Default patterns to exclude from discovery
/// These match directories that usually contain generated or vendored headers
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".git/", "build/", "third_party/"];

#[derive(Debug)]
pub struct DiscoveredSettings {
    pub directory: PathBuf,
    pub settings: Settings,
    /// Path to the config file that was used
    pub config_path: Option<PathBuf>,
    /// Whether this is the `hguard.toml` of the user config directory, which
    /// applies to every header outside of a configured directory
    pub is_user_config: bool,
}

/// Get the user config directory for hguard
fn get_user_config_dir() -> Option<PathBuf> {
    let strategy = etcetera::base_strategy::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("hguard"))
}

/// This is the core function for walking a set of `paths` looking for `hguard.toml`s.
///
/// You typically follow this function up by loading the set of returned path into a
/// [PathResolver].
///
/// For each `path`, we:
/// - Walk up its ancestors until the user config directory, looking for a `hguard.toml`
/// - Walk down its subdirectories, looking for nested `hguard.toml`s
/// - If no config found in ancestors, fall back to checking the user config directory
pub fn discover_settings<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<DiscoveredSettings>> {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
    let mut discovered_settings = Vec::with_capacity(paths.len());
    let user_config_dir = get_user_config_dir();
    let mut needs_user_config = false;

    for path in &paths {
        let mut found_config = false;

        for ancestor in path.ancestors() {
            if !seen.insert(ancestor.to_path_buf()) {
                // Already visited from another path, which then found (or
                // not) the same config as this one would.
                found_config = discovered_settings
                    .iter()
                    .any(|ds: &DiscoveredSettings| path.starts_with(&ds.directory));
                break;
            }

            if let Some(toml) = find_hguard_toml_in_directory(ancestor) {
                discovered_settings.push(load_settings(ancestor, toml)?);
                found_config = true;
                break;
            }

            // Stop at user config directory if we have one
            if let Some(ref config_dir) = user_config_dir
                && ancestor == config_dir
            {
                break;
            }
        }

        for directory in nested_directories(path) {
            if !seen.insert(directory.clone()) {
                continue;
            }
            if let Some(toml) = find_hguard_toml_in_directory(&directory) {
                discovered_settings.push(load_settings(&directory, toml)?);
            }
        }

        needs_user_config |= !found_config;
    }

    // Headers outside of every configured directory use the user config
    if needs_user_config
        && let Some(config_dir) = user_config_dir
        && let Some(toml) = find_hguard_toml_in_directory(&config_dir)
    {
        let mut ds = load_settings(&config_dir, toml)?;
        ds.is_user_config = true;
        discovered_settings.push(ds);
    }

    Ok(discovered_settings)
}

fn load_settings(directory: &Path, toml: PathBuf) -> anyhow::Result<DiscoveredSettings> {
    let settings = parse_hguard_toml(&toml)?.into_settings();
    tracing::debug!("Found settings in {toml}", toml = toml.display());
    Ok(DiscoveredSettings {
        directory: directory.to_path_buf(),
        settings,
        config_path: Some(toml),
        is_user_config: false,
    })
}

/// Subdirectories of `path` that header discovery may enter, `path` excluded
fn nested_directories(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return Vec::new();
    }

    let mut builder = ignore::WalkBuilder::new(path);
    builder.hidden(true);
    builder.parents(true);
    builder.ignore(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);

    builder
        .build()
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Failed to look for nested settings: {err}");
                None
            }
        })
        .filter(|entry| entry.depth() > 0 && entry.file_type().is_some_and(|ft| ft.is_dir()))
        .map(DirEntry::into_path)
        .collect()
}

/// Exclude patterns of every configured directory
///
/// Patterns are rooted at the directory of their `hguard.toml` and only apply
/// to the entries below it. Entries outside of every configured directory use
/// the user settings, or the default patterns.
struct ExcludeRules {
    /// Deepest directory first
    scoped: Vec<(PathBuf, Gitignore)>,
    fallback: Gitignore,
}

impl ExcludeRules {
    fn new(
        resolver: &PathResolver<Settings>,
        user_settings: Option<&Settings>,
        no_default_exclude: bool,
    ) -> Self {
        let mut scoped: Vec<(PathBuf, Gitignore)> = resolver
            .items()
            .iter()
            .map(|item| {
                let directory = item.path().to_path_buf();
                let matcher =
                    build_matcher(&directory, &item.value().header_guard, no_default_exclude);
                (directory, matcher)
            })
            .collect();
        scoped.sort_by_key(|(directory, _)| std::cmp::Reverse(directory.components().count()));

        let defaults = HeaderGuardSettings::default();
        let user_settings = user_settings.map_or(&defaults, |settings| &settings.header_guard);
        let fallback = build_matcher(&fs::normalize_path("."), user_settings, no_default_exclude);

        Self { scoped, fallback }
    }

    fn is_excluded(&self, path: &Path, is_directory: bool) -> bool {
        let matcher = self
            .scoped
            .iter()
            .find(|(directory, _)| path.starts_with(directory))
            .map_or(&self.fallback, |(_, matcher)| matcher);
        matcher.matched(path, is_directory).is_ignore()
    }
}

fn build_matcher(
    root: &Path,
    settings: &HeaderGuardSettings,
    no_default_exclude: bool,
) -> Gitignore {
    let mut builder = GitignoreBuilder::new(root);

    let mut patterns: Vec<&str> = settings
        .exclude
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    if !no_default_exclude && settings.default_exclude.unwrap_or(true) {
        patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
    }

    for pattern in patterns {
        if let Err(e) = builder.add_line(None, pattern) {
            tracing::warn!("Failed to add exclude pattern '{}': {}", pattern, e);
        }
    }

    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Failed to build exclude patterns: {}", e);
        Gitignore::empty()
    })
}

type DiscoveredFiles = Vec<Result<PathBuf, ignore::Error>>;

/// For each provided `path`, recursively search for any header files within that `path`
/// that match our inclusion criteria
///
/// `resolver` holds the settings of the configured directories and
/// `user_settings` the ones of the user config directory.
pub fn discover_header_paths<P: AsRef<Path>>(
    paths: &[P],
    resolver: &PathResolver<Settings>,
    user_settings: Option<&Settings>,
    no_default_exclude: bool,
) -> DiscoveredFiles {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let Some((first_path, paths)) = paths.split_first() else {
        // No paths provided
        return Vec::new();
    };

    let mut builder = ignore::WalkBuilder::new(first_path);

    for path in paths {
        builder.add(path);
    }

    builder.hidden(true);
    builder.parents(true);
    builder.ignore(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);

    // Prefer `available_parallelism()`, with a max of 12 threads
    builder.threads(
        std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(12),
    );

    let walker = builder.build_parallel();

    let state = FilesState {
        files: Mutex::new(Vec::new()),
        excludes: ExcludeRules::new(resolver, user_settings, no_default_exclude),
    };
    let mut visitor_builder = FilesVisitorBuilder { state: &state };
    walker.visit(&mut visitor_builder);

    state.finish()
}

/// Shared state across the threads of the walker
struct FilesState {
    files: Mutex<DiscoveredFiles>,
    excludes: ExcludeRules,
}

impl FilesState {
    fn finish(self) -> DiscoveredFiles {
        // A poisoned lock still holds every file pushed before the panic
        self.files.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds one [FilesVisitor] per thread of [ignore::WalkParallel]
struct FilesVisitorBuilder<'state> {
    state: &'state FilesState,
}

impl<'state> ignore::ParallelVisitorBuilder<'state> for FilesVisitorBuilder<'state> {
    fn build(&mut self) -> Box<dyn ignore::ParallelVisitor + 'state> {
        Box::new(FilesVisitor { files: vec![], state: self.state })
    }
}

/// Collects the headers met by one thread, handed over to the
/// [FilesState] on `Drop`
struct FilesVisitor<'state> {
    files: DiscoveredFiles,
    state: &'state FilesState,
}

impl ignore::ParallelVisitor for FilesVisitor<'_> {
    /// Explicitly provided files are always accepted. Other entries are
    /// checked against the exclude patterns of their closest `hguard.toml`,
    /// and files are accepted if they have a header extension.
    fn visit(&mut self, result: Result<DirEntry, ignore::Error>) -> ignore::WalkState {
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                self.files.push(Err(error));
                return ignore::WalkState::Continue;
            }
        };

        let path = entry.path();
        let is_explicit = entry.depth() == 0;
        let is_directory = entry.file_type().is_none_or(|ft| ft.is_dir());

        if !is_explicit && self.state.excludes.is_excluded(path, is_directory) {
            tracing::trace!("Excluded {path}", path = path.display());
            return if is_directory {
                ignore::WalkState::Skip
            } else {
                ignore::WalkState::Continue
            };
        }

        if !is_directory && (is_explicit || has_header_extension(path)) {
            tracing::trace!("Included header file {path}", path = path.display());
            self.files.push(Ok(entry.into_path()));
        }

        ignore::WalkState::Continue
    }
}

impl Drop for FilesVisitor<'_> {
    fn drop(&mut self) {
        let mut files = self
            .state
            .files
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        files.append(&mut self.files);
    }
}
