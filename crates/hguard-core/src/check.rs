use air_fs::relativize_path;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::report::GuardReport;

/// Compute the guard of every header in `config.paths`.
///
/// Returns one result per file, keyed by the path relative to the working
/// directory.
pub fn check(config: Config) -> Vec<(String, Result<GuardReport>)> {
    // Wrap config in Arc to avoid expensive clones in parallel execution
    let config = Arc::new(config);

    config
        .paths
        .par_iter()
        .map(|file| {
            let res = check_path(file, Arc::clone(&config));
            (relativize_path(file), res)
        })
        .collect()
}

pub fn check_path(path: &Path, config: Arc<Config>) -> Result<GuardReport> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read file: {}", relativize_path(path)))?;

    if !metadata.is_file() {
        return Err(anyhow::anyhow!("Not a file: {}", relativize_path(path)));
    }

    let check = config.check_for(path);
    let guard = check.get_guard(path, "");
    tracing::trace!("Computed {guard} for {path}", path = path.display());

    Ok(GuardReport::new(
        path.to_path_buf(),
        guard,
        check.should_suggest_endif_comment(path),
    ))
}
