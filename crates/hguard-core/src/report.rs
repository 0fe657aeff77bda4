use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
// The object that is eventually printed in the console, one per header.
pub struct GuardReport {
    pub filename: PathBuf,
    // The guard macro the header should use.
    pub guard: String,
    // Whether `#endif` should be followed by a `// GUARD` comment.
    pub suggest_endif_comment: bool,
}

impl GuardReport {
    pub fn new(filename: PathBuf, guard: String, suggest_endif_comment: bool) -> Self {
        Self { filename, guard, suggest_endif_comment }
    }

    /// The text of the comment following `#endif`, if one should be added.
    pub fn endif_comment(&self) -> Option<String> {
        self.suggest_endif_comment
            .then(|| format!("// {}", self.guard))
    }
}

impl Ord for GuardReport {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.filename.cmp(&other.filename) {
            Ordering::Equal => self.guard.cmp(&other.guard),
            other => other,
        }
    }
}

impl PartialOrd for GuardReport {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
