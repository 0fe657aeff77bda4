use std::path::PathBuf;
use std::process::Command;

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hguard"))
}

/// A command running `hguard` in `directory`, without colors and without the
/// `hguard.toml` of the user config directory.
pub fn hguard_in(directory: &std::path::Path) -> Command {
    let mut command = Command::new(binary_path());
    command
        .current_dir(directory)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", directory.join(".config"));
    command
}
