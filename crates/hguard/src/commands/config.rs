use air_workspace::resolve::PathResolver;
use anyhow::Result;
use hguard_core::config::build_config;
use hguard_core::discovery::discover_settings;
use hguard_core::fs::normalize_path;
use hguard_core::options::OptionMap;
use hguard_core::settings::Settings;
use hguard_core::style::DirectoryRule;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::args::ConfigCommand;
use crate::commands::guard::args_config;
use crate::status::ExitStatus;

pub fn config(args: ConfigCommand) -> Result<ExitStatus> {
    let mut resolver = PathResolver::new(Settings::default());
    let mut user_settings = None;
    let path = normalize_path(&args.path);

    // The closest `hguard.toml` governing `path` itself, nested ones excluded
    let mut config_path: Option<(PathBuf, PathBuf)> = None;
    let mut user_config_path = None;

    for ds in discover_settings(&[&args.path])? {
        if ds.is_user_config {
            user_config_path = ds.config_path;
            user_settings = Some(ds.settings);
            continue;
        }
        if path.starts_with(&ds.directory)
            && let Some(toml) = ds.config_path.clone()
            && config_path
                .as_ref()
                .is_none_or(|(directory, _)| ds.directory.starts_with(directory))
        {
            config_path = Some((ds.directory.clone(), toml));
        }
        resolver.add(&ds.directory, ds.settings);
    }

    let args_config = args_config(vec![PathBuf::from(&args.path)], &args.style);
    let config = build_config(&args_config, &resolver, user_settings.as_ref(), vec![path.clone()]);
    let check = config.check_for(&path);
    let config_path = config_path.map(|(_, toml)| toml).or(user_config_path);

    let mut options = OptionMap::new();
    check.store_options(&mut options);

    let mut writer = BufWriter::new(std::io::stdout());

    if let Some(config_path) = config_path {
        writeln!(writer, "# Options from '{}'", config_path.display())?;
    }
    for (key, value) in options.iter() {
        writeln!(writer, "{key} = {value}")?;
    }

    let style = check.style();
    writeln!(writer)?;
    writeln!(writer, "# Effective style: {}", style.name)?;
    writeln!(writer, "# Base directories: {}", format_rules(&style.base_dirs))?;
    writeln!(writer, "# Renamed directories: {}", format_rules(&style.rename_dirs))?;
    writeln!(
        writer,
        "# Comment after #endif: {}",
        if style.suggest_endif_comment { "yes" } else { "no" }
    )?;
    writer.flush()?;

    Ok(ExitStatus::Success)
}

fn format_rules(rules: &[DirectoryRule]) -> String {
    if rules.is_empty() {
        return "(none)".to_string();
    }
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
