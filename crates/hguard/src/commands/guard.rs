use air_workspace::resolve::PathResolver;
use hguard_core::discovery::{discover_header_paths, discover_settings};
use hguard_core::{
    config::ArgsConfig, config::build_config, report::GuardReport, settings::Settings,
};

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::args::{GuardCommand, StyleArgs};
use crate::output_format::{ConciseEmitter, Emitter, JsonEmitter, OutputFormat};
use crate::status::ExitStatus;

pub fn guard(args: GuardCommand) -> Result<ExitStatus> {
    let start = if args.with_timing {
        Some(Instant::now())
    } else {
        None
    };

    let mut resolver = PathResolver::new(Settings::default());
    let mut user_settings = None;

    // Track if we're using a config from a parent directory
    let mut parent_config_path: Option<PathBuf> = None;
    let cwd = env::current_dir().ok();

    for ds in discover_settings(&args.files)? {
        // Check if config is from a parent directory or the user config directory
        if let (Some(config_path), Some(current_dir)) = (&ds.config_path, &cwd)
            && (ds.is_user_config
                || (current_dir.starts_with(&ds.directory) && &ds.directory != current_dir))
        {
            parent_config_path = Some(config_path.clone());
        }

        if ds.is_user_config {
            user_settings = Some(ds.settings);
        } else {
            resolver.add(&ds.directory, ds.settings);
        }
    }

    let paths = discover_header_paths(
        &args.files,
        &resolver,
        user_settings.as_ref(),
        args.no_default_exclude,
    )
    .into_iter()
    .filter_map(|result| match result {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!("Failed to discover files: {err}");
            None
        }
    })
    .collect::<Vec<_>>();

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No header files found under the given path(s).".white().bold()
        );
        return Ok(ExitStatus::Success);
    }

    let args_config = args_config(args.files.iter().map(PathBuf::from).collect(), &args.style);
    let config = build_config(&args_config, &resolver, user_settings.as_ref(), paths);

    let file_results = hguard_core::check::check(config);

    let mut all_errors = Vec::new();
    let mut all_reports = Vec::new();

    for (path, result) in file_results {
        match result {
            Ok(report) => all_reports.push(report),
            Err(e) => all_errors.push((path, e)),
        }
    }

    let mut all_reports: Vec<&GuardReport> = all_reports.iter().collect();
    all_reports.sort();

    let mut stdout = std::io::stdout();

    match args.output_format {
        OutputFormat::Concise => {
            ConciseEmitter.emit(&mut stdout, &all_reports, &all_errors)?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(&mut stdout, &all_reports, &all_errors)?;
        }
    }

    // Skip for JSON to avoid corrupting structured output
    if !matches!(args.output_format, OutputFormat::Json) {
        // Inform the user if the config file used comes from a parent directory.
        if let Some(config_path) = parent_config_path {
            println!("\nUsed '{}'", config_path.display());
        }

        if let Some(start) = start {
            let duration = start.elapsed();
            println!("\nComputed guards in: {duration:?}");
        }
    }

    if !all_errors.is_empty() {
        return Ok(ExitStatus::Error);
    }

    Ok(ExitStatus::Success)
}

pub(crate) fn args_config(files: Vec<PathBuf>, style: &StyleArgs) -> ArgsConfig {
    ArgsConfig {
        files,
        style: style.style.clone(),
        base_dirs: style.base_dirs.clone(),
        rename_dirs: style.rename_dirs.clone(),
        end_if: style.end_if.clone(),
    }
}
