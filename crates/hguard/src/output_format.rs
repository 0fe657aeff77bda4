use air_fs::relativize_path;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};

use hguard_core::report::GuardReport;

#[derive(Debug, Serialize)]
struct JsonOutput {
    guards: Vec<JsonGuard>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonGuard {
    file: String,
    guard: String,
    endif_comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print header guards in a concise format, one per line
    Concise,
    /// Print header guards as JSON
    Json,
}

/// Takes the header guards and the errors in each file and then displays
/// them in different ways depending on the `--output-format` provided by the
/// user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        reports: &[&GuardReport],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        reports: &[&GuardReport],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        // First, print all errors
        if !errors.is_empty() {
            writer.flush()?; // Flush before writing to stderr
            for (_path, err) in errors {
                eprintln!("{}: {:#}", "Error".red().bold(), err);
            }
        }

        // Cache relativized paths to avoid repeated filesystem operations
        let mut path_cache = std::collections::HashMap::new();

        for report in reports {
            let relative_path = path_cache
                .entry(&report.filename)
                .or_insert_with(|| relativize_path(report.filename.clone()));

            match report.endif_comment() {
                Some(comment) => writeln!(
                    writer,
                    "{}: {} {}",
                    relative_path.white(),
                    report.guard.green().bold(),
                    format!("(#endif {comment})").dimmed()
                )?,
                None => writeln!(
                    writer,
                    "{}: {}",
                    relative_path.white(),
                    report.guard.green().bold()
                )?,
            }
        }

        writer.flush()?; // Ensure all guards are written before summary

        match reports.len() {
            0 => {}
            1 => writeln!(writer, "\nComputed 1 header guard.")?,
            n => writeln!(writer, "\nComputed {n} header guards.")?,
        }
        writer.flush()?;

        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        reports: &[&GuardReport],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        let guards: Vec<JsonGuard> = reports
            .iter()
            .map(|report| JsonGuard {
                file: relativize_path(report.filename.clone()),
                guard: report.guard.clone(),
                endif_comment: report.endif_comment(),
            })
            .collect();

        // Convert errors to a serializable format
        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{:#}", err) })
            .collect();

        let output = JsonOutput { guards, errors: json_errors };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
