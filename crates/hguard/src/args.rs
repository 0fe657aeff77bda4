use crate::logging::LogLevel;
use crate::output_format::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    name = "hguard",
    about = "hguard: Compute Header Guards from File Paths",
    after_help = "For help with a specific command, see: `hguard help <command>`."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[clap(flatten)]
    pub(crate) global_options: GlobalOptions,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Compute the header guards of a set of files or directories
    Guard(GuardCommand),

    /// Show the options used for a given path
    Config(ConfigCommand),
}

/// Options that override the ones of `hguard.toml`.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct StyleArgs {
    #[arg(
        long,
        help = "Name of the style to use, for example `llvm`. An empty or unknown name selects the default style."
    )]
    pub style: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Base directories as `marker=replacement` entries separated by a comma, for example `include/=,src/=_SRC_`. Replaces the ones of the style."
    )]
    pub base_dirs: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Directories to rename as `marker=replacement` entries separated by a comma. Replaces the ones of the style."
    )]
    pub rename_dirs: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Suggest a comment after `#endif` if this contains a `+`."
    )]
    pub end_if: Option<String>,
}

#[derive(Clone, Debug, Parser)]
#[command(arg_required_else_help(true))]
pub struct GuardCommand {
    #[arg(
        required = true,
        help = "List of files or directories to compute header guards for, for example `hguard guard include`."
    )]
    pub files: Vec<String>,
    #[clap(flatten)]
    pub style: StyleArgs,
    #[arg(
        long,
        default_value = "false",
        help = "Do not exclude `.git/`, `build/` and `third_party/`."
    )]
    pub no_default_exclude: bool,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Show the time taken by the function."
    )]
    pub with_timing: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::default(),
        help="Output serialization format for header guards."
    )]
    pub output_format: OutputFormat,
}

#[derive(Clone, Debug, Parser)]
pub struct ConfigCommand {
    #[arg(
        default_value = ".",
        help = "File or directory whose options are shown."
    )]
    pub path: String,
    #[clap(flatten)]
    pub style: StyleArgs,
}

/// All configuration options that can be passed "globally"
#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub(crate) struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LogLevel>,

    /// Disable colored output. To turn colored output off, either set this option or set
    /// the environment variable `NO_COLOR` to any non-zero value.
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}
