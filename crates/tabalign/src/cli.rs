use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tabalign_core::AlignAlgorithm;

#[derive(Parser)]
#[command(
    name = "tabalign",
    about = "Compare two tables row by row, preserving order",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log alignment details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: <config dir>/tabalign/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files of pasted spreadsheet data
    Compare(CompareArgs),
    /// Open the interactive paste-and-compare screen
    Ui(UiArgs),
}

#[derive(Args, Clone)]
pub struct InputArgs {
    /// First line holds column names
    #[arg(long, overrides_with = "no_header")]
    pub header: bool,

    /// First line is data, even when the config file sets `has_header`
    #[arg(long, overrides_with = "header")]
    pub no_header: bool,

    /// Field separator (default: tab)
    #[arg(long, short = 'd', value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Diff algorithm used to align rows
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Give up on a minimal alignment after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl InputArgs {
    /// Header setting given on the command line, if any
    pub fn header_override(&self) -> Option<bool> {
        match (self.header, self.no_header) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct CompareArgs {
    /// Data set A (`-` for stdin)
    pub a: PathBuf,
    /// Data set B (`-` for stdin)
    pub b: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the result to this file
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// File format for --output (default: from extension)
    #[arg(long, value_enum)]
    pub export_format: Option<ExportFormat>,

    /// Hide matching rows
    #[arg(long)]
    pub only_diff: bool,

    /// Only print the summary
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct UiArgs {
    /// Preload data set A from a file
    pub a: Option<PathBuf>,
    /// Preload data set B from a file
    pub b: Option<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Where the export key writes the workbook
    #[arg(long, value_name = "PATH", default_value = "comparison_result.xlsx")]
    pub export_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for AlignAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Myers => AlignAlgorithm::Myers,
            AlgorithmArg::Patience => AlignAlgorithm::Patience,
            AlgorithmArg::Lcs => AlignAlgorithm::Lcs,
        }
    }
}
