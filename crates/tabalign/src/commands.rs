use crate::app::App;
use crate::cli::*;
use crate::config::Config;
use crate::export::export_result;
use crate::output::{write_csv_report, write_json_report, write_text_report, Report};
use crate::session::{Comparison, Settings, Side};
use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run_command(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &config),
        Command::Ui(args) => cmd_ui(args, &config),
    }
}

fn cmd_compare(args: CompareArgs, config: &Config) -> Result<ExitCode> {
    let mut settings = Settings::resolve(config, &args.input)?;
    settings.only_diff |= args.only_diff;

    if is_stdin(&args.a) && is_stdin(&args.b) {
        bail!("Only one of A and B can be read from stdin");
    }
    let text_a = read_input(&args.a, Side::A)?;
    let text_b = read_input(&args.b, Side::B)?;

    let comparison = Comparison::run(&text_a, &text_b, &settings)?;
    let result = &comparison.result;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            let color = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
            if !args.quiet {
                writeln!(out, "{}", comparison.shape(Side::A))?;
                writeln!(out, "{}", comparison.shape(Side::B))?;
                writeln!(out)?;
            }
            write_text_report(&mut out, result, settings.only_diff, args.quiet, color)?;
        }
        OutputFormat::Json => {
            let report = Report::new(result, &comparison.operations, settings.only_diff);
            write_json_report(&mut out, &report)?;
        }
        OutputFormat::Csv => write_csv_report(&mut out, result, settings.only_diff)?,
    }
    out.flush()?;

    if let Some(path) = &args.output {
        let format = match args.export_format {
            Some(format) => format,
            None => ExportFormat::from_path(path)?,
        };
        export_result(result, &comparison.operations, path, format)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        if !args.quiet {
            eprintln!("Wrote {}", path.display());
        }
    }

    Ok(if result.summary().is_identical() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_ui(args: UiArgs, config: &Config) -> Result<ExitCode> {
    let settings = Settings::resolve(config, &args.input)?;
    let text_a = args
        .a
        .as_deref()
        .map(|p| read_input(p, Side::A))
        .transpose()?
        .unwrap_or_default();
    let text_b = args
        .b
        .as_deref()
        .map(|p| read_input(p, Side::B))
        .transpose()?
        .unwrap_or_default();

    let mut app = App::new(settings, args.export_path).with_inputs(&text_a, &text_b);
    crate::tui::run(&mut app)?;
    Ok(ExitCode::SUCCESS)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path, side: Side) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read data {} from stdin", side))?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data {} from {}", side, path.display()))
}
