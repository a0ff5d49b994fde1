//! CLI entrypoint for the mingwex-rs conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mingwex_rs_harness::runner::HarnessError;
use mingwex_rs_harness::{
    ArgSpec, ConformanceReport, FixtureCase, FixtureSet, TestRunner, runner::execute_case,
};

/// Conformance tooling for mingwex-rs.
#[derive(Debug, Parser)]
#[command(name = "mingwex-rs-harness")]
#[command(about = "Conformance testing harness for the mingwex-rs formatting engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of `*.json` fixture files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). If omitted, prints to stdout.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Emit the report as JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
    /// Render a single format string from the command line.
    Render {
        /// The format string.
        format: String,
        /// Arguments as `kind:value` pairs, e.g. `int:42`, `float:1.5`,
        /// `str:hello`, `uint:255`, `char:A`, `ptr:0xdead`.
        args: Vec<String>,
        /// Bounded-sink capacity (omitted = unbounded).
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("harness: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, HarnessError> {
    match cli.command {
        Command::Verify {
            fixture,
            report,
            json,
        } => {
            let sets = load_fixtures(&fixture)?;
            let runner = TestRunner::new("cli");
            let mut results = Vec::new();
            for set in &sets {
                results.extend(runner.run(set));
            }
            let report_data =
                ConformanceReport::from_results("pformat conformance", "cli", results);
            let all_passed = report_data.all_passed();
            let rendered = if json {
                report_data.to_json()
            } else {
                report_data.to_markdown()
            };
            match report {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
            Ok(all_passed)
        }
        Command::Render {
            format,
            args,
            limit,
        } => {
            let parsed: Vec<ArgSpec> = args
                .iter()
                .map(|a| parse_arg(a))
                .collect::<Result<_, _>>()
                .map_err(|e| HarnessError::Io(std::io::Error::other(e)))?;
            let case = FixtureCase {
                name: "render".into(),
                spec_section: String::new(),
                format,
                args: parsed,
                expected: String::new(),
                expected_count: None,
                limit,
            };
            let outcome = execute_case(&case);
            println!("{}", outcome.output);
            eprintln!("count: {}", outcome.count);
            Ok(outcome.count >= 0)
        }
    }
}

fn load_fixtures(path: &Path) -> Result<Vec<FixtureSet>, HarnessError> {
    if path.is_dir() {
        let mut sets = Vec::new();
        let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();
        for entry in entries {
            sets.push(FixtureSet::from_file(&entry)?);
        }
        Ok(sets)
    } else {
        Ok(vec![FixtureSet::from_file(path)?])
    }
}

fn parse_arg(text: &str) -> Result<ArgSpec, String> {
    let (kind, value) = text
        .split_once(':')
        .ok_or_else(|| format!("expected kind:value, got `{text}`"))?;
    match kind {
        "int" => value
            .parse()
            .map(ArgSpec::Int)
            .map_err(|e| format!("bad int `{value}`: {e}")),
        "uint" => value
            .parse()
            .map(ArgSpec::Uint)
            .map_err(|e| format!("bad uint `{value}`: {e}")),
        "float" => value
            .parse()
            .map(ArgSpec::Float)
            .map_err(|e| format!("bad float `{value}`: {e}")),
        "char" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(ArgSpec::Char(c)),
                _ => Err(format!("bad char `{value}`")),
            }
        }
        "str" => Ok(ArgSpec::Str(value.to_string())),
        "null" => Ok(ArgSpec::NullStr),
        "ptr" => {
            let digits = value.strip_prefix("0x").unwrap_or(value);
            u64::from_str_radix(digits, 16)
                .map(ArgSpec::Ptr)
                .map_err(|e| format!("bad ptr `{value}`: {e}"))
        }
        other => Err(format!("unknown argument kind `{other}`")),
    }
}
