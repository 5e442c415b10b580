//! Subcommand execution.

use std::fs;
use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use serde::Serialize;
use textdispatch_config::Config;
use textdispatch_core::{
    CatalogId, CompileError, DispatchOptions, Handler, TableSummary, TokenCatalog,
};
use textdispatch_demos::brainf::{ADDER, HELLO_WORLD};
use textdispatch_demos::forth::SELF_TEST;
use textdispatch_demos::{BrainF, Forth, Second, Showcase, run_showcase};
use tracing::{debug, info};

use crate::cli::{CliCommand, HandlerName, OutputFormat};
use crate::errors::AppError;

const TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::command");

#[derive(Debug, Serialize)]
struct BrainFReport {
    output: String,
    pointer: usize,
}

#[derive(Debug, Serialize)]
struct ForthReport {
    output: String,
    stack: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct ForthCheck {
    line: &'static str,
    expected: &'static str,
    actual: String,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    showcase: Vec<String>,
    brainf: Vec<String>,
    forth: Vec<ForthCheck>,
}

pub(crate) fn execute<W: Write>(
    command: CliCommand,
    format: OutputFormat,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError> {
    match command {
        CliCommand::Bf { file, code, input } => {
            let program = load_program(file, code)?;
            run_brainf(config, &program, input.as_bytes(), format, stdout)
        }
        CliCommand::Forth { lines } => run_forth(config, &lines, format, stdout),
        CliCommand::Demo => run_demo(config, format, stdout),
        CliCommand::Describe { handler } => {
            let summary = summary_for(handler, config.dispatch_options())?;
            match format {
                OutputFormat::Human => writeln!(stdout, "{summary}")?,
                OutputFormat::Json => write_json(stdout, &summary)?,
            }
            Ok(())
        }
        CliCommand::Encode { handler, tokens } => {
            let catalog = catalog_for(handler)?;
            let ids = tokens
                .iter()
                .map(|token| catalog.encode(token))
                .collect::<Result<Vec<CatalogId>, _>>()?;
            match format {
                OutputFormat::Human => writeln!(stdout, "{}", join(&ids))?,
                OutputFormat::Json => write_json(stdout, &ids)?,
            }
            Ok(())
        }
        CliCommand::Decode { handler, ids } => {
            let catalog = catalog_for(handler)?;
            let tokens = ids
                .into_iter()
                .map(|raw| catalog.decode(CatalogId::new(raw)))
                .collect::<Result<Vec<&str>, _>>()?;
            match format {
                OutputFormat::Human => writeln!(stdout, "{}", tokens.join(" "))?,
                OutputFormat::Json => write_json(stdout, &tokens)?,
            }
            Ok(())
        }
    }
}

fn load_program(file: Option<Utf8PathBuf>, code: Option<String>) -> Result<String, AppError> {
    match (file, code) {
        (Some(path), _) => fs::read_to_string(&path).map_err(|source| AppError::ReadProgram {
            path,
            source: Arc::new(source),
        }),
        (None, Some(code)) => Ok(code),
        (None, None) => Err(AppError::MissingProgram),
    }
}

fn run_brainf<W: Write>(
    config: &Config,
    program: &str,
    input: &[u8],
    format: OutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    let mut machine = BrainF::with_tape_length(config.tape_length())?;
    machine.push_input(input);
    let output = machine.run(program)?;
    info!(target: TARGET, bytes = output.len(), "brainf program finished");
    match format {
        OutputFormat::Human => stdout.write_all(&output)?,
        OutputFormat::Json => write_json(
            stdout,
            &BrainFReport {
                output: String::from_utf8_lossy(&output).into_owned(),
                pointer: machine.pointer(),
            },
        )?,
    }
    Ok(())
}

fn run_forth<W: Write>(
    config: &Config,
    lines: &[String],
    format: OutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    let mut forth = Forth::new(config.dispatch_options())?;
    for line in lines {
        forth.exec_line(line)?;
    }
    let printed = forth.take_output();
    let trimmed = printed.trim_end();
    match format {
        OutputFormat::Human => {
            if !trimmed.is_empty() {
                writeln!(stdout, "{trimmed}")?;
            }
            if !forth.stack().is_empty() {
                writeln!(stdout, "stack: {}", join(forth.stack()))?;
            }
        }
        OutputFormat::Json => write_json(
            stdout,
            &ForthReport {
                output: trimmed.to_owned(),
                stack: forth.stack().to_vec(),
            },
        )?,
    }
    Ok(())
}

fn run_demo<W: Write>(
    config: &Config,
    format: OutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    let options = config.dispatch_options();
    let showcase = run_showcase(options)?;

    let mut machine = BrainF::with_tape_length(config.tape_length())?;
    let mut brainf = Vec::new();
    for (program, expected) in [(ADDER, "7"), (HELLO_WORLD, "Hello World!")] {
        let output = machine.run(program)?;
        let printed = String::from_utf8_lossy(&output);
        brainf.push(format!("{} = {expected}", printed.trim_end()));
    }

    let mut forth = Forth::new(options)?;
    let mut checks = Vec::new();
    for (expected, line) in SELF_TEST {
        forth.exec_line(line)?;
        let actual = forth.take_output().trim_end().to_owned();
        debug!(target: TARGET, line, expected, actual = actual.as_str(), "forth self-test line");
        checks.push(ForthCheck {
            line,
            expected,
            actual,
        });
    }

    match format {
        OutputFormat::Human => {
            writeln!(stdout, "SHOWCASE:")?;
            for line in &showcase {
                writeln!(stdout, "\t{line}")?;
            }
            writeln!(stdout, "BRAINF CAN EXECUTE:")?;
            for line in &brainf {
                writeln!(stdout, "\t{line}")?;
            }
            writeln!(stdout, "FORTH SELF TEST:")?;
            for check in &checks {
                writeln!(stdout, "\t{:>5} == {}", check.expected, check.actual)?;
            }
        }
        OutputFormat::Json => write_json(
            stdout,
            &DemoReport {
                showcase,
                brainf,
                forth: checks,
            },
        )?,
    }
    Ok(())
}

fn summary_for(
    handler: HandlerName,
    options: DispatchOptions,
) -> Result<TableSummary, CompileError> {
    fn summarise<H: Handler>(options: DispatchOptions) -> Result<TableSummary, CompileError> {
        H::compile_table(options).map(|table| table.summary())
    }

    match handler {
        HandlerName::Brainf => summarise::<BrainF>(options),
        HandlerName::Forth => summarise::<Forth>(options),
        HandlerName::Showcase => summarise::<Showcase>(options),
        HandlerName::Second => summarise::<Second>(options),
    }
}

fn catalog_for(handler: HandlerName) -> Result<TokenCatalog, CompileError> {
    match handler {
        HandlerName::Brainf => BrainF::compile_catalog(),
        HandlerName::Forth => Forth::compile_catalog(),
        HandlerName::Showcase => Showcase::compile_catalog(),
        HandlerName::Second => Second::compile_catalog(),
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_json<W: Write, T: Serialize>(stdout: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer(&mut *stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
