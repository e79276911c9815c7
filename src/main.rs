// SPDX-License-Identifier: MIT
//
// callnav: call-site, argument, and scope-name navigation for Python source.
//
// This is the command-line front end that wires the two library crates:
//
//   callnav-core   → scanners, argument resolver, navigation/expansion commands
//   callnav-editor → in-memory editor that hosts those commands
//
// Every subcommand loads one file into an Editor, runs a single command
// against it, and prints the result:
//
//   file → Editor → Navigator / unpack_tuple_to_one → selection or text → stdout
//
// Spans are printed as `start..end<TAB>text`, offsets in chars.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use callnav_core::host::TextSource;
use callnav_core::{
    Config, Direction, Document, Navigator, Shape, Span, Target, unpack_tuple_to_one,
};
use callnav_editor::Editor;

// ─── Command line ───────────────────────────────────────────────────────────

/// Navigate Python call sites, arguments, and definitions.
#[derive(Debug, Parser)]
#[command(name = "callnav", version, about)]
struct Cli {
    /// Configuration file (TOML).
    #[arg(long, global = true, env = "CALLNAV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every invoked identifier.
    Invocations { file: PathBuf },
    /// List every `def` / `class` name.
    Scopes { file: PathBuf },
    /// List every argument of every call.
    Arguments {
        file: PathBuf,
        /// Only `name=value` arguments.
        #[arg(long)]
        keywords_only: bool,
    },
    /// Select the next item after the selection.
    Next(Step),
    /// Select the previous item before the selection.
    Prev(Step),
    /// Grow a caret into the largest enclosing shape.
    Expand {
        shape: ShapeArg,
        file: PathBuf,
        #[arg(long)]
        caret: usize,
    },
    /// Turn the plural word at the caret into a one-tuple: `things` → `(thing,)`.
    Unpack {
        file: PathBuf,
        #[arg(long)]
        caret: usize,
    },
}

/// Arguments shared by `next` and `prev`.
#[derive(Debug, Args)]
struct Step {
    kind: TargetArg,
    file: PathBuf,
    /// Selection start (char offset).
    #[arg(long)]
    caret: usize,
    /// Selection end; defaults to the caret.
    #[arg(long)]
    selection_end: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Invocation,
    Argument,
    KeywordArgument,
    Scope,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Invocation => Self::Invocation,
            TargetArg::Argument => Self::Argument,
            TargetArg::KeywordArgument => Self::KeywordArgument,
            TargetArg::Scope => Self::ScopeName,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Expression,
    DottedName,
    WhitespacelessName,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Expression => Self::Expression,
            ShapeArg::DottedName => Self::DottedName,
            ShapeArg::WhitespacelessName => Self::WhitespacelessName,
        }
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Log to stderr. Filter priority: `CALLNAV_LOG` > `RUST_LOG` > `warn`.
fn init_logging() {
    let filter = env::var("CALLNAV_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .map_or_else(|_| EnvFilter::new("warn"), EnvFilter::new);
    // Already initialized is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config =
        Config::load_or_default(cli.config.as_deref()).context("cannot load configuration")?;
    debug!(?config, "configuration loaded");
    let mut navigator = Navigator::new(config).context("cannot initialize the Python parser")?;

    match cli.command {
        Command::Invocations { file } => list(&mut navigator, &file, Target::Invocation, out),
        Command::Scopes { file } => list(&mut navigator, &file, Target::ScopeName, out),
        Command::Arguments {
            file,
            keywords_only,
        } => {
            let target = if keywords_only {
                Target::KeywordArgument
            } else {
                Target::Argument
            };
            list(&mut navigator, &file, target, out)
        }
        Command::Next(step) => navigate(&mut navigator, step, Direction::Forward, out),
        Command::Prev(step) => navigate(&mut navigator, step, Direction::Backward, out),
        Command::Expand { shape, file, caret } => {
            let mut editor = open(&file)?;
            editor.set_selection(Span::point(caret));
            navigator.expand(&mut editor, shape.into());
            print_span(out, &editor, editor.selection())
        }
        Command::Unpack { file, caret } => {
            let mut editor = open(&file)?;
            editor.set_selection(Span::point(caret));
            unpack_tuple_to_one(&mut editor, singularize);
            write!(out, "{}", editor.text())?;
            Ok(())
        }
    }
}

fn list(
    navigator: &mut Navigator,
    file: &Path,
    target: Target,
    out: &mut impl Write,
) -> Result<()> {
    let editor = open(file)?;
    let doc = Document::new(editor.text());
    let mut spans = navigator.spans(&doc, target);
    spans.sort();
    for span in spans {
        print_span(out, &editor, span)?;
    }
    Ok(())
}

fn navigate(
    navigator: &mut Navigator,
    step: Step,
    direction: Direction,
    out: &mut impl Write,
) -> Result<()> {
    let end = step.selection_end.unwrap_or(step.caret);
    if end < step.caret {
        bail!("--selection-end ({end}) is before --caret ({})", step.caret);
    }
    let mut editor = open(&step.file)?;
    editor.set_selection(Span::new(step.caret, end));
    if let Some(span) = navigator.select(&mut editor, step.kind.into(), direction) {
        print_span(out, &editor, span)?;
    }
    Ok(())
}

fn open(file: &Path) -> Result<Editor> {
    Editor::open(file).with_context(|| format!("cannot open {}", file.display()))
}

fn print_span(out: &mut impl Write, editor: &Editor, span: Span) -> Result<()> {
    let text = editor.buffer().slice(span).to_string();
    writeln!(out, "{span}\t{}", text.escape_debug())?;
    Ok(())
}

/// Strip one trailing `s`. Irregular plurals are out of reach here.
fn singularize(word: &str) -> String {
    word.strip_suffix('s').unwrap_or(word).to_owned()
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging();
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    if let Err(e) = run(cli, &mut stdout) {
        eprintln!("callnav: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
