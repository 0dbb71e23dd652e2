use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use partnership_parser::{JournalSources, Tag};
use partnership_render::{render, render_unannotated};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::engine::Engine;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate virtual partnership postings for journal and run Ledger.",
    long_about = None
)]
struct Cli {
    /// Read journal data from FILE
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Read every journal file in DIR
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directories: Vec<PathBuf>,

    /// Print journal with partnership postings and exit
    #[arg(short = 'N', long)]
    just_print: bool,

    /// Split by `; Shadow:` annotations, without the equal-split default
    #[arg(long)]
    shadow: bool,

    /// Arguments passed through to Ledger
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    ledger_args: Vec<String>,
}

impl Cli {
    fn tag(&self) -> Tag {
        if self.shadow {
            Tag::Shadow
        } else {
            Tag::Partnership
        }
    }
}

fn main() -> Result<ExitCode> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let code = run(
        &cli,
        &Engine::from_env(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(ExitCode::from(code))
}

/// Adjoins the journals named by `cli` and prints them or hands them to `engine`.  Returns the
/// process exit code.
fn run<O: Write, E: Write>(cli: &Cli, engine: &Engine, out: &mut O, err: &mut E) -> Result<u8> {
    let tag = cli.tag();

    let files = config::journal_files(&cli.files, &cli.directories)?;
    if files.is_empty() {
        writeln!(err, "Error: No journal file specified")?;
        return Ok(1);
    }
    info!(files = files.len(), tag = tag.keyword(), "reading journals");

    let sources = JournalSources::read(&files)?;
    let adjoined = sources.adjoin(tag)?;
    if !adjoined.is_complete() {
        render_unannotated(err, tag.keyword(), &adjoined.unannotated)?;
        return Ok(1);
    }

    if cli.just_print {
        render(out, &adjoined.journal)?;
        out.flush()?;
        return Ok(0);
    }
    if cli.ledger_args.is_empty() {
        writeln!(err, "Error: No ledger arguments provided")?;
        return Ok(1);
    }

    let mut journal = Vec::new();
    render(&mut journal, &adjoined.journal)?;
    engine.run(&journal, &cli.ledger_args)
}

pub(crate) mod config;
pub(crate) mod engine;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const ANNOTATED: &str = indoc! {"
        2017-01-06 Lunch
            ; Partnership: A
            Expenses:Food  $ 12.00
            Assets:Cash
    "};

    const UNANNOTATED: &str = indoc! {"
        2017-01-06 Lunch
            Expenses:Food  $ 12.00
            Assets:Cash
    "};

    const NO_ENGINE: &str = "partnership-ledger-no-such-engine";

    struct Outcome {
        code: u8,
        out: String,
        err: String,
    }

    fn run_with(dir: &Path, journal: &str, engine: &str, args: &[&str]) -> anyhow::Result<Outcome> {
        let path = dir.join("books.ledger");
        fs::write(&path, journal)?;
        let mut argv = vec!["partnership-ledger".to_string(), "-f".to_string()];
        argv.push(path.display().to_string());
        argv.extend(args.iter().map(|s| s.to_string()));

        let cli = Cli::parse_from(argv);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run(&cli, &Engine::new(engine), &mut out, &mut err)?;
        Ok(Outcome {
            code,
            out: String::from_utf8(out)?,
            err: String::from_utf8(err)?,
        })
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn pass_through_arguments() {
        let cli = Cli::parse_from([
            "partnership-ledger",
            "-f",
            "a.ledger",
            "--file",
            "b.ledger",
            "--shadow",
            "bal",
            "--flat",
            "-X",
            "$",
        ]);
        assert_eq!(
            cli.files,
            vec![PathBuf::from("a.ledger"), PathBuf::from("b.ledger")]
        );
        assert_eq!(cli.tag(), Tag::Shadow);
        assert!(!cli.just_print);
        assert_eq!(cli.ledger_args, vec!["bal", "--flat", "-X", "$"]);
    }

    #[test]
    fn unannotated_never_reaches_engine() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let outcome = run_with(dir.path(), UNANNOTATED, NO_ENGINE, &["bal"])?;
        assert_eq!(outcome.code, 1);
        assert!(outcome.out.is_empty());
        assert!(outcome.err.starts_with("Error: Found 1 transactions in "));
        assert!(outcome.err.ends_with("that do not have partnership tags; see lines: 1\n"));
        Ok(())
    }

    #[test]
    fn ledger_arguments_required() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let outcome = run_with(dir.path(), ANNOTATED, NO_ENGINE, &[])?;
        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.err, "Error: No ledger arguments provided\n");
        Ok(())
    }

    #[test]
    fn just_print_writes_journal() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let outcome = run_with(dir.path(), ANNOTATED, NO_ENGINE, &["-N"])?;
        assert_eq!(outcome.code, 0);
        assert!(outcome.err.is_empty());
        assert_eq!(
            outcome.out,
            format!(
                "{}    [A:Expenses:Food]  $ 12.00\n    [A:Assets:Cash]  $ -12.00\n",
                ANNOTATED
            )
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn engine_status_is_returned() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert_eq!(run_with(dir.path(), ANNOTATED, "true", &["bal"])?.code, 0);
        assert_eq!(run_with(dir.path(), ANNOTATED, "false", &["bal"])?.code, 1);
        Ok(())
    }

    #[test]
    fn just_print() {
        let cli = Cli::parse_from(["partnership-ledger", "-N", "-d", "books"]);
        assert!(cli.just_print);
        assert_eq!(cli.directories, vec![PathBuf::from("books")]);
        assert!(cli.ledger_args.is_empty());
        assert_eq!(cli.tag(), Tag::Partnership);
    }
}
