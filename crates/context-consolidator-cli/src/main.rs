use anyhow::{Context, Result};
use context_consolidator_config::Config;
use context_consolidator_engine::{
    DocumentId, Outcome, Reanchorer, SnippetAnchor, TextDocument, TextRange,
};
use std::{env, path::Path, path::PathBuf, process};

const USAGE: &str = "\
Usage:
  {bin} reanchor <snippet-file> <document-file>
  {bin} track <old-document> <start>-<end> <new-document>";

/// Exit status when a snippet could not be re-anchored
const EXIT_UNRECOVERABLE: i32 = 2;

#[derive(Debug, PartialEq)]
enum Command {
    /// Re-anchor the text of `snippet` in `document`
    Reanchor { snippet: PathBuf, document: PathBuf },
    /// Capture 1-based lines `first..=last` of `old` and re-anchor them in `new`
    Track {
        old: PathBuf,
        first: usize,
        last: usize,
        new: PathBuf,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args {
        [cmd, snippet, document] if cmd == "reanchor" => Ok(Command::Reanchor {
            snippet: PathBuf::from(snippet),
            document: PathBuf::from(document),
        }),
        [cmd, old, lines, new] if cmd == "track" => {
            let (first, last) = parse_line_range(lines)?;
            Ok(Command::Track {
                old: PathBuf::from(old),
                first,
                last,
                new: PathBuf::from(new),
            })
        }
        [cmd, ..] if cmd == "reanchor" || cmd == "track" => {
            Err(format!("Wrong number of arguments for '{cmd}'"))
        }
        [cmd, ..] => Err(format!("Unknown command '{cmd}'")),
        [] => Err("No command given".to_string()),
    }
}

/// Parse `start-end` (1-based, inclusive). A single number means one line.
fn parse_line_range(spec: &str) -> Result<(usize, usize), String> {
    let (start, end) = spec.split_once('-').unwrap_or((spec, spec));
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| format!("Invalid line range '{spec}': lines start at 1"))
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start > end {
        return Err(format!("Invalid line range '{spec}': start is after end"));
    }
    Ok((start, end))
}

fn read_document(path: &Path) -> Result<TextDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    TextDocument::from_bytes(&bytes).with_context(|| format!("{} is not UTF-8", path.display()))
}

fn load_reanchorer() -> Result<Reanchorer> {
    let settings = match Config::load()? {
        Some(config) => config.reanchor,
        None => {
            log::debug!(
                "No config file at {}, using defaults",
                Config::config_path().display()
            );
            Default::default()
        }
    };
    Ok(Reanchorer::new(settings))
}

fn run(command: &Command, reanchorer: &Reanchorer) -> Result<Outcome> {
    match command {
        Command::Reanchor { snippet, document } => {
            let captured = std::fs::read_to_string(snippet)
                .with_context(|| format!("Failed to read {}", snippet.display()))?;
            let anchor = SnippetAnchor::new(
                DocumentId(document.display().to_string()),
                captured,
                TextRange::default(),
            );
            Ok(reanchorer.reanchor(&anchor, &read_document(document)?))
        }
        Command::Track {
            old,
            first,
            last,
            new,
        } => {
            let old_document = read_document(old)?;
            if *last > old_document.line_count() {
                anyhow::bail!(
                    "{} has {} lines, cannot track line {last}",
                    old.display(),
                    old_document.line_count()
                );
            }
            let range = old_document.whole_lines(first - 1, last - 1);
            let anchor =
                SnippetAnchor::capture(DocumentId(old.display().to_string()), &old_document, range);
            Ok(reanchorer.reanchor(&anchor, &read_document(new)?))
        }
    }
}

/// Text to print for an outcome, and the process exit status.
fn render(outcome: &Outcome) -> (String, i32) {
    match outcome {
        Outcome::Relocated(r) => (
            format!(
                "relocated {} ({}, {} confidence)\n{}",
                r.range, r.strategy, r.confidence, r.text
            ),
            0,
        ),
        Outcome::Unrecoverable(reason) => {
            (format!("unrecoverable: {reason}"), EXIT_UNRECOVERABLE)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let bin = args.first().map_or("context-consolidator", String::as_str);

    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", USAGE.replace("{bin}", bin));
            process::exit(1);
        }
    };

    let reanchorer = match load_reanchorer() {
        Ok(reanchorer) => reanchorer,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let outcome = run(&command, &reanchorer)?;
    let (output, status) = render(&outcome);
    println!("{output}");
    if status != 0 {
        process::exit(status);
    }

    Ok(())
}
