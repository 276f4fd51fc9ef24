//! reposcope - turn repository references into (owner, repository) pairs

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use reposcope_core::{App, AppError, SegmentOrder};
use reposcope_integrations::{normalize_github_url, RepositoryReferenceParser};
use reposcope_ui::SubmissionController;

/// Parse repository references such as `owner/repo` or `https://host/owner/repo`
#[derive(Parser, Debug)]
#[command(name = "reposcope")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read `a/b` as owner `a`, repository `b` regardless of config
    #[arg(long)]
    owner_first: bool,

    /// Also print the conventional `owner/repo` name for GitHub URLs
    #[arg(long)]
    canonical: bool,

    /// References to parse; read from stdin, one per line, when omitted
    references: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunSummary {
    total: usize,
    rejected: usize,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    reposcope_core::init()?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    match run(args, stdin.lock(), &mut stdout, &mut stderr) {
        Ok(summary) if summary.rejected == 0 => Ok(ExitCode::SUCCESS),
        Ok(_) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Feed each reference through the submission controller.
///
/// Successes go to `out` as one JSON object per line, rejections to `err`.
fn run<R, O, E>(args: Args, input: R, out: &mut O, err: &mut E) -> Result<RunSummary, AppError>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut app = match &args.config {
        Some(path) => App::from_path(path)?,
        None => App::new()?,
    };
    app.initialize()?;

    let mut parser_config = app.parser_config().clone();
    if args.owner_first {
        parser_config.segment_order = SegmentOrder::OwnerFirst;
    }

    let handler = |owner: &str, repository: &str| -> anyhow::Result<()> {
        tracing::debug!(owner, repository, "Analysis requested");
        Ok(())
    };
    let controller = SubmissionController::new(
        RepositoryReferenceParser::new(parser_config),
        Arc::new(handler),
    );

    let references: Vec<String> = if args.references.is_empty() {
        input
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        args.references
    };

    let mut summary = RunSummary::default();
    for raw in references {
        summary.total += 1;
        match controller.submit_text(raw.as_str()) {
            Ok(reference) => {
                let mut line = serde_json::to_value(&reference)
                    .map_err(|e| AppError::Other(e.into()))?;
                if args.canonical {
                    line["canonical"] = serde_json::json!(normalize_github_url(&raw));
                }
                writeln!(out, "{line}")?;
            }
            Err(e) => {
                summary.rejected += 1;
                writeln!(err, "{raw}: {}", e.user_message())?;
            }
        }
    }

    tracing::info!(
        total = summary.total,
        rejected = summary.rejected,
        "Finished parsing references"
    );
    app.shutdown();

    Ok(summary)
}
