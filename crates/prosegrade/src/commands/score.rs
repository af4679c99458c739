//! Score command, the main entry point for readability scoring.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use prosegrade_core::error::TestError;
use prosegrade_core::registry::Language;
use prosegrade_core::{Engine, TestResult};

use super::read_prose;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score.
    pub file: Utf8PathBuf,

    /// Score only these tests (repeatable). Default: every applicable test.
    #[arg(long = "test", value_name = "ID")]
    pub tests: Vec<String>,

    /// Override the configured document language.
    #[arg(long, value_enum)]
    pub language: Option<Language>,
}

#[derive(Serialize)]
struct SkippedTest {
    test: String,
    reason: String,
}

#[derive(Serialize)]
struct ScoreReport {
    file: String,
    language: Language,
    results: Vec<TestResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    no_score: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedTest>,
}

/// Score a document against the test roster.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, tests = ?args.tests, "executing score command");

    let prose = read_prose(&args.file, max_input_bytes)?;
    let analysis = engine.analyze(&prose)?;
    let language = args.language.unwrap_or(engine.config().language);

    let mut report = ScoreReport {
        file: args.file.to_string(),
        language,
        results: Vec::new(),
        no_score: Vec::new(),
        skipped: Vec::new(),
    };

    if args.tests.is_empty() {
        let batch = engine
            .registry()
            .compute_all(&analysis.context, language);
        for (id, outcome) in batch.outcomes {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(TestError::NoScore { test }) => report.no_score.push(test),
                Err(err) => report.skipped.push(SkippedTest {
                    test: id,
                    reason: err.to_string(),
                }),
            }
        }
    } else {
        // Explicitly requested tests fail loudly instead of being skipped.
        for id in &args.tests {
            match engine.registry().compute(id, &analysis.context, language) {
                Ok(result) => report.results.push(result),
                Err(TestError::NoScore { test }) => report.no_score.push(test),
                Err(err) => bail!("{err}"),
            }
        }
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for result in &report.results {
        println!("{:<36} {}", result.name.bold(), render_value(result));
    }
    for test in &report.no_score {
        println!("{:<36} {}", test.bold(), "no score".dimmed());
    }
    for skipped in &report.skipped {
        println!(
            "{:<36} {}",
            skipped.test.dimmed(),
            format!("skipped ({})", skipped.reason).dimmed()
        );
    }

    Ok(())
}

fn render_value(result: &TestResult) -> String {
    if let Some((lower, upper)) = result.grade_range {
        let ages = result.age_range.as_deref().unwrap_or_default();
        return format!("grade {lower}-{upper} (ages {ages})");
    }
    if let Some(grade) = result.grade {
        let label = result.grade_label.as_deref().unwrap_or_default();
        let ages = result.age_range.as_deref().unwrap_or_default();
        return format!("grade {label} (ages {ages}) [{grade}]");
    }
    if let Some(index) = result.index {
        let label = result.index_label.as_deref().unwrap_or_default();
        return format!("{index} ({label})");
    }
    if let Some(cloze) = result.cloze {
        return format!("predicted cloze {cloze}%");
    }
    result.explanation.clone()
}
