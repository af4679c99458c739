//! Goals command, the pass/fail gate for configured score thresholds.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use prosegrade_core::Engine;

use super::read_prose;

/// Arguments for the `goals` subcommand.
#[derive(Args, Debug)]
pub struct GoalsArgs {
    /// File to check.
    pub file: Utf8PathBuf,
}

/// Check configured goals against a document.
///
/// Exits non-zero when any goal fails, so this works as a CI gate.
#[instrument(name = "cmd_goals", skip_all, fields(file = %args.file))]
pub fn cmd_goals(
    args: GoalsArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, goals = engine.config().goals.len(), "executing goals command");

    if engine.config().goals.is_empty() {
        if global_json {
            println!("{}", serde_json::to_string_pretty(&prosegrade_core::goals::GoalReview::default())?);
        } else {
            println!("no goals configured");
        }
        return Ok(());
    }

    let prose = read_prose(&args.file, max_input_bytes)?;
    let analysis = engine.analyze(&prose)?;
    let review = engine.review_goals(&analysis);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&review)?);
        if !review.all_passed() {
            std::process::exit(1);
        }
        return Ok(());
    }

    for outcome in &review.outcomes {
        if outcome.passed {
            println!("{} {}", "PASS:".green(), outcome.detail);
        } else {
            println!("{} {}", "FAIL:".red(), outcome.detail);
        }
    }

    if !review.all_passed() {
        let failed = review.outcomes.iter().filter(|o| !o.passed).count();
        bail!("{failed} of {} goals failed for {}", review.outcomes.len(), args.file);
    }

    Ok(())
}
