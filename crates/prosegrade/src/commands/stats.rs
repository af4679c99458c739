//! Stats command, a plain dump of the document statistics.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use prosegrade_core::Engine;
use prosegrade_core::stats::Totals;

use super::read_prose;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,
}

/// Print document statistics.
#[instrument(name = "cmd_stats", skip_all, fields(file = %args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing stats command");

    let prose = read_prose(&args.file, max_input_bytes)?;
    let analysis = engine.analyze(&prose)?;
    let snapshot = &analysis.stats;

    if global_json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("{}", "All sentences".bold().underline());
    print_totals(&snapshot.all);
    println!();
    println!("{}", "Complete sentences".bold().underline());
    print_totals(&snapshot.valid);
    println!();
    println!("{}: {}", "Paragraphs".dimmed(), snapshot.paragraphs);
    println!(
        "{}: {} (threshold {} words)",
        "Difficult sentences".dimmed(),
        snapshot.difficult_sentences,
        snapshot.difficult_sentence_threshold,
    );
    for note in &snapshot.diagnostics {
        println!("{}: {note}", "note".yellow());
    }

    Ok(())
}

fn print_totals(totals: &Totals) {
    print_row("Words", totals.words);
    print_row("Sentences", totals.sentences);
    print_row("Sentence units", totals.units);
    print_row("Syllables", totals.syllables);
    print_row("Characters", totals.chars);
    print_row("Monosyllabic words", totals.monosyllabic);
    print_row("3+ syllable words", totals.polysyllabic);
    print_row("6+ character words", totals.long_six);
    print_row("7+ character words", totals.long_seven);
    print_row("Mini words", totals.mini);
    print_row("Numerals", totals.numerals);
    print_row("Proper nouns", totals.proper_nouns);
    print_row("Interrogative sentences", totals.interrogative);
    print_row("Exclamatory sentences", totals.exclamatory);
    println!(
        "{}: {:.2}",
        "Words per sentence".dimmed(),
        totals.words_per_sentence()
    );
    println!(
        "{}: {:.2}",
        "Syllables per word".dimmed(),
        totals.syllables_per_word()
    );
    println!(
        "{}: {:.2}",
        "Characters per word".dimmed(),
        totals.chars_per_word()
    );
}

fn print_row(label: &str, value: u64) {
    println!("{}: {value}", label.dimmed());
}
