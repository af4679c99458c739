//! Hardwords command, listing unfamiliar words per standard.

use std::collections::BTreeMap;

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use prosegrade_core::document::FrequencyEntry;
use prosegrade_core::hard_words::{self, DetailSink, HardWordAnalysis, StandardCounts};
use prosegrade_core::{Engine, tokenize};

use super::read_prose;

/// Arguments for the `hardwords` subcommand.
#[derive(Args, Debug)]
pub struct HardwordsArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Report a single standard (dale-chall, spache, harris-jacobson,
    /// fog, or a custom test name).
    #[arg(long, value_name = "NAME")]
    pub standard: Option<String>,
}

/// Collects the distinct unfamiliar words per standard.
#[derive(Default)]
struct WordCollector {
    words: BTreeMap<String, Vec<String>>,
}

impl DetailSink for WordCollector {
    fn record(&mut self, standard: &str, word: &str, _entry: &FrequencyEntry, unfamiliar: bool) {
        if unfamiliar {
            self.words
                .entry(standard.to_string())
                .or_default()
                .push(word.to_string());
        }
    }
}

#[derive(Serialize)]
struct HardWordReport {
    file: String,
    analysis: HardWordAnalysis,
    /// Distinct unfamiliar words per standard, sorted.
    unfamiliar_words: BTreeMap<String, Vec<String>>,
}

/// Report hard words by familiar-word standard.
#[instrument(name = "cmd_hardwords", skip_all, fields(file = %args.file))]
pub fn cmd_hardwords(
    args: HardwordsArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, standard = ?args.standard, "executing hardwords command");

    let prose = read_prose(&args.file, max_input_bytes)?;
    let document = tokenize::tokenize(&prose);
    let resources = engine.resources();
    let options = engine.config().hard_word_options(&resources)?;
    let mut collector = WordCollector::default();
    let analysis = hard_words::analyze(&document, &resources, &options, Some(&mut collector));

    let mut unfamiliar_words = collector.words;
    for words in unfamiliar_words.values_mut() {
        words.sort();
        words.dedup();
    }

    let standards = standard_table(&analysis);

    if let Some(ref name) = args.standard {
        let Some((id, counts)) = standards
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(name))
        else {
            let known: Vec<&str> = standards.iter().map(|(id, _)| id.as_str()).collect();
            bail!("unknown standard '{name}' (known: {})", known.join(", "));
        };
        let words = unfamiliar_words.get(id).cloned().unwrap_or_default();

        if global_json {
            #[derive(Serialize)]
            struct SingleStandard<'a> {
                standard: &'a str,
                counts: StandardCounts,
                words: Vec<String>,
            }
            let report = SingleStandard {
                standard: id,
                counts: *counts,
                words,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_counts(id, counts);
            for word in &words {
                println!("  {word}");
            }
        }
        return Ok(());
    }

    if global_json {
        let report = HardWordReport {
            file: args.file.to_string(),
            analysis,
            unfamiliar_words,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (id, counts) in &standards {
        print_counts(id, counts);
    }
    println!();
    println!(
        "{}: {} of {} categories used",
        "Dolch coverage".dimmed(),
        analysis.dolch.used.len(),
        analysis.dolch.used.len() + count_empty_dolch(&analysis),
    );

    Ok(())
}

/// Built-in standards first, then custom standards in name order.
fn standard_table(analysis: &HardWordAnalysis) -> Vec<(String, StandardCounts)> {
    let mut rows = vec![
        ("dale-chall".to_string(), analysis.dale_chall),
        ("spache".to_string(), analysis.spache),
        ("harris-jacobson".to_string(), analysis.harris_jacobson),
        ("fog".to_string(), analysis.fog),
    ];
    for (name, counts) in &analysis.custom {
        rows.push((name.clone(), *counts));
    }
    rows
}

fn print_counts(id: &str, counts: &StandardCounts) {
    println!(
        "{:<20} {} unique / {} total ({} unique / {} total in complete sentences)",
        id.bold(),
        counts.all.unique,
        counts.all.total,
        counts.valid.unique,
        counts.valid.total,
    );
}

fn count_empty_dolch(analysis: &HardWordAnalysis) -> usize {
    // used only holds categories with at least one hit
    let all = prosegrade_core::resources::DolchCategory::ALL.len();
    all.saturating_sub(analysis.dolch.used.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_keeps_unfamiliar_words_only() {
        let mut collector = WordCollector::default();
        let entry = FrequencyEntry {
            total: 1,
            proper: 0,
            syllables: 3,
            letters: 9,
            numeric: false,
        };
        collector.record("dale-chall", "committee", &entry, true);
        collector.record("dale-chall", "dog", &entry, false);
        assert_eq!(collector.words["dale-chall"], vec!["committee"]);
    }

    #[test]
    fn table_lists_builtin_standards() {
        let analysis = HardWordAnalysis::default();
        let ids: Vec<String> = standard_table(&analysis).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["dale-chall", "spache", "harris-jacobson", "fog"]);
    }
}
