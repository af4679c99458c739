//! Tests command, listing the registered readability tests.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use prosegrade_core::Engine;
use prosegrade_core::registry::{Language, TestDescriptor, TestKind};

/// Arguments for the `tests` subcommand.
#[derive(Args, Debug, Default)]
pub struct TestsArgs {
    /// List only tests applicable to this language.
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// List every registered test, regardless of language.
    #[arg(long, conflicts_with = "language")]
    pub all: bool,
}

#[derive(Serialize)]
struct TestList<'a> {
    tests: Vec<&'a TestDescriptor>,
}

/// List the registered readability tests.
#[instrument(name = "cmd_tests", skip_all)]
pub fn cmd_tests(args: TestsArgs, global_json: bool, engine: &Engine) -> anyhow::Result<()> {
    debug!(language = ?args.language, all = args.all, "executing tests command");

    let descriptors: Vec<&TestDescriptor> = if args.all {
        engine.registry().descriptors().collect()
    } else {
        let language = args.language.unwrap_or(engine.config().language);
        engine.registry().descriptors_for(language).collect()
    };

    if global_json {
        let list = TestList { tests: descriptors };
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    for descriptor in descriptors {
        let languages: Vec<String> = descriptor
            .languages
            .iter()
            .map(ToString::to_string)
            .collect();
        let marker = if descriptor.custom { " (custom)" } else { "" };
        println!(
            "{:<34} {:<38} {:<6} {}{}",
            descriptor.id.bold(),
            descriptor.name,
            kind_label(descriptor.kind),
            languages.join(", ").dimmed(),
            marker.yellow(),
        );
    }

    Ok(())
}

const fn kind_label(kind: TestKind) -> &'static str {
    match kind {
        TestKind::Grade => "grade",
        TestKind::Index => "index",
        TestKind::Cloze => "cloze",
        TestKind::Graph => "graph",
    }
}
