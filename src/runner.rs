//! Test-mode dispatch and exit policy for the command-line driver.

use clap::ValueEnum;
use serde::Serialize;

use crate::client::{QueryKind, RequestClient, RunAllReport};
use crate::outcome::OutcomeRecord;
use crate::protocol::{Locations, SignatureReply};
use crate::report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestKind {
    Definition,
    References,
    Signature,
    All,
}

/// Where to point the queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub file: String,
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SingleRun {
    Locations(OutcomeRecord<Locations>),
    Signature(OutcomeRecord<SignatureReply>),
}

impl SingleRun {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Locations(outcome) => outcome.is_success(),
            Self::Signature(outcome) => outcome.is_success(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    Single { kind: QueryKind, run: SingleRun },
    All(RunAllReport),
}

impl Execution {
    /// Whether the process should exit non-zero.
    ///
    /// The `all` report has no success flag of its own, so it never fails the
    /// process unless `strict` asks for any failed query to count.
    pub fn is_failure(&self, strict: bool) -> bool {
        match self {
            Self::Single { run, .. } => !run.is_success(),
            Self::All(report) => strict && report.success_count() < report.total(),
        }
    }

    pub fn render_text(&self, target: &Target, include_declaration: bool) -> String {
        match self {
            Self::Single { kind, run } => {
                let include = (*kind == QueryKind::References).then_some(include_declaration);
                let body = match run {
                    SingleRun::Locations(outcome) => report::render_locations(*kind, outcome),
                    SingleRun::Signature(outcome) => report::render_signature(outcome),
                };
                with_banner(*kind, body, target, include)
            }
            Self::All(report) => {
                let sections = [
                    with_banner(
                        QueryKind::Definition,
                        report::render_locations(QueryKind::Definition, &report.definition),
                        target,
                        None,
                    ),
                    with_banner(
                        QueryKind::References,
                        report::render_locations(QueryKind::References, &report.references),
                        target,
                        Some(true),
                    ),
                    with_banner(
                        QueryKind::Signature,
                        report::render_signature(&report.signature),
                        target,
                        None,
                    ),
                    report::render_summary(report),
                ];
                sections.join("\n\n")
            }
        }
    }

    pub fn render_json(&self) -> anyhow::Result<String> {
        match self {
            Self::Single { run, .. } => Ok(serde_json::to_string_pretty(run)?),
            Self::All(report) => Ok(serde_json::to_string_pretty(report)?),
        }
    }
}

fn with_banner(
    kind: QueryKind,
    body: String,
    target: &Target,
    include_declaration: Option<bool>,
) -> String {
    let banner = report::render_banner(
        kind,
        &target.file,
        target.line,
        target.character,
        include_declaration,
    );
    format!("{}\n{}", banner, body)
}

/// Runs the selected test. `include_declaration` only affects the
/// `references` mode; `all` always includes declarations.
pub async fn run(
    client: &RequestClient,
    kind: TestKind,
    target: &Target,
    include_declaration: bool,
) -> Execution {
    let Target {
        file,
        line,
        character,
    } = target;
    let (line, character) = (*line, *character);

    match kind {
        TestKind::Definition => Execution::Single {
            kind: QueryKind::Definition,
            run: SingleRun::Locations(client.find_definition(file, line, character).await),
        },
        TestKind::References => Execution::Single {
            kind: QueryKind::References,
            run: SingleRun::Locations(
                client
                    .find_references(file, line, character, include_declaration)
                    .await,
            ),
        },
        TestKind::Signature => Execution::Single {
            kind: QueryKind::Signature,
            run: SingleRun::Signature(client.signature_help(file, line, character).await),
        },
        TestKind::All => Execution::All(client.run_all(file, line, character).await),
    }
}
