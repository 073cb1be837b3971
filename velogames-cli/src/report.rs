//! Rendering solved rosters for publication.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use velogames_core::{Diagnostics, Roster, Selection, TeamPlan};

use crate::CliError;

/// Output format for the `solve` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportFormat {
    /// Plain text announcement.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    game: &'a str,
    selection: &'a Selection,
    roster: &'a Roster,
    diagnostics: &'a Diagnostics,
}

fn roster_lines(roster: &Roster) -> Vec<String> {
    match roster {
        Roster::Unclassified { riders } => riders.clone(),
        Roster::Classified { slots, wildcard } => slots
            .iter()
            .flat_map(|slot| {
                slot.riders
                    .iter()
                    .map(move |name| format!("{name} ({})", slot.category))
            })
            .chain(wildcard.iter().map(|name| format!("{name} (wildcard)")))
            .collect(),
    }
}

/// Render the plain text announcement for `plan`.
pub(crate) fn render_text(game: &str, plan: &TeamPlan) -> String {
    let selection = &plan.response.selection;
    let mut text = format!("Best possible team for {game}:\n\n");
    for line in roster_lines(&plan.roster) {
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str(&format!(
        "Score: {}\nCost: {}\n",
        selection.total_score, selection.total_cost
    ));
    text
}

/// Render the JSON report for `plan`.
pub(crate) fn render_json(game: &str, plan: &TeamPlan) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        game,
        selection: &plan.response.selection,
        roster: &plan.roster,
        diagnostics: &plan.response.diagnostics,
    };
    serde_json::to_string_pretty(&report).map(|mut payload| {
        payload.push('\n');
        payload
    })
}

/// Write `plan` to `writer` in the requested format.
pub(crate) fn write_report(
    writer: &mut dyn Write,
    format: ReportFormat,
    game: &str,
    plan: &TeamPlan,
) -> Result<(), CliError> {
    let payload = match format {
        ReportFormat::Text => render_text(game, plan),
        ReportFormat::Json => render_json(game, plan).map_err(CliError::SerialiseReport)?,
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)
}
