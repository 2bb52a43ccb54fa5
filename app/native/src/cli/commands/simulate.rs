//! `lumen simulate`: replays a scenario and prints the presentation state.

use std::path::Path;

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config;
use crate::error::LumenError;
use crate::scenario::Scenario;
use crate::simulation::{Simulation, Snapshot};

/// Longest cell value printed in the table.
const MAX_VALUE_CHARS: usize = 60;

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    property: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl PropertyRow {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self { property, value: value.into() }
    }
}

/// Executes the simulate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or a step does not resolve.
pub fn execute(path: &Path, json: bool) -> Result<(), LumenError> {
    let scenario = Scenario::load(path)?;
    tracing::debug!(path = %path.display(), steps = scenario.steps.len(), "loaded scenario");

    let lumen_config = config::get_config();
    if let Some(config_path) = config::get_config_path() {
        tracing::debug!(path = %config_path.display(), "using configuration file");
    }
    let simulation = Simulation::run(&scenario, lumen_config)?;
    let snapshot = simulation.snapshot();

    if json {
        output::print_highlighted_json(&serde_json::to_value(&snapshot)?);
        return Ok(());
    }

    let table = Table::new(snapshot_rows(&snapshot))
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", format!("Scenario {}", path.display()).bold());
    println!("{table}");
    Ok(())
}

/// Flattens a snapshot into table rows.
fn snapshot_rows(snapshot: &Snapshot) -> Vec<PropertyRow> {
    let viewport = snapshot.viewport;
    let frame_runs = snapshot
        .frame_runs
        .iter()
        .map(|(source, runs)| format!("{source}={runs}"))
        .collect::<Vec<_>>()
        .join(" ");
    let reveal = snapshot.reveal;
    let hero_transform =
        snapshot.hero_transform.as_deref().map(|t| output::truncate(t, MAX_VALUE_CHARS));

    vec![
        PropertyRow::new("Scroll", format!("{}px", snapshot.scroll_y)),
        PropertyRow::new("Viewport", format!("{}x{}", viewport.width, viewport.height)),
        PropertyRow::new("Header compact", output::format_bool(snapshot.header_compact)),
        PropertyRow::new("Hero transform", output::format_optional(hero_transform.as_deref())),
        PropertyRow::new("Cursor x", output::format_optional(snapshot.cursor_x.as_deref())),
        PropertyRow::new("Cursor y", output::format_optional(snapshot.cursor_y.as_deref())),
        PropertyRow::new("Back to top", output::format_bool(snapshot.back_to_top_visible)),
        PropertyRow::new(
            "Active section",
            output::format_optional(snapshot.active_section.as_deref()),
        ),
        PropertyRow::new("Active links", snapshot.active_links.join(" ")),
        PropertyRow::new(
            "Revealed",
            format!("{}/{} ({} pending)", reveal.revealed, reveal.candidates, reveal.pending),
        ),
        PropertyRow::new("Nav open", output::format_bool(snapshot.nav_open)),
        PropertyRow::new("Modal open", output::format_bool(snapshot.modal_open)),
        PropertyRow::new("Modal image", output::format_optional(snapshot.modal_image.as_deref())),
        PropertyRow::new(
            "Navigations",
            snapshot
                .navigations
                .iter()
                .map(|uri| output::truncate(uri, MAX_VALUE_CHARS))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        PropertyRow::new("Frames", snapshot.frames.to_string()),
        PropertyRow::new("Frame runs", frame_runs),
        PropertyRow::new("DOM writes", snapshot.dom_writes.to_string()),
        PropertyRow::new("Observe calls", snapshot.observe_calls.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LumenConfig;

    const SCENARIO: &str = r##"{
        "viewport": { "width": 1000, "height": 800 },
        "elements": [
            { "tag": "header", "classes": ["header"], "rect": { "width": 1000, "height": 80 }, "fixed": true },
            { "tag": "main", "rect": { "width": 1000, "height": 4000 } }
        ],
        "steps": [{ "scroll": 500 }]
    }"##;

    fn value_of<'a>(rows: &'a [PropertyRow], property: &str) -> &'a str {
        rows.iter().find(|row| row.property == property).map(|row| row.value.as_str()).unwrap()
    }

    #[test]
    fn test_snapshot_rows() {
        colored::control::set_override(false);
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let simulation = Simulation::run(&scenario, &LumenConfig::default()).unwrap();
        let rows = snapshot_rows(&simulation.snapshot());

        assert_eq!(value_of(&rows, "Scroll"), "500px");
        assert_eq!(value_of(&rows, "Viewport"), "1000x800");
        assert_eq!(value_of(&rows, "Header compact"), "✓");
        assert_eq!(value_of(&rows, "Back to top"), "✓");
        assert_eq!(value_of(&rows, "Active section"), "-");
    }

    #[test]
    fn test_missing_scenario_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&dir.path().join("nope.jsonc"), true).unwrap_err();
        assert!(matches!(err, LumenError::ScenarioError(_)));
    }
}
