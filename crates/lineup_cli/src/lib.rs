//! Lineup CLI Library
//!
//! Loads a scripted match (setup + timed actions) and replays it through
//! `lineup_core`.

use anyhow::{Context, Result};
use lineup_core::{
    apply_action, match_summary, GameAction, GameState, MatchSetup, PlayerTimeSummary,
    RulesConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A whole match as recorded by the sideline app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScript {
    pub setup: MatchSetup,
    #[serde(default)]
    pub actions: Vec<GameAction>,
    /// Final whistle; defaults to the last timestamp in `actions`
    pub end_ms: Option<i64>,
}

impl MatchScript {
    pub fn final_whistle_ms(&self) -> i64 {
        self.end_ms.unwrap_or_else(|| {
            self.actions.iter().filter_map(action_time).max().unwrap_or(0)
        })
    }
}

fn action_time(action: &GameAction) -> Option<i64> {
    match action {
        GameAction::Substitution { now_ms }
        | GameAction::PositionSwitch { now_ms, .. }
        | GameAction::GoalieSwitch { now_ms, .. }
        | GameAction::ToggleInactive { now_ms, .. }
        | GameAction::PairPositionSwap { now_ms, .. }
        | GameAction::PauseClock { now_ms }
        | GameAction::ResumeClock { now_ms } => Some(*now_ms),
        GameAction::SetNextToSubOut { .. }
        | GameAction::SetNextSubstitute { .. }
        | GameAction::Undo { .. } => None,
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub final_state: GameState,
    pub summary: Vec<PlayerTimeSummary>,
    pub actions_applied: usize,
}

fn read_structured<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display())),
    }
}

pub fn load_script(path: &Path) -> Result<MatchScript> {
    read_structured(path)
}

pub fn load_setup(path: &Path) -> Result<MatchSetup> {
    read_structured(path)
}

/// Rules from `--rules`, else from `LINEUP_RULES_PATH`, else defaults.
pub fn load_rules(path: Option<&Path>) -> Result<RulesConfig> {
    let rules = match path {
        Some(path) => RulesConfig::from_path(path),
        None => RulesConfig::from_env(),
    };
    rules.context("Failed to load rules")
}

/// Replay every action in order, stopping at the first rejected one.
pub fn replay(script: &MatchScript, rules: &RulesConfig) -> Result<ReplayReport> {
    let mut state =
        GameState::from_setup(&script.setup, rules).context("Match setup was rejected")?;

    for (index, action) in script.actions.iter().enumerate() {
        debug!("Action {}: {}", index, action.name());
        state = apply_action(&state, action)
            .with_context(|| format!("Action #{} ({}) was rejected", index + 1, action.name()))?;
    }

    let end_ms = script.final_whistle_ms();
    info!("Replayed {} actions, final whistle at {} ms", script.actions.len(), end_ms);

    Ok(ReplayReport {
        summary: match_summary(&state, end_ms),
        final_state: state,
        actions_applied: script.actions.len(),
    })
}

fn mm_ss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Plain-text playing time table.
pub fn render_table(summary: &[PlayerTimeSummary]) -> String {
    let mut out = format!(
        "{:<16} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}\n",
        "player", "field", "def", "mid", "att", "goal", "bench"
    );
    for row in summary {
        out.push_str(&format!(
            "{:<16} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}\n",
            row.name,
            mm_ss(row.time_on_field_seconds),
            mm_ss(row.time_as_defender_seconds),
            mm_ss(row.time_as_midfielder_seconds),
            mm_ss(row.time_as_attacker_seconds),
            mm_ss(row.time_as_goalie_seconds),
            mm_ss(row.time_as_substitute_seconds),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const SCRIPT_YAML: &str = r#"
setup:
  teamConfig:
    format: 5v5
    squadSize: 6
    formationId: "2-2"
    substitutionType: individual
  squad:
    - { id: a, name: Ada }
    - { id: b }
    - { id: c }
    - { id: d }
    - { id: e }
    - { id: f }
  goalie: f
  lineup:
    kind: individual
    positions:
      leftDefender: a
      rightDefender: b
      leftAttacker: c
      rightAttacker: d
      substitute_1: e
actions:
  - { type: resumeClock, nowMs: 0 }
  - { type: substitution, nowMs: 300000 }
  - { type: pauseClock, nowMs: 600000 }
"#;

    #[test]
    fn test_replay_yaml_script() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        file.write_all(SCRIPT_YAML.as_bytes())?;

        let script = load_script(file.path())?;
        assert_eq!(script.final_whistle_ms(), 600_000);

        let report = replay(&script, &RulesConfig::default())?;
        assert_eq!(report.actions_applied, 3);

        let ada = report.summary.iter().find(|s| s.player_id == "a").unwrap();
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.time_as_defender_seconds, 300);
        assert_eq!(ada.time_as_substitute_seconds, 300);

        let table = render_table(&report.summary);
        assert!(table.contains("Ada"));
        assert!(table.contains("5:00"));
        Ok(())
    }

    #[test]
    fn test_replay_reports_rejected_action() -> Result<()> {
        let mut script: MatchScript = serde_yaml::from_str(SCRIPT_YAML)?;
        script.actions.push(GameAction::ToggleInactive { player_id: "e".into(), now_ms: 0 });

        let err = replay(&script, &RulesConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Action #4 (toggleInactive)"));
        Ok(())
    }

    #[test]
    fn test_load_rules_from_json_file() -> Result<()> {
        let mut file = Builder::new().suffix(".json").tempfile()?;
        file.write_all(serde_json::to_string(&RulesConfig::strict())?.as_bytes())?;

        let rules = load_rules(Some(file.path()))?;
        assert_eq!(rules, RulesConfig::strict());
        Ok(())
    }

    #[test]
    fn test_missing_script_has_context() {
        let err = load_script(Path::new("/nonexistent/match.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
