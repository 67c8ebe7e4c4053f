use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{DetailTrigger, TowerDescriptor, TowerHost};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("roster must be an array of towers or an object with a `towers` array")]
    Shape,
    #[error("duplicate tower id: {0}")]
    DuplicateId(String),
}

#[derive(Clone, Debug, Deserialize)]
struct RawTowerEntry {
    #[serde(flatten)]
    descriptor: TowerDescriptor,
    #[serde(default)]
    formula: String,
    #[serde(default = "default_unlocked")]
    unlocked: bool,
}

fn default_unlocked() -> bool {
    true
}

/// An in-memory tower roster: descriptors, formula text and unlock state.
#[derive(Clone, Debug, Default)]
pub struct TowerRoster {
    towers: Vec<TowerDescriptor>,
    formulas: HashMap<String, String>,
    unlocked: HashSet<String>,
}

impl TowerRoster {
    pub fn parse(raw: &str) -> Result<Self, RosterError> {
        let parsed: Value = serde_json::from_str(raw)?;
        let entries = match parsed {
            Value::Array(entries) => entries,
            Value::Object(mut object) => match object.remove("towers") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(RosterError::Shape),
            },
            _ => return Err(RosterError::Shape),
        };

        let mut roster = Self::default();
        for value in entries {
            let entry = RawTowerEntry::deserialize(value)?;
            let id = entry.descriptor.id.trim().to_owned();
            if id.is_empty() {
                warn!(name = %entry.descriptor.name, "skipping roster entry without an id");
                continue;
            }
            if roster.contains(&id) {
                return Err(RosterError::DuplicateId(id));
            }

            let mut descriptor = entry.descriptor;
            descriptor.id = id;
            roster.push(descriptor, entry.formula, entry.unlocked);
        }

        debug!(towers = roster.towers.len(), "parsed tower roster");
        Ok(roster)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse roster file {}", path.display()))
    }

    pub fn push(&mut self, descriptor: TowerDescriptor, formula: impl Into<String>, unlocked: bool) {
        if unlocked {
            self.unlocked.insert(descriptor.id.clone());
        }
        self.formulas.insert(descriptor.id.clone(), formula.into());
        self.towers.push(descriptor);
    }

    pub fn with_tower(
        mut self,
        descriptor: TowerDescriptor,
        formula: impl Into<String>,
        unlocked: bool,
    ) -> Self {
        self.push(descriptor, formula, unlocked);
        self
    }

    pub fn contains(&self, tower_id: &str) -> bool {
        self.formulas.contains_key(tower_id)
    }

    pub fn towers(&self) -> &[TowerDescriptor] {
        &self.towers
    }

    pub fn tower(&self, tower_id: &str) -> Option<&TowerDescriptor> {
        self.towers.iter().find(|tower| tower.id == tower_id)
    }

    pub fn formula(&self, tower_id: &str) -> &str {
        self.formulas.get(tower_id).map(String::as_str).unwrap_or("")
    }

    pub fn set_formula(&mut self, tower_id: &str, formula: impl Into<String>) {
        if let Some(entry) = self.formulas.get_mut(tower_id) {
            *entry = formula.into();
        }
    }

    pub fn is_unlocked(&self, tower_id: &str) -> bool {
        self.unlocked.contains(tower_id)
    }

    pub fn set_unlocked(&mut self, tower_id: &str, unlocked: bool) {
        if !self.contains(tower_id) {
            return;
        }
        if unlocked {
            self.unlocked.insert(tower_id.to_owned());
        } else {
            self.unlocked.remove(tower_id);
        }
    }

    pub fn unlocked_ids(&self) -> &HashSet<String> {
        &self.unlocked
    }
}

/// A [`TowerHost`] over a fixed roster that queues detail requests for the UI.
#[derive(Debug, Default)]
pub struct StaticTowerHost {
    roster: TowerRoster,
    detail_requests: Vec<(String, DetailTrigger)>,
}

impl StaticTowerHost {
    pub fn new(roster: TowerRoster) -> Self {
        Self {
            roster,
            detail_requests: Vec::new(),
        }
    }

    pub fn roster(&self) -> &TowerRoster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut TowerRoster {
        &mut self.roster
    }

    pub fn detail_requests(&self) -> &[(String, DetailTrigger)] {
        &self.detail_requests
    }

    pub fn take_detail_requests(&mut self) -> Vec<(String, DetailTrigger)> {
        std::mem::take(&mut self.detail_requests)
    }
}

impl TowerHost for StaticTowerHost {
    fn tower_roster(&self) -> Vec<TowerDescriptor> {
        self.roster.towers().to_vec()
    }

    fn unlocked_ids(&self) -> HashSet<String> {
        self.roster.unlocked_ids().clone()
    }

    fn formula_text(&self, tower_id: &str) -> String {
        self.roster.formula(tower_id).to_owned()
    }

    fn open_detail(&mut self, tower_id: &str, trigger: &DetailTrigger) {
        self.detail_requests.push((tower_id.to_owned(), *trigger));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_and_array_shapes() {
        let object = r#"{ "towers": [
            { "id": "alpha", "symbol": "α", "name": "Alpha", "tier": 1, "formula": "α = 5" },
            { "id": "beta", "symbol": "β", "tier": 2, "formula": "β = α × 2", "unlocked": false }
        ] }"#;
        let roster = TowerRoster::parse(object).unwrap();
        assert_eq!(roster.towers().len(), 2);
        assert_eq!(roster.formula("beta"), "β = α × 2");
        assert!(roster.is_unlocked("alpha"));
        assert!(!roster.is_unlocked("beta"));

        let array = r#"[ { "id": "gamma" } ]"#;
        let roster = TowerRoster::parse(array).unwrap();
        assert_eq!(roster.tower("gamma").map(|tower| tower.tier), Some(0));
        assert_eq!(roster.formula("gamma"), "");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = r#"[ { "id": "alpha" }, { "id": " alpha " } ]"#;
        assert!(matches!(
            TowerRoster::parse(raw),
            Err(RosterError::DuplicateId(id)) if id == "alpha"
        ));
    }

    #[test]
    fn stores_trimmed_ids() {
        let raw = r#"[ { "id": " beta ", "symbol": "β", "formula": "β = 2" } ]"#;
        let roster = TowerRoster::parse(raw).unwrap();
        assert_eq!(roster.towers()[0].id, "beta");
        assert_eq!(roster.formula("beta"), "β = 2");
        assert!(roster.is_unlocked("beta"));
    }

    #[test]
    fn skips_entries_without_ids() {
        let raw = r#"[ { "id": "  ", "name": "Nameless" }, { "id": "alpha" } ]"#;
        let roster = TowerRoster::parse(raw).unwrap();
        assert_eq!(roster.towers().len(), 1);
    }

    #[test]
    fn rejects_scalar_documents() {
        assert!(matches!(TowerRoster::parse("42"), Err(RosterError::Shape)));
    }

    #[test]
    fn unlock_toggles_ignore_unknown_towers() {
        let mut roster =
            TowerRoster::default().with_tower(TowerDescriptor::new("alpha", "α", "Alpha", 1), "", false);
        roster.set_unlocked("ghost", true);
        roster.set_unlocked("alpha", true);
        assert_eq!(roster.unlocked_ids().len(), 1);
        assert!(roster.is_unlocked("alpha"));
    }
}
