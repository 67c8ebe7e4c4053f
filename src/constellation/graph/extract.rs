use std::collections::{BTreeSet, HashSet};

use regex::Regex;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::tower::TowerDescriptor;

/// An undirected dependency between two towers. `from_id <= to_id` always.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyEdge {
    pub from_id: String,
    pub to_id: String,
}

impl DependencyEdge {
    pub fn new(a: &str, b: &str) -> Self {
        let (from_id, to_id) = if a <= b { (a, b) } else { (b, a) };
        Self {
            from_id: from_id.to_owned(),
            to_id: to_id.to_owned(),
        }
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }
}

/// Strips diacritics and anything that is not alphanumeric, then lower-cases.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .nfd()
        .filter(|c| !is_combining_mark(*c) && c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

struct TowerMatcher {
    id: String,
    symbol: String,
    normalized: String,
    id_pattern: Option<Regex>,
}

impl TowerMatcher {
    fn new(tower: &TowerDescriptor) -> Self {
        let symbol = tower.symbol.trim().to_owned();
        let normalized = normalize_symbol(&symbol);
        let id = tower.id.trim();
        let id_pattern = if id.is_empty() {
            None
        } else {
            match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(id))) {
                Ok(pattern) => Some(pattern),
                Err(error) => {
                    warn!(tower = %tower.id, %error, "tower id cannot be matched as a word");
                    None
                }
            }
        };

        Self {
            id: tower.id.clone(),
            symbol,
            normalized,
            id_pattern,
        }
    }

    fn is_referenced_by(&self, formula: &str, lowered: &str) -> bool {
        if !self.symbol.is_empty() && formula.contains(&self.symbol) {
            return true;
        }
        if !self.normalized.is_empty() && lowered.contains(&self.normalized) {
            return true;
        }
        self.id_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(formula))
    }
}

/// Precompiled matchers for every tower in a roster.
pub struct ReferenceScanner {
    matchers: Vec<TowerMatcher>,
}

impl ReferenceScanner {
    pub fn new(roster: &[TowerDescriptor]) -> Self {
        Self {
            matchers: roster.iter().map(TowerMatcher::new).collect(),
        }
    }

    /// Ids of the towers that `formula` mentions, excluding `self_id`.
    pub fn references(&self, self_id: &str, formula: &str) -> BTreeSet<String> {
        if formula.trim().is_empty() {
            return BTreeSet::new();
        }

        let lowered = formula.to_lowercase();
        self.matchers
            .iter()
            .filter(|matcher| matcher.id != self_id)
            .filter(|matcher| matcher.is_referenced_by(formula, &lowered))
            .map(|matcher| matcher.id.clone())
            .collect()
    }
}

pub fn extract_references(
    formula: &str,
    self_id: &str,
    roster: &[TowerDescriptor],
) -> BTreeSet<String> {
    ReferenceScanner::new(roster).references(self_id, formula)
}

/// Scans every tower's formula and returns the de-duplicated undirected edges,
/// in roster order.
pub fn build_edges<F>(roster: &[TowerDescriptor], mut formula_of: F) -> Vec<DependencyEdge>
where
    F: FnMut(&str) -> String,
{
    let scanner = ReferenceScanner::new(roster);
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for tower in roster {
        let formula = formula_of(&tower.id);
        for referenced in scanner.references(&tower.id, &formula) {
            if referenced == tower.id {
                continue;
            }
            let edge = DependencyEdge::new(&tower.id, &referenced);
            if seen.insert(edge.clone()) {
                edges.push(edge);
            }
        }
    }

    edges
}

pub fn mentioned_ids(edges: &[DependencyEdge]) -> BTreeSet<String> {
    edges
        .iter()
        .flat_map(|edge| [edge.from_id.clone(), edge.to_id.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn tower(id: &str, symbol: &str, tier: u32) -> TowerDescriptor {
        TowerDescriptor::new(id, symbol, id, tier)
    }

    fn formulas(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(id, formula)| ((*id).to_owned(), (*formula).to_owned()))
            .collect()
    }

    #[test]
    fn normalize_symbol_strips_marks_and_punctuation() {
        assert_eq!(normalize_symbol("Ñ-tower"), "ntower");
        assert_eq!(normalize_symbol(" Δ'' "), "δ");
        assert_eq!(normalize_symbol("+*"), "");
    }

    #[test]
    fn literal_symbol_match_wins() {
        let roster = [tower("alpha", "α", 1), tower("beta", "β", 2)];
        let references = extract_references("β = α × 2", "beta", &roster);
        assert_eq!(references, BTreeSet::from(["alpha".to_owned()]));
    }

    #[test]
    fn normalized_symbol_matches_case_and_accent_variants() {
        let roster = [tower("c1", "Çore!", 0), tower("user", "u", 1)];
        let references = extract_references("user = 3 * core + 1", "user", &roster);
        assert_eq!(references, BTreeSet::from(["c1".to_owned()]));
    }

    #[test]
    fn id_matches_only_on_word_boundaries() {
        let roster = [tower("ion", "", 1), tower("user", "", 2)];
        assert!(extract_references("damage = Ion * 2", "user", &roster).contains("ion"));
        assert!(extract_references("damage = lion * 2", "user", &roster).is_empty());
    }

    #[test]
    fn empty_formula_references_nothing() {
        let roster = [tower("alpha", "α", 1), tower("beta", "β", 2)];
        assert!(extract_references("   ", "beta", &roster).is_empty());
    }

    #[test]
    fn example_roster_yields_single_edge() {
        let roster = [tower("alpha", "α", 1), tower("beta", "β", 2)];
        let formulas = formulas(&[("alpha", "α = 5"), ("beta", "β = α × 2")]);
        let edges = build_edges(&roster, |id| formulas.get(id).cloned().unwrap_or_default());
        assert_eq!(edges, vec![DependencyEdge::new("alpha", "beta")]);
        assert_eq!(
            mentioned_ids(&edges),
            BTreeSet::from(["alpha".to_owned(), "beta".to_owned()])
        );
    }

    #[test]
    fn mutual_references_collapse_to_one_edge() {
        let roster = [tower("alpha", "α", 1), tower("beta", "β", 2)];
        let formulas = formulas(&[("alpha", "α = β + α"), ("beta", "β = α × 2")]);
        let edges = build_edges(&roster, |id| formulas.get(id).cloned().unwrap_or_default());
        assert_eq!(edges.len(), 1);
        assert!(edges[0].connects("beta", "alpha"));
    }

    #[test]
    fn own_symbol_never_creates_self_edge() {
        let roster = [tower("alpha", "α", 1)];
        let edges = build_edges(&roster, |_| "α = α + alpha".to_owned());
        assert!(edges.is_empty());
    }

    #[test]
    fn substring_symbols_produce_accepted_false_positive() {
        let roster = [tower("a", "A", 1), tower("ab", "AB", 1), tower("user", "U", 2)];
        let references = extract_references("U = AB + 1", "user", &roster);
        assert!(references.contains("ab"));
        assert!(references.contains("a"));
    }
}
