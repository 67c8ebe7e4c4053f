use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use tower_constellation::TowerDescriptor;
use tower_constellation::constellation::graph::{DependencyEdge, build_edges};

const SYMBOLS: [&str; 6] = ["α", "β", "γ", "δ", "ε", "ζ"];

fn roster() -> Vec<TowerDescriptor> {
    SYMBOLS
        .iter()
        .enumerate()
        .map(|(index, symbol)| {
            TowerDescriptor::new(format!("t{index}"), *symbol, format!("Tower {index}"), index as u32 % 3)
        })
        .collect()
}

fn formulas_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::vec(prop::collection::vec(0usize..SYMBOLS.len(), 0..4), SYMBOLS.len()).prop_map(
        |references| {
            references
                .into_iter()
                .enumerate()
                .map(|(index, targets)| {
                    let terms = targets
                        .into_iter()
                        .map(|target| SYMBOLS[target])
                        .collect::<Vec<_>>()
                        .join(" + ");
                    (format!("t{index}"), format!("{} = {terms}", SYMBOLS[index]))
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_edges_ignore_roster_order(
        formulas in formulas_strategy(),
        order in Just(roster()).prop_shuffle(),
    ) {
        let formula_of = |id: &str| formulas.get(id).cloned().unwrap_or_default();
        let canonical = build_edges(&roster(), formula_of)
            .into_iter()
            .collect::<BTreeSet<_>>();
        let shuffled = build_edges(&order, formula_of);

        let unique = shuffled.iter().cloned().collect::<BTreeSet<DependencyEdge>>();
        prop_assert_eq!(unique.len(), shuffled.len(), "duplicate edges in {:?}", shuffled);
        prop_assert_eq!(unique, canonical);
    }

    #[test]
    fn prop_edges_are_sorted_pairs_without_self_loops(formulas in formulas_strategy()) {
        let edges = build_edges(&roster(), |id| formulas.get(id).cloned().unwrap_or_default());
        for edge in &edges {
            prop_assert!(edge.from_id < edge.to_id, "unsorted or self edge {:?}", edge);
        }
    }
}
