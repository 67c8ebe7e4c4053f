mod build;
pub mod extract;
pub(crate) mod interaction;

pub use extract::{
    DependencyEdge, ReferenceScanner, build_edges, extract_references, mentioned_ids,
    normalize_symbol,
};
