pub mod lineage;

pub use lineage::{get_root, get_tree, MAX_LINEAGE_DEPTH};
