// This is the models module containing shared data structures
use serde::{Deserialize, Serialize};

/// Summary of one build pass, reported to the caller next to the merged
/// geometry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BuildStats {
    pub features_total: usize,
    pub features_skipped: usize,
    pub solids: usize,
    pub vertices: usize,
    pub triangles: usize,
}
