use serde::{Deserialize, Serialize};

/// Limits the benchmark applies before running the expensive algorithms.
///
/// Fields left out of a JSON config keep their default value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Pruning search only runs on instances with fewer items than this.
    pub max_items_for_pruning_search: usize,
    pub max_capacity_for_dp: u32,
    /// Dynamic programming only runs when its table is smaller than this.
    pub max_dp_table_bytes: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            max_items_for_pruning_search: 8000,
            max_capacity_for_dp: 100_000_000,
            max_dp_table_bytes: 2_000_000_000,
        }
    }
}

impl BenchmarkConfig {
    pub fn max_items_for_pruning_search(&self) -> usize {
        self.max_items_for_pruning_search
    }

    pub fn max_capacity_for_dp(&self) -> u32 {
        self.max_capacity_for_dp
    }

    pub fn max_dp_table_bytes(&self) -> u64 {
        self.max_dp_table_bytes
    }
}
