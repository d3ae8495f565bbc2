use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one solve: the value reached and the original indices of the
/// selected items, in ascending order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KnapsackResult {
    max_value: u64,
    selected_indices: Vec<usize>,
}

impl KnapsackResult {
    pub fn new(max_value: u64, selected_indices: Vec<usize>) -> Self {
        Self {
            max_value,
            selected_indices,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    pub fn item_count(&self) -> usize {
        self.selected_indices.len()
    }
}

impl fmt::Display for KnapsackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KnapsackResult[maxValue={}, items={:?}]",
            self.max_value, self.selected_indices
        )
    }
}
