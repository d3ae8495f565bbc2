mod item;
pub use item::*;
mod result;
pub use result::*;

use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parameters of one generated instance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub num_items: usize,
    pub max_weight: u32,
    pub max_value: u32,
    pub capacity: u32,
}

impl Track {
    pub fn new(num_items: usize, max_weight: u32, max_value: u32, capacity: u32) -> Self {
        Self {
            num_items,
            max_weight,
            max_value,
            capacity,
        }
    }
}

/// A validated 0/1 knapsack instance. Read-only once built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "ChallengeData")]
pub struct Challenge {
    weights: Vec<u32>,
    values: Vec<u32>,
    capacity: u32,
}

#[derive(Deserialize)]
struct ChallengeData {
    weights: Vec<u32>,
    values: Vec<u32>,
    capacity: u32,
}

impl TryFrom<ChallengeData> for Challenge {
    type Error = anyhow::Error;

    fn try_from(data: ChallengeData) -> Result<Self, Self::Error> {
        Challenge::new(data.weights, data.values, data.capacity)
    }
}

impl Challenge {
    pub fn new(weights: Vec<u32>, values: Vec<u32>, capacity: u32) -> Result<Self> {
        if weights.len() != values.len() {
            return Err(anyhow!(
                "Number of weights ({}) does not match number of values ({})",
                weights.len(),
                values.len()
            ));
        }
        if let Some(i) = weights.iter().position(|&w| w == 0) {
            return Err(anyhow!("Item ({}) has a zero weight", i));
        }
        if let Some(i) = values.iter().position(|&v| v == 0) {
            return Err(anyhow!("Item ({}) has a zero value", i));
        }
        Ok(Self {
            weights,
            values,
            capacity,
        })
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.max_weight == 0 || track.max_value == 0 {
            return Err(anyhow!(
                "Track needs max_weight and max_value of at least 1 (got {} and {})",
                track.max_weight,
                track.max_value
            ));
        }
        let mut rng = SmallRng::from_seed(*seed);

        let mut weights = Vec::with_capacity(track.num_items);
        let mut values = Vec::with_capacity(track.num_items);
        for _ in 0..track.num_items {
            weights.push(rng.gen_range(1..=track.max_weight));
            values.push(rng.gen_range(1..=track.max_value));
        }

        Self::new(weights, values, track.capacity)
    }

    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    pub fn items(&self) -> Vec<Item> {
        (0..self.num_items())
            .map(|i| Item::new(self.weights[i], self.values[i], i))
            .collect()
    }

    /// Checks that `result` is a feasible selection for this instance and
    /// that it reports the value it actually achieves. Returns that value.
    pub fn verify_result(&self, result: &KnapsackResult) -> Result<u64> {
        let indices = result.selected_indices();
        let mut seen = HashSet::with_capacity(indices.len());
        for &item in indices {
            if item >= self.num_items() {
                return Err(anyhow!("Item ({}) is out of bounds", item));
            }
            if !seen.insert(item) {
                return Err(anyhow!("Duplicate items selected."));
            }
        }
        if indices.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(anyhow!("Selected items are not in ascending order"));
        }

        let total_weight = indices
            .iter()
            .map(|&item| self.weights[item] as u64)
            .sum::<u64>();
        if total_weight > self.capacity as u64 {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }

        let total_value = indices
            .iter()
            .map(|&item| self.values[item] as u64)
            .sum::<u64>();
        if total_value != result.max_value() {
            return Err(anyhow!(
                "Reported value ({}) does not match value of selected items ({})",
                result.max_value(),
                total_value
            ));
        }
        Ok(total_value)
    }
}
