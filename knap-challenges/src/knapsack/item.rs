use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// One candidate item: its weight, its value and the position it had in the
/// input arrays.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u32,
    pub value: u32,
    pub index: usize,
}

impl Item {
    pub fn new(weight: u32, value: u32, index: usize) -> Self {
        Self {
            weight,
            value,
            index,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.value as f64 / self.weight as f64
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Item[index={}, weight={}, value={}, ratio={:.2}]",
            self.index,
            self.weight,
            self.value,
            self.ratio()
        )
    }
}

/// Orders items by value/weight ratio, best ratio first.
///
/// The ratios are compared by cross multiplication so that two items with the
/// same ratio always compare `Equal`, whatever their magnitude.
pub fn by_ratio_desc(a: &Item, b: &Item) -> Ordering {
    let lhs = b.value as u64 * a.weight as u64;
    let rhs = a.value as u64 * b.weight as u64;
    lhs.cmp(&rhs)
}

/// Builds the items of `weights`/`values` and sorts them with [`by_ratio_desc`].
///
/// The sort is stable: items with equal ratios keep their original order.
pub fn sorted_by_ratio(weights: &[u32], values: &[u32]) -> Vec<Item> {
    let mut items: Vec<Item> = weights
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (&weight, &value))| Item::new(weight, value, i))
        .collect();
    items.sort_by(by_ratio_desc);
    items
}
