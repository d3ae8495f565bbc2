//! Exact pseudo-polynomial dynamic programming over a dense
//! `(n + 1) x (capacity + 1)` table.

use anyhow::{anyhow, Result};
use knap_challenges::knapsack::*;
use std::mem::size_of;

type Cell = u64;

/// Number of bytes the table of an instance with `num_items` items and the
/// given `capacity` occupies, or `None` if that does not fit in a `u128`.
pub fn table_bytes(num_items: usize, capacity: u32) -> Option<u128> {
    (num_items as u128 + 1)
        .checked_mul(capacity as u128 + 1)?
        .checked_mul(size_of::<Cell>() as u128)
}

pub fn solve_challenge(challenge: &Challenge) -> Result<KnapsackResult> {
    let weights = challenge.weights();
    let values = challenge.values();
    let num_items = challenge.num_items();
    let capacity = challenge.capacity() as usize;

    let table = Table::build(weights, values, capacity)?;
    let max_value = table.get(num_items, capacity);

    let mut items = Vec::new();
    let mut c = capacity;
    for i in (1..=num_items).rev() {
        if table.get(i, c) != table.get(i - 1, c) {
            items.push(i - 1);
            c -= weights[i - 1] as usize;
        }
    }
    items.reverse();

    log::debug!(
        "dynamic: {} items, capacity {}, best value {}",
        num_items,
        capacity,
        max_value
    );
    Ok(KnapsackResult::new(max_value, items))
}

/// Row-major table: cell `(i, c)` is the best value reachable with the first
/// `i` items and capacity `c`.
struct Table {
    cells: Vec<Cell>,
    width: usize,
}

impl Table {
    fn build(weights: &[u32], values: &[u32], capacity: usize) -> Result<Self> {
        let width = capacity
            .checked_add(1)
            .ok_or_else(|| anyhow!("Capacity ({}) is too large", capacity))?;
        let len = (weights.len() + 1)
            .checked_mul(width)
            .ok_or_else(|| {
                anyhow!(
                    "Table of {} x {} cells does not fit in memory",
                    weights.len() + 1,
                    width
                )
            })?;

        let mut cells: Vec<Cell> = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            anyhow!(
                "Failed to allocate table of {} x {} cells: {}",
                weights.len() + 1,
                width,
                e
            )
        })?;
        cells.resize(len, 0);
        log::trace!("dynamic: allocated {} x {} table", weights.len() + 1, width);

        for (i, (&w, &v)) in weights.iter().zip(values).enumerate() {
            let w = w as usize;
            let v = v as Cell;
            let (done, rest) = cells.split_at_mut((i + 1) * width);
            let prev = &done[i * width..];
            let row = &mut rest[..width];
            for c in 0..width {
                row[c] = if w <= c {
                    prev[c].max(prev[c - w] + v)
                } else {
                    prev[c]
                };
            }
        }

        Ok(Self { cells, width })
    }

    fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.width + column]
    }
}
