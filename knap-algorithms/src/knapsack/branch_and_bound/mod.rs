//! Exact depth-first branch-and-bound.
//!
//! Items are visited in ratio order, trying "include" before "exclude". A
//! branch is cut as soon as its fractional-relaxation bound cannot beat the
//! best value found so far. Worst case is exponential in the number of items.

use anyhow::Result;
use knap_challenges::knapsack::*;

pub fn solve_challenge(challenge: &Challenge) -> Result<KnapsackResult> {
    let sorted_items = sorted_by_ratio(challenge.weights(), challenge.values());
    let mut search = Search::new(&sorted_items, challenge.capacity() as u64);
    search.branch(0, 0, 0);

    log::debug!(
        "branch_and_bound: {} items, capacity {}, best value {}, {} nodes visited, {} pruned",
        sorted_items.len(),
        challenge.capacity(),
        search.best_value,
        search.nodes,
        search.pruned
    );

    let mut items: Vec<usize> = search
        .best_combination
        .iter()
        .map(|&position| sorted_items[position].index)
        .collect();
    items.sort_unstable();

    Ok(KnapsackResult::new(search.best_value, items))
}

/// Bookkeeping of one search. Lives for the duration of a single
/// [`solve_challenge`] call only.
struct Search<'a> {
    sorted_items: &'a [Item],
    capacity: u64,
    best_value: u64,
    best_combination: Vec<usize>,
    // positions into `sorted_items`
    current_combination: Vec<usize>,
    nodes: u64,
    pruned: u64,
}

impl<'a> Search<'a> {
    fn new(sorted_items: &'a [Item], capacity: u64) -> Self {
        Self {
            sorted_items,
            capacity,
            best_value: 0,
            best_combination: Vec::new(),
            current_combination: Vec::with_capacity(sorted_items.len()),
            nodes: 0,
            pruned: 0,
        }
    }

    fn branch(&mut self, index: usize, weight: u64, value: u64) {
        self.nodes += 1;
        if weight > self.capacity {
            return;
        }

        if value > self.best_value {
            self.best_value = value;
            self.best_combination.clone_from(&self.current_combination);
        }

        if index >= self.sorted_items.len() {
            return;
        }
        let bound = upper_bound(&self.sorted_items[index..], self.capacity - weight);
        if value as f64 + bound <= self.best_value as f64 {
            self.pruned += 1;
            return;
        }

        let item = self.sorted_items[index];
        self.current_combination.push(index);
        self.branch(
            index + 1,
            weight + item.weight as u64,
            value + item.value as u64,
        );
        self.current_combination.pop();

        self.branch(index + 1, weight, value);
    }
}

/// Fractional-relaxation bound on the value `remaining_items` can still add
/// within `remaining_capacity`. The items must be sorted by ratio.
fn upper_bound(remaining_items: &[Item], remaining_capacity: u64) -> f64 {
    let mut remaining_capacity = remaining_capacity;
    let mut bound = 0.0;
    for item in remaining_items {
        let weight = item.weight as u64;
        if weight <= remaining_capacity {
            bound += item.value as f64;
            remaining_capacity -= weight;
        } else {
            bound += item.value as f64 * remaining_capacity as f64 / item.weight as f64;
            break;
        }
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bound_takes_fraction_of_first_misfit() {
        let items = sorted_by_ratio(&[2, 3, 4], &[6, 6, 4]);
        // 6 + 6 + 4 * 1/4
        assert_eq!(upper_bound(&items, 6), 13.0);
        assert_eq!(upper_bound(&items, 9), 16.0);
        assert_eq!(upper_bound(&items, 100), 16.0);
        assert_eq!(upper_bound(&items, 0), 0.0);
        assert_eq!(upper_bound(&[], 10), 0.0);
    }

    #[test]
    fn test_upper_bound_stops_after_fraction() {
        // the third item would fit in what is left, but the walk stops at the
        // first item that does not
        let items = vec![Item::new(2, 10, 0), Item::new(5, 10, 1), Item::new(1, 1, 2)];
        assert_eq!(upper_bound(&items, 4), 14.0);
    }

    #[test]
    fn test_search_prunes() {
        let items = sorted_by_ratio(&[1, 1, 1, 1, 1, 1, 1, 1], &[8, 7, 6, 5, 4, 3, 2, 1]);
        let mut search = Search::new(&items, 3);
        search.branch(0, 0, 0);
        assert_eq!(search.best_value, 21);
        assert_eq!(search.best_combination, vec![0, 1, 2]);
        assert!(search.pruned > 0);
        assert!(search.nodes < 1 << 9);
    }
}
