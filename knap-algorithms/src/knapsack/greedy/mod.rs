use anyhow::Result;
use knap_challenges::knapsack::*;

/// Takes items in ratio order whenever they still fit. Feasible, but only a
/// lower bound on the optimum.
pub fn solve_challenge(challenge: &Challenge) -> Result<KnapsackResult> {
    let capacity = challenge.capacity() as u64;

    let mut total_value = 0u64;
    let mut total_weight = 0u64;
    let mut items = Vec::new();
    for item in sorted_by_ratio(challenge.weights(), challenge.values()) {
        if total_weight + item.weight as u64 <= capacity {
            total_weight += item.weight as u64;
            total_value += item.value as u64;
            items.push(item.index);
        }
    }
    items.sort_unstable();

    log::debug!(
        "greedy: selected {} of {} items, weight {}/{}, value {}",
        items.len(),
        challenge.num_items(),
        total_weight,
        capacity,
        total_value
    );
    Ok(KnapsackResult::new(total_value, items))
}
