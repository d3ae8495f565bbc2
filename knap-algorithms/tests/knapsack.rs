use knap_algorithms::knapsack::*;
use knap_challenges::knapsack::{Challenge, KnapsackResult};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn solve_all(solver: &Solver) -> Vec<KnapsackResult> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| solver.solve(algorithm).unwrap())
        .collect()
}

fn brute_force(challenge: &Challenge) -> u64 {
    let n = challenge.num_items();
    let mut best = 0;
    for mask in 0u32..(1 << n) {
        let (mut weight, mut value) = (0u64, 0u64);
        for i in 0..n {
            if mask & (1 << i) != 0 {
                weight += challenge.weights()[i] as u64;
                value += challenge.values()[i] as u64;
            }
        }
        if weight <= challenge.capacity() as u64 {
            best = best.max(value);
        }
    }
    best
}

fn random_challenge(rng: &mut SmallRng, max_items: usize) -> Challenge {
    let n = rng.gen_range(0..=max_items);
    let weights = (0..n).map(|_| rng.gen_range(1..=30)).collect();
    let values = (0..n).map(|_| rng.gen_range(1..=50)).collect();
    Challenge::new(weights, values, rng.gen_range(0..=100)).unwrap()
}

#[test]
fn test_concrete_scenario() {
    let solver = Solver::new(vec![2, 3, 4, 5], vec![3, 4, 5, 6], 5).unwrap();
    for result in solve_all(&solver) {
        assert_eq!(result, KnapsackResult::new(7, vec![0, 1]));
    }
}

#[test]
fn test_greedy_can_be_misled_by_ratio() {
    let solver = Solver::new(vec![1, 10], vec![2, 10], 10).unwrap();
    assert_eq!(solver.solve_greedy().unwrap(), KnapsackResult::new(2, vec![0]));
    assert_eq!(
        solver.solve_pruning_search().unwrap(),
        KnapsackResult::new(10, vec![1])
    );
    assert_eq!(
        solver.solve_dynamic_programming().unwrap(),
        KnapsackResult::new(10, vec![1])
    );

    let solver = Solver::new(vec![10, 20, 30], vec![60, 100, 120], 50).unwrap();
    assert_eq!(solver.solve_greedy().unwrap().max_value(), 160);
    assert_eq!(
        solver.solve_pruning_search().unwrap(),
        KnapsackResult::new(220, vec![1, 2])
    );
    assert_eq!(
        solver.solve_dynamic_programming().unwrap(),
        KnapsackResult::new(220, vec![1, 2])
    );
}

#[test]
fn test_zero_capacity() {
    let solver = Solver::new(vec![1, 2, 3], vec![10, 20, 30], 0).unwrap();
    for result in solve_all(&solver) {
        assert_eq!(result, KnapsackResult::empty());
    }
}

#[test]
fn test_no_items() {
    let solver = Solver::new(vec![], vec![], 10).unwrap();
    for result in solve_all(&solver) {
        assert_eq!(result, KnapsackResult::empty());
    }
}

#[test]
fn test_single_item() {
    let fits = Solver::new(vec![5], vec![9], 5).unwrap();
    for result in solve_all(&fits) {
        assert_eq!(result, KnapsackResult::new(9, vec![0]));
    }

    let too_heavy = Solver::new(vec![6], vec![9], 5).unwrap();
    for result in solve_all(&too_heavy) {
        assert_eq!(result, KnapsackResult::empty());
    }
}

#[test]
fn test_everything_fits() {
    let solver = Solver::new(vec![3, 1, 4, 1, 5], vec![9, 2, 6, 5, 3], 100).unwrap();
    for result in solve_all(&solver) {
        assert_eq!(result, KnapsackResult::new(25, vec![0, 1, 2, 3, 4]));
    }
}

#[test]
fn test_equal_items() {
    let solver = Solver::new(vec![4; 6], vec![7; 6], 13).unwrap();
    let results = solve_all(&solver);
    for result in &results {
        assert_eq!(result.max_value(), 21);
        assert_eq!(result.item_count(), 3);
    }
    // ties keep the original order
    assert_eq!(results[2].selected_indices(), &[0, 1, 2]);
}

#[test]
fn test_exact_algorithms_agree_on_random_instances() {
    let mut rng = SmallRng::seed_from_u64(1337);
    for _ in 0..300 {
        let challenge = random_challenge(&mut rng, 12);
        let optimum = brute_force(&challenge);
        let solver = Solver::from_challenge(challenge);

        let pruning = solver.solve_pruning_search().unwrap();
        let dynamic = solver.solve_dynamic_programming().unwrap();
        let greedy = solver.solve_greedy().unwrap();

        assert_eq!(pruning.max_value(), optimum);
        assert_eq!(dynamic.max_value(), optimum);
        assert!(greedy.max_value() <= optimum);

        for result in [&pruning, &dynamic, &greedy] {
            assert_eq!(
                solver.challenge().verify_result(result).unwrap(),
                result.max_value()
            );
        }
    }
}

#[test]
fn test_exact_algorithms_agree_on_larger_instances() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..20 {
        let n = rng.gen_range(30..=60);
        let weights: Vec<u32> = (0..n).map(|_| rng.gen_range(1..=200)).collect();
        let values: Vec<u32> = (0..n).map(|_| rng.gen_range(1..=200)).collect();
        let capacity = weights.iter().sum::<u32>() / 2;
        let solver = Solver::new(weights, values, capacity).unwrap();

        let pruning = solver.solve_pruning_search().unwrap();
        let dynamic = solver.solve_dynamic_programming().unwrap();
        assert_eq!(pruning.max_value(), dynamic.max_value());
        assert!(solver.solve_greedy().unwrap().max_value() <= dynamic.max_value());
        solver.challenge().verify_result(&pruning).unwrap();
        solver.challenge().verify_result(&dynamic).unwrap();
    }
}

#[test]
fn test_deterministic_and_reusable() {
    let mut rng = SmallRng::seed_from_u64(7);
    let solver = Solver::from_challenge(random_challenge(&mut rng, 20));
    let first = solve_all(&solver);
    for _ in 0..5 {
        assert_eq!(solve_all(&solver), first);
    }
}

#[test]
fn test_shared_between_threads() {
    let solver = Solver::new(
        vec![12, 7, 11, 8, 9, 6, 5, 14, 3, 10],
        vec![24, 13, 23, 15, 16, 11, 9, 27, 5, 18],
        26,
    )
    .unwrap();
    let expected = solver.solve_dynamic_programming().unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| solver.solve_pruning_search().unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().max_value(), expected.max_value());
        }
    });
}

#[test]
fn test_algorithm_names() {
    assert_eq!(Algorithm::PruningSearch.to_string(), "Backtracking");
    assert_eq!("dp".parse::<Algorithm>().unwrap(), Algorithm::DynamicProgramming);
    assert_eq!("Greedy".parse::<Algorithm>().unwrap(), Algorithm::Greedy);
    assert_eq!("BNB".parse::<Algorithm>().unwrap(), Algorithm::PruningSearch);
    assert!("simplex".parse::<Algorithm>().is_err());
    assert!(!Algorithm::Greedy.is_exact());
    assert!(Algorithm::DynamicProgramming.is_exact());
}

#[test]
fn test_table_bytes() {
    assert_eq!(dynamic::table_bytes(4, 5), Some(5 * 6 * 8));
}
