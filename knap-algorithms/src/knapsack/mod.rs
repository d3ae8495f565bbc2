pub mod branch_and_bound;
pub mod dynamic;
pub mod greedy;

use anyhow::{anyhow, Result};
use knap_challenges::knapsack::{Challenge, KnapsackResult};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    PruningSearch,
    DynamicProgramming,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::PruningSearch,
        Algorithm::DynamicProgramming,
        Algorithm::Greedy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::PruningSearch => "Backtracking",
            Algorithm::DynamicProgramming => "DP",
            Algorithm::Greedy => "Greedy",
        }
    }

    /// Whether the algorithm always returns the optimum.
    pub fn is_exact(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backtracking" | "pruning" | "bnb" => Ok(Algorithm::PruningSearch),
            "dp" | "dynamic" => Ok(Algorithm::DynamicProgramming),
            "greedy" => Ok(Algorithm::Greedy),
            _ => Err(anyhow!("Unknown algorithm '{}'", s)),
        }
    }
}

/// Owns one knapsack instance and runs any of the algorithms on it.
///
/// Solving never mutates the solver, so one instance can be reused for any
/// number of calls, and shared between threads.
#[derive(Debug, Clone)]
pub struct Solver {
    challenge: Challenge,
}

impl Solver {
    pub fn new(weights: Vec<u32>, values: Vec<u32>, capacity: u32) -> Result<Self> {
        Ok(Self::from_challenge(Challenge::new(weights, values, capacity)?))
    }

    pub fn from_challenge(challenge: Challenge) -> Self {
        Self { challenge }
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn solve(&self, algorithm: Algorithm) -> Result<KnapsackResult> {
        match algorithm {
            Algorithm::PruningSearch => self.solve_pruning_search(),
            Algorithm::DynamicProgramming => self.solve_dynamic_programming(),
            Algorithm::Greedy => self.solve_greedy(),
        }
    }

    pub fn solve_pruning_search(&self) -> Result<KnapsackResult> {
        branch_and_bound::solve_challenge(&self.challenge)
    }

    pub fn solve_dynamic_programming(&self) -> Result<KnapsackResult> {
        dynamic::solve_challenge(&self.challenge)
    }

    pub fn solve_greedy(&self) -> Result<KnapsackResult> {
        greedy::solve_challenge(&self.challenge)
    }
}
