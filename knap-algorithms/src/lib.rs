pub mod knapsack;
pub use knapsack::{Algorithm, Solver};
