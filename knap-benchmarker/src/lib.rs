pub mod benchmark;
pub mod suite;
pub mod test_file;

pub use benchmark::Benchmark;
