use crate::test_file::read_test_file;
use anyhow::{anyhow, Context, Result};
use knap_algorithms::knapsack::{dynamic, Algorithm, Solver};
use knap_challenges::knapsack::Challenge;
use knap_structs::{
    config::BenchmarkConfig,
    core::{BenchmarkRecord, CSV_HEADER},
};
use logging_timer::time;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

/// Runs every algorithm over test files and collects one record per run.
pub struct Benchmark {
    config: BenchmarkConfig,
    records: Vec<BenchmarkRecord>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Why `algorithm` must not run on `challenge` under the current
    /// config, if it must not.
    pub fn skip_reason(&self, algorithm: Algorithm, challenge: &Challenge) -> Option<String> {
        let num_items = challenge.num_items();
        let capacity = challenge.capacity();
        match algorithm {
            Algorithm::PruningSearch => {
                let limit = self.config.max_items_for_pruning_search();
                (num_items >= limit)
                    .then(|| format!("too many items ({} >= {})", num_items, limit))
            }
            Algorithm::DynamicProgramming => {
                let limit = self.config.max_capacity_for_dp();
                if capacity > limit {
                    return Some(format!("capacity too large ({} > {})", capacity, limit));
                }
                let budget = self.config.max_dp_table_bytes() as u128;
                match dynamic::table_bytes(num_items, capacity) {
                    Some(bytes) if bytes < budget => None,
                    Some(bytes) => Some(format!(
                        "table needs {} bytes, budget is {}",
                        bytes, budget
                    )),
                    None => Some("table size overflows".to_string()),
                }
            }
            Algorithm::Greedy => None,
        }
    }

    /// Fails with the skip reason when `algorithm` must not run on
    /// `challenge`, before any solver memory is touched.
    pub fn ensure_runnable(&self, algorithm: Algorithm, challenge: &Challenge) -> Result<()> {
        match self.skip_reason(algorithm, challenge) {
            Some(reason) => Err(anyhow!("{} refused: {}", algorithm, reason)),
            None => Ok(()),
        }
    }

    pub fn run_test(&mut self, path: &Path) -> Result<()> {
        let test_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Not a test file: {}", path.display()))?;
        let challenge = read_test_file(path)?;
        self.run_challenge(&test_name, challenge)
    }

    pub fn run_challenge(&mut self, test_name: &str, challenge: Challenge) -> Result<()> {
        let num_items = challenge.num_items();
        let capacity = challenge.capacity();

        println!("\n{}", "=".repeat(60));
        println!("Test: {}", test_name);
        println!("{}", "=".repeat(60));
        println!("Items: {}, Capacity: {}", num_items, capacity);

        let solver = Solver::from_challenge(challenge);
        for algorithm in Algorithm::ALL {
            println!("\n--- {} ---", algorithm);
            if let Some(reason) = self.skip_reason(algorithm, solver.challenge()) {
                log::warn!("{}: skipping {}: {}", test_name, algorithm, reason);
                println!("SKIP: {}", reason);
                self.records.push(BenchmarkRecord::skipped(
                    test_name,
                    num_items,
                    capacity,
                    algorithm.name(),
                ));
                continue;
            }

            let start = Instant::now();
            let result = solver.solve(algorithm)?;
            let time_seconds = start.elapsed().as_secs_f64();
            solver
                .challenge()
                .verify_result(&result)
                .with_context(|| format!("{} returned an invalid result", algorithm))?;

            println!(
                "{}: {}",
                if algorithm.is_exact() {
                    "Max value"
                } else {
                    "Approximate value"
                },
                result.max_value()
            );
            println!("Selected items: {:?}", result.selected_indices());
            println!(
                "Time: {:.6} s ({:.3} ms)",
                time_seconds,
                time_seconds * 1000.0
            );

            self.records.push(BenchmarkRecord::completed(
                test_name,
                num_items,
                capacity,
                algorithm.name(),
                time_seconds,
                result.max_value(),
            ));
        }
        Ok(())
    }

    /// Runs every test file of `dir`, replacing the records of earlier runs.
    #[time]
    pub fn run_all_tests(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(anyhow!(
                "Test directory {} does not exist, run 'generate' first",
                dir.display()
            ));
        }
        let test_files = list_test_files(dir)?;
        log::info!("found {} tests in {}", test_files.len(), dir.display());

        self.records.clear();
        for path in &test_files {
            self.run_test(path)?;
        }
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut data = String::from(CSV_HEADER);
        data.push('\n');
        for record in &self.records {
            data.push_str(&record.to_csv_row());
            data.push('\n');
        }
        fs::write(path, data)
            .with_context(|| format!("Failed to write CSV file {}", path.display()))?;
        log::info!("exported {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    pub fn summary_table(&self) -> String {
        let mut table = format!(
            "{:<12} | {:<6} | {:<10} | {:<12} | {:<12} | {:<10}\n",
            "Test", "N", "Capacity", "Algorithm", "Time (ms)", "Value"
        );
        table.push_str(&"-".repeat(80));
        table.push('\n');
        for record in self.records.iter().filter(|r| !r.skipped) {
            table.push_str(&format!(
                "{:<12} | {:<6} | {:<10} | {:<12} | {:<12.3} | {:<10}\n",
                record.short_name(),
                record.num_items,
                record.capacity,
                record.algorithm,
                record.time_ms().unwrap_or(0.0),
                record.value.unwrap_or(0)
            ));
        }
        table
    }
}

/// The `*.txt` files of `dir`, `test_<N>.txt` first in numeric order, then
/// any other name in lexicographic order.
pub fn list_test_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut test_files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to list test directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "txt") {
            test_files.push(path);
        }
    }
    test_files.sort_by_key(|path| {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        (test_number(&name).unwrap_or(u64::MAX), name)
    });
    Ok(test_files)
}

fn test_number(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix("test_")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}
