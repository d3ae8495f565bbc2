use anyhow::{anyhow, Context, Result};
use clap::{arg, Command};
use knap_algorithms::{Algorithm, Solver};
use knap_benchmarker::{suite, test_file::read_test_file, Benchmark};
use knap_challenges::knapsack::KnapsackResult;
use knap_structs::config::BenchmarkConfig;
use serde::Serialize;
use serde_json::Value;
use std::{
    fs,
    io::Read,
    path::PathBuf,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

const TEST_DIRECTORY: &str = "knapsack_tests";
const CSV_FILE: &str = "results.csv";

fn cli() -> Command {
    Command::new("knap")
        .about("Generates, solves and benchmarks 0/1 knapsack instances (runs 'benchmark' by default)")
        .subcommand(
            Command::new("generate")
                .about("Generates the 20 test files")
                .arg(
                    arg!(--dir [DIR] "Directory the tests are written to")
                        .default_value(TEST_DIRECTORY)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed of the suite (random if not set)")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Runs every algorithm on every test file and exports a CSV")
                .visible_alias("run")
                .arg(
                    arg!(--dir [DIR] "Directory holding the test files")
                        .default_value(TEST_DIRECTORY)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--csv [CSV] "Path of the CSV export")
                        .default_value(CSV_FILE)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--config [CONFIG] "Config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves one test file")
                .arg(arg!(<FILE> "Path to a test file").value_parser(clap::value_parser!(PathBuf)))
                .arg(
                    arg!(--algorithm [ALGORITHM] "backtracking, dp or greedy")
                        .default_value("dp")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the result will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--config [CONFIG] "Config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a result against a test file")
                .arg(arg!(<FILE> "Path to a test file").value_parser(clap::value_parser!(PathBuf)))
                .arg(
                    arg!(<RESULT> "Result json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("generate", sub_m)) => generate(
            sub_m.get_one::<PathBuf>("dir").unwrap().clone(),
            sub_m.get_one::<u64>("seed").copied(),
        ),
        Some(("benchmark", sub_m)) => benchmark(
            sub_m.get_one::<PathBuf>("dir").unwrap().clone(),
            sub_m.get_one::<PathBuf>("csv").unwrap().clone(),
            sub_m.get_one::<String>("config").cloned(),
        ),
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<PathBuf>("FILE").unwrap().clone(),
            sub_m.get_one::<String>("algorithm").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_one::<String>("config").cloned(),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<PathBuf>("FILE").unwrap().clone(),
            sub_m.get_one::<String>("RESULT").unwrap().clone(),
        ),
        None => benchmark(PathBuf::from(TEST_DIRECTORY), PathBuf::from(CSV_FILE), None),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[derive(Serialize, Debug)]
struct SolveOutput {
    test_name: String,
    algorithm: String,
    time_seconds: f64,
    result: KnapsackResult,
}

fn generate(dir: PathBuf, seed: Option<u64>) -> Result<()> {
    let seed = match seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };
    log::info!("generating suite with seed {}", seed);
    let paths = suite::generate_suite(&dir, seed)?;
    println!(
        "{} tests were generated in '{}' (seed {})",
        paths.len(),
        dir.display(),
        seed
    );
    Ok(())
}

fn benchmark(dir: PathBuf, csv: PathBuf, config: Option<String>) -> Result<()> {
    let config = load_config(config.as_deref())?;

    println!("{}", "=".repeat(64));
    println!("        KNAPSACK BENCHMARK");
    println!("{}", "=".repeat(64));

    let mut benchmark = Benchmark::new(config);
    benchmark.run_all_tests(&dir)?;

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK FINISHED");
    println!("{}", "=".repeat(60));

    benchmark.export_csv(&csv)?;
    println!("\nResults were exported to: {}", csv.display());

    println!("\n{}", "=".repeat(80));
    println!("SUMMARY");
    println!("{}", "=".repeat(80));
    print!("{}", benchmark.summary_table());
    println!("{}", "=".repeat(80));
    Ok(())
}

fn solve(
    path: PathBuf,
    algorithm: String,
    output_file: Option<PathBuf>,
    config: Option<String>,
) -> Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let config = load_config(config.as_deref())?;
    let solver = Solver::from_challenge(read_test_file(&path)?);
    Benchmark::new(config).ensure_runnable(algorithm, solver.challenge())?;

    let start = Instant::now();
    let result = solver.solve(algorithm)?;
    let time_seconds = start.elapsed().as_secs_f64();

    let output = SolveOutput {
        test_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        algorithm: algorithm.name().to_string(),
        time_seconds,
        result,
    };
    let json = serde_json::to_string_pretty(&output)?;
    if let Some(path) = output_file {
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write result to {}", path.display()))?;
        println!("result written to: {}", path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn verify(path: PathBuf, result: String) -> Result<()> {
    let challenge = read_test_file(&path)?;
    let result = load_result(&result)?;
    let value = challenge
        .verify_result(&result)
        .map_err(|e| anyhow!("Invalid result: {}", e))?;
    println!("Result is valid (value {})", value);
    Ok(())
}

fn load_config(config: Option<&str>) -> Result<BenchmarkConfig> {
    let Some(config) = config else {
        return Ok(BenchmarkConfig::default());
    };
    let config = if config.ends_with(".json") {
        fs::read_to_string(config)
            .with_context(|| format!("Failed to read config file {}", config))?
    } else {
        config.to_string()
    };
    serde_json::from_str(&config).context("Failed to parse config")
}

/// Accepts either a bare result or the output of `solve`.
fn load_result(result: &str) -> Result<KnapsackResult> {
    let result = if result == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read result from stdin")?;
        buffer
    } else if result.ends_with(".json") {
        fs::read_to_string(result)
            .with_context(|| format!("Failed to read result file {}", result))?
    } else {
        result.to_string()
    };

    let mut value: Value = serde_json::from_str(&result).context("Failed to parse result")?;
    if let Some(inner) = value.get_mut("result").map(Value::take) {
        value = inner;
    }
    serde_json::from_value(value).context("Failed to parse result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_accepted() {
        let matches = cli().try_get_matches_from(["knap"]).unwrap();
        assert!(matches.subcommand().is_none());
    }

    #[test]
    fn test_solve_accepts_config() {
        let matches = cli()
            .try_get_matches_from(["knap", "solve", "t.txt", "--config", "{}"])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, "solve");
        assert_eq!(sub_m.get_one::<String>("algorithm").unwrap(), "dp");
        assert_eq!(sub_m.get_one::<String>("config").unwrap(), "{}");
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), BenchmarkConfig::default());
        let config = load_config(Some(r#"{"max_dp_table_bytes": 10}"#)).unwrap();
        assert_eq!(config.max_dp_table_bytes, 10);
        assert!(load_config(Some("missing.json")).is_err());
    }
}
