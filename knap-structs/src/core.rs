use serde::{Deserialize, Serialize};

/// One line of the benchmark report: how one algorithm did on one test file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub test_name: String,
    pub num_items: usize,
    pub capacity: u32,
    pub algorithm: String,
    #[serde(default)]
    pub time_seconds: Option<f64>,
    #[serde(default)]
    pub value: Option<u64>,
    pub skipped: bool,
}

impl BenchmarkRecord {
    pub fn completed(
        test_name: &str,
        num_items: usize,
        capacity: u32,
        algorithm: &str,
        time_seconds: f64,
        value: u64,
    ) -> Self {
        Self {
            test_name: test_name.to_string(),
            num_items,
            capacity,
            algorithm: algorithm.to_string(),
            time_seconds: Some(time_seconds),
            value: Some(value),
            skipped: false,
        }
    }

    pub fn skipped(test_name: &str, num_items: usize, capacity: u32, algorithm: &str) -> Self {
        Self {
            test_name: test_name.to_string(),
            num_items,
            capacity,
            algorithm: algorithm.to_string(),
            time_seconds: None,
            value: None,
            skipped: true,
        }
    }

    pub fn time_ms(&self) -> Option<f64> {
        self.time_seconds.map(|t| t * 1000.0)
    }

    /// Test name without the `test_` prefix and `.txt` suffix.
    pub fn short_name(&self) -> &str {
        let name = self.test_name.as_str();
        let name = name.strip_prefix("test_").unwrap_or(name);
        name.strip_suffix(".txt").unwrap_or(name)
    }

    /// Row of the CSV export, in the column order of [`CSV_HEADER`].
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.3},{},{}",
            self.test_name,
            self.num_items,
            self.capacity,
            self.algorithm,
            self.time_seconds.unwrap_or(0.0),
            self.time_ms().unwrap_or(0.0),
            self.value.unwrap_or(0),
            if self.skipped { "yes" } else { "no" }
        )
    }
}

pub const CSV_HEADER: &str = "Test,NumItems,Capacity,Algorithm,TimeSeconds,TimeMs,Value,Skipped";
