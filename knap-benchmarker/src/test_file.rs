//! Plain-text test files: a header line `n capacity` followed by `n` lines
//! `weight value`.

use anyhow::{anyhow, Context, Result};
use knap_challenges::knapsack::Challenge;
use std::{fs, path::Path};

pub fn read_test_file(path: &Path) -> Result<Challenge> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read test file {}", path.display()))?;
    parse_test_data(&data).with_context(|| format!("Invalid test file {}", path.display()))
}

pub fn write_test_file(path: &Path, challenge: &Challenge) -> Result<()> {
    fs::write(path, format_test_data(challenge))
        .with_context(|| format!("Failed to write test file {}", path.display()))
}

pub fn parse_test_data(data: &str) -> Result<Challenge> {
    let mut lines = data.lines().enumerate();

    let (num_items, capacity) = match lines.next() {
        Some((_, header)) => parse_pair::<usize, u32>(header, 1)?,
        None => return Err(anyhow!("Missing header line 'n capacity'")),
    };

    let mut weights = Vec::new();
    let mut values = Vec::new();
    for (i, line) in lines.by_ref().take(num_items) {
        let (weight, value) = parse_pair::<u32, u32>(line, i + 1)?;
        weights.push(weight);
        values.push(value);
    }
    if weights.len() < num_items {
        return Err(anyhow!(
            "Expected {} items but found only {}",
            num_items,
            weights.len()
        ));
    }
    if let Some((i, _)) = lines.find(|(_, line)| !line.trim().is_empty()) {
        return Err(anyhow!("Line {}: unexpected data after the last item", i + 1));
    }

    Challenge::new(weights, values, capacity)
}

pub fn format_test_data(challenge: &Challenge) -> String {
    let mut data = format!("{} {}\n", challenge.num_items(), challenge.capacity());
    for (weight, value) in challenge.weights().iter().zip(challenge.values()) {
        data.push_str(&format!("{} {}\n", weight, value));
    }
    data
}

fn parse_pair<A, B>(line: &str, line_number: usize) -> Result<(A, B)>
where
    A: std::str::FromStr,
    B: std::str::FromStr,
{
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(anyhow!(
            "Line {}: expected 2 integers, found '{}'",
            line_number,
            line.trim()
        ));
    }
    let first = tokens[0]
        .parse::<A>()
        .map_err(|_| anyhow!("Line {}: '{}' is not a valid integer", line_number, tokens[0]))?;
    let second = tokens[1]
        .parse::<B>()
        .map_err(|_| anyhow!("Line {}: '{}' is not a valid integer", line_number, tokens[1]))?;
    Ok((first, second))
}
