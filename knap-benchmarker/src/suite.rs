use crate::test_file::write_test_file;
use anyhow::{Context, Result};
use knap_challenges::knapsack::{Challenge, Track};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const NUM_TESTS: usize = 20;

/// (num_items, max_weight, max_value, capacity)
pub const NORMAL_TRACKS: [(usize, u32, u32, u32); 3] =
    [(10, 20, 100, 50), (50, 100, 1000, 500), (100, 50, 500, 1000)];

pub const EDGE_TRACKS: [(usize, u32, u32, u32); 5] = [
    // single smallest item
    (1, 1, 1, 1),
    // single large item
    (1, 1_000_000, 1_000_000, 1_000_000),
    // many very light items
    (10_000, 1, 1, 1_000_000),
    // almost no capacity
    (10_000, 1_000_000, 1_000_000, 1),
    (10, 1_000_000, 1_000_000, 1_000_000),
];

/// The tracks of the whole suite: the fixed normal and edge tracks, then
/// random tracks drawn from `rng` until there are [`NUM_TESTS`].
pub fn suite_tracks<R: Rng>(rng: &mut R) -> Vec<Track> {
    let mut tracks: Vec<Track> = NORMAL_TRACKS
        .iter()
        .chain(EDGE_TRACKS.iter())
        .map(|&(n, w, v, c)| Track::new(n, w, v, c))
        .collect();
    while tracks.len() < NUM_TESTS {
        tracks.push(Track::new(
            rng.gen_range(1..=1000),
            rng.gen_range(1..=1_000_000),
            rng.gen_range(1..=1_000_000),
            rng.gen_range(1..=1_000_000),
        ));
    }
    tracks
}

/// Writes `test_1.txt` .. `test_20.txt` into `dir`. The same `seed` always
/// produces the same files.
pub fn generate_suite(dir: &Path, seed: u64) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create test directory {}", dir.display()))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let tracks = suite_tracks(&mut rng);

    let mut paths = Vec::with_capacity(tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        let challenge = Challenge::generate_instance(&rng.gen(), track)?;
        let path = dir.join(format!("test_{}.txt", i + 1));
        write_test_file(&path, &challenge)?;
        log::debug!("wrote {} ({:?})", path.display(), track);
        paths.push(path);
    }
    log::info!("generated {} tests in {}", paths.len(), dir.display());
    Ok(paths)
}
