//! Benchmark harness: runs every algorithm over one input, checks the round trip, and times
//! both directions.
//!
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use log::{error, info};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::report::ratio;
use crate::compression::{compress::encode, container::Algorithm, decompress::decode};
use crate::error::{CmprError, Result};

/// Seed for the random data set, so runs are comparable.
const SEED: u64 = 0x00c0_ffee;
/// Default generated data size.
pub const DEFAULT_SIZE: usize = 1_000_000;

/// Kinds of generated test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPattern {
    /// Seeded random bytes. Incompressible.
    Random,
    /// "ABC" repeated ten times, tiled. Highly compressible.
    Repeated,
    /// 0, 1, .. 255, 0, 1, .. Moderately compressible.
    Sequential,
}

impl DataPattern {
    pub const ALL: [DataPattern; 3] = [
        DataPattern::Random,
        DataPattern::Repeated,
        DataPattern::Sequential,
    ];

    pub fn description(self) -> &'static str {
        match self {
            DataPattern::Random => "Random data (incompressible)",
            DataPattern::Repeated => "Repeated patterns (highly compressible)",
            DataPattern::Sequential => "Sequential data (moderately compressible)",
        }
    }
}

/// Build `size` bytes of the given pattern.
pub fn generate(size: usize, pattern: DataPattern) -> Vec<u8> {
    match pattern {
        DataPattern::Random => {
            let mut data = vec![0_u8; size];
            ChaCha8Rng::seed_from_u64(SEED).fill_bytes(&mut data);
            data
        }
        DataPattern::Repeated => b"ABC".repeat(10).into_iter().cycle().take(size).collect(),
        DataPattern::Sequential => (0..size).map(|i| (i % 256) as u8).collect(),
    }
}

/// One row of the results table.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub algorithm: Algorithm,
    pub original_size: usize,
    pub compressed_size: usize,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl BenchResult {
    pub fn ratio(&self) -> f64 {
        ratio(self.original_size, self.compressed_size)
    }
}

impl Display for BenchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} {:<10} {:<10} {:<10} {:<10.4} {:.4}",
            self.algorithm.name().to_uppercase(),
            self.original_size,
            self.compressed_size,
            format!("{:.2}%", self.ratio()),
            self.compress_time.as_secs_f64(),
            self.decompress_time.as_secs_f64()
        )
    }
}

/// Compress and decompress `data` with one algorithm, failing if the round trip differs.
pub fn bench_algorithm(data: &[u8], algorithm: Algorithm) -> Result<BenchResult> {
    let start = Instant::now();
    let compressed = encode(data, algorithm)?;
    let compress_time = start.elapsed();

    let start = Instant::now();
    let decompressed = decode(&compressed)?;
    let decompress_time = start.elapsed();

    if decompressed != data {
        error!("{} round trip changed the data", algorithm);
        return Err(CmprError::CorruptPayload(format!(
            "{} round trip does not match the original",
            algorithm
        )));
    }
    info!("{}: {} -> {} bytes", algorithm, data.len(), compressed.len());
    Ok(BenchResult {
        algorithm,
        original_size: data.len(),
        compressed_size: compressed.len(),
        compress_time,
        decompress_time,
    })
}

/// Run every algorithm over `data`.
pub fn bench_all(data: &[u8]) -> Result<Vec<BenchResult>> {
    Algorithm::ALL
        .iter()
        .map(|&alg| bench_algorithm(data, alg))
        .collect()
}

/// Format results the way the benchmark prints them.
pub fn results_table(results: &[BenchResult]) -> String {
    let rule = "-".repeat(80);
    let mut lines = vec![
        rule.clone(),
        format!(
            "{:<10} {:<10} {:<10} {:<10} {:<10} {:<10}",
            "Algorithm", "Original", "Compressed", "Ratio", "Compress", "Decompress"
        ),
        format!(
            "{:^10} {:<10} {:<10} {:<10} {:<10} {:<10}",
            "", "(bytes)", "(bytes)", "(%)", "(sec)", "(sec)"
        ),
        rule,
    ];
    lines.extend(results.iter().map(|r| r.to_string()));
    lines.join("\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generate_test() {
        assert_eq!(generate(7, DataPattern::Repeated), b"ABCABCA");
        assert_eq!(&generate(258, DataPattern::Sequential)[256..], &[0, 1]);
        let random = generate(64, DataPattern::Random);
        assert_eq!(random.len(), 64);
        assert_eq!(random, generate(64, DataPattern::Random));
    }

    #[test]
    fn bench_all_test() {
        for pattern in DataPattern::ALL {
            let data = generate(5_000, pattern);
            let results = bench_all(&data).unwrap();
            assert_eq!(results.len(), 3);
            assert!(results.iter().all(|r| r.original_size == 5_000));
        }
    }

    #[test]
    fn random_data_expands_under_rle_test() {
        let data = generate(5_000, DataPattern::Random);
        let rle = bench_algorithm(&data, Algorithm::Rle).unwrap();
        assert!(rle.compressed_size > data.len());
        assert!(rle.ratio() < 0.0);
    }

    #[test]
    fn table_test() {
        let results = bench_all(b"hello hello hello").unwrap();
        let table = results_table(&results);
        assert_eq!(table.lines().count(), 7);
        assert!(table.contains("HUFFMAN"));
    }
}
