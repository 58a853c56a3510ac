use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::compression::container::Algorithm;

/// Space saved as a percentage of the original size. Negative when the output grew, 0 for
/// empty input.
pub fn ratio(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// What a file level compress or decompress reports back to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub algorithm: Algorithm,
    pub original_size: usize,
    pub compressed_size: usize,
    pub elapsed: Duration,
}

impl Report {
    pub fn ratio(&self) -> f64 {
        ratio(self.original_size, self.compressed_size)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm.name().to_uppercase())?;
        writeln!(f, "Original size: {} bytes", self.original_size)?;
        writeln!(f, "Compressed size: {} bytes", self.compressed_size)?;
        writeln!(f, "Compression ratio: {:.2}%", self.ratio())?;
        write!(f, "Time taken: {:.2} seconds", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ratio_test() {
        assert_eq!(ratio(0, 9), 0.0);
        assert!((ratio(200, 50) - 75.0).abs() < 1e-9);
        assert!(ratio(100, 200) < 0.0);
    }

    #[test]
    fn display_test() {
        let report = Report {
            algorithm: Algorithm::Huffman,
            original_size: 1000,
            compressed_size: 600,
            elapsed: Duration::from_millis(1500),
        };
        let text = report.to_string();
        assert!(text.contains("Algorithm: HUFFMAN"));
        assert!(text.contains("Compression ratio: 40.00%"));
        assert!(text.ends_with("Time taken: 1.50 seconds"));
    }
}
