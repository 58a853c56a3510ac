//! The tools module provides the helpers around the codecs.
//!
//! The tools are:
//! - cli: Command line interface and option handling.
//! - freq_count: Byte frequency count used by the Huffman coder.
//! - rle: The Run-Length-Encoding codec. It is byte aligned and needs nothing else here.
//! - report: Size, ratio and timing report for file operations.
//! - bench: Benchmark of all three algorithms over a file or generated data.
//!
pub mod bench;
pub mod cli;
pub mod freq_count;
pub mod report;
pub mod rle;
