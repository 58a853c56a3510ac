use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use log::{info, LevelFilter};

use super::bench::DEFAULT_SIZE;
use crate::compression::container::Algorithm;

/// Suffix added to compressed files when no output name is given.
pub const EXTENSION: &str = ".cmp";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, Benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Benchmark,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "cmpr",
    version,
    about = "Lossless single file compressor using RLE, Huffman or LZW coding",
    long_about = None
)]
pub struct Args {
    /// Sets verbosity. -v shows warnings, -vvvv is chatty
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress everything except the final result
    #[clap(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        /// Input file to compress
        #[clap(value_parser)]
        input: String,
        /// Output file (default: input file + .cmp)
        #[clap(value_parser)]
        output: Option<String>,
        /// Compression algorithm to use: rle, huffman or lzw
        #[clap(short = 'a', long = "algorithm", default_value = "lzw", value_parser = Algorithm::from_str)]
        algorithm: Algorithm,
    },
    /// Decompress a file (the algorithm is read from the file)
    Decompress {
        /// Input file to decompress
        #[clap(value_parser)]
        input: String,
        /// Output file (default: input without .cmp)
        #[clap(value_parser)]
        output: Option<String>,
    },
    /// Compare all algorithms on a file, or on generated data
    Benchmark {
        /// File to benchmark. Generated data is used when omitted.
        #[clap(value_parser)]
        input: Option<String>,
        /// Size of each generated data set in bytes
        #[clap(short = 's', long = "size", default_value_t = DEFAULT_SIZE, value_parser)]
        size: usize,
    },
}

/// Every user settable option, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmprOpts {
    /// Compress/Decompress/Benchmark
    pub op_mode: Mode,
    /// Name of file to read for input (optional only for Benchmark)
    pub input: Option<String>,
    /// Name of file to write
    pub output: Option<String>,
    /// Algorithm used when compressing
    pub algorithm: Algorithm,
    /// Generated data size for Benchmark
    pub size: usize,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl CmprOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Compress,
            input: None,
            output: None,
            algorithm: Algorithm::default(),
            size: DEFAULT_SIZE,
            verbose: Verbosity::Errors,
        }
    }

    /// Copy parsed arguments into our internal structure.
    pub fn from_args(args: Args) -> Self {
        let mut opts = CmprOpts::new();
        opts.verbose = if args.quiet {
            Verbosity::Quiet
        } else {
            match args.verbose {
                0 => Verbosity::Errors,
                1 => Verbosity::Warnings,
                2 => Verbosity::Info,
                3 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        match args.command {
            Command::Compress {
                input,
                output,
                algorithm,
            } => {
                opts.op_mode = Mode::Compress;
                opts.output = Some(output.unwrap_or_else(|| compressed_name(&input)));
                opts.input = Some(input);
                opts.algorithm = algorithm;
            }
            Command::Decompress { input, output } => {
                opts.op_mode = Mode::Decompress;
                opts.output = Some(output.unwrap_or_else(|| decompressed_name(&input)));
                opts.input = Some(input);
            }
            Command::Benchmark { input, size } => {
                opts.op_mode = Mode::Benchmark;
                opts.input = input;
                opts.size = size;
            }
        }
        opts
    }
}

impl Default for CmprOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Default output name when compressing.
pub fn compressed_name(input: &str) -> String {
    format!("{}{}", input, EXTENSION)
}

/// Default output name when decompressing: strip .cmp, or append .decompressed.
pub fn decompressed_name(input: &str) -> String {
    match input.strip_suffix(EXTENSION) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => format!("{}.decompressed", input),
    }
}

/// Parse the command line and set the log level from it.
pub fn cmpr_opts_init() -> CmprOpts {
    let opts = CmprOpts::from_args(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("---- cmpr initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if let Some(input) = &opts.input {
        info!("Getting input from the file {}", input);
    }
    if let Some(output) = &opts.output {
        info!("Sending output to the file {}", output);
    }
    if opts.op_mode == Mode::Compress {
        info!("Algorithm set to {}", opts.algorithm);
    }
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> CmprOpts {
        CmprOpts::from_args(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn compress_defaults_test() {
        let opts = parse(&["cmpr", "compress", "notes.txt"]);
        assert_eq!(opts.op_mode, Mode::Compress);
        assert_eq!(opts.algorithm, Algorithm::Lzw);
        assert_eq!(opts.input.as_deref(), Some("notes.txt"));
        assert_eq!(opts.output.as_deref(), Some("notes.txt.cmp"));
        assert_eq!(opts.verbose, Verbosity::Errors);
    }

    #[test]
    fn compress_with_algorithm_test() {
        let opts = parse(&["cmpr", "-vv", "compress", "a.bin", "b.cmp", "--algorithm", "huffman"]);
        assert_eq!(opts.algorithm, Algorithm::Huffman);
        assert_eq!(opts.output.as_deref(), Some("b.cmp"));
        assert_eq!(opts.verbose, Verbosity::Info);

        let opts = parse(&["cmpr", "compress", "a.bin", "-a", "RLE"]);
        assert_eq!(opts.algorithm, Algorithm::Rle);
    }

    #[test]
    fn bad_algorithm_test() {
        assert!(Args::try_parse_from(["cmpr", "compress", "a", "-a", "zip"]).is_err());
    }

    #[test]
    fn decompress_test() {
        let opts = parse(&["cmpr", "decompress", "notes.txt.cmp", "-q"]);
        assert_eq!(opts.op_mode, Mode::Decompress);
        assert_eq!(opts.output.as_deref(), Some("notes.txt"));
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }

    #[test]
    fn benchmark_test() {
        let opts = parse(&["cmpr", "benchmark", "--size", "4096"]);
        assert_eq!(opts.op_mode, Mode::Benchmark);
        assert_eq!(opts.input, None);
        assert_eq!(opts.size, 4096);
    }

    #[test]
    fn output_names_test() {
        assert_eq!(compressed_name("a.txt"), "a.txt.cmp");
        assert_eq!(decompressed_name("a.txt.cmp"), "a.txt");
        assert_eq!(decompressed_name("archive"), "archive.decompressed");
        assert_eq!(decompressed_name(".cmp"), ".cmp.decompressed");
    }

    #[test]
    fn level_filter_test() {
        assert_eq!(Verbosity::Quiet.level_filter(), LevelFilter::Off);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::Trace);
        assert!(Verbosity::Debug > Verbosity::Info);
    }
}
