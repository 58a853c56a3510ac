//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::fs;
use std::process::exit;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cmpr::compression::{compress::compress, decompress::decompress};
use cmpr::error::Result;
use cmpr::tools::bench::{bench_all, generate, results_table, DataPattern};
use cmpr::tools::cli::{cmpr_opts_init, CmprOpts, Mode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("cmpr: logging unavailable: {}", e);
    }

    let options = cmpr_opts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => compress(&options).map(|report| println!("{}", report)),
        Mode::Decompress => decompress(&options).map(|report| println!("{}", report)),
        Mode::Benchmark => benchmark(&options),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("cmpr: {}", e);
        exit(1);
    }
    info!("Done.");
}

/// Benchmark a file when one is given, otherwise each generated data pattern.
fn benchmark(opts: &CmprOpts) -> Result<()> {
    if let Some(input) = &opts.input {
        let data = fs::read(input)?;
        println!("Benchmarking {} ({} bytes)", input, data.len());
        println!("{}", results_table(&bench_all(&data)?));
        return Ok(());
    }

    for pattern in DataPattern::ALL {
        let data = generate(opts.size, pattern);
        println!("\n{}", pattern.description());
        println!("{}", results_table(&bench_all(&data)?));
    }
    Ok(())
}
