use anyhow::Result;
use tracing::{debug, info};

use numbench::config::{Config, init_tracing};
use numbench::record::{Approach, cross_check};
use numbench::report::{format_results, format_write_line};
use numbench::sink::{NULL_DEVICE, WriteStrategy, run_write_bench};

/// Indices compared across approaches before anything is timed.
const CROSS_CHECK_SAMPLES: u32 = 1024;

fn main() -> Result<()> {
    let config = Config::load();

    // Initialize logging
    init_tracing(&config.log_level);

    info!("numbench v{}", env!("CARGO_PKG_VERSION"));

    let iterations = config.iterations();
    let rounds = config.rounds();
    let approaches = config.selected_approaches();
    let write_approaches = if config.skip_write {
        Vec::new()
    } else {
        config.selected_write_approaches()
    };

    // Every approach that will be measured must agree byte for byte
    let mut checked: Vec<Approach> = approaches.clone();
    checked.extend(write_approaches.iter().filter(|a| !approaches.contains(a)));
    cross_check(&checked, 0..CROSS_CHECK_SAMPLES)?;
    debug!("{} approaches agree on {} sample records", checked.len(), CROSS_CHECK_SAMPLES);

    for approach in &approaches {
        println!("Sample {:<12} output: {}", approach.label(), approach.render(1));
    }
    println!();

    println!(
        "Running benchmarks with {} iterations, {} rounds each (showing best time)...\n",
        iterations, rounds
    );

    let mut results = Vec::with_capacity(approaches.len());
    for approach in approaches {
        info!(approach = approach.label(), iterations, rounds, "starting format benchmark");
        let result = approach.bench(iterations, rounds);
        debug!(approach = approach.label(), samples = ?result.samples, "rounds finished");
        println!("{} completed", approach.label());
        results.push((approach, result));
    }

    print!("{}", format_results(iterations, rounds, &results));

    if write_approaches.is_empty() {
        return Ok(());
    }

    println!("\n\n[write benchmark to {}]", NULL_DEVICE);
    for approach in write_approaches {
        info!(approach = approach.label(), "starting write benchmark");
        for strategy in WriteStrategy::ALL {
            let result = run_write_bench(approach, strategy, iterations)?;
            println!("{}", format_write_line(approach, strategy, &result));
        }
    }

    Ok(())
}
