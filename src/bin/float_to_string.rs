use anyhow::Result;
use tracing::info;

use numbench::config::{env_log_level, init_tracing};
use numbench::conversion::float::{SAMPLE_COUNT, SEED, bench_values, make_random_values};

fn main() -> Result<()> {
    init_tracing(&env_log_level());
    info!(samples = SAMPLE_COUNT, seed = SEED, "float to string benchmark");

    let floats = make_random_values::<f32>(SAMPLE_COUNT, SEED);
    bench_values(&floats);
    drop(floats);

    println!();

    let doubles = make_random_values::<f64>(SAMPLE_COUNT, SEED);
    bench_values(&doubles);

    Ok(())
}
