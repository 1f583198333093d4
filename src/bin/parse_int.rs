use anyhow::Result;
use tracing::info;

use numbench::config::{env_log_level, init_tracing};
use numbench::conversion::integer::{
    ENTRY_COUNT, ParseStrategy, bench_all, count_lines, make_numbers_buffer, verify_strategy,
};

fn main() -> Result<()> {
    init_tracing(&env_log_level());

    let text = make_numbers_buffer(ENTRY_COUNT);
    info!(entries = ENTRY_COUNT, bytes = text.len(), "numbers buffer ready");

    println!("lines={}", count_lines(&text));

    for strategy in ParseStrategy::ALL {
        verify_strategy(strategy, &text, ENTRY_COUNT)?;
    }
    info!("all strategies decode every line");

    bench_all(&text);

    Ok(())
}
