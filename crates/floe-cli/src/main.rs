use clap::Parser;
use floe::{BasicSnowflakeGenerator, DEFAULT_EPOCH, GeneratorConfig, WallClock};

/// Mint Snowflake-style IDs and print them to stdout, one decimal string per
/// line.
#[derive(Parser, Debug)]
#[command(name = "floe", version, about = "Print Snowflake-style IDs in a loop")]
struct CliArgs {
    /// Number of IDs to print.
    #[arg(long, short = 'n', default_value_t = 50)]
    count: u64,

    /// This instance's worker coordinate.
    #[arg(long, env = "WORKER_ID", default_value_t = 0)]
    worker_id: u64,

    /// This instance's datacenter coordinate.
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0)]
    datacenter_id: u64,

    /// Width of the worker field in bits.
    #[arg(long, env = "WORKER_ID_BITS", default_value_t = 5)]
    worker_id_bits: u32,

    /// Width of the datacenter field in bits.
    #[arg(long, env = "DATACENTER_ID_BITS", default_value_t = 5)]
    datacenter_id_bits: u32,

    /// Width of the per-millisecond sequence field in bits.
    #[arg(long, env = "SEQUENCE_BITS", default_value_t = 12)]
    sequence_bits: u32,

    /// Reference epoch in milliseconds since the Unix epoch.
    #[arg(long, env = "EPOCH_MS", default_value_t = DEFAULT_EPOCH)]
    epoch: u64,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let generator = BasicSnowflakeGenerator::new(
        GeneratorConfig {
            epoch: args.epoch,
            worker_id: args.worker_id,
            datacenter_id: args.datacenter_id,
            worker_id_bits: args.worker_id_bits,
            datacenter_id_bits: args.datacenter_id_bits,
            sequence_bits: args.sequence_bits,
            ..GeneratorConfig::default()
        },
        WallClock,
    )?;

    for _ in 0..args.count {
        println!("{}", generator.next_id());
    }

    Ok(())
}
