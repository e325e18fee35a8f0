use anyhow::Result;
use clap::Parser;
use lifeline_core::init_logging;
use lifeline_lib::model::config::AppConfig;
use lifeline_lib::model::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to run (overrides the config)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Key to record, may be repeated (added to the configured keys)
    #[arg(short, long = "key")]
    keys: Vec<String>,

    /// Take a first reading as soon as each recorder attaches
    #[arg(long)]
    immediate: bool,

    /// Print the recorded series as JSON
    #[arg(long)]
    json: bool,

    /// List every registered key and exit
    #[arg(long)]
    list: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = AppConfig::load(&args.config)?;
    config.data.immediate_update |= args.immediate;
    if let Some(ticks) = args.ticks {
        config.world.ticks = ticks;
    }

    let mut sim = Simulation::new(&config)?;
    if args.list {
        for key in sim.manager().available() {
            println!("{key}");
        }
        return Ok(());
    }
    for key in &args.keys {
        sim.record(key, config.data.immediate_update)?;
    }

    sim.run(config.world.ticks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.report())?);
    } else {
        for series in sim.series() {
            println!("{} {}", series.data_id(), series.to_text());
        }
    }
    Ok(())
}
