use gossip_sim::report::{header, Report};
use gossip_sim::{run_experiment, ExperimentContext, SimConfig, Strategy};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gossip_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed: u64 = rand::random();
    let config = SimConfig::new().with_seed(seed);
    info!(
        population = config.population_size,
        trials = config.trials,
        round_cap = config.round_cap,
        seed,
        "Starting gossip simulation"
    );

    let mut ctx = match ExperimentContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let population_size = ctx.population().len();
    for strategy in Strategy::ALL {
        let tally = run_experiment(&mut ctx, strategy);
        println!("{}", header(strategy));
        print!("{}", Report::new(&tally, population_size));
    }
}
