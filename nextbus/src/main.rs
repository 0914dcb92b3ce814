use std::io::Write;

use nextbus::cli::{Cli, USAGE, log_filter_from_verbosity};
use nextbus::pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args(std::env::args_os());

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Missing descriptions are not an error: print usage and exit 0
    let Some(query) = cli.query() else {
        println!("{USAGE}");
        return;
    };

    let config = cli.config();
    let api = match config.build_api() {
        Ok(api) => api,
        Err(e) => {
            println!("error creating API client: {e}");
            return;
        }
    };

    let pipeline = Pipeline::new(&*api).with_direction_policy(config.direction_policy);

    // Every outcome is reported on stdout and the exit status stays 0
    match pipeline.run(&query).await {
        Ok(next) => {
            print!("next departure: {}", next.display);
            std::io::stdout().flush().ok();
        }
        Err(e) => println!("{e}"),
    }
}
