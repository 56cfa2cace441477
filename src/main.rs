/*!
 * Collatz Engine - Main Entry Point
 *
 * Configuration precedence: command line flags, then `COLLATZ_*`
 * environment variables, then built-in defaults.
 */

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::info;

use collatz_engine::harness::{sweep_history, Cli, Command, RunReport};
use collatz_engine::{init_tracing, run, EngineConfig};

#[cfg(all(feature = "jemalloc", not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> miette::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let base = EngineConfig::from_env()?;

    match cli.command {
        Command::Run(args) => {
            let config = args.config(base);
            info!(?config, "configuration resolved");

            let outcome = run(config.clone())?;
            let report = RunReport::new(&config, &outcome);
            if args.engine.json {
                println!("{}", report.to_json().into_diagnostic()?);
            } else {
                print!("{}", report.to_text());
            }

            outcome.into_result()?;
        }
        Command::Sweep(args) => {
            let config = args.engine.apply(base);
            info!(?config, sizes = ?args.history, "starting history sweep");

            let report = sweep_history(&config, &args.history)?;
            if args.engine.json {
                println!("{}", report.to_json().into_diagnostic()?);
            } else {
                print!("{}", report.to_text());
            }
        }
    }

    Ok(())
}
