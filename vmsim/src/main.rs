mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::info;
use vm::{trace, Stats};

use crate::cli::Cli;

fn run(cli: &Cli) -> vm::Result<Stats> {
    let config = cli.sim_config()?;
    let accesses = trace::read_trace(&cli.trace)?;

    info!(
        "vmsim: {} frames split into {:?}",
        config.frames,
        config.split.allocate(config.frames)
    );

    Ok(vm::simulate(&config, &accesses)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(stats) => {
            println!("{stats}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("vmsim: {err}");
            ExitCode::FAILURE
        }
    }
}
