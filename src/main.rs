#[macro_use] extern crate log;
extern crate simplelog;
extern crate percolation;

use simplelog::*;
use std::env;
use std::fs::File;
use std::process;

use percolation::{Config, PercolationStats};

fn init_logging(config: &Config) -> percolation::Result<()> {
	let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
		TermLogger::new(
			config.log_level,
			simplelog::Config::default(),
			TerminalMode::Stderr,
			ColorChoice::Auto),
	];
	if let Some(path) = &config.log_file {
		loggers.push(WriteLogger::new(
			LevelFilter::Debug,
			simplelog::Config::default(),
			File::create(path)?));
	}
	// a logger may already be installed; keep going without ours
	let _ = CombinedLogger::init(loggers);
	Ok(())
}

fn run() -> percolation::Result<()> {
	let config = Config::from_args(env::args().skip(1))?;
	init_logging(&config)?;
	info!("{:?}", config);

	let stats = match config.seed {
		Some(seed) => PercolationStats::with_seed(config.grid_size, config.trials, seed)?,
		None => PercolationStats::new(config.grid_size, config.trials)?,
	};

	if config.json {
		println!("{}", stats.summary().to_json());
	} else {
		println!("{}", stats.summary());
	}
	Ok(())
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {}", err);
		process::exit(1);
	}
}
