#[macro_use] extern crate log;
extern crate rand;
extern crate rand_chacha;
extern crate serde_json;
extern crate thiserror;
#[cfg(feature = "parallel")]
extern crate rayon;

mod config;
mod data;
mod disjoint_set;
mod error;
mod percolation;
mod stats;

pub use config::Config;
pub use data::{Direction, Site};
pub use disjoint_set::DisjointSet;
pub use error::{PercolationError, Result};
pub use percolation::Percolation;
pub use stats::{run_trial, trial_rng, PercolationStats, Summary, TrialOutcome};
