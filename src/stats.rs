use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

use crate::error::{PercolationError, Result};
use crate::percolation::Percolation;

const CONFIDENCE_95: f64 = 1.96;

/// What one trial measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Sites opened before the grid percolated.
    pub open_sites: usize,
    /// Random draws, including the ones that hit an already open site.
    pub draws: u64,
    /// `open_sites / n²`.
    pub threshold: f64,
}

/// Opens uniformly random blocked sites of a fresh `n`x`n` grid until it
/// percolates.
pub fn run_trial<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<TrialOutcome> {
    let mut grid = Percolation::new(n)?;
    let mut draws = 0u64;
    while !grid.percolates() {
        let row = rng.gen_range(1..=n);
        let col = rng.gen_range(1..=n);
        draws += 1;
        if !grid.is_open(row, col)? {
            grid.open(row, col)?;
        }
    }
    let open_sites = grid.number_of_open_sites();
    Ok(TrialOutcome {
        open_sites,
        draws,
        threshold: open_sites as f64 / (n * n) as f64,
    })
}

/// The RNG for trial `trial` of a seeded run. Each trial reads its own
/// ChaCha stream, so the outcome doesn't depend on scheduling.
pub fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub grid_size: usize,
    pub trials: usize,
    pub mean: f64,
    pub stddev: f64,
    pub confidence_lo: f64,
    pub confidence_hi: f64,
}

impl Summary {
    /// Sample mean, sample standard deviation (divides by `T-1`) and the
    /// interval `mean ± 1.96·s/√T`. With a single sample the deviation and
    /// both endpoints are NaN.
    pub fn from_thresholds(grid_size: usize, thresholds: &[f64]) -> Summary {
        let trials = thresholds.len();
        let t = trials as f64;
        let mean = thresholds.iter().sum::<f64>() / t;
        let stddev = if trials < 2 {
            f64::NAN
        } else {
            let sq: f64 = thresholds.iter().map(|x| (x - mean) * (x - mean)).sum();
            (sq / (t - 1.0)).sqrt()
        };
        let half_width = CONFIDENCE_95 * stddev / t.sqrt();
        Summary {
            grid_size,
            trials,
            mean,
            stddev,
            confidence_lo: mean - half_width,
            confidence_hi: mean + half_width,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "grid_size": self.grid_size,
            "trials": self.trials,
            "mean": self.mean,
            "stddev": self.stddev,
            "confidence_interval": [self.confidence_lo, self.confidence_hi],
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "mean                    = {}", self.mean)?;
        writeln!(f, "stddev                  = {}", self.stddev)?;
        write!(f, "95% confidence interval = {}, {}", self.confidence_lo, self.confidence_hi)
    }
}

/// `trials` independent percolation experiments on an `n`x`n` grid, run
/// eagerly at construction.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    outcomes: Vec<TrialOutcome>,
    summary: Summary,
}

impl PercolationStats {
    /// Runs with a seed drawn from the thread RNG.
    pub fn new(n: usize, trials: usize) -> Result<PercolationStats> {
        let seed: u64 = rand::thread_rng().gen();
        PercolationStats::with_seed(n, trials, seed)
    }

    /// Trial `i` draws from `trial_rng(seed, i)`. Runs on the rayon pool
    /// when the `parallel` feature is on; the results are the same either way.
    pub fn with_seed(n: usize, trials: usize, seed: u64) -> Result<PercolationStats> {
        check_args(n, trials)?;
        info!("running {} trials on a {}x{} grid, seed {}", trials, n, n, seed);
        let outcomes = run_seeded(n, trials, seed)?;
        Ok(PercolationStats::from_outcomes(n, outcomes))
    }

    /// Runs every trial in order from one RNG.
    pub fn with_rng<R: Rng + ?Sized>(n: usize, trials: usize, rng: &mut R) -> Result<PercolationStats> {
        check_args(n, trials)?;
        info!("running {} trials on a {}x{} grid", trials, n, n);
        let mut outcomes = Vec::with_capacity(trials);
        for trial in 0..trials {
            let outcome = run_trial(n, rng)?;
            log_outcome(trial, &outcome);
            outcomes.push(outcome);
        }
        Ok(PercolationStats::from_outcomes(n, outcomes))
    }

    fn from_outcomes(n: usize, outcomes: Vec<TrialOutcome>) -> PercolationStats {
        let thresholds: Vec<f64> = outcomes.iter().map(|o| o.threshold).collect();
        let summary = Summary::from_thresholds(n, &thresholds);
        if outcomes.len() < 2 {
            warn!("stddev is undefined for a single trial");
        }
        info!("mean {:.6}, stddev {:.6}, {} draws in total",
            summary.mean, summary.stddev, outcomes.iter().map(|o| o.draws).sum::<u64>());
        PercolationStats { outcomes, summary }
    }

    pub fn mean(&self) -> f64 {
        self.summary.mean
    }

    pub fn stddev(&self) -> f64 {
        self.summary.stddev
    }

    pub fn confidence_lo(&self) -> f64 {
        self.summary.confidence_lo
    }

    pub fn confidence_hi(&self) -> f64 {
        self.summary.confidence_hi
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn outcomes(&self) -> &[TrialOutcome] {
        &self.outcomes
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.threshold).collect()
    }
}

fn check_args(n: usize, trials: usize) -> Result<()> {
    if n == 0 {
        return Err(PercolationError::invalid("n", n));
    }
    if trials == 0 {
        return Err(PercolationError::invalid("trials", trials));
    }
    Ok(())
}

fn log_outcome(trial: usize, outcome: &TrialOutcome) {
    debug!("trial {}: {} open after {} draws, threshold {:.6}",
        trial, outcome.open_sites, outcome.draws, outcome.threshold);
}

#[cfg(feature = "parallel")]
fn run_seeded(n: usize, trials: usize, seed: u64) -> Result<Vec<TrialOutcome>> {
    use rayon::prelude::*;

    (0..trials)
        .into_par_iter()
        .map(|trial| -> Result<TrialOutcome> {
            let outcome = run_trial(n, &mut trial_rng(seed, trial))?;
            log_outcome(trial, &outcome);
            Ok(outcome)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_seeded(n: usize, trials: usize, seed: u64) -> Result<Vec<TrialOutcome>> {
    (0..trials)
        .map(|trial| -> Result<TrialOutcome> {
            let outcome = run_trial(n, &mut trial_rng(seed, trial))?;
            log_outcome(trial, &outcome);
            Ok(outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_runs() {
        assert_eq!(
            PercolationStats::with_seed(0, 10, 1).unwrap_err(),
            PercolationError::InvalidArgument { name: "n", value: 0 }
        );
        assert_eq!(
            PercolationStats::with_seed(10, 0, 1).unwrap_err(),
            PercolationError::InvalidArgument { name: "trials", value: 0 }
        );
        assert!(PercolationStats::new(0, 0).is_err());
    }

    #[test]
    fn single_site_trial_opens_one_site() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = run_trial(1, &mut rng).unwrap();
        assert_eq!(outcome.open_sites, 1);
        assert_eq!(outcome.draws, 1);
        assert_eq!(outcome.threshold, 1.0);
    }

    #[test]
    fn trial_counts_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let outcome = run_trial(8, &mut rng).unwrap();
            assert!(outcome.open_sites >= 8);
            assert!(outcome.open_sites <= 64);
            assert!(outcome.draws >= outcome.open_sites as u64);
            assert_eq!(outcome.threshold, outcome.open_sites as f64 / 64.0);
        }
    }

    #[test]
    fn same_rng_same_outcomes() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let stats1 = PercolationStats::with_rng(10, 25, &mut rng1).unwrap();

        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        let stats2 = PercolationStats::with_rng(10, 25, &mut rng2).unwrap();

        assert_eq!(stats1.outcomes(), stats2.outcomes());
        assert_eq!(stats1.summary(), stats2.summary());
    }

    #[test]
    fn seeded_runs_match_trial_by_trial() {
        let stats = PercolationStats::with_seed(12, 16, 42).unwrap();
        assert_eq!(stats.outcomes().len(), 16);
        for (trial, outcome) in stats.outcomes().iter().enumerate() {
            let expected = run_trial(12, &mut trial_rng(42, trial)).unwrap();
            assert_eq!(*outcome, expected, "trial {}", trial);
        }
        let again = PercolationStats::with_seed(12, 16, 42).unwrap();
        assert_eq!(stats.outcomes(), again.outcomes());
    }

    #[test]
    fn different_streams_differ() {
        let a: Vec<usize> = (0..10)
            .map(|t| run_trial(16, &mut trial_rng(5, t)).unwrap().open_sites)
            .collect();
        assert!(a.iter().any(|&x| x != a[0]), "all trials opened {} sites", a[0]);
    }

    #[test]
    fn threshold_estimate_is_near_known_value() {
        let stats = PercolationStats::with_seed(20, 200, 2024).unwrap();
        assert!(stats.mean() > 0.55 && stats.mean() < 0.63, "mean {}", stats.mean());
        assert!(stats.stddev() > 0.0);
        assert!(stats.confidence_lo() <= stats.mean());
        assert!(stats.mean() <= stats.confidence_hi());
    }

    #[test]
    fn summary_of_known_samples() {
        let s = Summary::from_thresholds(4, &[0.5, 0.6, 0.7, 0.6]);
        assert!((s.mean - 0.6).abs() < 1e-12);
        // squared deviations sum to 0.02, over T-1 = 3
        let stddev = (0.02f64 / 3.0).sqrt();
        assert!((s.stddev - stddev).abs() < 1e-12);
        let half = 1.96 * stddev / 2.0;
        assert!((s.confidence_lo - (0.6 - half)).abs() < 1e-12);
        assert!((s.confidence_hi - (0.6 + half)).abs() < 1e-12);
    }

    #[test]
    fn single_trial_has_undefined_spread() {
        let stats = PercolationStats::with_seed(5, 1, 9).unwrap();
        assert_eq!(stats.mean(), stats.thresholds()[0]);
        assert!(stats.stddev().is_nan());
        assert!(stats.confidence_lo().is_nan());
        assert!(stats.confidence_hi().is_nan());
        assert!(stats.summary().to_json()["stddev"].is_null());
    }

    #[test]
    fn report_lines() {
        let s = Summary::from_thresholds(2, &[0.5, 0.75]);
        let text = s.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("mean"));
        assert!(lines[1].starts_with("stddev"));
        assert!(lines[2].starts_with("95% confidence interval = "));

        let json = s.to_json();
        assert_eq!(json["trials"], 2);
        assert_eq!(json["mean"], 0.625);
        assert_eq!(json["confidence_interval"].as_array().map(|a| a.len()), Some(2));
    }
}
