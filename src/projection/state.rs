//! Running trust fund state carried from one projected year to the next

use crate::baseline::Baseline;

/// Asset sleeves and bookkeeping between projection years
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Year about to be projected
    pub year: u32,

    /// Index of `year` in the baseline series (past the end once the
    /// baseline horizon is exhausted)
    pub baseline_index: usize,

    /// Interest-bearing principal, never negative
    pub treasury: f64,

    /// Equity-invested principal, compounding at the equity return
    pub equity: f64,

    /// Cumulative amount moved from treasury into equities
    pub equity_contributed: f64,

    /// First year total assets reached zero
    pub depletion_year: Option<u32>,
}

impl ProjectionState {
    /// Initialize state at the beginning of the first baseline year
    pub fn opening(baseline: &Baseline) -> Self {
        Self {
            year: baseline.start_year(),
            baseline_index: 0,
            treasury: baseline.series.opening_assets().max(0.0),
            equity: 0.0,
            equity_contributed: 0.0,
            depletion_year: None,
        }
    }

    pub fn total_assets(&self) -> f64 {
        self.treasury + self.equity
    }

    /// Move treasury principal into equities until `target` has been
    /// contributed in total. Returns the amount moved this year, which is
    /// capped by the treasury balance available.
    pub fn transfer_to_equity(&mut self, target: f64) -> f64 {
        let wanted = (target - self.equity_contributed).max(0.0);
        let moved = wanted.min(self.treasury);
        if moved < wanted {
            log::warn!(
                "{}: equity transfer of {:.1} capped at treasury balance {:.1}",
                self.year,
                wanted,
                self.treasury
            );
        }

        self.treasury -= moved;
        self.equity += moved;
        // Count the full amount as contributed so a shortfall is not retried
        self.equity_contributed += wanted;
        moved
    }

    /// Compound the equity sleeve by one year of return
    pub fn compound_equity(&mut self, rate: f64) {
        self.equity *= 1.0 + rate;
    }

    /// Apply the year's surplus (or deficit) to the treasury sleeve
    pub fn apply_surplus(&mut self, surplus: f64) {
        self.treasury = (self.treasury + surplus).max(0.0);
    }

    /// Record depletion if total assets are exhausted for the first time
    pub fn check_depletion(&mut self) -> bool {
        if self.total_assets() == 0.0 && self.depletion_year.is_none() {
            self.depletion_year = Some(self.year);
            return true;
        }
        false
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year += 1;
        self.baseline_index += 1;
    }
}
