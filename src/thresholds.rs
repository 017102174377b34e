//! User-adjustable passing / merit / distinction cutoffs.

use serde::Serialize;

pub const DEFAULT_PASSING: f64 = 40.0;
pub const DEFAULT_MERIT: f64 = 60.0;
pub const DEFAULT_DISTINCTION: f64 = 70.0;

/// Three cutoffs on the 0–100 scale, always `passing <= merit <= distinction`.
///
/// Only [`normalize`] builds one, so the ordering holds for every value in
/// circulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSet {
    passing: f64,
    merit: f64,
    distinction: f64,
}

impl ThresholdSet {
    pub fn passing(&self) -> f64 {
        self.passing
    }

    pub fn merit(&self) -> f64 {
        self.merit
    }

    pub fn distinction(&self) -> f64 {
        self.distinction
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            passing: DEFAULT_PASSING,
            merit: DEFAULT_MERIT,
            distinction: DEFAULT_DISTINCTION,
        }
    }
}

/// Orders and clamps raw cutoffs.
///
/// Non-finite inputs fall back to 40 / 60 / 70. `passing` is clamped to
/// [0, 100], `merit` to [passing, 100] and `distinction` to [merit, 100].
/// Idempotent.
pub fn normalize(passing: f64, merit: f64, distinction: f64) -> ThresholdSet {
    let or_default = |v: f64, default: f64| if v.is_finite() { v } else { default };

    let passing = or_default(passing, DEFAULT_PASSING).clamp(0.0, 100.0);
    let merit = or_default(merit, DEFAULT_MERIT).clamp(passing, 100.0);
    let distinction = or_default(distinction, DEFAULT_DISTINCTION).clamp(merit, 100.0);

    ThresholdSet {
        passing,
        merit,
        distinction,
    }
}
