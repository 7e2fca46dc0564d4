use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

const LADDER_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// Base-10 logarithmic mapping from a strictly positive data domain onto a
/// pixel range.
///
/// The range may be descending (`range_start > range_end`), which is how the
/// y axis is inverted so that larger values plot higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
}

impl LogScale {
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        range_start: f64,
        range_end: f64,
    ) -> ScatterResult<Self> {
        if !domain_min.is_finite() || !domain_max.is_finite() {
            return Err(ScatterError::InvalidData(
                "log scale domain must be finite".to_owned(),
            ));
        }
        if domain_min <= 0.0 || domain_max <= 0.0 {
            return Err(ScatterError::InvalidData(
                "log scale domain must be > 0".to_owned(),
            ));
        }
        if domain_min > domain_max {
            return Err(ScatterError::InvalidData(
                "log scale domain min must be <= max".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ScatterError::InvalidData(
                "log scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_min,
            domain_max,
            range_start,
            range_end,
        })
    }

    /// Builds a scale whose domain is the literal min/max of `values`.
    ///
    /// Returns `Ok(None)` when `values` is empty.
    pub fn from_values(
        values: impl IntoIterator<Item = f64>,
        range_start: f64,
        range_end: f64,
    ) -> ScatterResult<Option<Self>> {
        match extent(values) {
            Some((min, max)) => Self::new(min, max, range_start, range_end).map(Some),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_min == self.domain_max
    }

    pub fn value_to_pixel(self, value: f64) -> ScatterResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ScatterError::InvalidData(
                "log scale value must be finite and > 0".to_owned(),
            ));
        }

        if self.is_degenerate() {
            return Ok((self.range_start + self.range_end) / 2.0);
        }

        let log_min = self.domain_min.log10();
        let normalized = (value.log10() - log_min) / (self.domain_max.log10() - log_min);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_value(self, pixel: f64) -> ScatterResult<f64> {
        if !pixel.is_finite() {
            return Err(ScatterError::InvalidData("pixel must be finite".to_owned()));
        }

        if self.is_degenerate() || self.range_start == self.range_end {
            return Ok(self.domain_min);
        }

        let log_min = self.domain_min.log10();
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(10_f64.powf(log_min + normalized * (self.domain_max.log10() - log_min)))
    }

    /// Nice round tick values (1-2-5 per decade) within the domain, sampled
    /// down to at most `tick_count` values and always ascending.
    ///
    /// When fewer than two ladder values fall inside the domain, the domain
    /// endpoints are used instead.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        if tick_count == 0 {
            return Vec::new();
        }
        if self.is_degenerate() {
            return vec![self.domain_min];
        }

        let min = self.domain_min;
        let max = self.domain_max;
        let min_exp = min.log10().floor() as i32;
        let max_exp = max.log10().ceil() as i32;

        let mut ticks = Vec::new();
        for exp in min_exp..=max_exp {
            let decade = 10_f64.powi(exp);
            for multiplier in LADDER_MULTIPLIERS {
                let candidate = decade * multiplier;
                if in_domain(candidate, min, max) {
                    ticks.push(snap_to(candidate, min, max));
                }
            }
        }

        if ticks.len() < 2 {
            ticks = vec![min, max];
        }
        ticks.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        ticks.dedup_by(|lhs, rhs| approx_equal(*lhs, *rhs));

        evenly_sample_ticks(ticks, tick_count)
    }
}

/// Literal min/max of `values`, or `None` when empty.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn in_domain(candidate: f64, min: f64, max: f64) -> bool {
    (candidate >= min || approx_equal(candidate, min))
        && (candidate <= max || approx_equal(candidate, max))
}

// `10^exp * k` can land a hair outside an exact endpoint.
fn snap_to(candidate: f64, min: f64, max: f64) -> f64 {
    if approx_equal(candidate, min) {
        min
    } else if approx_equal(candidate, max) {
        max
    } else {
        candidate
    }
}

fn evenly_sample_ticks(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target {
        return ticks;
    }
    if target == 1 {
        return vec![ticks[0]];
    }

    let last_index = ticks.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = (step as f64) / ((target - 1) as f64);
        let index = (ratio * (last_index as f64)).round() as usize;
        let value = ticks[index.min(last_index)];
        if sampled
            .last()
            .is_some_and(|previous| approx_equal(*previous, value))
        {
            continue;
        }
        sampled.push(value);
    }
    sampled
}

fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-12
}
