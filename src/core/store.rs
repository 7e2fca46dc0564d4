use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::log_scale::extent;
use crate::core::{PointId, RawRecord, WordPoint};
use crate::error::{ScatterError, ScatterResult};

/// Which scores define the `[min, max]` range that marker radii are
/// interpolated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScoreNormalization {
    /// Only the scores of the arriving chunk. Radii are comparable within a
    /// chunk but not across chunks.
    #[default]
    Batch,
    /// Every score ingested so far, including the arriving chunk. Points that
    /// were already stored keep the radius they were given.
    Running,
}

/// Marker sizing policy applied at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSizing {
    pub radius_min: f64,
    pub radius_max: f64,
    pub hover_radius_factor: f64,
    pub normalization: ScoreNormalization,
}

impl Default for MarkerSizing {
    fn default() -> Self {
        Self {
            radius_min: 3.0,
            radius_max: 10.0,
            hover_radius_factor: 1.8,
            normalization: ScoreNormalization::Batch,
        }
    }
}

impl MarkerSizing {
    pub fn validate(self) -> ScatterResult<Self> {
        if !self.radius_min.is_finite() || !self.radius_max.is_finite() || self.radius_min <= 0.0 {
            return Err(ScatterError::InvalidConfig(
                "marker radii must be finite and > 0".to_owned(),
            ));
        }
        if self.radius_min > self.radius_max {
            return Err(ScatterError::InvalidConfig(
                "marker radius min must be <= max".to_owned(),
            ));
        }
        if !self.hover_radius_factor.is_finite() || self.hover_radius_factor <= 0.0 {
            return Err(ScatterError::InvalidConfig(
                "hover radius factor must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Outcome of one `PointStore::ingest` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: usize,
    /// Id given to the first accepted record; later ones follow contiguously.
    pub first_id: PointId,
    /// Score range the radii of this chunk were interpolated against.
    pub score_range: Option<(f64, f64)>,
}

/// Append-only ordered collection of derived points.
///
/// Points are never removed, reordered, deduplicated or mutated after append,
/// so a point's index is a stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStore {
    points: Vec<WordPoint>,
    sizing: MarkerSizing,
    running_scores: Option<(f64, f64)>,
}

impl PointStore {
    pub fn new(sizing: MarkerSizing) -> ScatterResult<Self> {
        Ok(Self {
            points: Vec::new(),
            sizing: sizing.validate()?,
            running_scores: None,
        })
    }

    #[must_use]
    pub fn sizing(&self) -> MarkerSizing {
        self.sizing
    }

    #[must_use]
    pub fn points(&self) -> &[WordPoint] {
        &self.points
    }

    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&WordPoint> {
        self.points.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &WordPoint)> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| (PointId(index), point))
    }

    /// Derives points from one chunk of raw records and appends them in input
    /// order.
    ///
    /// Records that cannot sit on log axes (non-positive or non-finite x/y) or
    /// carry a non-finite score are dropped and counted as rejected.
    pub fn ingest(&mut self, records: Vec<RawRecord>) -> IngestReport {
        let first_id = PointId(self.points.len());
        let total = records.len();

        let accepted: Vec<RawRecord> = records
            .into_iter()
            .filter(|record| match record.plot_rejection() {
                Some(reason) => {
                    warn!(word = %record.word, reason, "rejecting record");
                    false
                }
                None => true,
            })
            .collect();
        let rejected = total - accepted.len();

        let batch_scores = extent(accepted.iter().map(|record| record.score));
        let score_range = match self.sizing.normalization {
            ScoreNormalization::Batch => batch_scores,
            ScoreNormalization::Running => merge_ranges(self.running_scores, batch_scores),
        };
        self.running_scores = merge_ranges(self.running_scores, batch_scores);

        let accepted_count = accepted.len();
        if let Some((score_min, score_max)) = score_range {
            let sizing = self.sizing;
            self.points.reserve(accepted_count);
            self.points.extend(accepted.into_iter().map(|record| {
                let radius = interpolate_radius(
                    record.score,
                    score_min,
                    score_max,
                    sizing.radius_min,
                    sizing.radius_max,
                );
                WordPoint {
                    word: record.word,
                    x: record.page_density,
                    y: record.book_count,
                    score: record.score,
                    radius,
                    hover_radius: radius * sizing.hover_radius_factor,
                }
            }));
        }

        debug!(
            accepted = accepted_count,
            rejected,
            total_points = self.points.len(),
            ?score_range,
            "ingested chunk"
        );

        IngestReport {
            accepted: accepted_count,
            rejected,
            first_id,
            score_range,
        }
    }
}

/// Linear interpolation of `score` within `[score_min, score_max]` onto
/// `[radius_min, radius_max]`.
///
/// A degenerate score range (`score_max == score_min`) yields `radius_min`.
#[must_use]
pub fn interpolate_radius(
    score: f64,
    score_min: f64,
    score_max: f64,
    radius_min: f64,
    radius_max: f64,
) -> f64 {
    // Halved so that finite extremes such as -1e308..1e308 cannot overflow.
    let half_span = score_max / 2.0 - score_min / 2.0;
    if half_span <= 0.0 || !half_span.is_finite() {
        return radius_min;
    }
    let ratio = ((score / 2.0 - score_min / 2.0) / half_span).clamp(0.0, 1.0);
    radius_min + ratio * (radius_max - radius_min)
}

fn merge_ranges(lhs: Option<(f64, f64)>, rhs: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (lhs, rhs) {
        (Some((lmin, lmax)), Some((rmin, rmax))) => Some((lmin.min(rmin), lmax.max(rmax))),
        (Some(range), None) | (None, Some(range)) => Some(range),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_ranges_widens_both_ends() {
        assert_eq!(
            merge_ranges(Some((2.0, 5.0)), Some((1.0, 4.0))),
            Some((1.0, 5.0))
        );
        assert_eq!(merge_ranges(None, Some((1.0, 4.0))), Some((1.0, 4.0)));
        assert_eq!(merge_ranges(None, None), None);
    }

    #[test]
    fn interpolation_hits_range_ends() {
        assert_eq!(interpolate_radius(0.0, 0.0, 4.0, 3.0, 10.0), 3.0);
        assert_eq!(interpolate_radius(4.0, 0.0, 4.0, 3.0, 10.0), 10.0);
        assert_eq!(interpolate_radius(2.0, 0.0, 4.0, 3.0, 10.0), 6.5);
        assert_eq!(interpolate_radius(f64::MAX, -f64::MAX, f64::MAX, 3.0, 10.0), 10.0);
    }
}
