use serde::{Deserialize, Serialize};

/// Qualitative performance level derived from a total score on the 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingBand {
    Unsatisfactory,
    NeedsImprovement,
    MeetsExpectations,
    ExceedsExpectations,
    Outstanding,
}

/// Closed intervals checked in ascending order. Neighbouring bands share their
/// integer boundary, so the lower band claims it.
const RATING_BANDS: [(f64, f64, RatingBand); 5] = [
    (0.0, 1.0, RatingBand::Unsatisfactory),
    (1.0, 2.0, RatingBand::NeedsImprovement),
    (2.0, 3.0, RatingBand::MeetsExpectations),
    (3.0, 4.0, RatingBand::ExceedsExpectations),
    (4.0, 5.0, RatingBand::Outstanding),
];

impl RatingBand {
    pub fn ordered() -> [RatingBand; 5] {
        RATING_BANDS.map(|(_, _, band)| band)
    }

    /// First band whose interval contains `score`, or `None` outside `[0, 5]`.
    pub fn classify(score: f64) -> Option<Self> {
        RATING_BANDS
            .iter()
            .find(|(lower, upper, _)| score >= *lower && score <= *upper)
            .map(|(_, _, band)| *band)
    }

    pub const fn label(self) -> &'static str {
        match self {
            RatingBand::Unsatisfactory => "Unsatisfactory",
            RatingBand::NeedsImprovement => "Needs Improvement",
            RatingBand::MeetsExpectations => "Meets Expectations",
            RatingBand::ExceedsExpectations => "Exceeds Expectations",
            RatingBand::Outstanding => "Outstanding",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            RatingBand::Unsatisfactory => {
                "Performance falls below expectations; fails to meet the minimum standards"
            }
            RatingBand::NeedsImprovement => {
                "Performance is below the desired level in certain aspects"
            }
            RatingBand::MeetsExpectations => {
                "Basic competence achieved; performance meets the expectations for the role"
            }
            RatingBand::ExceedsExpectations => {
                "Highly competent; demonstrates proficiency in role requirements"
            }
            RatingBand::Outstanding => {
                "Exceptional performance; consistently exceeds expectations"
            }
        }
    }
}

/// Label for `score`, or an empty string when the score is outside every band.
pub fn rate(score: f64) -> &'static str {
    RatingBand::classify(score)
        .map(RatingBand::label)
        .unwrap_or_default()
}
