use super::types::{MAX_ACKNOWLEDGE_AFFIRM, MAX_CLOSE, MAX_HANDLE, MAX_ISOLATE, TurnScore};
use serde::Serialize;
use strum::Display;

/// Letter grade from a percentage: >=90 A, >=80 B, >=70 C, >=60 D, else F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::A
        } else if percentage >= 80.0 {
            Self::B
        } else if percentage >= 70.0 {
            Self::C
        } else if percentage >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

/// Aggregate totals over a sequence of turn scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreTotals {
    pub turns: usize,
    pub total: u32,
    pub max: u32,
    pub percentage: f64,
    pub grade: Grade,
}

impl ScoreTotals {
    /// `None` when there are no turns to grade.
    pub fn from_scores(scores: &[TurnScore]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let total: u32 = scores.iter().map(TurnScore::total).sum();
        let max: u32 = scores.iter().map(TurnScore::max_score).sum();
        let percentage = if max == 0 {
            0.0
        } else {
            f64::from(total) / f64::from(max) * 100.0
        };
        Some(Self {
            turns: scores.len(),
            total,
            max,
            percentage,
            grade: Grade::from_percentage(percentage),
        })
    }

    pub fn headline(&self) -> String {
        format!(
            "Overall Score: {}/{} ({:.1}%) - Grade: {}",
            self.total, self.max, self.percentage, self.grade
        )
    }
}

const STRENGTH_AVERAGE: f64 = 2.5;

/// One of the four rubric dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[strum(serialize = "Acknowledge/Affirm")]
    AcknowledgeAffirm,
    #[strum(serialize = "Isolate")]
    Isolate,
    #[strum(serialize = "Handle")]
    Handle,
    #[strum(serialize = "Close")]
    Close,
}

impl Dimension {
    pub const ALL: [Self; 4] = [
        Self::AcknowledgeAffirm,
        Self::Isolate,
        Self::Handle,
        Self::Close,
    ];

    pub fn max_points(self) -> u8 {
        match self {
            Self::AcknowledgeAffirm => MAX_ACKNOWLEDGE_AFFIRM,
            Self::Isolate => MAX_ISOLATE,
            Self::Handle => MAX_HANDLE,
            Self::Close => MAX_CLOSE,
        }
    }

    pub fn points(self, score: &TurnScore) -> u8 {
        match self {
            Self::AcknowledgeAffirm => score.acknowledge_affirm(),
            Self::Isolate => score.isolate(),
            Self::Handle => score.handle(),
            Self::Close => score.close(),
        }
    }

    /// Averages at or above this mark are a strength. Fixed at 2.5 for every
    /// dimension, so close (max 2) never reports one.
    pub fn strength_threshold(self) -> f64 {
        STRENGTH_AVERAGE
    }

    /// Averages below this mark need work: 2 on three-point dimensions, 1 on
    /// close.
    pub fn improvement_threshold(self) -> f64 {
        f64::from(self.max_points()) - 1.0
    }
}

/// Arithmetic mean of each dimension over a set of turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionAverages {
    pub acknowledge_affirm: f64,
    pub isolate: f64,
    pub handle: f64,
    pub close: f64,
}

impl DimensionAverages {
    /// `None` when there are no turns to average.
    pub fn from_scores(scores: &[TurnScore]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let mean = |dimension: Dimension| {
            let sum: u32 = scores
                .iter()
                .map(|score| u32::from(dimension.points(score)))
                .sum();
            f64::from(sum) / turn_count(scores)
        };
        Some(Self {
            acknowledge_affirm: mean(Dimension::AcknowledgeAffirm),
            isolate: mean(Dimension::Isolate),
            handle: mean(Dimension::Handle),
            close: mean(Dimension::Close),
        })
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::AcknowledgeAffirm => self.acknowledge_affirm,
            Dimension::Isolate => self.isolate,
            Dimension::Handle => self.handle,
            Dimension::Close => self.close,
        }
    }
}

/// Turn counts stay far below 2^52, so the conversion is exact.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn turn_count(scores: &[TurnScore]) -> f64 {
    scores.len() as f64
}

/// Total rapport breakers across all turns.
pub fn rapport_breaker_count(scores: &[TurnScore]) -> usize {
    scores.iter().map(|score| score.rapport_breakers().len()).sum()
}
