//! Bar chart model for emotion scores.

use crate::model::EmotionScores;

/// Chart heading.
pub const CHART_TITLE: &str = "Emotion Analysis Result";

/// Legend label for the single dataset.
pub const DATASET_LABEL: &str = "Emotion Score";

/// (fill, border) colour pairs, applied to bars in order and repeated.
pub const PALETTE: [(&str, &str); 5] = [
    ("rgba(255, 99, 132, 0.6)", "rgba(255, 99, 132, 1)"),
    ("rgba(54, 162, 235, 0.6)", "rgba(54, 162, 235, 1)"),
    ("rgba(255, 206, 86, 0.6)", "rgba(255, 206, 86, 1)"),
    ("rgba(75, 192, 192, 0.6)", "rgba(75, 192, 192, 1)"),
    ("rgba(153, 102, 255, 0.6)", "rgba(153, 102, 255, 1)"),
];

/// One bar per emotion.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub score: f64,
    pub fill: &'static str,
    pub border: &'static str,
}

/// A labeled bar chart, bars in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub bars: Vec<Bar>,
    /// Top of the y axis. At least 1.0; grows if a score exceeds it.
    pub scale_max: f64,
}

impl Chart {
    pub fn from_scores(scores: &EmotionScores) -> Self {
        let bars: Vec<Bar> = scores
            .iter()
            .enumerate()
            .map(|(i, (label, score))| {
                let (fill, border) = PALETTE[i % PALETTE.len()];
                Bar {
                    label: label.to_string(),
                    score,
                    fill,
                    border,
                }
            })
            .collect();

        let scale_max = bars
            .iter()
            .map(|b| b.score)
            .filter(|s| s.is_finite())
            .fold(1.0_f64, f64::max);

        Self {
            title: CHART_TITLE,
            dataset_label: DATASET_LABEL,
            bars,
            scale_max,
        }
    }

    /// Bar height as a percentage of the y axis, clamped to 0..=100.
    ///
    /// Only the drawing is clamped; `Bar::score` keeps the raw value.
    pub fn height_percent(&self, bar: &Bar) -> f64 {
        if !bar.score.is_finite() {
            return 0.0;
        }
        (bar.score / self.scale_max * 100.0).clamp(0.0, 100.0)
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }
}
