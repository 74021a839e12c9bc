//! Result rendering
//!
//! Pure functions from a verification result (or a failure message) to a
//! display structure consumed by the web pages and the CLI.
//!
//! All scores share one three-tier threshold (above 0.7, 0.3 to 0.7, below
//! 0.3) but not one direction: a hallucination score is worse when high,
//! while confidence and verification scores are better when high. Callers
//! pick the [`Polarity`] that matches the field being shown.

pub mod fact_check;
pub mod media;
pub mod text;

pub use fact_check::{ChatReply, FactCheckCard, SourceLink};
pub use media::{format_timestamp, AuthenticityBanner, FindingRow, MediaReport};
pub use text::{humanize_key, MetricCard, TextReport};

use crate::machine::SubmissionState;
use serde::{Deserialize, Serialize};
use std::fmt;

const HIGH_THRESHOLD: f64 = 0.7;
const LOW_THRESHOLD: f64 = 0.3;

/// Rendered severity of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "green",
            Severity::Medium => "orange",
            Severity::High => "red",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction in which a score gets worse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Hallucination scores
    HigherIsWorse,
    /// Confidence and verification scores
    HigherIsBetter,
}

impl Polarity {
    pub fn severity(&self, score: f64) -> Severity {
        let score = sanitize(score);
        let tier = if score > HIGH_THRESHOLD {
            Severity::High
        } else if score >= LOW_THRESHOLD {
            Severity::Medium
        } else {
            Severity::Low
        };

        match self {
            Polarity::HigherIsWorse => tier,
            Polarity::HigherIsBetter => match tier {
                Severity::High => Severity::Low,
                Severity::Medium => Severity::Medium,
                Severity::Low => Severity::High,
            },
        }
    }
}

/// Score shown as a percentage bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBar {
    /// Fill fraction, clamped to `0.0..=1.0`
    pub fraction: f64,
    pub label: String,
    pub severity: Severity,
}

impl ScoreBar {
    /// Bar labelled with one decimal, e.g. `92.0%`
    pub fn new(score: f64, polarity: Polarity) -> Self {
        Self {
            fraction: sanitize(score).clamp(0.0, 1.0),
            label: format_percent(score),
            severity: polarity.severity(score),
        }
    }

    /// Bar labelled with a whole percentage, e.g. `95%`
    pub fn rounded(score: f64, polarity: Polarity) -> Self {
        Self {
            label: format!("{}%", (sanitize(score).max(0.0) * 100.0).round()),
            ..Self::new(score, polarity)
        }
    }

    /// CSS width of the filled part
    pub fn width(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn color(&self) -> &'static str {
        self.severity.color()
    }
}

/// Dismissable failure banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBanner {
    pub message: String,
}

impl fmt::Display for ErrorBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Mapping from a verification result to its display structure
pub trait Render {
    type Report;

    fn render(&self) -> Self::Report;
}

/// What a page's result area shows for a given state
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<R> {
    Hidden,
    Pending,
    Failure(ErrorBanner),
    Result(R),
}

impl<R> Panel<R> {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Panel::Hidden)
    }

    pub fn report(&self) -> Option<&R> {
        match self {
            Panel::Result(report) => Some(report),
            _ => None,
        }
    }
}

/// Render the result area for the current state of a page
pub fn render_state<T: Render>(state: &SubmissionState<T>) -> Panel<T::Report> {
    match state {
        SubmissionState::Idle | SubmissionState::Ready => Panel::Hidden,
        SubmissionState::Submitting { .. } => Panel::Pending,
        SubmissionState::Success { result } => Panel::Result(result.render()),
        SubmissionState::Failure { error } => Panel::Failure(ErrorBanner {
            message: error.clone(),
        }),
    }
}

/// `0.92` -> `92.0%`
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", sanitize(score) * 100.0)
}

fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Optional free text that renders nothing when absent or blank
pub(crate) fn non_blank(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextResult;

    #[test]
    fn test_thresholds() {
        let worse = Polarity::HigherIsWorse;
        assert_eq!(worse.severity(0.92), Severity::High);
        assert_eq!(worse.severity(0.71), Severity::High);
        assert_eq!(worse.severity(0.7), Severity::Medium);
        assert_eq!(worse.severity(0.3), Severity::Medium);
        assert_eq!(worse.severity(0.29), Severity::Low);
        assert_eq!(worse.severity(0.0), Severity::Low);
    }

    #[test]
    fn test_polarity_is_inverted_for_confidence() {
        let better = Polarity::HigherIsBetter;
        assert_eq!(better.severity(0.95), Severity::Low);
        assert_eq!(better.severity(0.5), Severity::Medium);
        assert_eq!(better.severity(0.1), Severity::High);
        assert_eq!(Severity::Low.color(), "green");
        assert_eq!(Severity::High.color(), "red");
    }

    #[test]
    fn test_severity_is_monotonic_in_score() {
        let scores: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        for pair in scores.windows(2) {
            assert!(
                Polarity::HigherIsWorse.severity(pair[0])
                    <= Polarity::HigherIsWorse.severity(pair[1])
            );
            assert!(
                Polarity::HigherIsBetter.severity(pair[0])
                    >= Polarity::HigherIsBetter.severity(pair[1])
            );
        }
    }

    #[test]
    fn test_score_bar_labels() {
        let bar = ScoreBar::new(0.92, Polarity::HigherIsWorse);
        assert_eq!(bar.label, "92.0%");
        assert_eq!(bar.color(), "red");

        let rounded = ScoreBar::rounded(0.954, Polarity::HigherIsBetter);
        assert_eq!(rounded.label, "95%");

        let below_zero = ScoreBar::rounded(-0.004, Polarity::HigherIsBetter);
        assert_eq!(below_zero.label, "0%");

        let overflow = ScoreBar::new(1.4, Polarity::HigherIsBetter);
        assert_eq!(overflow.fraction, 1.0);
        assert_eq!(overflow.width(), "100.0%");
    }

    #[test]
    fn test_render_state_panels() {
        let idle: SubmissionState<TextResult> = SubmissionState::Idle;
        assert!(render_state(&idle).is_hidden());

        let failed: SubmissionState<TextResult> = SubmissionState::Failure {
            error: "Failed to test AI: Error: 500 Internal Server Error".to_string(),
        };
        match render_state(&failed) {
            Panel::Failure(banner) => assert!(banner.message.contains("500")),
            other => panic!("unexpected panel: {:?}", other),
        }
        assert!(render_state(&failed).report().is_none());
    }
}
