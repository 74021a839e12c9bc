//! Image and video authenticity reports

use super::{format_percent, non_blank, Polarity, Render, ScoreBar};
use crate::model::{ImageResult, ManipulatedRegion, ManipulatedSegment, VideoResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticityBanner {
    pub authentic: bool,
    pub title: String,
}

impl AuthenticityBanner {
    fn new(authentic: bool, noun: &str) -> Self {
        let verdict = if authentic { "Authentic" } else { "Manipulated" };
        Self {
            authentic,
            title: format!("{} {}", verdict, noun),
        }
    }

    /// CSS class of the banner gradient
    pub fn tone(&self) -> &'static str {
        if self.authentic {
            "authentic-gradient"
        } else {
            "manipulated-gradient"
        }
    }
}

/// One detected manipulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingRow {
    pub kind: String,
    /// `m:ss - m:ss`, videos only
    pub time_range: Option<String>,
    pub confidence: String,
}

impl From<&ManipulatedRegion> for FindingRow {
    fn from(region: &ManipulatedRegion) -> Self {
        Self {
            kind: region.kind.clone(),
            time_range: None,
            confidence: format_percent(region.confidence),
        }
    }
}

impl From<&ManipulatedSegment> for FindingRow {
    fn from(segment: &ManipulatedSegment) -> Self {
        Self {
            kind: segment.kind.clone(),
            time_range: Some(format!(
                "{} - {}",
                format_timestamp(segment.start_time),
                format_timestamp(segment.end_time)
            )),
            confidence: format_percent(segment.confidence),
        }
    }
}

impl fmt::Display for FindingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.time_range {
            Some(range) => write!(f, "{} ({}) — {}", self.kind, range, self.confidence),
            None => write!(f, "{} — {}", self.kind, self.confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaReport {
    pub banner: AuthenticityBanner,
    pub confidence: ScoreBar,
    pub analysis: Option<String>,
    /// Empty when the service reported no manipulations
    pub findings: Vec<FindingRow>,
}

/// Seconds to `minutes:seconds`, floor-truncated with zero-padded seconds
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

impl Render for ImageResult {
    type Report = MediaReport;

    fn render(&self) -> MediaReport {
        MediaReport {
            banner: AuthenticityBanner::new(self.authentic, "Image"),
            confidence: ScoreBar::new(self.confidence(), Polarity::HigherIsBetter),
            analysis: non_blank(&self.analysis),
            findings: self
                .manipulated_regions
                .iter()
                .flatten()
                .map(FindingRow::from)
                .collect(),
        }
    }
}

impl Render for VideoResult {
    type Report = MediaReport;

    fn render(&self) -> MediaReport {
        MediaReport {
            banner: AuthenticityBanner::new(self.authentic, "Video"),
            confidence: ScoreBar::new(self.confidence(), Polarity::HigherIsBetter),
            analysis: non_blank(&self.analysis),
            findings: self
                .manipulated_segments
                .iter()
                .flatten()
                .map(FindingRow::from)
                .collect(),
        }
    }
}

impl fmt::Display for MediaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.banner.title)?;
        writeln!(f, "Confidence: {}", self.confidence.label)?;
        if let Some(analysis) = &self.analysis {
            writeln!(f, "Analysis: {}", analysis)?;
        }
        if !self.findings.is_empty() {
            writeln!(f, "Detected Manipulations:")?;
            for row in &self.findings {
                writeln!(f, "  {}", row)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Severity;

    #[test]
    fn test_scenario_manipulated_image() {
        let result = ImageResult {
            authentic: false,
            confidence_score: Some(0.81),
            analysis: None,
            manipulated_regions: Some(vec![ManipulatedRegion {
                kind: "splice".to_string(),
                confidence: 0.77,
            }]),
        };

        let report = result.render();
        assert_eq!(report.banner.title, "Manipulated Image");
        assert_eq!(report.banner.tone(), "manipulated-gradient");
        assert_eq!(report.confidence.label, "81.0%");
        assert_eq!(report.confidence.severity, Severity::Low);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].to_string(), "splice — 77.0%");
    }

    #[test]
    fn test_scenario_video_segment_times() {
        let result = VideoResult {
            authentic: false,
            confidence_score: None,
            analysis: None,
            manipulated_segments: Some(vec![ManipulatedSegment {
                kind: "face-swap".to_string(),
                start_time: 125.0,
                end_time: 140.0,
                confidence: 0.6,
            }]),
        };

        let report = result.render();
        assert_eq!(report.banner.title, "Manipulated Video");
        assert_eq!(report.confidence.label, "0.0%");
        assert_eq!(report.findings[0].time_range.as_deref(), Some("2:05 - 2:20"));
        assert_eq!(report.findings[0].confidence, "60.0%");
    }

    #[test]
    fn test_empty_or_missing_lists_render_nothing() {
        let result = ImageResult {
            authentic: true,
            confidence_score: Some(0.9),
            analysis: Some("Looks clean".to_string()),
            manipulated_regions: Some(Vec::new()),
        };
        let report = result.render();
        assert!(report.findings.is_empty());
        assert_eq!(report.banner.title, "Authentic Image");
        assert!(!report.to_string().contains("Detected Manipulations"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(9.99), "0:09");
        assert_eq!(format_timestamp(60.0), "1:00");
        assert_eq!(format_timestamp(125.7), "2:05");
        assert_eq!(format_timestamp(3600.0), "60:00");
        assert_eq!(format_timestamp(-3.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
    }
}
