//! AI fact-check test report

use super::{non_blank, Polarity, Render, ScoreBar};
use crate::model::{MetricValue, TextResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

impl fmt::Display for MetricCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    pub hallucination: ScoreBar,
    pub metrics: Vec<MetricCard>,
    pub analysis: Option<String>,
}

/// `fact_check_confidence` -> `fact check confidence`
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

fn format_metric(value: &MetricValue) -> String {
    match value {
        MetricValue::Number(n) => format!("{:.2}", n),
        MetricValue::Text(s) => s.clone(),
        MetricValue::Other(v) => v.to_string(),
    }
}

impl Render for TextResult {
    type Report = TextReport;

    fn render(&self) -> TextReport {
        TextReport {
            hallucination: ScoreBar::new(self.hallucination_score, Polarity::HigherIsWorse),
            metrics: self
                .metrics
                .iter()
                .map(|(key, value)| MetricCard {
                    label: humanize_key(key),
                    value: format_metric(value),
                })
                .collect(),
            analysis: non_blank(&self.analysis),
        }
    }
}

impl fmt::Display for TextReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hallucination Score: {} ({})",
            self.hallucination.label, self.hallucination.severity
        )?;
        for metric in &self.metrics {
            writeln!(f, "  {}", metric)?;
        }
        if let Some(analysis) = &self.analysis {
            writeln!(f, "Analysis: {}", analysis)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Severity;
    use std::collections::BTreeMap;

    #[test]
    fn test_scenario_high_hallucination() {
        let mut metrics = BTreeMap::new();
        metrics.insert("fluency".to_string(), MetricValue::Number(0.8));
        let result = TextResult {
            hallucination_score: 0.92,
            metrics,
            analysis: None,
        };

        let report = result.render();
        assert_eq!(report.hallucination.label, "92.0%");
        assert_eq!(report.hallucination.severity, Severity::High);
        assert_eq!(report.hallucination.color(), "red");
        assert_eq!(report.metrics.len(), 1);
        assert_eq!(report.metrics[0].to_string(), "fluency: 0.80");
        assert!(report.analysis.is_none());
    }

    #[test]
    fn test_metric_keys_and_values() {
        let mut metrics = BTreeMap::new();
        metrics.insert("response_time".to_string(), MetricValue::Number(1.23456));
        metrics.insert("source_quality".to_string(), MetricValue::Text("mixed".to_string()));
        let report = TextResult {
            hallucination_score: 0.1,
            metrics,
            analysis: Some("  ".to_string()),
        }
        .render();

        let cards: Vec<String> = report.metrics.iter().map(|m| m.to_string()).collect();
        assert_eq!(cards, vec!["response time: 1.23", "source quality: mixed"]);
        assert!(report.analysis.is_none());
        assert_eq!(report.hallucination.severity, Severity::Low);
    }
}
