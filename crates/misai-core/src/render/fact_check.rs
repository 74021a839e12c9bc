//! MisBot reply and fact-check card

use super::{Polarity, Render, ScoreBar, Severity};
use crate::model::{ChatResult, FactCheck};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub href: String,
    /// Title when given, otherwise the URL itself
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactCheckCard {
    pub verified: bool,
    pub status: &'static str,
    pub severity: Severity,
    pub confidence: Option<ScoreBar>,
    pub sources: Vec<SourceLink>,
}

impl FactCheckCard {
    /// CSS class of the status line
    pub fn status_class(&self) -> &'static str {
        if self.verified {
            "verified"
        } else {
            "unverified"
        }
    }
}

impl Render for FactCheck {
    type Report = FactCheckCard;

    fn render(&self) -> FactCheckCard {
        let (status, severity) = if self.verified {
            ("Verified Information", Severity::Low)
        } else {
            ("Potential Misinformation Detected", Severity::High)
        };

        FactCheckCard {
            verified: self.verified,
            status,
            severity,
            confidence: self
                .confidence
                .map(|c| ScoreBar::rounded(c, Polarity::HigherIsBetter)),
            sources: self
                .sources
                .iter()
                .map(|source| SourceLink {
                    href: source.url.clone(),
                    label: source
                        .title
                        .clone()
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| source.url.clone()),
                })
                .collect(),
        }
    }
}

impl fmt::Display for FactCheckCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fact Check: {}", self.status)?;
        if let Some(confidence) = &self.confidence {
            writeln!(f, "Confidence: {}", confidence.label)?;
        }
        if !self.sources.is_empty() {
            writeln!(f, "Sources:")?;
            for source in &self.sources {
                if source.label == source.href {
                    writeln!(f, "  - {}", source.href)?;
                } else {
                    writeln!(f, "  - {} <{}>", source.label, source.href)?;
                }
            }
        }
        Ok(())
    }
}

/// Bot reply with its optional fact-check card
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub fact_check: Option<FactCheckCard>,
}

impl Render for ChatResult {
    type Report = ChatReply;

    fn render(&self) -> ChatReply {
        ChatReply {
            text: self.reply_text().to_string(),
            fact_check: self.fact_check.as_ref().map(|fc| fc.render()),
        }
    }
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        if let Some(card) = &self.fact_check {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    #[test]
    fn test_verified_card() {
        let card = FactCheck {
            verified: true,
            confidence: Some(0.95),
            sources: vec![Source {
                url: "https://example.org".to_string(),
                title: None,
            }],
        }
        .render();

        assert_eq!(card.status, "Verified Information");
        assert_eq!(card.status_class(), "verified");
        assert_eq!(card.severity, Severity::Low);
        assert_eq!(card.confidence.as_ref().unwrap().label, "95%");
        assert_eq!(card.sources[0].label, "https://example.org");
    }

    #[test]
    fn test_unverified_card_is_severe() {
        let card = FactCheck {
            verified: false,
            confidence: None,
            sources: vec![Source {
                url: "https://example.org/a".to_string(),
                title: Some("Debunk".to_string()),
            }],
        }
        .render();

        assert_eq!(card.status, "Potential Misinformation Detected");
        assert_eq!(card.severity, Severity::High);
        assert!(card.confidence.is_none());
        assert_eq!(card.sources[0].label, "Debunk");
        assert!(card.to_string().contains("Debunk <https://example.org/a>"));
    }

    #[test]
    fn test_verification_lowers_severity() {
        let verified = FactCheck {
            verified: true,
            confidence: None,
            sources: Vec::new(),
        };
        let unverified = FactCheck {
            verified: false,
            ..verified.clone()
        };
        assert!(verified.render().severity < unverified.render().severity);
    }
}
