use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Application status buckets driven by the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Received,
    Reviewing,
    Shortlisted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Received => "received",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Shortlisted => "shortlisted",
        }
    }

    /// Hints shown to the recruiter next to the status.
    pub fn reviewer_notes(&self) -> &'static [&'static str] {
        match self {
            ApplicationStatus::Shortlisted => {
                &["Highly compatible candidate", "Interview as a priority"]
            }
            ApplicationStatus::Reviewing => &["Compatible candidate", "Review in more detail"],
            ApplicationStatus::Received => &["Low compatibility", "Review manually"],
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score cut-offs for [`ApplicationStatus`]. Inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub shortlist: f64,
    pub review: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            shortlist: 80.0,
            review: 60.0,
        }
    }
}

impl StatusThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("shortlist", self.shortlist), ("review", self.review)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidThresholds(format!(
                    "{name} threshold must be within 0..=100, got {value}"
                )));
            }
        }
        if self.shortlist < self.review {
            return Err(ConfigError::InvalidThresholds(format!(
                "shortlist ({}) must not be below review ({})",
                self.shortlist, self.review
            )));
        }
        Ok(())
    }

    pub fn classify(&self, overall_score: f64) -> ApplicationStatus {
        if overall_score >= self.shortlist {
            ApplicationStatus::Shortlisted
        } else if overall_score >= self.review {
            ApplicationStatus::Reviewing
        } else {
            ApplicationStatus::Received
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries_are_inclusive() {
        let t = StatusThresholds::default();
        assert_eq!(t.classify(100.0), ApplicationStatus::Shortlisted);
        assert_eq!(t.classify(80.0), ApplicationStatus::Shortlisted);
        assert_eq!(t.classify(79.99), ApplicationStatus::Reviewing);
        assert_eq!(t.classify(60.0), ApplicationStatus::Reviewing);
        assert_eq!(t.classify(59.99), ApplicationStatus::Received);
        assert_eq!(t.classify(0.0), ApplicationStatus::Received);
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let t = StatusThresholds {
            shortlist: 50.0,
            review: 70.0,
        };
        assert!(matches!(t.validate(), Err(ConfigError::InvalidThresholds(_))));
    }

    #[test]
    fn test_thresholds_must_be_in_range() {
        let t = StatusThresholds {
            shortlist: 120.0,
            review: 60.0,
        };
        assert!(t.validate().is_err());
        assert!(StatusThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_status_serde_and_display() {
        let json = serde_json::to_string(&ApplicationStatus::Shortlisted).unwrap();
        assert_eq!(json, r#""shortlisted""#);
        assert_eq!(ApplicationStatus::Reviewing.to_string(), "reviewing");
    }

    #[test]
    fn test_every_status_has_reviewer_notes() {
        for status in [
            ApplicationStatus::Received,
            ApplicationStatus::Reviewing,
            ApplicationStatus::Shortlisted,
        ] {
            assert_eq!(status.reviewer_notes().len(), 2);
        }
    }
}
