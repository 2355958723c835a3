use serde::{Deserialize, Serialize};

/// The slice of a job posting the scorer needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub description: String,
    /// Skills the recruiter declared on the posting. They count as job skills
    /// even when the description never mentions them.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl JobPosting {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            required_skills: Vec::new(),
        }
    }

    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }
}
