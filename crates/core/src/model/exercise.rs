use serde::{Deserialize, Serialize};

use crate::model::ExerciseId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "سهل",
            Self::Medium => "متوسط",
            Self::Hard => "صعب",
        }
    }
}

/// A coding exercise with starter code and a reference solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    id: ExerciseId,
    title: String,
    description: String,
    difficulty: Difficulty,
    topic: String,
    code: String,
    solution: String,
}

impl Exercise {
    #[must_use]
    pub fn new(
        id: ExerciseId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        topic: impl Into<String>,
        code: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            difficulty,
            topic: topic.into(),
            code: code.into(),
            solution: solution.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Starter code handed to the learner.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_serde() {
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert_eq!(parsed.label(), "صعب");
    }
}
