use serde::{Deserialize, Serialize};

use crate::model::LessonId;

/// Target audience of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl LessonLevel {
    /// Levels from easiest to hardest.
    pub const ALL: [LessonLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Arabic label shown next to the lesson title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "للمبتدئين",
            Self::Intermediate => "متوسط",
            Self::Advanced => "متقدم",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Code,
    Tip,
}

/// One paragraph, snippet or tip inside a lesson body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    kind: BlockKind,
    body: String,
}

impl ContentBlock {
    #[must_use]
    pub fn new(kind: BlockKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, body)
    }

    #[must_use]
    pub fn code(body: impl Into<String>) -> Self {
        Self::new(BlockKind::Code, body)
    }

    #[must_use]
    pub fn tip(body: impl Into<String>) -> Self {
        Self::new(BlockKind::Tip, body)
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A catalog lesson. Completion is never stored here; see `Hydrated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    duration: String,
    level: LessonLevel,
    content: Vec<ContentBlock>,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
        level: LessonLevel,
        content: Vec<ContentBlock>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
            level,
            content,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
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

    /// Human readable duration, e.g. "15 دقيقة".
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn level(&self) -> LessonLevel {
        self.level
    }

    #[must_use]
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }
}
