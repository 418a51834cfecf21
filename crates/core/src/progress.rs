//! Progress statistics derived from completion counts.
//!
//! Everything here is a pure function of counts and catalog sizes. Nothing is
//! persisted; achievements in particular are recomputed on every call, so
//! they lock again if completion ever shrinks.

use serde::Serialize;

/// Minutes credited per completed lesson.
pub const MINUTES_PER_LESSON: u32 = 15;
/// Minutes credited per completed exercise.
pub const MINUTES_PER_EXERCISE: u32 = 10;

/// Percentage of `total` represented by `completed`, in `[0, 100]`.
///
/// Returns `0.0` for an empty category.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (100.0 * completed as f64 / total as f64).min(100.0)
}

#[must_use]
pub fn lesson_progress_percent(completed_lessons: usize, total_lessons: usize) -> f64 {
    completion_percent(completed_lessons, total_lessons)
}

#[must_use]
pub fn exercise_progress_percent(completed_exercises: usize, total_exercises: usize) -> f64 {
    completion_percent(completed_exercises, total_exercises)
}

/// Unweighted mean of the two category percentages.
///
/// Finishing every lesson and no exercise lands at 50, whatever the catalog sizes.
#[must_use]
pub fn overall_progress_percent(lesson_percent: f64, exercise_percent: f64) -> f64 {
    (lesson_percent + exercise_percent) / 2.0
}

/// Raw minutes of study credited for completed items.
#[must_use]
pub fn approximate_learning_minutes(completed_lessons: usize, completed_exercises: usize) -> u32 {
    let lessons = u32::try_from(completed_lessons).unwrap_or(u32::MAX);
    let exercises = u32::try_from(completed_exercises).unwrap_or(u32::MAX);
    lessons
        .saturating_mul(MINUTES_PER_LESSON)
        .saturating_add(exercises.saturating_mul(MINUTES_PER_EXERCISE))
}

/// Whole hours for display, rounding half up (90 minutes shows as 2).
#[must_use]
pub fn learning_hours_rounded(minutes: u32) -> u32 {
    minutes.saturating_add(30) / 60
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    LessonsAtLeast(usize),
    ExercisesAtLeast(usize),
    AllLessons,
}

struct Achievement {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    rule: Rule,
}

const ACHIEVEMENTS: [Achievement; 4] = [
    Achievement {
        id: "1",
        title: "البداية",
        description: "أكمل أول درس",
        rule: Rule::LessonsAtLeast(1),
    },
    Achievement {
        id: "2",
        title: "المثابر",
        description: "أكمل 5 دروس",
        rule: Rule::LessonsAtLeast(5),
    },
    Achievement {
        id: "3",
        title: "المبرمج",
        description: "أكمل 3 تمارين",
        rule: Rule::ExercisesAtLeast(3),
    },
    Achievement {
        id: "4",
        title: "المتفوق",
        description: "أكمل جميع الدروس",
        rule: Rule::AllLessons,
    },
];

/// An achievement and whether the current counts unlock it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementState {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Evaluate every achievement, in display order.
#[must_use]
pub fn achievement_states(
    completed_lessons: usize,
    completed_exercises: usize,
    total_lessons: usize,
) -> Vec<AchievementState> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementState {
            id: achievement.id,
            title: achievement.title,
            description: achievement.description,
            unlocked: match achievement.rule {
                Rule::LessonsAtLeast(n) => completed_lessons >= n,
                Rule::ExercisesAtLeast(n) => completed_exercises >= n,
                Rule::AllLessons => completed_lessons == total_lessons,
            },
        })
        .collect()
}

/// Everything the progress view shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub completed_lessons: usize,
    pub completed_exercises: usize,
    pub total_lessons: usize,
    pub total_exercises: usize,
    pub lesson_percent: f64,
    pub exercise_percent: f64,
    pub overall_percent: f64,
    pub learning_minutes: u32,
    pub achievements: Vec<AchievementState>,
}

impl ProgressSummary {
    #[must_use]
    pub fn compute(
        completed_lessons: usize,
        completed_exercises: usize,
        total_lessons: usize,
        total_exercises: usize,
    ) -> Self {
        let lesson_percent = lesson_progress_percent(completed_lessons, total_lessons);
        let exercise_percent = exercise_progress_percent(completed_exercises, total_exercises);
        Self {
            completed_lessons,
            completed_exercises,
            total_lessons,
            total_exercises,
            lesson_percent,
            exercise_percent,
            overall_percent: overall_progress_percent(lesson_percent, exercise_percent),
            learning_minutes: approximate_learning_minutes(completed_lessons, completed_exercises),
            achievements: achievement_states(completed_lessons, completed_exercises, total_lessons),
        }
    }

    #[must_use]
    pub fn learning_hours(&self) -> u32 {
        learning_hours_rounded(self.learning_minutes)
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}
