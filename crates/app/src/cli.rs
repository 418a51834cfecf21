use std::path::{Path, PathBuf};

use baython_core::model::{Category, ExerciseId, LessonId};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "baython", version, about = "Python lessons and exercises with progress tracking")]
pub struct Cli {
    /// SQLite database URL or file path.
    #[arg(long, env = "BAYTHON_DB_URL", default_value = "sqlite://baython.sqlite3")]
    pub db: String,

    /// Theme used when no dark-mode preference has been saved.
    #[arg(long, env = "BAYTHON_SYSTEM_THEME", value_enum, default_value_t = SystemTheme::Light)]
    pub system_theme: SystemTheme,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemTheme {
    Light,
    Dark,
}

impl SystemTheme {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemKind {
    Lesson,
    Exercise,
}

impl From<ItemKind> for Category {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Lesson => Category::Lessons,
            ItemKind::Exercise => Category::Exercises,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List lessons with their completion state.
    Lessons,
    /// Show one lesson's content.
    Lesson { id: LessonId },
    /// List exercises.
    Exercises {
        /// Only exercises that are not solved yet.
        #[arg(long)]
        pending: bool,
    },
    /// Show one exercise's starter code.
    Exercise {
        id: ExerciseId,
        /// Also print the reference solution.
        #[arg(long)]
        solution: bool,
    },
    /// Mark a lesson or exercise complete.
    Complete {
        #[arg(value_enum)]
        kind: ItemKind,
        #[arg(value_parser = parse_item_id)]
        id: String,
    },
    /// Show progress statistics and achievements.
    Progress {
        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show or update profile settings.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        toggle_dark_mode: bool,
    },
}

/// Trimmed, non-blank catalog id.
fn parse_item_id(raw: &str) -> Result<String, String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err("id cannot be blank".to_owned());
    }
    Ok(id.to_owned())
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_owned();
    }

    let trimmed = raw.trim();
    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_full_urls() {
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/a.db"), "sqlite:///tmp/a.db");
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn absolutizes_bare_paths() {
        assert_eq!(normalize_sqlite_url("/var/data/b.db"), "sqlite:///var/data/b.db");
        assert!(normalize_sqlite_url("sqlite:rel.db").ends_with("/rel.db"));
    }

    #[test]
    fn parses_complete_command() {
        let cli = Cli::try_parse_from(["baython", "complete", "exercise", "7"]).unwrap();
        match cli.command {
            Some(Command::Complete { kind, id }) => {
                assert_eq!(Category::from(kind), Category::Exercises);
                assert_eq!(id, "7");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn complete_trims_ids_like_show_commands() {
        let cli = Cli::try_parse_from(["baython", "complete", "lesson", " 3 "]).unwrap();
        match cli.command {
            Some(Command::Complete { id, .. }) => assert_eq!(id, "3"),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["baython", "lesson", " 3 "]).unwrap();
        match cli.command {
            Some(Command::Lesson { id }) => assert_eq!(id, LessonId::new("3")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn complete_rejects_blank_ids() {
        assert!(Cli::try_parse_from(["baython", "complete", "exercise", "  "]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
