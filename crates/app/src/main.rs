use std::fmt;

use baython_core::catalog;
use baython_core::model::{
    BlockKind, Category, Exercise, ExerciseId, Hydrated, Lesson, LessonId, LessonLevel,
};
use clap::Parser;
use services::{AppServices, ProgressSnapshot, WriteOutcome};

mod cli;
mod telemetry;

use cli::{Cli, Command, normalize_sqlite_url};

#[derive(Debug)]
enum AppError {
    InvalidDbUrl { raw: String },
    UnknownLesson(String),
    UnknownExercise(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            AppError::UnknownLesson(id) => write!(f, "no lesson with id {id}"),
            AppError::UnknownExercise(id) => write!(f, "no exercise with id {id}"),
        }
    }
}

impl std::error::Error for AppError {}

fn check_mark(done: bool) -> &'static str {
    if done { "✓" } else { " " }
}

fn warn_if_not_saved(write: WriteOutcome) {
    if !write.is_durable() {
        eprintln!("warning: change applies to this run only; it could not be saved");
    }
}

fn print_lesson_row(lesson: &Hydrated<'_, Lesson>) {
    println!(
        "[{}] {:>2}  {}  ({})",
        check_mark(lesson.completed()),
        lesson.id(),
        lesson.title(),
        lesson.duration(),
    );
}

async fn list_lessons(services: &AppServices) {
    let completion = services.completion();
    let hydrated = completion.hydrated_lessons().await;
    for level in LessonLevel::ALL {
        let section = catalog::at_level(&hydrated, level);
        if section.is_empty() {
            continue;
        }
        println!("{}", level.label());
        for lesson in &section {
            print_lesson_row(lesson);
        }
        println!();
    }
}

async fn show_lesson(services: &AppServices, id: &LessonId) -> Result<(), AppError> {
    let id = id.as_str();
    let catalog = services.catalog();
    let lesson = catalog
        .lesson(id)
        .ok_or_else(|| AppError::UnknownLesson(id.to_owned()))?;
    let done = services
        .completion()
        .is_completed(Category::Lessons, id)
        .await;

    println!("{} [{}]", lesson.title(), check_mark(done));
    println!("{}  ·  {}  ·  {}", lesson.description(), lesson.level().label(), lesson.duration());
    println!();
    for block in lesson.content() {
        match block.kind() {
            BlockKind::Text => println!("{}", block.body()),
            BlockKind::Code => {
                for line in block.body().lines() {
                    println!("    {line}");
                }
            }
            BlockKind::Tip => println!("💡 {}", block.body()),
        }
        println!();
    }

    if let Some(neighbors) = catalog.lesson_neighbors(id) {
        if let Some(prev) = neighbors.previous {
            println!("← {} {}", prev.id(), prev.title());
        }
        if let Some(next) = neighbors.next {
            println!("→ {} {}", next.id(), next.title());
        }
    }
    Ok(())
}

fn print_exercise_row(exercise: &Hydrated<'_, Exercise>) {
    println!(
        "[{}] {:>2}  {}  ({}, {})",
        check_mark(exercise.completed()),
        exercise.id(),
        exercise.title(),
        exercise.difficulty().label(),
        exercise.topic(),
    );
}

async fn list_exercises(services: &AppServices, pending_only: bool) {
    let completion = services.completion();
    let hydrated = completion.hydrated_exercises().await;
    let pending = catalog::pending(&hydrated);

    println!("تمارين متبقية");
    if pending.is_empty() {
        println!("لا توجد تمارين متبقية");
    }
    for exercise in &pending {
        print_exercise_row(exercise);
    }
    if pending_only {
        return;
    }

    let done = catalog::completed(&hydrated);
    if !done.is_empty() {
        println!();
        println!("تمارين مكتملة");
        for exercise in &done {
            print_exercise_row(exercise);
        }
    }
}

fn show_exercise(
    services: &AppServices,
    id: &ExerciseId,
    with_solution: bool,
) -> Result<(), AppError> {
    let id = id.as_str();
    let catalog = services.catalog();
    let exercise = catalog
        .exercise(id)
        .ok_or_else(|| AppError::UnknownExercise(id.to_owned()))?;

    println!("{} ({})", exercise.title(), exercise.difficulty().label());
    println!("{}", exercise.description());
    println!();
    println!("{}", exercise.code());
    if with_solution {
        println!("---");
        println!("{}", exercise.solution());
    }
    Ok(())
}

async fn complete(
    services: &AppServices,
    category: Category,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = services.completion().mark_complete(category, id).await?;
    if outcome.newly_added {
        println!("أحسنت! ({category} {id})");
    } else {
        println!("already complete ({category} {id})");
    }
    warn_if_not_saved(outcome.write);
    Ok(())
}

fn print_progress(snapshot: &ProgressSnapshot) {
    let summary = &snapshot.summary;
    println!("التقدم الكلي: {:.1}%", summary.overall_percent);
    println!(
        "دروس مكتملة: {}/{} ({:.1}%)",
        summary.completed_lessons, summary.total_lessons, summary.lesson_percent
    );
    println!(
        "تمارين محلولة: {}/{} ({:.1}%)",
        summary.completed_exercises, summary.total_exercises, summary.exercise_percent
    );
    println!("أيام متتالية: {}", snapshot.streak);
    println!(
        "ساعات تعلم: {} ({} min)",
        snapshot.learning_hours(),
        summary.learning_minutes
    );
    println!();
    println!("الإنجازات:");
    for achievement in &summary.achievements {
        println!(
            "  [{}] {} - {}",
            check_mark(achievement.unlocked),
            achievement.title,
            achievement.description
        );
    }
}

async fn profile(
    services: &AppServices,
    system_dark: bool,
    name: Option<String>,
    toggle_dark_mode: bool,
) {
    let profile = services.profile();
    if let Some(name) = name {
        warn_if_not_saved(profile.set_display_name(&name).await);
    }
    if toggle_dark_mode {
        let (_, write) = profile.toggle_dark_mode(system_dark).await;
        warn_if_not_saved(write);
    }

    let current = profile.load(system_dark).await;
    println!("name: {}", current.display_name());
    println!("dark mode: {}", if current.dark_mode() { "on" } else { "off" });
    println!("streak: {}", current.streak());
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| AppError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(AppError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let system_dark = cli.system_theme.is_dark();

    let db_url = normalize_sqlite_url(&cli.db);
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url).await?;
    tracing::debug!(db = %db_url, "services ready");

    match cli.command.unwrap_or(Command::Progress { json: false }) {
        Command::Lessons => list_lessons(&services).await,
        Command::Lesson { id } => show_lesson(&services, &id).await?,
        Command::Exercises { pending } => list_exercises(&services, pending).await,
        Command::Exercise { id, solution } => show_exercise(&services, &id, solution)?,
        Command::Complete { kind, id } => complete(&services, kind.into(), &id).await?,
        Command::Progress { json } => {
            let snapshot = services.progress().snapshot().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_progress(&snapshot);
            }
        }
        Command::Profile {
            name,
            toggle_dark_mode,
        } => profile(&services, system_dark, name, toggle_dark_mode).await,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
