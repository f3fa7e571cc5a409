use std::path::Path;

use anyhow::{bail, Context, Result};
use lessons::{Catalog, Lesson, LessonHandle};
use renderer::{translate_program, validate_program, Renderer, RendererConfig, Stage};
use serde::Serialize;
use settings::ShaderbookConfig;
use tour::Tour;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{CheckArgs, ExportArgs, ListArgs, RunArgs, ShowArgs};
use crate::paths::AppPaths;
use crate::plan::{plan_export, plan_run};
use crate::source::TourSource;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Shared state every subcommand starts from.
pub struct Session {
    pub paths: AppPaths,
    pub config: ShaderbookConfig,
    pub catalog: Catalog,
}

impl Session {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let paths = AppPaths::discover()?;
        let config = match config_override {
            Some(path) => ShaderbookConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                let path = paths.config_file();
                ShaderbookConfig::load_or_default(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?
            }
        };
        let catalog = Catalog::new(paths.lesson_roots());
        debug!(roots = ?catalog.roots(), "lesson catalogue ready");
        Ok(Self {
            paths,
            config,
            catalog,
        })
    }
}

pub fn run(session: Session, args: RunArgs) -> Result<()> {
    let plan = plan_run(&args, &session.config)?;

    // Resolve everything up front so a typo fails before the window opens.
    let lessons = session.catalog.resolve_all(&plan.handles)?;
    for lesson in &lessons {
        if let Err(err) = validate_program(&lesson.to_program()) {
            warn!(lesson = %lesson.name, "lesson does not compile: {err}");
        }
    }

    info!(
        lessons = plan.handles.len(),
        mode = ?plan.mode,
        dwell = ?plan.dwell,
        width = plan.renderer.surface_size.0,
        height = plan.renderer.surface_size.1,
        policy = ?plan.renderer.policy,
        "starting lesson tour"
    );
    let tour = Tour::new(plan.handles, plan.mode, plan.dwell, plan.seed)?;
    let mut renderer = Renderer::new(plan.renderer);
    renderer.run(TourSource::new(tour, session.catalog))
}

#[derive(Debug, Serialize)]
struct LessonSummary<'a> {
    name: &'a str,
    title: &'a str,
    summary: &'a str,
    tags: &'a [String],
    origin: String,
}

impl<'a> From<&'a Lesson> for LessonSummary<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            name: &lesson.name,
            title: &lesson.title,
            summary: &lesson.summary,
            tags: &lesson.tags,
            origin: lesson.origin.to_string(),
        }
    }
}

pub fn list(session: Session, args: ListArgs) -> Result<()> {
    let lessons = session.catalog.list();
    if args.json {
        let summaries: Vec<LessonSummary<'_>> = lessons.iter().map(LessonSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Lessons:");
    for (index, lesson) in lessons.iter().enumerate() {
        println!(
            "  {:>2}. {:<18} {:<24} {}",
            index + 1,
            lesson.name,
            lesson.title,
            lesson.summary
        );
        if !lesson.handle().is_builtin() {
            println!("      from {}", lesson.origin);
        }
    }
    Ok(())
}

pub fn show(session: Session, args: ShowArgs) -> Result<()> {
    let lesson = session.catalog.resolve(&LessonHandle::from_input(&args.lesson))?;
    let program = lesson.to_program();
    println!("// {}: {}", lesson.name, lesson.title);
    if args.translated {
        let translated = translate_program(&program)
            .with_context(|| format!("failed to translate lesson '{}'", lesson.name))?;
        for stage in [Stage::Vertex, Stage::Fragment] {
            println!("// ---- {stage} (GLSL 450) ----");
            println!("{}", translated.source(stage));
        }
    } else {
        println!("// ---- vertex ----");
        println!("{}", program.vertex.trim_end());
        println!("// ---- fragment ----");
        println!("{}", program.fragment.trim_end());
    }
    Ok(())
}

pub fn check(session: Session, args: CheckArgs) -> Result<()> {
    let lessons = if args.lessons.is_empty() {
        session.catalog.list()
    } else {
        let handles: Vec<LessonHandle> = args
            .lessons
            .iter()
            .map(|input| LessonHandle::from_input(input))
            .collect();
        session.catalog.resolve_all(&handles)?
    };

    let mut failures = 0usize;
    for lesson in &lessons {
        match validate_program(&lesson.to_program()) {
            Ok(_) => println!("ok    {}", lesson.name),
            Err(err) => {
                failures += 1;
                println!("FAIL  {}\n{err}", lesson.name);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} lessons failed to compile", lessons.len());
    }
    Ok(())
}

pub fn export(session: Session, args: ExportArgs) -> Result<()> {
    let lesson = session.catalog.resolve(&LessonHandle::from_input(&args.lesson))?;
    let request = plan_export(&args, &session.config)?;
    let renderer = Renderer::new(RendererConfig {
        surface_size: request.size,
        antialiasing: request.antialiasing,
        color_space: request.color_space,
        color: request.color,
        ..RendererConfig::default()
    });
    let path = renderer.export(&lesson.to_program(), &request)?;
    println!("{}", path.display());
    Ok(())
}

pub fn show_paths(session: Session, config_override: Option<&Path>) -> Result<()> {
    let config_file = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| session.paths.config_file());
    println!("Configuration directories:");
    println!("  config:     {}", session.paths.config_dir().display());
    println!("  data:       {}", session.paths.data_dir().display());
    println!(
        "  config file: {} ({})",
        config_file.display(),
        if config_file.exists() {
            "present"
        } else {
            "missing"
        }
    );
    println!("Lesson search roots:");
    for root in session.catalog.roots() {
        println!("  {}", root.display());
    }
    Ok(())
}
