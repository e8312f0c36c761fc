//! Subcommand implementations

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use annotation::AnnotationEngine;
use anyhow::{Context, Result, bail};
use chrono::Local;
use planner_config::{CanvasConfig, CanvasPreset, PlannerConfig};
use planner_ipc::{
    AnnouncementCommand, CommandScript, EngineToUi, NoticeLevel, encode_engine_message,
};
use tracing::{debug, info, warn};

use crate::cli::{AnnotateArgs, AnnouncementsCommand, ConfigCommand};
use crate::desk::AnnouncementDesk;
use crate::session::PlannerSession;

fn load_config(path: &Path) -> PlannerConfig {
    let loaded = PlannerConfig::load_or_default(path);
    if let Some(reason) = loaded.reset_reason {
        warn!("{}; using defaults", reason);
    }
    loaded.config
}

/// Apply command-line overrides to the configured canvas
fn canvas_config(config: &PlannerConfig, args: &AnnotateArgs) -> CanvasConfig {
    let mut canvas = config.canvas.clone();
    if let Some(preset) = args.preset {
        let (width, height) = CanvasPreset::from(preset).dimensions();
        canvas.width = width;
        canvas.height = height;
    }
    if let Some(map) = &args.map {
        canvas.map_path = map.clone();
    }
    if let Some(saved) = &args.canvas {
        canvas.canvas_path = Some(saved.clone());
    }
    canvas
}

fn log_message(index: usize, msg: &EngineToUi) {
    match msg {
        EngineToUi::Notice {
            level: NoticeLevel::Error,
            message,
        } => warn!("[{}] {}", index, message),
        EngineToUi::Notice { message, .. } => info!("[{}] {}", index, message),
        other => debug!("[{}] {:?}", index, other),
    }
}

pub fn annotate(config_path: &Path, args: AnnotateArgs) -> Result<()> {
    let config = load_config(config_path);
    let canvas = canvas_config(&config, &args);

    let script_json = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script = CommandScript::from_json(&script_json)
        .with_context(|| format!("Failed to parse script {}", args.script.display()))?;
    if let Some(description) = &script.description {
        info!("Replaying: {}", description);
    }

    let engine = AnnotationEngine::open(
        &canvas.map_path,
        canvas.canvas_path.as_deref(),
        canvas.width,
        canvas.height,
    )
    .context("Failed to set up the map canvas")?;
    let mut session = PlannerSession::from_config(engine, &config);

    let mut events = match &args.events {
        Some(path) => Some(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create events file {}", path.display())
        })?)),
        None => None,
    };

    let total = script.commands.len();
    for (index, command) in script.commands.into_iter().enumerate() {
        for msg in session.handle(command) {
            log_message(index, &msg);
            if let Some(out) = events.as_mut() {
                writeln!(out, "{}", encode_engine_message(&msg)?)?;
            }
        }
    }
    if let Some(mut out) = events {
        out.flush()?;
    }

    session
        .engine()
        .save_png(&args.out)
        .context("Failed to save annotated canvas")?;
    info!("Replayed {} commands, canvas saved to {}", total, args.out.display());
    Ok(())
}

pub fn config(config_path: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init {
            path,
            preset,
            force,
        } => {
            let path: PathBuf = path.unwrap_or_else(|| config_path.to_path_buf());
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let config = PlannerConfig {
                canvas: CanvasConfig::from_preset(preset.into()),
                ..Default::default()
            };
            config.save(&path)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommand::Show => {
            let config = load_config(config_path);
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Print desk output; error notices fail the command
fn report(out: Vec<EngineToUi>) -> Result<()> {
    let mut failure = None;
    for msg in out {
        match msg {
            EngineToUi::Notice {
                level: NoticeLevel::Error,
                message,
            } => failure = Some(message),
            EngineToUi::Notice { message, .. } => println!("{}", message),
            EngineToUi::AnnouncementsUpdated { .. } => {}
            other => debug!("{:?}", other),
        }
    }
    match failure {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn print_board(desk: &AnnouncementDesk) {
    for (i, slot) in desk.board().slots().iter().enumerate() {
        println!(
            "[{}] {} {} | {} | {}",
            i + 1,
            slot.color(),
            slot.status_tag(),
            slot.subject(),
            slot.author_tag()
        );
        println!("    {}", slot.details());
    }
}

pub fn announcements(config_path: &Path, command: AnnouncementsCommand) -> Result<()> {
    let config = load_config(config_path);
    let mut desk = AnnouncementDesk::from_config(&config.announcements);

    match command {
        AnnouncementsCommand::List => {
            report(desk.refresh())?;
            print_board(&desk);

            let all = desk.store().list()?;
            if !all.is_empty() {
                println!();
                println!("{} stored:", all.len());
            }
            for announcement in all {
                println!(
                    "  {}  {}  {}",
                    announcement.id,
                    announcement
                        .timestamp
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M"),
                    announcement.summary()
                );
            }
            Ok(())
        }
        AnnouncementsCommand::Post {
            code,
            subject,
            details,
            status,
            by_who,
        } => report(desk.handle(AnnouncementCommand::Post {
            code,
            subject,
            details,
            status,
            by_who,
        })),
        AnnouncementsCommand::Delete { code, ids } => {
            report(desk.handle(AnnouncementCommand::Delete { code, ids }))
        }
        AnnouncementsCommand::DeleteAll { code } => {
            report(desk.handle(AnnouncementCommand::DeleteAll { code }))
        }
    }
}
