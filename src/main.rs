//! Vector Navigator headless runner
//!
//! `vector-navigator [LEVEL_INDEX] [VECTOR_ID ...]`
//!
//! Stages the named vectors on the chosen level, flies them at a simulated
//! 60 fps and prints the final snapshot as JSON. With no vector ids the
//! level's initial snapshot is printed.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use vector_navigator::sim::{FixedStepRunner, Mission};
use vector_navigator::{LevelCatalog, Settings};

/// Settings file path override
const SETTINGS_ENV: &str = "VECTOR_NAV_SETTINGS";
const FRAME_DT: f64 = 1.0 / 60.0;
/// One simulated hour of frames
const MAX_FRAMES: u32 = 60 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let level_index = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|err| format!("invalid level index {arg:?}: {err}"))?,
        None => 0,
    };
    let vector_ids: Vec<String> = args.collect();

    let settings_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref())?;

    let catalog = Arc::new(LevelCatalog::builtin()?);
    if level_index >= catalog.len() {
        return Err(format!(
            "level index {level_index} out of range, catalog has {} levels",
            catalog.len()
        )
        .into());
    }

    let mut mission = Mission::with_settings(catalog, &settings);
    mission.select_level(level_index);
    log::info!("Vector Navigator: {}", mission.level().display_name());

    if !vector_ids.is_empty() {
        for id in &vector_ids {
            if !mission.drop_available(id) {
                return Err(format!("level {level_index} has no vector {id:?}").into());
            }
        }
        mission.commit_plan();

        let mut runner = FixedStepRunner::from_settings(&settings);
        if !runner.run_until_settled(&mut mission, FRAME_DT, MAX_FRAMES) {
            return Err("flight did not settle".into());
        }
        log::info!(
            "Settled in {} after {:.0}ms",
            mission.phase().as_str(),
            runner.clock_ms()
        );
    }

    println!("{}", mission.snapshot().to_json_pretty()?);
    Ok(())
}
