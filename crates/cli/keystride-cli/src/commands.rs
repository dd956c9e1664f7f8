use std::path::Path;

use anyhow::{Context, Result};
use keystride_core::{export, load_scene, retime, save_scene, JsonBakeExporter, Preset, Settings};
use log::info;

use crate::cli::{ExportArgs, RetimeArgs, SettingsArgs};

/// Base settings from `--settings` or `--preset`, then flag overrides.
pub fn resolve_settings(
    base: &SettingsArgs,
    retime_args: &RetimeArgs,
    export_args: &ExportArgs,
) -> Result<Settings> {
    let mut settings = match (&base.settings, base.preset) {
        (Some(path), _) => Settings::load(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        (None, Some(preset)) => Settings::preset(preset.into()),
        (None, None) => Settings::preset(Preset::Kh2),
    };
    if let Some(start) = retime_args.start {
        settings.start = start;
    }
    if let Some(spacing) = retime_args.spacing {
        settings.spacing = spacing;
    }
    if let Some(fps) = retime_args.fps {
        settings.frame_rate = fps;
    }
    if let Some(output) = &export_args.output {
        settings.output_path = output.clone();
    }
    if let Some(step) = export_args.step {
        settings.sample_step = step;
    }
    Ok(settings)
}

/// Retime the scene file and save it to `out` (or back in place).
pub fn cmd_retime(scene_path: &Path, settings: &Settings, out: Option<&Path>) -> Result<String> {
    let mut scene = load_scene(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    let report = retime(&mut scene, &settings.retime_config())?;

    let dest = out.unwrap_or(scene_path);
    save_scene(&scene, dest)
        .with_context(|| format!("failed to save scene {}", dest.display()))?;
    info!("saved retimed scene to {}", dest.display());
    Ok(report.message())
}

pub fn cmd_export(scene_path: &Path, settings: &Settings) -> Result<String> {
    let scene = load_scene(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    let report = export(&scene, &mut JsonBakeExporter, &settings.export_config())
        .context("export failed")?;
    Ok(report.message())
}

/// Retime, save, then export the saved scene.
pub fn cmd_optimize(scene_path: &Path, settings: &Settings, out: Option<&Path>) -> Result<String> {
    let retimed = cmd_retime(scene_path, settings, out)?;
    let exported = cmd_export(out.unwrap_or(scene_path), settings)?;
    Ok(format!("{retimed}\n{exported}"))
}

pub fn cmd_settings(settings: &Settings, write: Option<&Path>) -> Result<String> {
    match write {
        Some(path) => {
            settings
                .save(path)
                .with_context(|| format!("failed to write settings {}", path.display()))?;
            Ok(format!("Settings written to {}", path.display()))
        }
        None => Ok(serde_json::to_string_pretty(settings)?),
    }
}
