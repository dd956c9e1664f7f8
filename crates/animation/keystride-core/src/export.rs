//! Baked export: hand the retimed animation to a bake/export facility.
//!
//! The facility call always bakes the whole scene with no NLA strips, no
//! all-bones pass, no leaf bones and no simplification; only the output path
//! and the sampling step come from the caller.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::baking::{bake_animation, BakeOptions};
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::host::AnimationHost;

/// Arguments of a single bake-and-export call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakeExportOptions {
    pub path: PathBuf,
    /// Limit the export to the user's selection.
    pub use_selection: bool,
    pub bake_nla_strips: bool,
    pub bake_all_bones: bool,
    pub add_leaf_bones: bool,
    pub sample_step: f64,
    pub simplify_factor: f64,
}

impl BakeExportOptions {
    /// Options for an export call; every flag except path and step is fixed.
    pub fn for_export(config: &ExportConfig) -> Self {
        Self {
            path: config.output_path.clone(),
            use_selection: false,
            bake_nla_strips: false,
            bake_all_bones: false,
            add_leaf_bones: false,
            sample_step: config.sample_step,
            simplify_factor: 0.0,
        }
    }
}

/// Host bake/export facility.
pub trait BakeExporter {
    /// Bake the host's animation and write it to `options.path`.
    /// Errors are descriptive messages shown to the user as is.
    fn bake_export(
        &mut self,
        host: &dyn AnimationHost,
        options: &BakeExportOptions,
    ) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub path: PathBuf,
}

impl ExportReport {
    pub fn message(&self) -> String {
        format!("Exported to {}", self.path.display())
    }
}

/// Export the host's animation through `facility`.
///
/// Facility failures come back as `ExportError` with the message unchanged.
/// Partially written files are left in place.
pub fn export<H, E>(
    host: &H,
    facility: &mut E,
    config: &ExportConfig,
) -> Result<ExportReport, ExportError>
where
    H: AnimationHost,
    E: BakeExporter + ?Sized,
{
    config
        .validate()
        .inspect_err(|e| warn!("export rejected: {e}"))?;

    let options = BakeExportOptions::for_export(config);
    facility.bake_export(host, &options).map_err(|message| {
        warn!("export to {} failed: {message}", options.path.display());
        ExportError { message }
    })?;

    info!(
        "exported {} (step={})",
        options.path.display(),
        options.sample_step
    );
    Ok(ExportReport {
        path: options.path,
    })
}

/// Built-in facility: bakes the host animation and writes it as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonBakeExporter;

impl JsonBakeExporter {
    fn write(path: &Path, text: &str) -> Result<(), String> {
        fs::write(path, text).map_err(|e| format!("cannot write {}: {e}", path.display()))
    }
}

impl BakeExporter for JsonBakeExporter {
    fn bake_export(
        &mut self,
        host: &dyn AnimationHost,
        options: &BakeExportOptions,
    ) -> Result<(), String> {
        if options.use_selection {
            return Err("unsupported: selection-limited export".into());
        }
        if options.bake_nla_strips || options.bake_all_bones || options.add_leaf_bones {
            return Err("unsupported: scene has no armature or NLA data to bake".into());
        }
        let animation = host
            .animation()
            .ok_or_else(|| "no animation to bake".to_string())?;

        let baked = bake_animation(
            animation,
            host.frame_rate(),
            &BakeOptions {
                sample_step: options.sample_step,
                simplify_factor: options.simplify_factor,
            },
        )
        .map_err(|e| e.to_string())?;
        let text = serde_json::to_string_pretty(&baked)
            .map_err(|e| format!("cannot serialize baked animation: {e}"))?;
        Self::write(&options.path, &text)
    }
}
