//! `assets.json`: a listing of the files written by one run.
//!
//! The manifest carries no timestamps, so two runs with the same preset and
//! file selection write identical bytes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub const MANIFEST_FILENAME: &str = "assets.json";

/// Root structure of `assets.json`.
#[derive(Serialize, Debug, Clone)]
pub struct ManifestFile {
    /// One entry per written image, in generation order
    pub images: Vec<ManifestEntry>,

    /// Which tool and preset produced the images
    pub info: Info,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// Format version of the manifest
    pub version: u8,

    /// The tool that wrote the images
    pub generator: String,

    /// Name of the preset the images were drawn with
    pub preset: String,
}

impl ManifestFile {
    pub fn new(preset: &str) -> Self {
        Self {
            images: Vec::new(),
            info: Info {
                version: 1,
                generator: env!("CARGO_PKG_NAME").to_string(),
                preset: preset.to_string(),
            },
        }
    }

    pub fn add_image(&mut self, filename: &str, width: u32, height: u32) {
        self.images.push(ManifestEntry {
            filename: filename.to_string(),
            width,
            height,
        });
    }
}

/// Writes `assets.json` into `dir`, replacing any previous manifest.
pub fn write_manifest(dir: &Path, manifest: &ManifestFile) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize assets.json")?;
    std::fs::write(dir.join(MANIFEST_FILENAME), json).context("Failed to write assets.json")
}
