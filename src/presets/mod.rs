//! The three fixed asset designs and the files each one produces.

use crate::canvas::Canvas;
use crate::text::FontSource;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fmt};

pub mod logo;
pub mod monogram;
pub mod placeholder;

/// Which design to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Gradient disk with a calendar card, hearts and a notification bell
    Logo,
    /// Pink square with a ringed disk and an "LD" monogram
    Monogram,
    /// Flat color with a centered label
    Placeholder,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Logo => "logo",
            Preset::Monogram => "monogram",
            Preset::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an output file is used for in the app bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Icon,
    AdaptiveIcon,
    NotificationIcon,
    Favicon,
    Splash,
}

/// One output file of a preset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetEntry {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub role: Role,
    /// A failure on this file is reported but does not fail the run.
    #[serde(default)]
    pub optional: bool,
}

/// Files produced by `preset`, in generation order.
pub fn asset_table(preset: Preset) -> Result<Vec<AssetEntry>> {
    let table_json = include_str!("assets.json");
    let mut table: HashMap<String, Vec<AssetEntry>> =
        serde_json::from_str(table_json).context("Failed to parse the asset table")?;
    table
        .remove(preset.name())
        .with_context(|| format!("No assets defined for preset {preset}"))
}

/// Draws one asset of `preset`.
pub fn render(preset: Preset, entry: &AssetEntry, font: &FontSource) -> Result<Canvas> {
    match preset {
        Preset::Logo => logo::render(entry.width),
        Preset::Monogram => match entry.role {
            Role::Splash => monogram::render_splash(entry.width, entry.height, font),
            _ => monogram::render_icon(entry.width, font),
        },
        Preset::Placeholder => placeholder::render(entry, font),
    }
}
