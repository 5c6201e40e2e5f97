use crate::manifest::{write_manifest, ManifestFile};
use crate::presets::{self, AssetEntry, Preset};
use crate::text::FontSource;
use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Debug, Clone, Parser)]
#[clap(
    name = "asset-gen",
    about = "Draw the icon, favicon and splash assets of the app bundle"
)]
pub struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "assets")]
    pub output: PathBuf,

    /// Design to draw.
    #[clap(short, long, value_enum, default_value_t = Preset::Logo)]
    pub preset: Preset,

    /// TrueType font used for labels. The built-in font is used when it can't be loaded.
    #[clap(long, value_name = "PATH", default_value = "arial.ttf")]
    pub font: PathBuf,

    /// Generate only these files (e.g. icon.png,favicon.png).
    #[clap(long, value_delimiter = ',', value_name = "NAMES")]
    pub only: Option<Vec<String>>,

    /// Also write assets.json listing the generated files
    #[clap(long)]
    pub manifest: bool,

    /// Log more diagnostics (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from("assets"),
            preset: Preset::Logo,
            font: PathBuf::from("arial.ttf"),
            only: None,
            manifest: false,
            verbose: 0,
        }
    }
}

/// A file written by [`generate_assets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Draws every selected asset of the preset and writes it under
/// `args.output`, replacing existing files.
pub fn generate_assets(args: &Args) -> Result<Vec<GeneratedAsset>> {
    let table = presets::asset_table(args.preset)?;
    let entries = select_entries(&table, args.only.as_deref())?;

    create_dir_all(&args.output).context("Can't create output directory")?;

    let font = FontSource::load(&args.font);

    println!("Creating {} assets...", args.preset);
    let mut generated = Vec::new();
    for entry in entries {
        println!(
            "Creating {} ({}x{})...",
            entry.filename, entry.width, entry.height
        );
        match generate_asset(args.preset, entry, &font, &args.output) {
            Ok(asset) => {
                println!("✓ Created {}", entry.filename);
                generated.push(asset);
            }
            Err(err) if entry.optional => {
                log::warn!("Skipped optional {}: {err:#}", entry.filename);
            }
            Err(err) => return Err(err),
        }
    }

    if args.manifest {
        let mut manifest = ManifestFile::new(args.preset.name());
        for asset in &generated {
            let filename = asset
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            manifest.add_image(&filename, asset.width, asset.height);
        }
        write_manifest(&args.output, &manifest)?;
        println!("✓ Created {}", crate::manifest::MANIFEST_FILENAME);
    }

    println!("\nAll assets created successfully!");
    Ok(generated)
}

fn generate_asset(
    preset: Preset,
    entry: &AssetEntry,
    font: &FontSource,
    out_dir: &Path,
) -> Result<GeneratedAsset> {
    let started = Instant::now();
    let canvas = presets::render(preset, entry, font)
        .with_context(|| format!("Failed to draw {}", entry.filename))?;
    log::debug!("drew {} in {:?}", entry.filename, started.elapsed());

    let path = out_dir.join(&entry.filename);
    canvas.save_png(&path)?;

    Ok(GeneratedAsset {
        path,
        width: canvas.width(),
        height: canvas.height(),
    })
}

/// Entries named in `only`, in table order, or the whole table.
fn select_entries<'a>(
    table: &'a [AssetEntry],
    only: Option<&[String]>,
) -> Result<Vec<&'a AssetEntry>> {
    let Some(names) = only else {
        return Ok(table.iter().collect());
    };

    for name in names {
        if !table.iter().any(|entry| &entry.filename == name) {
            let available: Vec<&str> = table.iter().map(|e| e.filename.as_str()).collect();
            anyhow::bail!(
                "Unknown asset: {}. Available assets: {}",
                name,
                available.join(", ")
            );
        }
    }

    Ok(table
        .iter()
        .filter(|entry| names.contains(&entry.filename))
        .collect())
}

/// Instructions shown when generation fails: the files the app bundle needs,
/// so they can be made by hand.
pub fn remediation(preset: Preset) -> String {
    let mut text = String::from("Could not generate the assets.\n");
    if let Ok(table) = presets::asset_table(preset) {
        text.push_str("\nAlternatively, create the following files manually:\n");
        for entry in table {
            text.push_str(&format!(
                "  - {} ({}x{})\n",
                entry.filename, entry.width, entry.height
            ));
        }
    }
    text
}
