use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `asset-gen` with no flags other than the output directory and checks
/// the five logo assets at their fixed sizes.
#[test]
fn test_default_run_writes_logo_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("assets");

    let output = run_asset_gen(&["-o", output_dir.to_str().unwrap()]);
    assert_success(&output);

    let expected = [
        ("icon.png", 1024, 1024),
        ("adaptive-icon.png", 1024, 1024),
        ("notification-icon.png", 96, 96),
        ("favicon.png", 48, 48),
        ("splash.png", 2048, 2048),
    ];
    for (name, width, height) in expected {
        assert_png_size(&output_dir.join(name), width, height);
    }

    // The adaptive icon is the same drawing as the app icon.
    let icon = fs::read(output_dir.join("icon.png")).unwrap();
    let adaptive = fs::read(output_dir.join("adaptive-icon.png")).unwrap();
    assert_eq!(icon, adaptive);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating icon.png (1024x1024)..."));
    assert!(stdout.contains("✓ Created splash.png"));
    assert!(!output_dir.join("assets.json").exists());
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let dir = output_dir.to_str().unwrap();
    let args = ["-o", dir, "--preset", "monogram", "--only", "icon.png,favicon.png"];

    assert_success(&run_asset_gen(&args));
    let first_icon = fs::read(output_dir.join("icon.png")).unwrap();
    let first_favicon = fs::read(output_dir.join("favicon.png")).unwrap();

    assert_success(&run_asset_gen(&args));
    assert_eq!(first_icon, fs::read(output_dir.join("icon.png")).unwrap());
    assert_eq!(first_favicon, fs::read(output_dir.join("favicon.png")).unwrap());
}

#[test]
fn test_missing_font_falls_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run_asset_gen(&[
        "-o",
        output_dir.to_str().unwrap(),
        "--preset",
        "monogram",
        "--font",
        "/no/such/font.ttf",
        "--only",
        "favicon.png,splash.png",
    ]);
    assert_success(&output);

    assert_png_size(&output_dir.join("favicon.png"), 48, 48);
    assert_png_size(&output_dir.join("splash.png"), 1242, 2688);
}

#[test]
fn test_only_writes_selected_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run_asset_gen(&["-o", output_dir.to_str().unwrap(), "--only", "favicon.png"]);
    assert_success(&output);

    let written: Vec<PathBuf> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(written, vec![output_dir.join("favicon.png")]);
}

#[test]
fn test_unknown_asset_fails_with_remediation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run_asset_gen(&["-o", output_dir.to_str().unwrap(), "--only", "logo.svg"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown asset: logo.svg"), "stderr: {stderr}");
    assert!(stderr.contains("create the following files manually"));
    assert!(stderr.contains("icon.png (1024x1024)"));
    assert!(!output_dir.exists());
}

#[test]
fn test_manifest_lists_generated_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run_asset_gen(&[
        "-o",
        output_dir.to_str().unwrap(),
        "--preset",
        "placeholder",
        "--only",
        "favicon.png,notification-icon.png",
        "--manifest",
    ]);
    assert_success(&output);

    let manifest = fs::read_to_string(output_dir.join("assets.json"))
        .expect("assets.json should be written");
    let parsed: serde_json::Value =
        serde_json::from_str(&manifest).expect("assets.json should contain valid JSON");

    assert_eq!(parsed["info"]["preset"], "placeholder");
    assert_eq!(parsed["info"]["version"], 1);

    let images = parsed["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["filename"], "favicon.png");
    assert_eq!(images[0]["width"], 48);
    assert_eq!(images[1]["filename"], "notification-icon.png");
    assert_eq!(images[1]["height"], 96);
}

fn run_asset_gen(args: &[&str]) -> Output {
    Command::new(get_asset_gen_binary_path())
        .args(args)
        .output()
        .expect("Failed to run asset-gen command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("asset-gen command failed");
    }
}

fn assert_png_size(path: &Path, width: u32, height: u32) {
    assert!(path.exists(), "{} should exist", path.display());
    let image = image::open(path).expect("Failed to load generated image");
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "{}",
        path.display()
    );
}

/// Path of the binary built for this test run.
fn get_asset_gen_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_asset-gen"))
}
