use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn zenride_icon() -> Command {
    Command::new(env!("CARGO_BIN_EXE_zenride-icon"))
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("zenride-icon command failed");
    }
}

fn assert_opaque_icon(path: &Path) {
    let img = image::open(path).expect("Generated icon should decode");
    assert_eq!(img.width(), 1024);
    assert_eq!(img.height(), 1024);
    assert_eq!(img.color(), image::ColorType::Rgb8, "icon must not carry alpha");
}

/// Runs `zenride-icon -o <tmp>/AppIcon.appiconset/icon_1024.png --contents-json`
/// and checks the PNG and the asset catalog entry.
#[test]
fn test_generates_icon_and_contents_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let icon_dir = temp_dir.path().join("AppIcon.appiconset");
    let icon_path = icon_dir.join("icon_1024.png");

    let output = zenride_icon()
        .arg("-o")
        .arg(&icon_path)
        .arg("--contents-json")
        .output()
        .expect("Failed to run zenride-icon");
    assert_success(&output);
    assert_opaque_icon(&icon_path);

    let contents = std::fs::read_to_string(icon_dir.join("Contents.json"))
        .expect("Contents.json should exist next to the icon");
    let parsed: serde_json::Value =
        serde_json::from_str(&contents).expect("Contents.json should contain valid JSON");
    let images = parsed["images"].as_array().expect("images should be an array");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["filename"], "icon_1024.png");
    assert_eq!(images[0]["size"], "1024x1024");
    assert_eq!(parsed["info"]["version"], 1);
}

/// A dumped scene rendered through `--scene` reproduces the built-in variant.
#[test]
fn test_dumped_scene_renders_identically() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let builtin = temp_dir.path().join("builtin.png");
    let from_file = temp_dir.path().join("from_file.png");
    let scene_path = temp_dir.path().join("ember.json");

    let dump = zenride_icon()
        .args(["--variant", "ember-dusk", "--dump-scene"])
        .output()
        .expect("Failed to run zenride-icon");
    assert_success(&dump);
    let scene: serde_json::Value =
        serde_json::from_slice(&dump.stdout).expect("--dump-scene should print JSON");
    assert_eq!(scene["name"], "ember-dusk");
    std::fs::write(&scene_path, &dump.stdout).unwrap();

    let output = zenride_icon()
        .args(["--variant", "ember-dusk", "-o"])
        .arg(&builtin)
        .output()
        .expect("Failed to run zenride-icon");
    assert_success(&output);

    let output = zenride_icon()
        .arg("--scene")
        .arg(&scene_path)
        .arg("-o")
        .arg(&from_file)
        .output()
        .expect("Failed to run zenride-icon");
    assert_success(&output);

    assert_eq!(
        std::fs::read(&builtin).unwrap(),
        std::fs::read(&from_file).unwrap()
    );
}

#[test]
fn test_invalid_scene_file_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let scene_path = temp_dir.path().join("broken.json");
    let icon_path = temp_dir.path().join("icon.png");

    let dump = zenride_icon()
        .arg("--dump-scene")
        .output()
        .expect("Failed to run zenride-icon");
    assert_success(&dump);
    let mut scene: serde_json::Value = serde_json::from_slice(&dump.stdout).unwrap();
    scene["horizon_y"] = serde_json::json!(2048.0);
    std::fs::write(&scene_path, serde_json::to_vec_pretty(&scene).unwrap()).unwrap();

    let output = zenride_icon()
        .arg("--scene")
        .arg(&scene_path)
        .arg("-o")
        .arg(&icon_path)
        .output()
        .expect("Failed to run zenride-icon");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("horizon_y"), "stderr: {stderr}");
    assert!(!icon_path.exists());
}

#[test]
fn test_inspect_icon_rejects_wrong_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let small = temp_dir.path().join("small.png");
    image::RgbImage::from_pixel(64, 64, image::Rgb([1, 2, 3]))
        .save(&small)
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_inspect_icon"))
        .arg(&small)
        .output()
        .expect("Failed to run inspect_icon");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected 1024x1024"));
}
