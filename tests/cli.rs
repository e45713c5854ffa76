use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LINE_SCRIPT: &str = r#"
container = { width = 120, height = 80 }

[[steps]]
action = "tool"
tool = "line"

[[steps]]
action = "down"
x = 10
y = 10

[[steps]]
action = "move"
x = 100
y = 60

[[steps]]
action = "up"
"#;

const BLANK_SCRIPT: &str = r#"
container = { width = 64, height = 64 }

[[steps]]
action = "clear"
"#;

fn sketchpad_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sketchpad").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", home);
    cmd
}

fn write_script(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replay a sketch gesture script and export the canvas as PNG",
        ));
}

#[test]
fn script_argument_is_required() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn drawn_script_writes_png() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "line.toml", LINE_SCRIPT);
    let output = temp.path().join("out.png");

    sketchpad_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 120x80 sketch"));

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn blank_canvas_is_not_exported_without_force() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "blank.toml", BLANK_SCRIPT);
    let output = temp.path().join("out.png");

    sketchpad_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("[success] Canvas cleared!"))
        .stdout(predicate::str::contains("Canvas is blank"));
    assert!(!output.exists());

    sketchpad_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 64x64 sketch"));
    assert!(output.exists());
}

#[test]
fn data_url_is_printed_without_writing_file() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "line.toml", LINE_SCRIPT);

    sketchpad_cmd(temp.path())
        .current_dir(temp.path())
        .arg(&script)
        .arg("--data-url")
        .assert()
        .success()
        .stdout(predicate::str::contains("data:image/png;base64,iVBORw0KGgo"));
    assert!(!temp.path().join("sketch.png").exists());
}

#[test]
fn missing_script_reports_path() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(temp.path())
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "line.toml", LINE_SCRIPT);
    let config = write_script(&temp, "config.toml", "[drawing\n");

    sketchpad_cmd(temp.path())
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn config_from_xdg_home_is_applied() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("sketchpad");
    fs::create_dir_all(&config_dir).unwrap();
    // a single-pixel brush still marks the canvas
    fs::write(config_dir.join("config.toml"), "[drawing]\ndefault_size = 1\n").unwrap();
    let script = write_script(&temp, "line.toml", LINE_SCRIPT);
    let output = temp.path().join("out.png");

    sketchpad_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}
