//! End-to-end tests for the vir binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn get_vir_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vir"))
}

fn run_vir(state_dir: &Path, args: &[&str]) -> Output {
    Command::new(get_vir_binary())
        .args(args)
        .env("VIR_STATE_DIR", state_dir)
        .env_remove("VIR_MUSIC_ROOT")
        .env_remove("VIR_CACHE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute vir")
}

fn make_library(dir: &Path) -> PathBuf {
    let root = dir.join("music");
    fs::create_dir_all(root.join("album")).unwrap();
    fs::write(root.join("album").join("b.mp3"), b"").unwrap();
    fs::write(root.join("album").join("a.mp3"), b"").unwrap();
    root
}

#[test]
fn test_list_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_library(temp_dir.path());
    let state_dir = temp_dir.path().join("state");

    let output = run_vir(
        &state_dir,
        &["--music-root", root.to_str().unwrap(), "list-files"],
    );
    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "album/a.mp3\nalbum/b.mp3\n"
    );
}

#[test]
fn test_music_root_from_env_and_alias() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_library(temp_dir.path());
    let state_dir = temp_dir.path().join("state");

    let output = Command::new(get_vir_binary())
        .arg("ls")
        .env("VIR_STATE_DIR", &state_dir)
        .env("VIR_MUSIC_ROOT", &root)
        .output()
        .expect("Failed to execute vir");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("album/a.mp3"));
}

#[test]
fn test_rebuild_index_records_music_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_library(temp_dir.path());
    let state_dir = temp_dir.path().join("state");

    let output = run_vir(
        &state_dir,
        &["--music-root", root.to_str().unwrap(), "rebuild-index"],
    );
    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stored = fs::read(state_dir.join("v1-0-0-musicRoot")).unwrap();
    assert_eq!(stored, root.to_str().unwrap().as_bytes());

    let output = run_vir(&state_dir, &["last-root"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        root.to_str().unwrap()
    );
}

#[test]
fn test_gzip_cache_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_library(temp_dir.path());
    let cache_dir = temp_dir.path().join("cache");
    let descriptor = format!("dir:{}?gzip=1", cache_dir.display());

    let output = run_vir(
        &temp_dir.path().join("unused"),
        &[
            "--music-root",
            root.to_str().unwrap(),
            "--cache",
            &descriptor,
            "r",
        ],
    );
    assert!(output.status.success());
    assert!(cache_dir.join("v1-0-0-musicRoot.gz").is_file());
    assert!(!temp_dir.path().join("unused").exists());
}

#[test]
fn test_unknown_backend_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_vir(temp_dir.path(), &["--cache", "ftp:host", "last-root"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("vir/state: could not set up configuration cache"));
}

#[test]
fn test_missing_music_root_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_vir(
        &temp_dir.path().join("state"),
        &["--music-root", "/definitely/not/here", "list-files"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("music library root dir does not exist"));
}
