use std::process::{Command, Output};

fn rename_pngs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rename_pngs"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run rename_pngs")
}

fn generate_images_list(dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate_images_list"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run generate_images_list")
}

// These must not depend on a tesseract install: the folder is checked first.

#[test]
fn empty_folder_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

    let output = rename_pngs(&[dir.path().to_str().unwrap()]);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No PNG files found"), "{stdout}");
}

#[test]
fn missing_folder_fails_with_folder_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = rename_pngs(&[missing.to_str().unwrap(), "--execute"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
    assert!(!stderr.contains("OCR engine"), "{stderr}");
}

#[test]
fn missing_argument_prints_usage() {
    let output = rename_pngs(&[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn out_of_range_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let output = rename_pngs(&[dir.path().to_str().unwrap(), "--scale", "inf"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn lister_runs_without_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    std::fs::create_dir(&images).unwrap();
    for name in ["b.png", "A.PNG", "skip.txt"] {
        std::fs::write(images.join(name), b"").unwrap();
    }

    let output = generate_images_list(dir.path());

    assert!(output.status.success(), "{output:?}");
    let json = std::fs::read_to_string(dir.path().join("images.json")).unwrap();
    let names: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(names, ["A.PNG", "b.png"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("with 2 images"));
}

#[test]
fn lister_fails_without_images_folder() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate_images_list(dir.path());
    assert!(!output.status.success());
    assert!(!dir.path().join("images.json").exists());
}
