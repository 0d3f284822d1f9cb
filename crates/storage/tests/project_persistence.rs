use std::fs;
use std::path::Path;

use storage::{load_project, save_project, StorageError, MANIFEST_FILE};
use story::{ImageAsset, Project};

fn write_source_image(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn sample_project(sources: &Path) -> Project {
    let cover = write_source_image(sources, "cover.png", b"cover-bytes");
    let detail = write_source_image(sources, "detail.jpg", b"detail-bytes");

    let mut project = Project::new();
    project.set_story("Once upon a time");
    let hero = project
        .add_branch_with_prompt("Hero path", "A tranquil beach at dawn")
        .unwrap();
    project
        .add_images(
            hero,
            vec![
                ImageAsset::new(cover.clone(), fs::read(&cover).unwrap()),
                ImageAsset::new(detail.clone(), fs::read(&detail).unwrap()),
            ],
        )
        .unwrap();
    project
        .add_branch_with_prompt("Villain path", "A surreal floating fortress")
        .unwrap();
    project
}

#[test]
fn round_trip_preserves_story_branches_and_images() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = tmp.path().join("sources");
    fs::create_dir_all(&sources).unwrap();
    let mut project = sample_project(&sources);

    let project_dir = tmp.path().join("Scanner").join("MyProject");
    let report = save_project(&mut project, &project_dir).unwrap();
    assert_eq!(report.copied, 2);
    assert!(report.skipped.is_empty());

    let loaded = load_project(&project_dir.join(MANIFEST_FILE)).unwrap();
    assert_eq!(loaded.story, "Once upon a time");
    assert_eq!(loaded.branches.len(), 2);
    assert_eq!(loaded.branches[0].name, "Hero path");
    assert_eq!(loaded.branches[0].prompt, "A tranquil beach at dawn");
    assert_eq!(loaded.branches[1].name, "Villain path");

    let images = &loaded.branches[0].images;
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].stored_name.as_deref(), Some("cover.png"));
    assert_eq!(images[0].bytes, b"cover-bytes");
    assert_eq!(images[1].stored_name.as_deref(), Some("detail.jpg"));
    assert_eq!(images[1].bytes, b"detail-bytes");
    assert!(loaded.branches[1].images.is_empty());
}

#[test]
fn save_records_stored_names_on_the_model() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = tmp.path().join("sources");
    fs::create_dir_all(&sources).unwrap();
    let mut project = sample_project(&sources);

    save_project(&mut project, &tmp.path().join("out")).unwrap();
    let images = &project.branches[0].images;
    assert_eq!(images[0].stored_name.as_deref(), Some("cover.png"));
    assert_eq!(images[1].stored_name.as_deref(), Some("detail.jpg"));
}

#[test]
fn save_refuses_existing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let project_dir = tmp.path().join("Taken");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("sentinel.txt"), b"keep me").unwrap();

    let mut project = Project::new();
    project.set_story("unsaved");
    let err = save_project(&mut project, &project_dir).unwrap_err();
    assert!(matches!(err, StorageError::ProjectExists(_)));

    // Nothing inside the existing directory may change.
    assert_eq!(
        fs::read(project_dir.join("sentinel.txt")).unwrap(),
        b"keep me"
    );
    assert!(!project_dir.join(MANIFEST_FILE).exists());
}

#[test]
fn save_skips_unreadable_images_but_writes_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = tmp.path().join("sources");
    fs::create_dir_all(&sources).unwrap();
    let good = write_source_image(&sources, "good.png", b"good");
    let missing = sources.join("missing.png");

    let mut project = Project::new();
    let id = project.add_branch_with_prompt("B", "p").unwrap();
    project
        .add_images(
            id,
            vec![
                ImageAsset::new(good.clone(), b"good".to_vec()),
                ImageAsset::new(missing.clone(), Vec::new()),
            ],
        )
        .unwrap();

    let project_dir = tmp.path().join("Partial");
    let report = save_project(&mut project, &project_dir).unwrap();
    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].source_path, missing);

    let images = &project.branches[0].images;
    assert_eq!(images[0].stored_name.as_deref(), Some("good.png"));
    assert_eq!(images[1].stored_name, None);

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project_dir.join(MANIFEST_FILE)).unwrap())
            .unwrap();
    assert_eq!(
        manifest["Branches"][0]["ImagePaths"],
        serde_json::json!(["good.png"])
    );
}

#[test]
fn manifest_uses_exact_pascal_case_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = tmp.path().join("sources");
    fs::create_dir_all(&sources).unwrap();
    let mut project = sample_project(&sources);

    let project_dir = tmp.path().join("Shape");
    save_project(&mut project, &project_dir).unwrap();

    let raw = fs::read_to_string(project_dir.join(MANIFEST_FILE)).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let top = manifest.as_object().unwrap();
    assert_eq!(top.len(), 2);
    assert!(top.contains_key("Story"));
    assert!(top.contains_key("Branches"));
    let branch = manifest["Branches"][0].as_object().unwrap();
    assert_eq!(branch.len(), 3);
    for key in ["Name", "Prompt", "ImagePaths"] {
        assert!(branch.contains_key(key), "missing manifest key {key}");
    }
    // Struct fields serialize in declaration order.
    assert!(raw.find("\"Story\"").unwrap() < raw.find("\"Branches\"").unwrap());
}

#[test]
fn load_skips_missing_image_files() {
    let tmp = tempfile::tempdir().unwrap();
    let project_dir = tmp.path().join("Holes");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("present.png"), b"here").unwrap();
    fs::write(
        project_dir.join(MANIFEST_FILE),
        r#"{
  "Story": "s",
  "Branches": [
    { "Name": "B", "Prompt": "p", "ImagePaths": ["present.png", "gone.png"] }
  ]
}"#,
    )
    .unwrap();

    let loaded = load_project(&project_dir.join(MANIFEST_FILE)).unwrap();
    let images = &loaded.branches[0].images;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].stored_name.as_deref(), Some("present.png"));
    assert_eq!(images[0].bytes, b"here");
}

#[test]
fn load_tolerates_missing_manifest_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest_path = tmp.path().join(MANIFEST_FILE);

    fs::write(&manifest_path, "{}").unwrap();
    let loaded = load_project(&manifest_path).unwrap();
    assert!(loaded.story.is_empty());
    assert!(loaded.branches.is_empty());

    fs::write(&manifest_path, r#"{"Branches":[{}]}"#).unwrap();
    let loaded = load_project(&manifest_path).unwrap();
    assert_eq!(loaded.branches.len(), 1);
    assert_eq!(loaded.branches[0].name, "Branch");
    assert!(loaded.branches[0].prompt.is_empty());
}

#[test]
fn load_rejects_invalid_json() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest_path = tmp.path().join(MANIFEST_FILE);
    fs::write(&manifest_path, "not a manifest").unwrap();
    assert!(matches!(
        load_project(&manifest_path),
        Err(StorageError::Parse(_))
    ));
}

#[test]
fn load_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_project(&tmp.path().join("nowhere.json")),
        Err(StorageError::Io(_))
    ));
}
