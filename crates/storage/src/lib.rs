use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use story::{Branch, ImageAsset, Project};
use thiserror::Error;

/// Manifest file written at the root of every saved project folder.
pub const MANIFEST_FILE: &str = "project.json";

const QUANTITIES_FILE: &str = "quantities.txt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("project already exists: {}", .0.display())]
    ProjectExists(PathBuf),
    #[error("invalid project manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fixed parent directory for saved projects and the quantities source file:
/// `~/Desktop/Scanner`.
pub fn scanner_root() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(std::env::temp_dir)
        .join("Scanner")
}

/// Default location of the quantities source read by the Refresh action.
pub fn quantities_path() -> PathBuf {
    scanner_root().join(QUANTITIES_FILE)
}

/// On-disk shape of `project.json`. Parsing is tolerant: any missing key
/// falls back to its default rather than failing the load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manifest {
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub branches: Vec<ManifestBranch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestBranch {
    #[serde(default = "default_branch_name")]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub image_paths: Vec<String>,
}

fn default_branch_name() -> String {
    "Branch".to_string()
}

/// What a save actually did: where it wrote, how many images it copied, and
/// which images it had to leave out.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub project_dir: PathBuf,
    pub copied: usize,
    pub skipped: Vec<SkippedImage>,
}

#[derive(Debug, Clone)]
pub struct SkippedImage {
    pub source_path: PathBuf,
    pub reason: String,
}

/// Save `project` into `project_dir`: copy every reference image next to the
/// manifest under its source base name, then write `project.json`.
///
/// Refuses to touch an existing `project_dir`. Individual image copies that
/// fail are skipped (reported in the [`SaveReport`], `stored_name` left
/// unset) and the save continues; only a failed manifest write aborts.
/// Base-name collisions are not disambiguated, the last copy wins.
pub fn save_project(project: &mut Project, project_dir: &Path) -> Result<SaveReport, StorageError> {
    if project_dir.exists() {
        return Err(StorageError::ProjectExists(project_dir.to_path_buf()));
    }
    fs::create_dir_all(project_dir)?;

    let mut report = SaveReport {
        project_dir: project_dir.to_path_buf(),
        copied: 0,
        skipped: Vec::new(),
    };

    let mut branches = Vec::with_capacity(project.branches.len());
    for branch in &mut project.branches {
        let mut image_paths = Vec::new();
        for image in &mut branch.images {
            image.stored_name = None;
            let Some(file_name) = image.source_path.file_name().and_then(|n| n.to_str()) else {
                report.skipped.push(SkippedImage {
                    source_path: image.source_path.clone(),
                    reason: "source path has no usable file name".to_string(),
                });
                continue;
            };
            match fs::copy(&image.source_path, project_dir.join(file_name)) {
                Ok(_) => {
                    image.stored_name = Some(file_name.to_string());
                    image_paths.push(file_name.to_string());
                    report.copied += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        source = %image.source_path.display(),
                        %err,
                        "skipping image copy during save"
                    );
                    report.skipped.push(SkippedImage {
                        source_path: image.source_path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        branches.push(ManifestBranch {
            name: branch.name.clone(),
            prompt: branch.prompt.clone(),
            image_paths,
        });
    }

    let manifest = Manifest {
        story: project.story.clone(),
        branches,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(project_dir.join(MANIFEST_FILE), json)?;
    Ok(report)
}

/// Rebuild a [`Project`] from a manifest file. The directory containing the
/// manifest is the project root; image entries that are missing or unreadable
/// on disk are skipped without failing the load.
pub fn load_project(manifest_path: &Path) -> Result<Project, StorageError> {
    let raw = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&raw)?;
    let project_root = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut project = Project::new();
    project.story = manifest.story;
    for entry in manifest.branches {
        let ManifestBranch {
            name,
            prompt,
            image_paths,
        } = entry;
        let mut branch = Branch::new(name, prompt);
        for stored_name in image_paths {
            let image_path = project_root.join(&stored_name);
            let bytes = match fs::read(&image_path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::debug!(
                        path = %image_path.display(),
                        %err,
                        "skipping unreadable project image"
                    );
                    continue;
                }
            };
            let mut image = ImageAsset::new(image_path, bytes);
            image.stored_name = Some(stored_name);
            branch.images.push(image);
        }
        project.branches.push(branch);
    }
    Ok(project)
}
