use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Hard cap on reference images per branch, checked when images are added
/// (never retroactively, so a loaded project may exceed it).
pub const MAX_IMAGES_PER_BRANCH: usize = 2;

/// Default prompts offered to a freshly created branch, one picked uniformly.
pub const PROMPT_POOL: [&str; 7] = [
    "A futuristic city skyline at sunset",
    "An enchanted forest with glowing mushrooms and mythical creatures",
    "A steampunk-inspired mechanical dragon in a Victorian-era workshop",
    "A tranquil beach with crystal clear water and a lone palm tree",
    "A portrait of a wise old wizard with a long white beard, holding a crystal ball",
    "A bustling medieval marketplace with vendors, shoppers, and street performers",
    "A surreal landscape with floating islands and waterfalls that flow upwards",
];

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("branch name must not be empty")]
    EmptyName,
    #[error("a branch can hold at most two images")]
    ImageLimit,
    #[error("branch not found: {0}")]
    BranchNotFound(BranchId),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BranchId(pub Uuid);

impl BranchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference image owned by exactly one branch. `stored_name` is the base
/// name the file was copied under inside the project folder; it is populated
/// only by a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    pub source_path: PathBuf,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub stored_name: Option<String>,
}

impl ImageAsset {
    pub fn new(source_path: PathBuf, bytes: Vec<u8>) -> Self {
        Self {
            source_path,
            bytes,
            stored_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub prompt: String,
    pub images: Vec<ImageAsset>,
}

impl Branch {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: BranchId::new(),
            name: name.into(),
            prompt: prompt.into(),
            images: Vec::new(),
        }
    }
}

/// A story plus its branches, in insertion order. The unit of save/load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub story: String,
    pub branches: Vec<Branch>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a branch with a pool-chosen prompt and return its id.
    pub fn add_branch(&mut self, name: &str) -> Result<BranchId, StoryError> {
        let prompt = random_prompt();
        self.add_branch_with_prompt(name, &prompt)
    }

    pub fn add_branch_with_prompt(
        &mut self,
        name: &str,
        prompt: &str,
    ) -> Result<BranchId, StoryError> {
        if name.trim().is_empty() {
            return Err(StoryError::EmptyName);
        }
        let branch = Branch::new(name, prompt);
        let id = branch.id;
        self.branches.push(branch);
        Ok(id)
    }

    /// Append a batch of images to a branch. The capacity check is
    /// all-or-nothing: an oversized batch is rejected whole and the branch
    /// is left untouched.
    pub fn add_images(
        &mut self,
        branch: BranchId,
        incoming: Vec<ImageAsset>,
    ) -> Result<(), StoryError> {
        let target = self
            .branch_mut(branch)
            .ok_or(StoryError::BranchNotFound(branch))?;
        if target.images.len() + incoming.len() > MAX_IMAGES_PER_BRANCH {
            return Err(StoryError::ImageLimit);
        }
        target.images.extend(incoming);
        Ok(())
    }

    pub fn set_prompt(&mut self, branch: BranchId, text: &str) -> Result<(), StoryError> {
        let target = self
            .branch_mut(branch)
            .ok_or(StoryError::BranchNotFound(branch))?;
        target.prompt = text.to_string();
        Ok(())
    }

    pub fn set_story(&mut self, text: &str) {
        self.story = text.to_string();
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn branch_mut(&mut self, id: BranchId) -> Option<&mut Branch> {
        self.branches.iter_mut().find(|b| b.id == id)
    }

    pub fn image(&self, branch: BranchId, index: usize) -> Option<&ImageAsset> {
        self.branch(branch).and_then(|b| b.images.get(index))
    }

    /// Suggested name for the next branch: "Branch 1", "Branch 2", ...
    pub fn next_branch_name(&self) -> String {
        format!("Branch {}", self.branches.len() + 1)
    }
}

pub fn random_prompt() -> String {
    let mut rng = rand::thread_rng();
    PROMPT_POOL
        .choose(&mut rng)
        .copied()
        .unwrap_or(PROMPT_POOL[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(name: &str) -> ImageAsset {
        ImageAsset::new(PathBuf::from(name), vec![0xAB, 0xCD])
    }

    #[test]
    fn test_add_branch_appends_in_order() {
        let mut project = Project::new();
        let a = project.add_branch("First").unwrap();
        let b = project.add_branch("Second").unwrap();
        assert_eq!(project.branches.len(), 2);
        assert_eq!(project.branches[0].id, a);
        assert_eq!(project.branches[1].id, b);
        assert_eq!(project.branches[0].name, "First");
    }

    #[test]
    fn test_add_branch_rejects_blank_names() {
        let mut project = Project::new();
        assert!(matches!(
            project.add_branch(""),
            Err(StoryError::EmptyName)
        ));
        assert!(matches!(
            project.add_branch("   "),
            Err(StoryError::EmptyName)
        ));
        assert!(project.branches.is_empty());
    }

    #[test]
    fn test_add_branch_picks_prompt_from_pool() {
        let mut project = Project::new();
        let id = project.add_branch("Named").unwrap();
        let prompt = &project.branch(id).unwrap().prompt;
        assert!(PROMPT_POOL.contains(&prompt.as_str()));
    }

    #[test]
    fn test_add_images_within_limit() {
        let mut project = Project::new();
        let id = project.add_branch("B").unwrap();
        project.add_images(id, vec![img("a.png"), img("b.png")]).unwrap();
        assert_eq!(project.branch(id).unwrap().images.len(), 2);
    }

    #[test]
    fn test_third_image_is_rejected() {
        let mut project = Project::new();
        let id = project.add_branch("B").unwrap();
        project.add_images(id, vec![img("a.png"), img("b.png")]).unwrap();
        assert!(matches!(
            project.add_images(id, vec![img("c.png")]),
            Err(StoryError::ImageLimit)
        ));
        assert_eq!(project.branch(id).unwrap().images.len(), 2);
    }

    #[test]
    fn test_image_batch_is_all_or_nothing() {
        let mut project = Project::new();
        let id = project.add_branch("B").unwrap();
        project.add_images(id, vec![img("a.png")]).unwrap();
        assert!(matches!(
            project.add_images(id, vec![img("b.png"), img("c.png")]),
            Err(StoryError::ImageLimit)
        ));
        let images = &project.branch(id).unwrap().images;
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].source_path, PathBuf::from("a.png"));
    }

    #[test]
    fn test_set_prompt_on_unknown_branch_fails() {
        let mut project = Project::new();
        let stale = BranchId::new();
        assert!(matches!(
            project.set_prompt(stale, "text"),
            Err(StoryError::BranchNotFound(_))
        ));
    }

    #[test]
    fn test_next_branch_name_counts_from_one() {
        let mut project = Project::new();
        assert_eq!(project.next_branch_name(), "Branch 1");
        project.add_branch("First").unwrap();
        assert_eq!(project.next_branch_name(), "Branch 2");
    }
}
