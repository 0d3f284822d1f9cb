use crate::selection::{NodeRef, SelectionState};
use std::fs;
use std::path::PathBuf;
use story::{BranchId, ImageAsset, Project, StoryError, MAX_IMAGES_PER_BRANCH};

/// Preview side effect the shell applies after a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEffect {
    ShowImage { branch: BranchId, index: usize },
    ClearPreview,
}

/// What an image upload actually did.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub added: usize,
    pub failures: Vec<(PathBuf, String)>,
}

/// Owns the project plus the state the tree view needs to drive it: the
/// selection and the two editor drafts. Prompt edits live in `prompt_draft`
/// until the active branch changes (or the project is saved), at which point
/// they are committed to the model.
#[derive(Debug, Default)]
pub struct ProjectController {
    project: Project,
    selection: SelectionState,
    pub prompt_draft: String,
    pub story_draft: String,
}

impl ProjectController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Switch selection. The previously active branch takes the in-progress
    /// prompt draft before anything else happens; the draft is then reloaded
    /// from the newly active branch. Nodes that no longer resolve clear the
    /// selection entirely.
    pub fn select(&mut self, node: Option<NodeRef>) -> SelectEffect {
        self.commit_prompt_draft();

        let resolved = node.filter(|n| self.resolves(*n));
        self.selection.selected = resolved;
        self.selection.active_branch = resolved.map(NodeRef::branch);

        match self
            .selection
            .active_branch
            .and_then(|id| self.project.branch(id))
        {
            Some(branch) => self.prompt_draft = branch.prompt.clone(),
            None => self.prompt_draft.clear(),
        }

        match resolved {
            Some(NodeRef::Image { branch, index }) => SelectEffect::ShowImage { branch, index },
            _ => SelectEffect::ClearPreview,
        }
    }

    fn resolves(&self, node: NodeRef) -> bool {
        match node {
            NodeRef::Branch(id) => self.project.branch(id).is_some(),
            NodeRef::Image { branch, index } => self.project.image(branch, index).is_some(),
        }
    }

    fn commit_prompt_draft(&mut self) {
        if let Some(id) = self.selection.active_branch {
            // Drop trailing newlines picked up from appended quantity lines.
            let text = self.prompt_draft.trim_end_matches('\n').to_string();
            let _ = self.project.set_prompt(id, &text);
        }
    }

    /// Write both editor drafts into the model. Called before a save.
    pub fn commit_drafts(&mut self) {
        self.commit_prompt_draft();
        let story = self.story_draft.trim_end_matches('\n').to_string();
        self.project.set_story(&story);
    }

    /// Create a branch (pool-chosen prompt) and make it the selection, which
    /// commits any outstanding edits on the previously active branch first.
    pub fn add_branch(&mut self, name: &str) -> Result<(BranchId, SelectEffect), StoryError> {
        let id = self.project.add_branch(name)?;
        let effect = self.select(Some(NodeRef::Branch(id)));
        Ok((id, effect))
    }

    /// Read the picked files and append them to `branch`. The capacity check
    /// runs against the picked count before any file is touched and rejects
    /// the whole batch; after that, individual read failures are reported and
    /// the remaining files are still added.
    pub fn upload_images(
        &mut self,
        branch: BranchId,
        picked: Vec<PathBuf>,
    ) -> Result<UploadOutcome, StoryError> {
        let existing = self
            .project
            .branch(branch)
            .ok_or(StoryError::BranchNotFound(branch))?
            .images
            .len();
        if existing + picked.len() > MAX_IMAGES_PER_BRANCH {
            return Err(StoryError::ImageLimit);
        }

        let mut outcome = UploadOutcome::default();
        let mut accepted = Vec::new();
        for path in picked {
            match fs::read(&path) {
                Ok(bytes) => accepted.push(ImageAsset::new(path, bytes)),
                Err(err) => outcome.failures.push((path, err.to_string())),
            }
        }
        outcome.added = accepted.len();
        if !accepted.is_empty() {
            self.project.add_images(branch, accepted)?;
        }
        Ok(outcome)
    }

    /// Wholesale replacement used by load: selection and drafts are cleared
    /// first, then the new project is installed and its story becomes the
    /// story draft. Nothing of the previous project survives.
    pub fn replace_project(&mut self, project: Project) {
        self.selection.clear();
        self.prompt_draft.clear();
        self.project = project;
        self.story_draft = self.project.story.clone();
    }

    /// Append one quantities line to the prompt draft.
    pub fn append_prompt_line(&mut self, line: &str) {
        self.prompt_draft.push_str(line);
        self.prompt_draft.push('\n');
    }
}
