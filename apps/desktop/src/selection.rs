use story::BranchId;

/// Identity of a row in the branch tree. Rows carry these by value; they are
/// resolved against the project on use, so a stale reference degrades to a
/// cleared selection instead of dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Branch(BranchId),
    Image { branch: BranchId, index: usize },
}

impl NodeRef {
    /// Branch ancestor of this node. A branch node is its own ancestor; an
    /// image node's ancestor is its parent branch.
    pub fn branch(self) -> BranchId {
        match self {
            NodeRef::Branch(id) => id,
            NodeRef::Image { branch, .. } => branch,
        }
    }
}

/// Current tree selection. Never persisted; rebuilt from clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<NodeRef>,
    pub active_branch: Option<BranchId>,
}

impl SelectionState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_selected(&self, node: NodeRef) -> bool {
        self.selected == Some(node)
    }
}
