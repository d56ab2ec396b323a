use crate::Entry;

/// Choices offered when an entry is long-pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Delete,
    Edit,
}

impl EntryAction {
    /// Menu order.
    pub const ALL: [EntryAction; 2] = [EntryAction::Delete, EntryAction::Edit];

    pub fn label(self) -> &'static str {
        match self {
            EntryAction::Delete => "Delete website",
            EntryAction::Edit => "Edit website",
        }
    }
}

/// What the external editor should be opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    New,
    Edit(Entry),
}
