//! Edit sessions over a local draft copy of a record.
//!
//! Lifecycle: Read → begin_edit → edit* → commit | discard → Read
//!
//! The committed value mirrors what the host last handed us. Committing a
//! draft only hands a copy back to the caller; the committed value changes
//! when the host pushes the accepted record through [`DraftSession::sync`].

mod list;

pub use list::*;

use serde::{Deserialize, Serialize};

/// Display mode of a widget backed by a draft session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Read,
    Edit,
}

/// A committed record plus an independent draft copy.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSession<T> {
    committed: T,
    draft: T,
    mode: EditMode,
    dirty: bool,
}

impl<T: Clone + PartialEq> DraftSession<T> {
    /// Start a session in read mode with the draft equal to `committed`.
    pub fn new(committed: T) -> Self {
        Self {
            draft: committed.clone(),
            committed,
            mode: EditMode::Read,
            dirty: false,
        }
    }

    /// Enter edit mode with a fresh draft of the committed value.
    pub fn begin_edit(&mut self) {
        self.draft = self.committed.clone();
        self.dirty = false;
        self.mode = EditMode::Edit;
    }

    /// Mutate the draft. Returns `None` without touching it in read mode.
    /// The session only becomes dirty when the draft actually changed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        if self.mode != EditMode::Edit {
            return None;
        }
        let before = self.draft.clone();
        let result = f(&mut self.draft);
        if self.draft != before {
            self.dirty = true;
        }
        Some(result)
    }

    /// Leave edit mode, handing back the draft for the host to persist.
    pub fn commit(&mut self) -> Option<T> {
        if self.mode != EditMode::Edit {
            return None;
        }
        self.mode = EditMode::Read;
        self.dirty = false;
        Some(self.draft.clone())
    }

    /// Go back to edit mode with a draft the host failed to store.
    pub fn resume(&mut self, draft: T) {
        self.dirty = draft != self.committed;
        self.draft = draft;
        self.mode = EditMode::Edit;
    }

    /// Throw the draft away and return to read mode.
    pub fn discard(&mut self) {
        self.draft = self.committed.clone();
        self.dirty = false;
        self.mode = EditMode::Read;
    }

    /// Flip between read and edit mode. Leaving edit mode discards the draft.
    pub fn toggle(&mut self) -> EditMode {
        match self.mode {
            EditMode::Read => self.begin_edit(),
            EditMode::Edit => self.discard(),
        }
        self.mode
    }

    /// Replace the committed value with the host's latest record.
    ///
    /// An in-progress draft is left alone; the host must not clobber a record
    /// that is being edited.
    pub fn sync(&mut self, committed: T) {
        if self.mode == EditMode::Read {
            self.draft = committed.clone();
        }
        self.committed = committed;
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Edit
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The value a widget should render: the draft while editing, otherwise
    /// the committed record.
    pub fn current(&self) -> &T {
        match self.mode {
            EditMode::Edit => &self.draft,
            EditMode::Read => &self.committed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_read_mode() {
        let session = DraftSession::new(5);
        assert_eq!(session.mode(), EditMode::Read);
        assert_eq!(*session.draft(), 5);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_edit_ignored_in_read_mode() {
        let mut session = DraftSession::new(vec![1, 2]);
        assert!(session.edit(|v| v.push(3)).is_none());
        assert_eq!(session.draft(), &vec![1, 2]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_commit_returns_draft_and_keeps_committed() {
        let mut session = DraftSession::new(String::from("before"));
        session.begin_edit();
        session.edit(|s| s.push_str(" after"));
        assert!(session.is_dirty());

        let committed = session.commit();
        assert_eq!(committed.as_deref(), Some("before after"));
        assert_eq!(session.committed(), "before");
        assert_eq!(session.mode(), EditMode::Read);
        assert!(session.commit().is_none());
    }

    #[test]
    fn test_failed_edit_leaves_session_clean() {
        let mut session = DraftSession::new(vec![String::from("a")]);
        session.begin_edit();

        let result = session.edit(|v| v.remove_entry(5));
        assert!(matches!(result, Some(Err(ListEditError::OutOfRange { index: 5, len: 1 }))));
        assert!(!session.is_dirty());

        session.edit(|v| v.append_blank());
        assert!(session.is_dirty());
    }

    #[test]
    fn test_resume_restores_unsaved_draft() {
        let mut session = DraftSession::new(1);
        session.begin_edit();
        session.edit(|v| *v = 4);
        let draft = session.commit().unwrap();

        session.resume(draft);
        assert!(session.is_editing());
        assert!(session.is_dirty());
        assert_eq!(*session.draft(), 4);
        assert_eq!(*session.committed(), 1);
    }

    #[test]
    fn test_discard_restores_committed() {
        let mut session = DraftSession::new(10);
        session.begin_edit();
        session.edit(|v| *v = 99);
        session.discard();

        assert_eq!(*session.draft(), 10);
        assert_eq!(session.mode(), EditMode::Read);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_toggle_out_of_edit_discards() {
        let mut session = DraftSession::new(1);
        assert_eq!(session.toggle(), EditMode::Edit);
        session.edit(|v| *v = 2);
        assert_eq!(session.toggle(), EditMode::Read);
        assert_eq!(*session.draft(), 1);
    }

    #[test]
    fn test_sync_while_editing_keeps_draft() {
        let mut session = DraftSession::new(1);
        session.begin_edit();
        session.edit(|v| *v = 2);
        session.sync(3);

        assert_eq!(*session.committed(), 3);
        assert_eq!(*session.draft(), 2);

        session.discard();
        assert_eq!(*session.draft(), 3);
    }

    #[test]
    fn test_begin_edit_picks_up_synced_value() {
        let mut session = DraftSession::new(1);
        session.sync(7);
        session.begin_edit();
        assert_eq!(*session.current(), 7);
    }
}
