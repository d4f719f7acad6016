//! Positional editing of ordered string lists.

use thiserror::Error;

/// List edit errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListEditError {
    #[error("Index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
}

pub type ListResult<T> = Result<T, ListEditError>;

/// Append / replace / remove operations used by the list fields of a draft.
pub trait ListEditor {
    /// Append one empty entry at the end.
    fn append_blank(&mut self);

    /// Replace the entry at `index`.
    fn set_entry(&mut self, index: usize, value: String) -> ListResult<()>;

    /// Remove the entry at `index`; later entries shift down.
    fn remove_entry(&mut self, index: usize) -> ListResult<String>;
}

impl ListEditor for Vec<String> {
    fn append_blank(&mut self) {
        self.push(String::new());
    }

    fn set_entry(&mut self, index: usize, value: String) -> ListResult<()> {
        let len = self.len();
        let slot = self
            .get_mut(index)
            .ok_or(ListEditError::OutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    fn remove_entry(&mut self, index: usize) -> ListResult<String> {
        if index >= self.len() {
            return Err(ListEditError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.remove(index))
    }
}
