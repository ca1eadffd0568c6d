//! In-memory navigation history.

use crate::booking::location::Location;
use crate::booking::navigator::{Navigate, NavigationError, NavigationMode, NavigationRequest};

/// Browser-style history: a list of entries and a cursor.
///
/// `push` drops any forward entries, `replace` overwrites the current entry.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<Location>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the cursor
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn push(&mut self, location: impl Into<Location>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.into());
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: impl Into<Location>) {
        self.entries[self.index] = location.into();
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Move one entry back. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Move one entry forward. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

impl Navigate for MemoryHistory {
    fn location(&self) -> Location {
        self.current().clone()
    }

    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigationError> {
        tracing::trace!(location = %request.location, mode = ?request.mode, "navigate");
        match request.mode {
            NavigationMode::Push => self.push(request.location.clone()),
            NavigationMode::Replace => self.replace(request.location.clone()),
        }
        Ok(())
    }
}
