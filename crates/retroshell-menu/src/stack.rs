//! Navigation history: one frame per browsed level.
//!
//! Only the dispatcher writes frame contents. Callers navigate with
//! [`NavigationStack::pop`] and [`NavigationStack::select`].

use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{FileList, ListType, MenuEntry};

use crate::request::DisplaylistRequest;

/// Observable state of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    Empty,
    SingleFrame,
    MultiFrame,
    /// Torn down; every further operation is rejected.
    Destroyed,
}

/// One committed level of navigation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub(crate) request: DisplaylistRequest,
    pub(crate) entries: FileList,
    pub(crate) selection: usize,
}

impl Frame {
    pub(crate) fn new(request: DisplaylistRequest, entries: FileList) -> Self {
        Self {
            request,
            entries,
            selection: 0,
        }
    }

    pub fn list_type(&self) -> ListType {
        self.request.list_type
    }

    /// The request the frame was last built from.
    pub fn request(&self) -> &DisplaylistRequest {
        &self.request
    }

    pub fn entries(&self) -> &FileList {
        &self.entries
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn selected(&self) -> Option<&MenuEntry> {
        self.entries.get(self.selection)
    }

    /// Move the selection, clamped to the last entry.
    pub(crate) fn set_selection(&mut self, index: usize) {
        self.selection = index.min(self.entries.len().saturating_sub(1));
    }
}

/// Ordered frames; the last one is visible.
#[derive(Debug, Default)]
pub struct NavigationStack {
    frames: Vec<Frame>,
    destroyed: bool,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StackState {
        if self.destroyed {
            return StackState::Destroyed;
        }
        match self.frames.len() {
            0 => StackState::Empty,
            1 => StackState::SingleFrame,
            _ => StackState::MultiFrame,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn check_live(&self) -> Result<()> {
        if self.destroyed {
            Err(ShellError::InvalidTarget("navigation stack destroyed".into()))
        } else {
            Ok(())
        }
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub(crate) fn push_frame(&mut self, frame: Frame) -> Result<()> {
        self.check_live()?;
        log::debug!(
            "push {} ({} entries), depth {}",
            frame.list_type(),
            frame.entries.len(),
            self.frames.len() + 1
        );
        self.frames.push(frame);
        Ok(())
    }

    /// Go back one level. Returns the frame that was left.
    pub fn pop(&mut self) -> Result<Option<Frame>> {
        self.check_live()?;
        Ok(self.frames.pop())
    }

    /// Move the selection on the visible frame.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_live()?;
        match self.frames.last_mut() {
            Some(frame) => {
                frame.set_selection(index);
                Ok(())
            },
            None => Err(ShellError::InvalidTarget("no frame to select in".into())),
        }
    }

    /// Tear the stack down. Terminal.
    pub fn destroy(&mut self) {
        self.frames.clear();
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroshell_types::list::EntryKind;

    fn frame(list_type: ListType, labels: &[&str]) -> Frame {
        let mut entries = FileList::new();
        for label in labels {
            entries.push(*label, "", EntryKind::Action);
        }
        Frame::new(DisplaylistRequest::new(list_type), entries)
    }

    #[test]
    fn state_follows_depth() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.state(), StackState::Empty);
        stack.push_frame(frame(ListType::MainMenu, &["a"])).unwrap();
        assert_eq!(stack.state(), StackState::SingleFrame);
        stack.push_frame(frame(ListType::Settings, &["b"])).unwrap();
        assert_eq!(stack.state(), StackState::MultiFrame);
        let left = stack.pop().unwrap().unwrap();
        assert_eq!(left.list_type(), ListType::Settings);
        assert_eq!(stack.state(), StackState::SingleFrame);
        stack.pop().unwrap();
        assert_eq!(stack.state(), StackState::Empty);
        assert!(stack.pop().unwrap().is_none());
    }

    #[test]
    fn destroyed_rejects_everything() {
        let mut stack = NavigationStack::new();
        stack.push_frame(frame(ListType::MainMenu, &["a"])).unwrap();
        stack.destroy();
        assert_eq!(stack.state(), StackState::Destroyed);
        assert!(matches!(stack.pop(), Err(ShellError::InvalidTarget(_))));
        assert!(stack.select(0).is_err());
        assert!(stack.push_frame(frame(ListType::MainMenu, &[])).is_err());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn selection_clamped() {
        let mut stack = NavigationStack::new();
        stack.push_frame(frame(ListType::MainMenu, &["a", "b", "c"])).unwrap();
        stack.select(10).unwrap();
        assert_eq!(stack.top().unwrap().selection(), 2);
        assert_eq!(stack.top().unwrap().selected().unwrap().label, "c");
    }

    #[test]
    fn select_without_frame_fails() {
        let mut stack = NavigationStack::new();
        assert!(stack.select(0).is_err());
    }
}
