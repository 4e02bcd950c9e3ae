//! Navigation history with back/forward support.

/// Immutable navigation history with back/forward stacks of archive paths.
///
/// Every mutation returns a **new** `History`. Pushing a new path clears
/// the forward stack, as in a web browser. History lives only as long as
/// the view that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    back_stack: Vec<String>,
    forward_stack: Vec<String>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `path` onto the back stack and clears the forward stack.
    pub fn push(&self, path: impl Into<String>) -> Self {
        let mut back_stack = self.back_stack.clone();
        back_stack.push(path.into());
        Self {
            back_stack,
            forward_stack: Vec::new(),
        }
    }

    /// Go back one step from `current`.
    ///
    /// Returns the new history and the path to navigate to, or `None` if
    /// the back stack is empty. `current` goes onto the forward stack.
    pub fn go_back(&self, current: &str) -> Option<(Self, String)> {
        let mut back_stack = self.back_stack.clone();
        let path = back_stack.pop()?;
        let mut forward_stack = self.forward_stack.clone();
        forward_stack.push(current.to_owned());
        Some((
            Self {
                back_stack,
                forward_stack,
            },
            path,
        ))
    }

    /// Go forward one step from `current`. Mirror image of [`History::go_back`].
    pub fn go_forward(&self, current: &str) -> Option<(Self, String)> {
        let mut forward_stack = self.forward_stack.clone();
        let path = forward_stack.pop()?;
        let mut back_stack = self.back_stack.clone();
        back_stack.push(current.to_owned());
        Some((
            Self {
                back_stack,
                forward_stack,
            },
            path,
        ))
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}
