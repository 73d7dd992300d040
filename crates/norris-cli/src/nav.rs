//! Explicit navigation stack for the interactive shell.

use norris_core::fact::NorrisFact;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// The root: the current facts feed.
  FactsList,
  /// Search prompt with suggestions and past terms.
  Search,
  /// One fact, ready to be shared.
  Share(NorrisFact),
}

/// Owns the screen stack. The root screen can never be popped.
#[derive(Debug)]
pub struct Navigator {
  stack: Vec<Screen>,
}

impl Navigator {
  pub fn new() -> Self { Self { stack: vec![Screen::FactsList] } }

  pub fn current(&self) -> &Screen {
    self.stack.last().unwrap_or(&Screen::FactsList)
  }

  pub fn depth(&self) -> usize { self.stack.len() }

  pub fn push(&mut self, screen: Screen) {
    tracing::debug!(?screen, depth = self.stack.len() + 1, "push screen");
    self.stack.push(screen);
  }

  /// Pop the top screen. Returns `None` at the root.
  pub fn pop(&mut self) -> Option<Screen> {
    if self.stack.len() <= 1 {
      return None;
    }
    self.stack.pop()
  }

  pub fn pop_to_root(&mut self) { self.stack.truncate(1); }
}

impl Default for Navigator {
  fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_at_facts_list() {
    let nav = Navigator::new();
    assert_eq!(nav.current(), &Screen::FactsList);
    assert_eq!(nav.depth(), 1);
  }

  #[test]
  fn root_cannot_be_popped() {
    let mut nav = Navigator::new();
    assert_eq!(nav.pop(), None);
    assert_eq!(nav.current(), &Screen::FactsList);
  }

  #[test]
  fn push_pop_and_unwind() {
    let mut nav = Navigator::new();
    nav.push(Screen::Search);
    assert_eq!(nav.current(), &Screen::Search);

    assert_eq!(nav.pop(), Some(Screen::Search));
    assert_eq!(nav.current(), &Screen::FactsList);

    nav.push(Screen::Search);
    nav.push(Screen::Search);
    nav.pop_to_root();
    assert_eq!(nav.depth(), 1);
  }
}
