//! Read cursor over an ordered, sentinel-terminated sequence.
//!
//! Both the lexer output and the parser output use this: tokens end
//! with an `Eoi` token and nodes end with an `EndOfInput` node. The
//! cursor never consumes items, so callers can look ahead and rewind.

use crate::ast::Node;
use crate::token::Token;

/// Token sequence produced by [`crate::tokenize`].
pub type TokenStream = Cursor<Token>;

/// Top-level node sequence produced by [`crate::parse`].
pub type NodeStream = Cursor<Node>;

/// Saved cursor position, see [`Cursor::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<T> {
    items: Vec<T>,
    pos: usize,
}

impl<T> Cursor<T> {
    /// Wrap a sequence. The cursor starts at the first item.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty; every sequence carries a sentinel.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        assert!(!items.is_empty(), "sequence must end with a sentinel");
        Self { items, pos: 0 }
    }

    /// Item under the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.items[self.pos]
    }

    /// Move to the next item and return it.
    ///
    /// # Panics
    ///
    /// Panics when already on the last item.
    pub fn advance(&mut self) -> &T {
        assert!(
            self.pos + 1 < self.items.len(),
            "cursor advanced past the end of the sequence"
        );
        self.pos += 1;
        &self.items[self.pos]
    }

    /// Item `offset` positions ahead, without moving.
    ///
    /// # Panics
    ///
    /// Panics if the position lies beyond the sequence.
    #[must_use]
    pub fn peek(&self, offset: usize) -> &T {
        &self.items[self.pos + offset]
    }

    /// Whether there is an item after the current one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pos + 1 < self.items.len()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Return to a position saved by [`Cursor::checkpoint`].
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 < self.items.len());
        self.pos = checkpoint.0;
    }

    /// Whole sequence, sentinel included.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<'a, T> IntoIterator for &'a Cursor<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
