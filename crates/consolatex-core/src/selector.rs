//! Block identity handles and child selectors.
//!
//! Children can be addressed three ways: by position, by label, or by
//! identity. [`Selector`] carries one of the three so that `get`, `set`,
//! `remove` and `delete` can share a single entry point.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Block`](crate::Block).
///
/// Assigned when a block is created. Cloning a block gives the copy a
/// fresh id, so two blocks with the same id are the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    #[inline]
    pub(crate) fn next() -> Self {
        BlockId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Addresses a single child of a block.
///
/// # Example
///
/// ```rust
/// use consolatex_core::Selector;
///
/// assert_eq!(Selector::from(-1), Selector::Index(-1));
/// assert_eq!(Selector::from("intro"), Selector::Label("intro".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Position among the current children. Negative values count from the end.
    Index(isize),
    /// First child whose label equals this string.
    Label(String),
    /// The child with this identity.
    Handle(BlockId),
}

impl Selector {
    /// Variant name, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Selector::Index(_) => "index",
            Selector::Label(_) => "label",
            Selector::Handle(_) => "handle",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(index) => write!(f, "[{}]", index),
            Selector::Label(label) => write!(f, "{:?}", label),
            Selector::Handle(id) => write!(f, "{}", id),
        }
    }
}

impl From<isize> for Selector {
    fn from(index: isize) -> Self {
        Selector::Index(index)
    }
}

impl From<i32> for Selector {
    fn from(index: i32) -> Self {
        Selector::Index(index as isize)
    }
}

impl From<usize> for Selector {
    /// Positions past `isize::MAX` can never exist, so they saturate.
    fn from(index: usize) -> Self {
        Selector::Index(isize::try_from(index).unwrap_or(isize::MAX))
    }
}

impl From<&str> for Selector {
    fn from(label: &str) -> Self {
        Selector::Label(label.to_string())
    }
}

impl From<String> for Selector {
    fn from(label: String) -> Self {
        Selector::Label(label)
    }
}

impl From<&String> for Selector {
    fn from(label: &String) -> Self {
        Selector::Label(label.clone())
    }
}

impl From<BlockId> for Selector {
    fn from(id: BlockId) -> Self {
        Selector::Handle(id)
    }
}
