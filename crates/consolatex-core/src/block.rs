//! The block container.
//!
//! A [`Block`] is a node in a composite text tree: either a branch holding
//! an ordered list of typed children, or a leaf holding a raw value. The
//! kind a block was created with decides which one it is.
//!
//! Children are owned by value. A child therefore belongs to exactly one
//! parent, moving it elsewhere means removing it first, and a block can
//! never contain itself.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::slice;

use log::{debug, trace};

use crate::error::{BlockError, Result};
use crate::kind::BlockKind;
use crate::selector::{BlockId, Selector};

/// A node in a typed composite text tree.
///
/// # Example
///
/// ```rust
/// use consolatex_core::{Block, Word};
///
/// let mut word = Block::new(&Word);
/// word.append(Block::char('h')).unwrap();
/// word.append(Block::char('i')).unwrap();
/// assert_eq!(word.render(), "hi");
///
/// word.remove(0).unwrap();
/// assert_eq!(word.render(), "i");
/// ```
#[derive(Debug)]
pub struct Block {
    id: BlockId,
    kind: &'static dyn BlockKind,
    label: Option<String>,
    /// Cached `kind.content_types().is_empty()`.
    leaf: bool,
    /// Raw value rendered by leaves. Always empty for branches.
    value: String,
    children: Vec<Block>,
}

impl Block {
    /// Create an empty block of the given kind.
    ///
    /// For a leaf kind the value is empty. If the kind's
    /// [`validate_value`](BlockKind::validate_value) rejects the empty
    /// string (as [`Char`](crate::Char) does), the block can still be
    /// rendered but no container will accept it.
    pub fn new(kind: &'static dyn BlockKind) -> Self {
        Self {
            id: BlockId::next(),
            kind,
            label: None,
            leaf: kind.content_types().is_empty(),
            value: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf of the given kind holding a raw value.
    ///
    /// Fails with [`BlockError::ValueOnBranch`] if the kind holds children
    /// and the value is not empty, or with whatever the kind's
    /// [`validate_value`](BlockKind::validate_value) reports.
    pub fn leaf(kind: &'static dyn BlockKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let block = Self::new(kind);
        if !block.leaf {
            if value.is_empty() {
                return Ok(block);
            }
            return Err(BlockError::ValueOnBranch { kind: kind.name() });
        }
        kind.validate_value(&value)?;
        Ok(Self { value, ..block })
    }

    /// Build a leaf from a value already known to satisfy its kind.
    pub(crate) fn leaf_unchecked(kind: &'static dyn BlockKind, value: String) -> Self {
        debug_assert!(kind.validate_value(&value).is_ok());
        Self {
            value,
            ..Self::new(kind)
        }
    }

    /// Build a block from children already known to satisfy its kind.
    pub(crate) fn with_children_unchecked(
        kind: &'static dyn BlockKind,
        children: Vec<Block>,
    ) -> Self {
        debug_assert!(children.iter().all(|c| kind.content_types().admits(c)));
        Self {
            children,
            ..Self::new(kind)
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    /// Identity of this block.
    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The kind this block was created with.
    #[inline]
    pub fn kind(&self) -> &'static dyn BlockKind {
        self.kind
    }

    /// Name of this block's kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check if this block's kind admits no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// The raw value of a leaf, `None` for branches.
    pub fn value(&self) -> Option<&str> {
        if self.is_leaf() {
            Some(&self.value)
        } else {
            None
        }
    }

    /// The label, if any.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set or replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Remove the label, returning it.
    pub fn clear_label(&mut self) -> Option<String> {
        self.label.take()
    }

    /// Number of direct children.
    #[inline]
    pub fn size(&self) -> usize {
        self.children.len()
    }

    /// Check if there are no direct children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total leaf weight of the subtree.
    ///
    /// For a leaf this is the kind's [`leaf_weight`](BlockKind::leaf_weight)
    /// (1 for a character), for a branch the sum over all children.
    pub fn total_length(&self) -> usize {
        if self.is_leaf() {
            self.kind.leaf_weight(&self.value)
        } else {
            self.children.iter().map(Block::total_length).sum()
        }
    }

    /// The direct children in order.
    #[inline]
    pub fn children(&self) -> &[Block] {
        &self.children
    }

    /// Consume the block, returning its children.
    pub fn into_children(self) -> Vec<Block> {
        self.children
    }

    /// Iterate over the direct children.
    ///
    /// Each call starts an independent iteration over the children as they
    /// are now; any number of iterations may be in flight at once.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.children.iter(),
        }
    }

    // ------------------------------------------------------------------
    // Validation and index resolution
    // ------------------------------------------------------------------

    /// Check that `block` may become a child of this block.
    ///
    /// A leaf child must also hold a value its kind accepts.
    pub fn validate(&self, block: &Block) -> Result<()> {
        let allowed = self.kind.content_types();
        if allowed.is_empty() {
            debug!("{} rejected {}: no content types", self.name(), block.name());
            return Err(BlockError::InvalidConfiguration { kind: self.name() });
        }
        if !allowed.admits(block) {
            debug!("{} rejected {}: kind not allowed", self.name(), block.name());
            return Err(BlockError::TypeMismatch {
                kind: block.name(),
                expected: allowed.names(),
            });
        }
        if block.leaf {
            block.kind.validate_value(&block.value).inspect_err(|_| {
                debug!("{} rejected {}: invalid value", self.name(), block.name());
            })?;
        }
        Ok(())
    }

    /// Resolve a possibly negative index against the current length.
    ///
    /// Negative indices count from the end once: `-1` is the last child and
    /// `-len` the first. Anything outside `0..len` after that fails.
    pub fn roll_index(&self, index: isize) -> Result<usize> {
        let len = self.children.len();
        let resolved = if index < 0 {
            // len never exceeds isize::MAX, so neither cast nor sum overflows
            index + len as isize
        } else {
            index
        };
        if resolved >= 0 && (resolved as usize) < len {
            Ok(resolved as usize)
        } else {
            Err(BlockError::Index { index, len })
        }
    }

    /// Position of the first child carrying `label`.
    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.label.as_deref() == Some(label))
    }

    /// Position of the child with identity `id`.
    pub fn position_of(&self, id: BlockId) -> Option<usize> {
        self.children.iter().position(|child| child.id == id)
    }

    /// Check if a direct child has identity `id`.
    pub fn contains(&self, id: BlockId) -> bool {
        self.position_of(id).is_some()
    }

    fn find_label(&self, label: &str) -> Result<usize> {
        self.position_of_label(label).ok_or_else(|| BlockError::Key {
            label: label.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append a child at the end.
    pub fn append(&mut self, block: Block) -> Result<()> {
        self.validate(&block)?;
        trace!("{}: append {} at {}", self.name(), block.name(), self.children.len());
        self.children.push(block);
        Ok(())
    }

    /// Insert a child after the first `after` existing children.
    ///
    /// `after == 0` inserts before everything. An `after` past the current
    /// length is not an error: the block is appended at the end.
    pub fn insert(&mut self, block: Block, after: usize) -> Result<()> {
        self.validate(&block)?;
        let at = after.min(self.children.len());
        trace!("{}: insert {} at {}", self.name(), block.name(), at);
        self.children.insert(at, block);
        Ok(())
    }

    /// Append every block, or none of them if any is rejected.
    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) -> Result<()> {
        let blocks: Vec<Block> = blocks.into_iter().collect();
        for block in &blocks {
            self.validate(block)?;
        }
        trace!("{}: extend by {}", self.name(), blocks.len());
        self.children.extend(blocks);
        Ok(())
    }

    /// Remove a child by index, label or identity.
    pub fn remove(&mut self, selector: impl Into<Selector>) -> Result<Block> {
        match selector.into() {
            Selector::Index(index) => self.remove_index(index),
            Selector::Label(label) => self.remove_label(&label),
            Selector::Handle(id) => self.remove_block(id),
        }
    }

    /// Remove and return the child at `index`.
    pub fn remove_index(&mut self, index: isize) -> Result<Block> {
        let at = self.roll_index(index)?;
        trace!("{}: remove at {}", self.name(), at);
        Ok(self.children.remove(at))
    }

    /// Remove and return the first child labeled `label`.
    pub fn remove_label(&mut self, label: &str) -> Result<Block> {
        let at = self.find_label(label)?;
        trace!("{}: remove {:?} at {}", self.name(), label, at);
        Ok(self.children.remove(at))
    }

    /// Remove and return the child with identity `id`.
    ///
    /// The other children keep their relative order.
    pub fn remove_block(&mut self, id: BlockId) -> Result<Block> {
        let at = self
            .position_of(id)
            .ok_or(BlockError::NotFound { id })?;
        trace!("{}: remove {} at {}", self.name(), id, at);
        Ok(self.children.remove(at))
    }

    /// Replace the child at `selector`, returning the old one.
    ///
    /// Identity selectors are rejected with [`BlockError::InvalidKey`].
    pub fn set(&mut self, selector: impl Into<Selector>, block: Block) -> Result<Block> {
        match selector.into() {
            Selector::Index(index) => self.set_index(index, block),
            Selector::Label(label) => self.set_by_label(&label, block),
            Selector::Handle(_) => Err(BlockError::InvalidKey {
                selector: "handle",
                operation: "set",
            }),
        }
    }

    /// Replace the child at `index`, returning the old one.
    pub fn set_index(&mut self, index: isize, block: Block) -> Result<Block> {
        self.validate(&block)?;
        let at = self.roll_index(index)?;
        Ok(self.replace_at(at, block))
    }

    /// Replace the first child labeled `label`, returning the old one.
    pub fn set_by_label(&mut self, label: &str, block: Block) -> Result<Block> {
        self.validate(&block)?;
        let at = self.find_label(label)?;
        Ok(self.replace_at(at, block))
    }

    fn replace_at(&mut self, at: usize, block: Block) -> Block {
        trace!("{}: set {} at {}", self.name(), block.name(), at);
        mem::replace(&mut self.children[at], block)
    }

    /// Remove and return a child by index or label.
    ///
    /// Identity selectors are rejected with [`BlockError::InvalidKey`];
    /// use [`remove`](Self::remove) for those.
    pub fn delete(&mut self, selector: impl Into<Selector>) -> Result<Block> {
        match selector.into() {
            Selector::Index(index) => self.remove_index(index),
            Selector::Label(label) => self.remove_label(&label),
            Selector::Handle(_) => Err(BlockError::InvalidKey {
                selector: "handle",
                operation: "delete",
            }),
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Borrow a child by index or label.
    ///
    /// Identity selectors are rejected with [`BlockError::InvalidKey`].
    pub fn get(&self, selector: impl Into<Selector>) -> Result<&Block> {
        match selector.into() {
            Selector::Index(index) => self.get_index(index),
            Selector::Label(label) => self.get_label(&label),
            Selector::Handle(_) => Err(BlockError::InvalidKey {
                selector: "handle",
                operation: "get",
            }),
        }
    }

    /// Borrow the child at `index`.
    pub fn get_index(&self, index: isize) -> Result<&Block> {
        let at = self.roll_index(index)?;
        Ok(&self.children[at])
    }

    /// Borrow the first child labeled `label`.
    pub fn get_label(&self, label: &str) -> Result<&Block> {
        let at = self.find_label(label)?;
        Ok(&self.children[at])
    }

    /// Mutably borrow a child by index, label or identity.
    pub fn get_mut(&mut self, selector: impl Into<Selector>) -> Result<&mut Block> {
        let at = match selector.into() {
            Selector::Index(index) => self.roll_index(index)?,
            Selector::Label(label) => self.find_label(&label)?,
            Selector::Handle(id) => self.position_of(id).ok_or(BlockError::NotFound { id })?,
        };
        Ok(&mut self.children[at])
    }
}

impl Clone for Block {
    /// Deep copy. The copy and every copied descendant get fresh ids.
    fn clone(&self) -> Self {
        Self {
            id: BlockId::next(),
            kind: self.kind,
            label: self.label.clone(),
            leaf: self.leaf,
            value: self.value.clone(),
            children: self.children.clone(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Iterator over the direct children of a [`Block`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Block>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Block;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Block;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
