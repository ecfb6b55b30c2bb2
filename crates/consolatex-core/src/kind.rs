//! The capability interface every block kind implements.
//!
//! A kind fixes, at the type level, what a block is called, which kinds it
//! may contain, and how its children are composed when rendered. Blocks
//! store a `&'static dyn BlockKind`, so the render algorithm never needs to
//! know which concrete kind it is walking.

use std::any::{Any, TypeId};
use std::fmt;

use crate::block::Block;
use crate::error::Result;

/// Identity of a block kind: its concrete Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId(TypeId);

impl KindId {
    /// Identity of the kind type `K`.
    #[inline]
    pub fn of<K: BlockKind>() -> Self {
        KindId(TypeId::of::<K>())
    }

    /// Identity of the concrete kind behind a trait object.
    #[inline]
    pub fn of_dyn(kind: &dyn BlockKind) -> Self {
        KindId(Any::type_id(kind))
    }
}

/// Hooks that parameterize a block.
///
/// Only [`name`](Self::name) and [`content_types`](Self::content_types) are
/// required. A kind whose content type set is empty is a leaf: it renders
/// through [`render_leaf`](Self::render_leaf) and ignores its prelude,
/// separator and postlude.
///
/// # Example
///
/// ```rust
/// use consolatex_core::{Block, BlockKind, Char, ContentTypes};
///
/// #[derive(Debug)]
/// struct Tuple;
///
/// impl BlockKind for Tuple {
///     fn name(&self) -> &'static str {
///         "TUPLE"
///     }
///     fn content_types(&self) -> ContentTypes {
///         ContentTypes::of(&Char)
///     }
///     fn prelude(&self) -> Block {
///         Block::text("(")
///     }
///     fn separator(&self) -> &'static str {
///         ", "
///     }
///     fn postlude(&self) -> Block {
///         Block::text(")")
///     }
/// }
///
/// let mut tuple = Block::new(&Tuple);
/// tuple.append(Block::char('a')).unwrap();
/// tuple.append(Block::char('b')).unwrap();
/// assert_eq!(tuple.render(), "(a, b)");
/// ```
pub trait BlockKind: Any + fmt::Debug + Send + Sync {
    /// Name used in diagnostics and in block boundary tags.
    fn name(&self) -> &'static str;

    /// Kinds allowed as direct children. Empty for leaves.
    fn content_types(&self) -> ContentTypes;

    /// Rendered immediately before the composed children.
    fn prelude(&self) -> Block {
        Block::text("")
    }

    /// Inserted between consecutive rendered children.
    fn separator(&self) -> &'static str {
        ""
    }

    /// Rendered immediately after the composed children.
    fn postlude(&self) -> Block {
        Block::text("")
    }

    /// Render the raw value held by a leaf of this kind.
    fn render_leaf(&self, value: &str) -> String {
        value.to_owned()
    }

    /// Units a leaf of this kind contributes to [`Block::total_length`].
    fn leaf_weight(&self, value: &str) -> usize {
        value.chars().count()
    }

    /// Check a raw value before a leaf of this kind is built with it.
    ///
    /// Also consulted when a leaf is offered to a container.
    fn validate_value(&self, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// The set of kinds a container accepts, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    entries: Vec<(KindId, &'static str)>,
}

impl ContentTypes {
    /// The empty set: the owning kind is a leaf.
    #[inline]
    pub const fn none() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A set holding a single kind.
    pub fn of(kind: &dyn BlockKind) -> Self {
        Self::none().and(kind)
    }

    /// Add a kind to the set. Adding a kind twice has no effect.
    pub fn and(mut self, kind: &dyn BlockKind) -> Self {
        let id = KindId::of_dyn(kind);
        if !self.contains(id) {
            self.entries.push((id, kind.name()));
        }
        self
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of kinds in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set holds the given kind.
    pub fn contains(&self, id: KindId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Check if the given block's kind is in the set.
    pub fn admits(&self, block: &Block) -> bool {
        self.contains(KindId::of_dyn(block.kind()))
    }

    /// Kind names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(_, name)| *name).collect()
    }
}
