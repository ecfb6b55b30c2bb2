//! # Consolatex Core
//!
//! Typed, hierarchical text blocks rendered to flat strings.
//!
//! A document is a tree of [`Block`]s such as
//! `Chapter > Section > Paragraph > Word > Char`. Each block's [`BlockKind`]
//! declares which kinds it may contain and how its children are composed:
//! a prelude, a separator between children, and a postlude.
//!
//! ## Quick Start
//!
//! ```rust
//! use consolatex_core::{Block, Paragraph};
//!
//! let mut paragraph = Block::new(&Paragraph);
//! paragraph.append(Block::word("hello").with_label("greeting")).unwrap();
//! paragraph.append(Block::word("world")).unwrap();
//!
//! assert_eq!(paragraph.render(), "hello world");
//! assert_eq!(paragraph.total_length(), 10);
//! assert_eq!(paragraph.get("greeting").unwrap().render(), "hello");
//! ```
//!
//! ## Validation
//!
//! Every mutation checks the offered block against the container's
//! allowed content types before touching the children:
//!
//! ```rust
//! use consolatex_core::{Block, BlockErrorKind, Word};
//!
//! let mut word = Block::new(&Word);
//! let err = word.append(Block::word("nested")).unwrap_err();
//!
//! assert_eq!(err.kind(), BlockErrorKind::TypeMismatch);
//! assert!(word.is_empty());
//! ```
//!
//! ## Boundary Tags
//!
//! [`RenderOptions`] can wrap every branch in `{{BEGIN}::{NAME}}` and
//! `{{END}::{NAME}}` markers; see [`Block::render_with`].

pub mod block;
pub mod config;
pub mod error;
pub mod kind;
pub mod kinds;
pub mod render;
pub mod selector;

pub use block::{Block, Iter};
pub use config::ConfigError;
pub use error::{BlockError, BlockErrorKind, Result};
pub use kind::{BlockKind, ContentTypes, KindId};
pub use kinds::{Chapter, Char, Paragraph, Section, Text, Word};
pub use render::RenderOptions;
pub use selector::{BlockId, Selector};
