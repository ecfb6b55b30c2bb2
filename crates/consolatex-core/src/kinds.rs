//! Built-in block kinds.
//!
//! The hierarchy is `Chapter > Section > Paragraph > Word > Char`, plus the
//! [`Text`] leaf used for prelude and postlude decorations.

use std::iter;

use memchr::memchr_iter;

use crate::block::Block;
use crate::error::{BlockError, Result};
use crate::kind::{BlockKind, ContentTypes};

/// Leaf holding an arbitrary fixed string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl BlockKind for Text {
    fn name(&self) -> &'static str {
        "TEXT"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::none()
    }
}

/// Leaf holding exactly one character.
#[derive(Debug, Clone, Copy, Default)]
pub struct Char;

impl BlockKind for Char {
    fn name(&self) -> &'static str {
        "CHAR"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::none()
    }

    fn validate_value(&self, value: &str) -> Result<()> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Ok(()),
            _ => Err(BlockError::InvalidCharacter {
                value: value.to_string(),
            }),
        }
    }
}

/// A single word made of [`Char`] blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Word;

impl BlockKind for Word {
    fn name(&self) -> &'static str {
        "WORD"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::of(&Char)
    }
}

/// Words joined by single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraph;

impl BlockKind for Paragraph {
    fn name(&self) -> &'static str {
        "PARAGRAPH"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::of(&Word)
    }

    fn separator(&self) -> &'static str {
        " "
    }
}

/// Paragraphs separated by blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Section;

impl BlockKind for Section {
    fn name(&self) -> &'static str {
        "SECTION"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::of(&Paragraph)
    }

    fn separator(&self) -> &'static str {
        "\n\n"
    }
}

/// Sections separated by blank lines, terminated by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chapter;

impl BlockKind for Chapter {
    fn name(&self) -> &'static str {
        "CHAPTER"
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::of(&Section)
    }

    fn separator(&self) -> &'static str {
        "\n\n"
    }

    fn postlude(&self) -> Block {
        Block::text("\n")
    }
}

impl Block {
    /// Create a [`Text`] leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Block::leaf_unchecked(&Text, value.into())
    }

    /// Create a [`Char`] leaf.
    pub fn char(c: char) -> Self {
        Block::leaf_unchecked(&Char, c.to_string())
    }

    /// Create a [`Char`] leaf from a string holding exactly one character.
    pub fn char_from_str(value: &str) -> Result<Self> {
        Block::leaf(&Char, value)
    }

    /// Create a [`Word`] with one [`Char`] child per character.
    pub fn word(word: &str) -> Self {
        Block::with_children_unchecked(&Word, word.chars().map(Block::char).collect())
    }

    /// Create a [`Paragraph`] by splitting on runs of ASCII whitespace.
    pub fn paragraph(text: &str) -> Self {
        Block::with_children_unchecked(
            &Paragraph,
            text.split_ascii_whitespace().map(Block::word).collect(),
        )
    }

    /// Create a [`Section`] by splitting on blank lines.
    ///
    /// A line holding only whitespace (including a lone `\r`) is blank.
    /// Pieces that hold no words are dropped.
    pub fn section(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut paragraphs = Vec::new();
        let mut start = 0;
        let mut line_start = 0;

        // '\n' is ASCII, so every offset is a char boundary
        for line_end in memchr_iter(b'\n', bytes).chain(iter::once(bytes.len())) {
            if text[line_start..line_end].trim().is_empty() {
                push_paragraph(&mut paragraphs, &text[start..line_start]);
                start = line_end;
            }
            line_start = (line_end + 1).min(bytes.len());
        }
        push_paragraph(&mut paragraphs, &text[start..]);

        Block::with_children_unchecked(&Section, paragraphs)
    }

    /// Create a [`Chapter`] from already built sections.
    pub fn chapter(sections: impl IntoIterator<Item = Block>) -> Result<Self> {
        let mut chapter = Block::new(&Chapter);
        chapter.extend(sections)?;
        Ok(chapter)
    }
}

fn push_paragraph(paragraphs: &mut Vec<Block>, piece: &str) {
    let paragraph = Block::paragraph(piece);
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
}
