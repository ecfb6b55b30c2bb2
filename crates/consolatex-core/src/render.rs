//! Recursive rendering of block trees.
//!
//! A branch renders as its kind's prelude, then its children joined by the
//! kind's separator, then its postlude. A leaf renders its raw value and
//! ignores all three. Nothing is cached: every call walks the whole
//! subtree.

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Options controlling how a tree is rendered.
///
/// The default options render plain text. With tags enabled, each block's
/// output is wrapped in `{{BEGIN}::{NAME}}` / `{{END}::{NAME}}` markers
/// named after its kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrap branch output in boundary tags.
    pub tag_blocks: bool,
    /// Also wrap leaves. Only takes effect together with `tag_blocks`.
    pub tag_leaves: bool,
}

impl RenderOptions {
    /// Plain text rendering.
    #[inline]
    pub const fn new() -> Self {
        Self {
            tag_blocks: false,
            tag_leaves: false,
        }
    }

    /// Enable or disable boundary tags on branches.
    #[must_use]
    pub const fn with_tags(mut self, enabled: bool) -> Self {
        self.tag_blocks = enabled;
        self
    }

    /// Enable or disable boundary tags on leaves.
    #[must_use]
    pub const fn with_leaf_tags(mut self, enabled: bool) -> Self {
        self.tag_leaves = enabled;
        self
    }

    /// The opening tag for a kind name.
    pub fn begin_tag(name: &str) -> String {
        format!("{{{{BEGIN}}::{{{name}}}}}")
    }

    /// The closing tag for a kind name.
    pub fn end_tag(name: &str) -> String {
        format!("{{{{END}}::{{{name}}}}}")
    }

    fn tags(&self, block: &Block) -> bool {
        self.tag_blocks && (self.tag_leaves || !block.is_leaf())
    }
}

impl Block {
    /// Render this block and its subtree as plain text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use consolatex_core::Block;
    ///
    /// let paragraph = Block::paragraph("hello   world");
    /// assert_eq!(paragraph.render(), "hello world");
    /// ```
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::new())
    }

    /// Render this block and its subtree with the given options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use consolatex_core::{Block, RenderOptions};
    ///
    /// let word = Block::word("hi");
    /// let options = RenderOptions::new().with_tags(true);
    /// assert_eq!(word.render_with(&options), "{{BEGIN}::{WORD}}hi{{END}::{WORD}}");
    /// ```
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        self.render_into(&mut out, options);
        out
    }

    /// Append the rendering of this block to `out`.
    pub fn render_into(&self, out: &mut String, options: &RenderOptions) {
        let tagged = options.tags(self);
        if tagged {
            out.push_str(&RenderOptions::begin_tag(self.name()));
        }

        if self.is_leaf() {
            out.push_str(&self.kind().render_leaf(self.value().unwrap_or_default()));
        } else {
            let kind = self.kind();
            let separator = kind.separator();

            kind.prelude().render_into(out, options);
            for (i, child) in self.iter().enumerate() {
                if i > 0 {
                    out.push_str(separator);
                }
                child.render_into(out, options);
            }
            kind.postlude().render_into(out, options);
        }

        if tagged {
            out.push_str(&RenderOptions::end_tag(self.name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_format() {
        assert_eq!(RenderOptions::begin_tag("WORD"), "{{BEGIN}::{WORD}}");
        assert_eq!(RenderOptions::end_tag("WORD"), "{{END}::{WORD}}");
    }

    #[test]
    fn leaf_tags_require_block_tags() {
        let leaf = Block::char('a');
        let options = RenderOptions::new().with_leaf_tags(true);
        assert_eq!(leaf.render_with(&options), "a");
    }

    #[test]
    fn leaf_tags_wrap_leaves() {
        let word = Block::word("a");
        let options = RenderOptions::new().with_tags(true).with_leaf_tags(true);
        assert_eq!(
            word.render_with(&options),
            "{{BEGIN}::{WORD}}\
             {{BEGIN}::{TEXT}}{{END}::{TEXT}}\
             {{BEGIN}::{CHAR}}a{{END}::{CHAR}}\
             {{BEGIN}::{TEXT}}{{END}::{TEXT}}\
             {{END}::{WORD}}"
        );
    }
}
