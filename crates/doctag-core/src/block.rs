//! The parsed comment-block data model.
//!
//! A [`ParsedCommentBlock`] is the structured form of one doc comment: an
//! overall description plus an ordered sequence of [`ParsedTagRecord`]s.
//! Blocks are owned by the analysis of a single declaration, created fresh
//! on each visit, and never shared or cached across files.
//!
//! Fix application never mutates records in place during diagnostics:
//! fixes are expressed as a batch of [`TagEdit`] operations referring to
//! positions in the original tag sequence, applied in a single pass by
//! [`ParsedCommentBlock::apply_edits`], preserving the relative order of
//! untouched entries.

/// One tag entry within a parsed comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTagRecord {
    /// The tag name as written, without the `@`.
    pub tag: String,

    /// Raw contents of the `{...}` type bracket, or empty.
    pub type_text: String,

    /// Raw name/namepath token, or empty. For optional-name syntax
    /// (`[name=default]`) this is the unwrapped name.
    pub name: String,

    /// Remaining description text.
    pub description: String,

    /// Whether the name used the optional `[name]` wrapper.
    pub optional: bool,

    /// The default value from `[name=default]`, if present.
    pub default: Option<String>,

    /// The verbatim source span of this tag's lines, including the
    /// trailing newline of every line but the block's last.
    pub source: String,

    /// 0-based line offset of the tag within its block.
    pub line: usize,
}

impl ParsedTagRecord {
    /// A synthesized record carrying only a tag and a name, as produced
    /// by auto-fix insertion.
    pub fn synthesized(tag: impl Into<String>, name: impl Into<String>) -> Self {
        ParsedTagRecord {
            tag: tag.into(),
            type_text: String::new(),
            name: name.into(),
            description: String::new(),
            optional: false,
            default: None,
            source: String::new(),
            line: 0,
        }
    }

    /// The name with any optional/default wrapper normalized away.
    ///
    /// Two entries are duplicates when their normalized names agree even
    /// if one is written `[foo="bar"]` and the other `foo`.
    pub fn normalized_name(&self) -> &str {
        &self.name
    }
}

/// A fully parsed doc comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommentBlock {
    /// The description preceding the first tag.
    pub description: String,

    /// The tag entries, in document order.
    pub tags: Vec<ParsedTagRecord>,

    /// Verbatim source of the description section (everything before the
    /// first tag), including the block opener.
    pub description_source: String,

    /// Verbatim source of the block closer (the `*/` line or suffix).
    pub closer_source: String,
}

impl ParsedCommentBlock {
    /// Tags matching a name.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParsedTagRecord> {
        self.tags.iter().filter(move |tag| tag.tag == name)
    }

    /// Whether a tag with the given name (case-insensitive) is present.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.tag.eq_ignore_ascii_case(name))
    }

    /// Whether any of the given tag names is present.
    pub fn has_a_tag<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.has_tag(name.as_ref()))
    }

    /// Apply a batch of edits to the tag sequence.
    ///
    /// All indices refer to the sequence as it was before any edit in the
    /// batch; the batch is applied in one pass so diagnostics computed
    /// against the original ordering stay valid.
    pub fn apply_edits(&mut self, edits: Vec<TagEdit>) {
        let mut inserts: Vec<(usize, ParsedTagRecord)> = Vec::new();
        let mut removals: Vec<usize> = Vec::new();
        for edit in edits {
            match edit {
                TagEdit::Insert { index, record } => inserts.push((index, record)),
                TagEdit::Remove { index } => removals.push(index),
            }
        }
        // Stable among inserts targeting the same slot.
        inserts.sort_by_key(|(index, _)| *index);

        let old = std::mem::take(&mut self.tags);
        let mut inserts = inserts.into_iter().peekable();
        let mut rebuilt = Vec::with_capacity(old.len());
        for (index, record) in old.into_iter().enumerate() {
            while let Some((_, inserted)) = inserts.next_if(|(at, _)| *at <= index) {
                rebuilt.push(inserted);
            }
            if !removals.contains(&index) {
                rebuilt.push(record);
            }
        }
        for (_, inserted) in inserts {
            rebuilt.push(inserted);
        }
        self.tags = rebuilt;
    }
}

/// One splice operation on a block's tag sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEdit {
    /// Insert `record` before the entry at `index` in the original
    /// sequence (`index == len` appends).
    Insert { index: usize, record: ParsedTagRecord },

    /// Remove the entry at `index` in the original sequence.
    Remove { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str, name: &str) -> ParsedTagRecord {
        ParsedTagRecord::synthesized(tag, name)
    }

    fn block(tags: Vec<ParsedTagRecord>) -> ParsedCommentBlock {
        ParsedCommentBlock {
            tags,
            ..ParsedCommentBlock::default()
        }
    }

    fn names(block: &ParsedCommentBlock) -> Vec<&str> {
        block.tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    #[test]
    fn test_apply_edits_insert_middle() {
        let mut block = block(vec![record("param", "foo"), record("param", "baz")]);
        block.apply_edits(vec![TagEdit::Insert {
            index: 1,
            record: record("param", "bar"),
        }]);
        assert_eq!(names(&block), vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_apply_edits_append() {
        let mut block = block(vec![record("param", "foo")]);
        block.apply_edits(vec![TagEdit::Insert {
            index: 1,
            record: record("param", "bar"),
        }]);
        assert_eq!(names(&block), vec!["foo", "bar"]);
    }

    #[test]
    fn test_apply_edits_remove() {
        let mut block = block(vec![
            record("param", "foo"),
            record("param", "foo"),
            record("param", "bar"),
        ]);
        block.apply_edits(vec![TagEdit::Remove { index: 1 }]);
        assert_eq!(names(&block), vec!["foo", "bar"]);
    }

    #[test]
    fn test_apply_edits_batch_original_indices() {
        // Indices always refer to the pre-edit sequence: removing entry 0
        // does not shift the insertion slot.
        let mut block = block(vec![record("param", "dupe"), record("param", "keep")]);
        block.apply_edits(vec![
            TagEdit::Remove { index: 0 },
            TagEdit::Insert {
                index: 2,
                record: record("param", "tail"),
            },
        ]);
        assert_eq!(names(&block), vec!["keep", "tail"]);
    }

    #[test]
    fn test_apply_edits_preserves_untouched_order() {
        let mut block = block(vec![
            record("param", "a"),
            record("returns", ""),
            record("param", "c"),
        ]);
        block.apply_edits(vec![TagEdit::Insert {
            index: 1,
            record: record("param", "b"),
        }]);
        assert_eq!(names(&block), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let block = block(vec![record("inheritDoc", "")]);
        assert!(block.has_tag("inheritdoc"));
        assert!(block.has_a_tag(&["type", "inheritdoc"]));
        assert!(!block.has_a_tag(&["type"]));
    }
}
