//! Comment-block extraction from raw source text.
//!
//! The CLI analyzes arbitrary text without a host parser, so blocks are
//! located by scanning for `/* ... */` pairs while tracking line and
//! column positions. Non-doc blocks are kept in the record list; the
//! engine's iteration driver filters on the doc sentinel itself.

use doctag_core::ast::CommentRecord;

/// Extract every block comment from `source`.
///
/// `line` is the 1-based line of the opener; `column` is the 0-based
/// byte column of the opener within its line. An unterminated opener is
/// ignored.
pub fn extract_comments(source: &str) -> Vec<CommentRecord> {
    let mut records = Vec::new();
    let mut rest = source;
    let mut consumed = 0usize;

    while let Some(open) = rest.find("/*") {
        let start = consumed + open;
        let Some(close) = rest[open + 2..].find("*/") else {
            break;
        };
        let payload = &rest[open + 2..open + 2 + close];

        let before = &source[..start];
        let line = before.matches('\n').count() + 1;
        let column = start - before.rfind('\n').map(|i| i + 1).unwrap_or(0);

        records.push(CommentRecord {
            text: payload.to_owned(),
            line,
            column,
            block_style: true,
        });

        let advance = open + 2 + close + 2;
        consumed += advance;
        rest = &rest[advance..];
    }

    records
}
