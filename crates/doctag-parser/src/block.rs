//! Doc-block parsing and rendering.
//!
//! [`parse_comment`] turns the full source text of one `/** ... */`
//! comment into a [`ParsedCommentBlock`]. Every line's verbatim text is
//! retained in the record it belongs to, so [`stringify_block`] on an
//! unedited block reproduces the input byte for byte. Synthesized
//! records (inserted by a fix, with no verbatim source) are rendered
//! from their fields using the block's own indentation.

use doctag_core::block::{ParsedCommentBlock, ParsedTagRecord};

use crate::tokenizer::tokenize_tag_line;

/// The asterisk-stripped content of one block line.
///
/// Strips leading whitespace, then the `/**` opener or `*` continuation
/// marker, then a single optional following space, then an inline `*/`
/// closer and any whitespace before it.
fn line_content(line: &str) -> &str {
    let mut content = line.trim_start();
    if let Some(rest) = content.strip_prefix("/**") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix('*') {
        content = rest;
    }
    content = content.strip_prefix(' ').unwrap_or(content);
    if let Some(rest) = content.strip_suffix("*/") {
        content = rest.trim_end();
    }
    content.strip_suffix('\n').unwrap_or(content)
}

/// Whether a line is purely the block closer.
fn is_closer_line(line: &str) -> bool {
    line.trim().trim_end_matches('\n').trim() == "*/"
}

/// Parse the full source text of one block comment, from the `/**`
/// opener through the `*/` closer.
///
/// Parsing never fails: malformed tag syntax degrades field by field
/// (see the tokenizer) and the worst case is a block whose entire
/// payload lands in the description.
pub fn parse_comment(source: &str) -> ParsedCommentBlock {
    let mut block = ParsedCommentBlock::default();

    let mut description_lines: Vec<&str> = Vec::new();
    // (first-line index, tokenized first line, verbatim lines).
    let mut sections: Vec<(usize, String, Vec<&str>)> = Vec::new();

    for (index, line) in source.split_inclusive('\n').enumerate() {
        if sections.is_empty() && is_closer_line(line) && !line.trim_start().starts_with("/**") {
            block.closer_source = line.to_owned();
            // A closer before any tag: everything so far was description.
            continue;
        }
        let content = line_content(line);
        if content.starts_with('@') {
            sections.push((index, content.to_owned(), vec![line]));
        } else if let Some((_, _, lines)) = sections.last_mut() {
            if is_closer_line(line) {
                block.closer_source = line.to_owned();
            } else {
                lines.push(line);
            }
        } else {
            description_lines.push(line);
        }
    }

    block.description_source = description_lines.concat();
    block.description = {
        let text: Vec<&str> = description_lines.iter().map(|line| line_content(line)).collect();
        text.join("\n").trim().to_owned()
    };

    for (line_index, first_line, lines) in sections {
        let fields = tokenize_tag_line(&first_line);
        let mut description = fields.description;
        for continuation in &lines[1..] {
            let content = line_content(continuation).trim_start();
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(content);
        }
        block.tags.push(ParsedTagRecord {
            tag: fields.tag,
            type_text: fields.type_text,
            name: fields.name,
            description,
            optional: fields.optional,
            default: fields.default,
            source: lines.concat(),
            line: line_index,
        });
    }

    block
}

/// Render one synthesized record as a block line using the given
/// indentation (the whitespace before the closer's `*`).
fn render_synthesized(record: &ParsedTagRecord, indent: &str) -> String {
    let mut line = format!("{indent}* @{}", record.tag);
    if !record.type_text.is_empty() {
        line.push_str(" {");
        line.push_str(&record.type_text);
        line.push('}');
    }
    if !record.name.is_empty() {
        line.push(' ');
        if record.optional {
            line.push('[');
            line.push_str(&record.name);
            if let Some(default) = &record.default {
                line.push('=');
                line.push_str(default);
            }
            line.push(']');
        } else {
            line.push_str(&record.name);
        }
    }
    if !record.description.is_empty() {
        line.push(' ');
        line.push_str(&record.description);
    }
    line.push('\n');
    line
}

/// Render a block back to comment source.
///
/// Untouched records contribute their verbatim source; records with no
/// source (fix insertions) are rendered from their fields, indented to
/// match the closer line.
pub fn stringify_block(block: &ParsedCommentBlock) -> String {
    let indent: String = block
        .closer_source
        .chars()
        .take_while(|ch| ch.is_whitespace() && *ch != '\n')
        .collect();

    let mut out = String::with_capacity(block.description_source.len() + 64);
    out.push_str(&block.description_source);
    for record in &block.tags {
        if record.source.is_empty() {
            out.push_str(&render_synthesized(record, &indent));
        } else {
            out.push_str(&record.source);
        }
    }
    out.push_str(&block.closer_source);
    out
}
