//! The line-oriented block driver.
//!
//! A deliberately small markdown subset: blank-line-separated paragraphs, ATX
//! headings, indented code blocks, and the two block-level attribute-list
//! constructs. Definitions and block inline lists are only recognized at the
//! start of a block, after at most three leading spaces, with nothing but
//! whitespace after the closing brace; anywhere else a `{:` sequence is left
//! to the inline scanner.

use crate::model::{Code, Heading, Node, NodeData, Paragraph, Root};
use crate::tree_builder::build_list_node;
use crate::{Error, Options};

use super::cursor::{Cursor, Spot};
use super::definition::definition;
use super::inline::block_inline_list;
use super::list::is_body_space;
use super::text::parse_inlines;
use super::tokenizer::Tokenizer;

/// One source line, without its line ending.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    start: Spot,
    /// Byte offset just past the last character, before the line ending.
    end_offset: usize,
}

impl Line<'_> {
    fn is_blank(self) -> bool {
        self.text.chars().all(is_body_space)
    }

    /// Leading space count; tabs end the run and count as no indent here.
    fn indent(self) -> usize {
        self.text.chars().take_while(|c| *c == ' ').count()
    }

    /// The point after `spaces` leading spaces.
    fn after_indent(self, spaces: usize) -> Spot {
        Spot {
            line: self.start.line,
            column: self.start.column + spaces,
            offset: self.start.offset + spaces,
        }
    }

    fn end(self) -> Spot {
        Spot {
            line: self.start.line,
            column: self.start.column + self.text.chars().count(),
            offset: self.end_offset,
        }
    }
}

fn split_lines(input: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut line = 1;
    while offset < input.len() {
        let rest = &input[offset..];
        let len = rest.find('\n').map_or(rest.len(), |at| {
            if rest[..at].ends_with('\r') {
                at - 1
            } else {
                at
            }
        });
        let text = &rest[..len];
        lines.push(Line {
            text,
            start: Spot {
                line,
                column: 1,
                offset,
            },
            end_offset: offset + len,
        });
        let eol = rest[len..]
            .find('\n')
            .map_or(rest.len(), |at| len + at + 1);
        offset += eol;
        line += 1;
    }
    lines
}

/// Parse a whole document into a tree, attribute-list nodes included.
pub(crate) fn parse_document(input: &str, options: &Options) -> Result<Root, Error> {
    let lines = split_lines(input);
    let mut children = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if line.is_blank() {
            index += 1;
            continue;
        }

        if line.indent() >= 4 {
            children.push(indented_code(&lines, &mut index));
            continue;
        }

        let content = line.after_indent(line.indent());
        if input[content.offset..].starts_with('{') {
            if let Some(node) = attribute_list_block(input, line, content, options)? {
                children.push(node);
                index += 1;
                continue;
            }
        }

        if let Some((depth, after_markers)) = atx_heading(line, content) {
            children.push(heading(input, line, depth, after_markers, options)?);
            index += 1;
            continue;
        }

        children.push(paragraph(input, &lines, &mut index, content, options)?);
    }

    let mut cursor = Cursor::at(input, Spot::start());
    while cursor.peek().is_some() {
        cursor.advance();
    }
    Ok(Root {
        children,
        location: Spot::start().location_to(cursor.spot()),
    })
}

/// Try the definition construct, then the anonymous block list. Either must
/// be the only thing on its line.
fn attribute_list_block(
    input: &str,
    line: Line<'_>,
    content: Spot,
    options: &Options,
) -> Result<Option<Node>, Error> {
    let constructs: [fn(&mut Tokenizer<'_>, &Options) -> Result<bool, Error>; 2] =
        [definition, block_inline_list];
    for construct in constructs {
        let mut tok = Tokenizer::new(input, content);
        if tok.attempt(|t| construct(t, options))? {
            let trailing = &input[tok.spot().offset..line.end_offset];
            if trailing.chars().all(is_body_space) {
                tracing::trace!(line = line.start.line, "attribute list block accepted");
                return Ok(Some(build_list_node(&tok, 0)?));
            }
        }
    }
    Ok(None)
}

/// `#{1..6}` followed by a space. Returns the depth and the point after the
/// markers.
fn atx_heading(line: Line<'_>, content: Spot) -> Option<(u8, Spot)> {
    let text = &line.text[content.offset - line.start.offset..];
    let markers = text.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&markers) || !text[markers..].starts_with(' ') {
        return None;
    }
    let depth = u8::try_from(markers).unwrap_or(6);
    Some((
        depth,
        Spot {
            line: content.line,
            column: content.column + markers,
            offset: content.offset + markers,
        },
    ))
}

fn heading(
    input: &str,
    line: Line<'_>,
    depth: u8,
    after_markers: Spot,
    options: &Options,
) -> Result<Node, Error> {
    let mut content = after_markers;
    while input[content.offset..line.end_offset].starts_with(' ') {
        content.offset += 1;
        content.column += 1;
    }
    let mut end_offset = line.end_offset;
    while end_offset > content.offset && input[..end_offset].ends_with(' ') {
        end_offset -= 1;
    }

    Ok(Node::Heading(Heading {
        depth,
        children: parse_inlines(input, content, end_offset, options)?,
        data: NodeData::default(),
        location: line.after_indent(line.indent()).location_to(line.end()),
    }))
}

fn indented_code(lines: &[Line<'_>], index: &mut usize) -> Node {
    let first = lines[*index];
    let mut value = String::new();
    let mut last = first;
    while *index < lines.len() {
        let line = lines[*index];
        if line.is_blank() || line.indent() < 4 {
            break;
        }
        if !value.is_empty() {
            value.push('\n');
        }
        value.push_str(&line.text[4..]);
        last = line;
        *index += 1;
    }

    Node::Code(Code {
        lang: None,
        meta: None,
        value,
        data: NodeData::default(),
        location: first.start.location_to(last.end()),
    })
}

/// A paragraph runs until a blank line or an ATX heading; other lines,
/// indented or not, continue it.
fn paragraph(
    input: &str,
    lines: &[Line<'_>],
    index: &mut usize,
    content: Spot,
    options: &Options,
) -> Result<Node, Error> {
    let mut last = lines[*index];
    *index += 1;
    while *index < lines.len() {
        let line = lines[*index];
        if line.is_blank() {
            break;
        }
        let next_content = line.after_indent(line.indent());
        if line.indent() < 4 && atx_heading(line, next_content).is_some() {
            break;
        }
        last = line;
        *index += 1;
    }

    Ok(Node::Paragraph(Paragraph {
        children: parse_inlines(input, content, last.end_offset, options)?,
        data: NodeData::default(),
        location: content.location_to(last.end()),
    }))
}
