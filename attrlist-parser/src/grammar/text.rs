//! The inline scanner for text content.
//!
//! Only the inline constructs the attribute-list extension interacts with are
//! recognized: span inline attribute lists, and a plain single-line
//! `*emphasis*` so lists have span targets to attach to. Everything else
//! accumulates into text runs.

use crate::model::{Emphasis, Node, NodeData, Text};
use crate::tree_builder::build_list_node;
use crate::{Error, Options};

use super::cursor::Spot;
use super::inline::span_inline_list;
use super::tokenizer::Tokenizer;

/// Scan the source between `start` and `end_offset` into inline nodes.
pub(crate) fn parse_inlines(
    source: &str,
    start: Spot,
    end_offset: usize,
    options: &Options,
) -> Result<Vec<Node>, Error> {
    let mut tok = Tokenizer::new(source, start);
    let mut nodes = Vec::new();
    let mut run_start = start;

    while tok.spot().offset < end_offset {
        let here = tok.spot();
        match tok.peek() {
            Some('{') => {
                let first_event = tok.events.len();
                if tok.attempt(|t| span_inline_list(t, options))? {
                    flush_text(&mut nodes, source, run_start, here);
                    nodes.push(build_list_node(&tok, first_event)?);
                    run_start = tok.spot();
                } else {
                    tok.consume();
                }
            }
            Some('*') => {
                if let Some(close) = emphasis_close(source, here.offset, end_offset) {
                    flush_text(&mut nodes, source, run_start, here);
                    tok.consume();
                    let inner_start = tok.spot();
                    while tok.spot().offset < close {
                        tok.consume();
                    }
                    let inner_end = tok.spot();
                    tok.consume();
                    let end = tok.spot();
                    nodes.push(Node::Emphasis(Emphasis {
                        children: vec![Node::Text(Text {
                            value: source[inner_start.offset..inner_end.offset].to_string(),
                            location: inner_start.location_to(inner_end),
                        })],
                        data: NodeData::default(),
                        location: here.location_to(end),
                    }));
                    run_start = end;
                } else {
                    tok.consume();
                }
            }
            Some(_) => tok.consume(),
            None => break,
        }
    }

    flush_text(&mut nodes, source, run_start, tok.spot());
    Ok(nodes)
}

fn flush_text(nodes: &mut Vec<Node>, source: &str, from: Spot, to: Spot) {
    if from.offset < to.offset {
        nodes.push(Node::Text(Text {
            value: source[from.offset..to.offset].to_string(),
            location: from.location_to(to),
        }));
    }
}

/// The byte offset of the closing `*`, if one exists on the same line with a
/// non-empty run between the markers.
fn emphasis_close(source: &str, open: usize, end_offset: usize) -> Option<usize> {
    let after_marker = open + 1;
    for (at, c) in source.get(after_marker..end_offset)?.char_indices() {
        match c {
            '\n' | '\r' => return None,
            '*' if at > 0 => return Some(after_marker + at),
            '*' => return None,
            _ => {}
        }
    }
    None
}
