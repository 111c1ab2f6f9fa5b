use crate::model::{Location, Node};
use crate::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Block,
    Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Preceding,
    Following,
}

/// Locate the sibling a block or span inline attribute list attaches to.
///
/// Block lists prefer the preceding sibling and fall back to the following
/// one; span lists only look back, and refuse plain text targets. Runs of
/// same-kind lists coalesce, so stacked lists all reach past each other to
/// the shared target, provided every hop stays adjacent.
pub(crate) fn find_target(children: &[Node], index: usize, options: &Options) -> Option<usize> {
    let kind = match &children[index] {
        Node::BlockInlineAttributeList(_) => ListKind::Block,
        Node::SpanInlineAttributeList(_) => ListKind::Span,
        Node::Paragraph(_)
        | Node::Heading(_)
        | Node::Code(_)
        | Node::Text(_)
        | Node::Emphasis(_)
        | Node::Element(_)
        | Node::AttributeListDefinition(_) => return None,
    };

    match kind {
        ListKind::Block => half(children, index, kind, Direction::Preceding, options)
            .or_else(|| half(children, index, kind, Direction::Following, options)),
        ListKind::Span => {
            let target = half(children, index, kind, Direction::Preceding, options)?;
            if matches!(children[target], Node::Text(_)) {
                return None;
            }
            Some(target)
        }
    }
}

fn half(
    children: &[Node],
    start: usize,
    kind: ListKind,
    direction: Direction,
    options: &Options,
) -> Option<usize> {
    let node = &children[start];
    let mut current = node;
    let mut index = start;

    loop {
        index = match direction {
            Direction::Preceding => index.checked_sub(1)?,
            Direction::Following => {
                if index + 1 >= children.len() {
                    return None;
                }
                index + 1
            }
        };
        let next = &children[index];

        let adjacent = match direction {
            Direction::Preceding => is_next(kind, next.location(), current.location(), options),
            Direction::Following => is_next(kind, current.location(), next.location(), options),
        };
        if !adjacent {
            return None;
        }

        if std::mem::discriminant(next) == std::mem::discriminant(node) {
            current = next;
            continue;
        }
        return Some(index);
    }
}

fn is_next(
    kind: ListKind,
    preceding: &Location,
    following: &Location,
    options: &Options,
) -> bool {
    // Programmatic trees may lack positions; with glued names allowed there
    // is no whitespace evidence to check, so treat them as adjacent.
    if options.allow_no_space_before_name && (preceding.is_unset() || following.is_unset()) {
        return true;
    }

    match kind {
        ListKind::Block => following.start.line == preceding.end.line + 1,
        ListKind::Span => {
            following.start.line == preceding.end.line
                && following.start.column == preceding.end.column
        }
    }
}
