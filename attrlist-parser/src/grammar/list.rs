use crate::{Error, Options};

use super::name::reference_name_ish;
use super::token::{Event, EventKind, TokenKind};
use super::tokenizer::Tokenizer;

/// Whitespace that may separate body items.
///
/// CR and LF are excluded: the enclosing constructs are line-bound, so a line
/// ending terminates (fails) the candidate construct instead of separating
/// items.
pub(crate) fn is_body_space(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Dispatch on the first character of an item.
    Next,
    /// Between items: whitespace run, or the closing `}`.
    SpaceOrEnd,
    /// First character of an id name (must be ASCII alpha).
    IdNameFirst,
    /// Trailing characters of an id name.
    IdNameRest,
    /// Characters of a class name.
    ClassName,
    /// After a name-ish run: `=` makes it a key, anything else a reference.
    ReferenceEndOrEquals,
    /// Expecting the opening quote of a key-value value.
    ValueStart,
    /// Inside a quoted value, with single-character backslash escaping.
    ValueString,
}

/// The shared attribute-list body: `reference`, `#id`, `.class` and
/// `key="value"` items separated by whitespace.
///
/// On success the cursor rests on the closing `}`, which belongs to the
/// enclosing construct. Two items with no separating whitespace are a hard
/// failure for the whole construct unless `allow_no_space_before_name` is
/// set.
pub(crate) fn attribute_list(tok: &mut Tokenizer, options: &Options) -> Result<bool, Error> {
    let first_event = tok.events.len();
    if !tokenize(tok, options)? {
        return Ok(false);
    }
    resolve(tok, first_event)?;
    Ok(true)
}

#[allow(clippy::too_many_lines)]
fn tokenize(tok: &mut Tokenizer, options: &Options) -> Result<bool, Error> {
    tok.enter(TokenKind::AttributeList);

    let mut state = State::Next;
    let mut spaces = 0usize;
    let mut value_marker = '"';
    let mut escaping = false;

    loop {
        let code = tok.peek();
        match state {
            State::Next => match code {
                Some(c) if is_body_space(c) => state = State::SpaceOrEnd,
                Some('#') => {
                    tok.enter(TokenKind::IdNameAttribute);
                    tok.enter(TokenKind::IdNameAttributeMarker);
                    tok.consume();
                    tok.exit(TokenKind::IdNameAttributeMarker);
                    state = State::IdNameFirst;
                }
                Some('.') => {
                    tok.enter(TokenKind::ClassNameAttribute);
                    tok.enter(TokenKind::ClassNameAttributeMarker);
                    tok.consume();
                    tok.exit(TokenKind::ClassNameAttributeMarker);
                    tok.enter(TokenKind::ClassNameAttributeName);
                    state = State::ClassName;
                }
                Some(c) if c.is_ascii_alphanumeric() => {
                    if !tok.attempt(reference_name_ish)? {
                        return Ok(false);
                    }
                    state = State::ReferenceEndOrEquals;
                }
                Some(_) | None => return Ok(false),
            },

            State::SpaceOrEnd => match code {
                Some('}') => {
                    if spaces > 0 {
                        tok.exit(TokenKind::AttributeListSpace);
                    }
                    tok.exit(TokenKind::AttributeList);
                    return Ok(true);
                }
                Some(c) if is_body_space(c) => {
                    if spaces == 0 {
                        tok.enter(TokenKind::AttributeListSpace);
                    }
                    spaces += 1;
                    tok.consume();
                }
                Some(_) | None => {
                    if spaces == 0 {
                        return Ok(false);
                    }
                    tok.exit(TokenKind::AttributeListSpace);
                    spaces = 0;
                    state = State::Next;
                }
            },

            State::IdNameFirst => match code {
                Some(c) if c.is_ascii_alphabetic() => {
                    tok.enter(TokenKind::IdNameAttributeName);
                    tok.consume();
                    state = State::IdNameRest;
                }
                Some(_) | None => return Ok(false),
            },

            State::IdNameRest => match code {
                Some(c)
                    if c.is_ascii_alphanumeric()
                        || c == '-'
                        || c == ':'
                        || (options.allow_underscore_in_id && c == '_') =>
                {
                    tok.consume();
                }
                other => {
                    tok.exit(TokenKind::IdNameAttributeName);
                    tok.exit(TokenKind::IdNameAttribute);
                    if options.allow_no_space_before_name
                        && matches!(other, Some('.' | '#'))
                    {
                        state = State::Next;
                    } else {
                        state = State::SpaceOrEnd;
                    }
                }
            },

            State::ClassName => match code {
                Some(c) if c == '}' || is_body_space(c) => {
                    tok.exit(TokenKind::ClassNameAttributeName);
                    tok.exit(TokenKind::ClassNameAttribute);
                    state = State::SpaceOrEnd;
                }
                Some('.' | '#') => {
                    if options.allow_no_space_before_name {
                        tok.exit(TokenKind::ClassNameAttributeName);
                        tok.exit(TokenKind::ClassNameAttribute);
                        state = State::Next;
                    } else {
                        return Ok(false);
                    }
                }
                Some('\n' | '\r') | None => return Ok(false),
                Some(_) => tok.consume(),
            },

            State::ReferenceEndOrEquals => match code {
                Some('=') => {
                    tok.enter(TokenKind::KeyValueAttributeEquals);
                    tok.consume();
                    tok.exit(TokenKind::KeyValueAttributeEquals);
                    state = State::ValueStart;
                }
                Some('.' | '#') if options.allow_no_space_before_name => state = State::Next,
                // The reference-attribute wrapper is added later by the
                // resolver pass.
                Some(_) | None => state = State::SpaceOrEnd,
            },

            State::ValueStart => match code {
                Some(c @ ('"' | '\'')) => {
                    tok.enter(TokenKind::KeyValueAttributeValue);
                    tok.enter(TokenKind::KeyValueAttributeValueMarker);
                    value_marker = c;
                    tok.consume();
                    tok.exit(TokenKind::KeyValueAttributeValueMarker);
                    tok.enter(TokenKind::KeyValueAttributeValueString);
                    state = State::ValueString;
                }
                Some(_) | None => return Ok(false),
            },

            State::ValueString => match code {
                Some('\n' | '\r') | None => return Ok(false),
                Some(_) if escaping => {
                    tok.consume();
                    escaping = false;
                }
                Some('\\') => {
                    tok.consume();
                    escaping = true;
                }
                Some(c) if c == value_marker => {
                    tok.exit(TokenKind::KeyValueAttributeValueString);
                    tok.enter(TokenKind::KeyValueAttributeValueMarker);
                    tok.consume();
                    tok.exit(TokenKind::KeyValueAttributeValueMarker);
                    tok.exit(TokenKind::KeyValueAttributeValue);
                    // The key-value-attribute wrapper is added later by the
                    // resolver pass.
                    state = State::SpaceOrEnd;
                }
                Some(_) => tok.consume(),
            },
        }
    }
}

/// The disambiguation post-pass.
///
/// One forward sweep over the events emitted since `first_event`. Every
/// provisional name-ish token becomes either a key-value key (when the very
/// next token is the equals marker) or a reference-attribute name, and the
/// matching wrapper enter/exit events are spliced in. The cursor advances by
/// exactly the number of events inserted, so the pass never revisits a token
/// and is idempotent.
fn resolve(tok: &mut Tokenizer, first_event: usize) -> Result<(), Error> {
    let mut index = first_event;
    while index < tok.events.len() {
        let event = tok.events[index];
        if event.kind != EventKind::Enter
            || tok.tokens[event.token].kind != TokenKind::ReferenceNameIsh
        {
            index += 1;
            continue;
        }

        let name = tok.tokens[event.token];
        let followed_by_equals = tok
            .events
            .get(index + 2)
            .is_some_and(|e| tok.tokens[e.token].kind == TokenKind::KeyValueAttributeEquals);

        if followed_by_equals {
            // The name-ish token is a key. Wrap the twelve events from the
            // key's enter through the value's exit in a key-value-attribute
            // unit.
            tok.tokens[event.token].kind = TokenKind::KeyValueAttributeKey;

            let value_exit = tok.events.get(index + 11).copied().ok_or_else(|| {
                Error::ResolverDesync {
                    expected: TokenKind::KeyValueAttributeValue.label(),
                    found: "end of events".to_string(),
                    position: name.location().start,
                }
            })?;
            let value = tok.tokens[value_exit.token];
            if value_exit.kind != EventKind::Exit || value.kind != TokenKind::KeyValueAttributeValue
            {
                return Err(Error::ResolverDesync {
                    expected: TokenKind::KeyValueAttributeValue.label(),
                    found: value.kind.label().to_string(),
                    position: value.location().start,
                });
            }

            let wrapper = tok.push_token(TokenKind::KeyValueAttribute, name.start, value.end);
            tok.events.insert(
                index,
                Event {
                    kind: EventKind::Enter,
                    token: wrapper,
                },
            );
            tok.events.insert(
                index + 13,
                Event {
                    kind: EventKind::Exit,
                    token: wrapper,
                },
            );
            index += 14;
        } else {
            // The name-ish token is a reference name; wrap exactly it.
            tok.tokens[event.token].kind = TokenKind::ReferenceAttributeName;

            let wrapper = tok.push_token(TokenKind::ReferenceAttribute, name.start, name.end);
            tok.events.insert(
                index,
                Event {
                    kind: EventKind::Enter,
                    token: wrapper,
                },
            );
            tok.events.insert(
                index + 3,
                Event {
                    kind: EventKind::Exit,
                    token: wrapper,
                },
            );
            index += 4;
        }
    }

    Ok(())
}
