use crate::Error;

use super::cursor::{Cursor, Spot};
use super::token::{Event, EventKind, Token, TokenKind};

/// The effects engine driving the attribute-list constructs.
///
/// Constructs are plain functions `fn(&mut Tokenizer, ...) -> Result<bool,
/// Error>` that enter/consume/exit tokens as they go. `attempt` snapshots the
/// cursor and the token/event buffers around a sub-construct so a failed
/// match unwinds completely: no partial tokens survive a rejected construct.
#[derive(Debug)]
pub(crate) struct Tokenizer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) events: Vec<Event>,
    open: Vec<usize>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(source: &'a str, spot: Spot) -> Self {
        Self {
            source,
            cursor: Cursor::at(source, spot),
            tokens: Vec::new(),
            events: Vec::new(),
            open: Vec::new(),
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    pub(crate) fn spot(&self) -> Spot {
        self.cursor.spot()
    }

    /// Open a token at the current position.
    pub(crate) fn enter(&mut self, kind: TokenKind) {
        let spot = self.cursor.spot();
        let index = self.tokens.len();
        self.tokens.push(Token {
            kind,
            start: spot,
            end: spot,
        });
        self.events.push(Event {
            kind: EventKind::Enter,
            token: index,
        });
        self.open.push(index);
    }

    /// Consume the current character into the innermost open token.
    pub(crate) fn consume(&mut self) {
        self.cursor.advance();
    }

    /// Close the innermost open token; its kind must match.
    pub(crate) fn exit(&mut self, kind: TokenKind) {
        let index = self.open.pop();
        debug_assert_eq!(
            index.map(|i| self.tokens[i].kind),
            Some(kind),
            "unbalanced token exit"
        );
        if let Some(index) = index {
            self.tokens[index].end = self.cursor.spot();
            self.events.push(Event {
                kind: EventKind::Exit,
                token: index,
            });
        }
    }

    /// Run a sub-construct, rolling the tokenizer back if it does not match.
    pub(crate) fn attempt<F>(&mut self, construct: F) -> Result<bool, Error>
    where
        F: FnOnce(&mut Self) -> Result<bool, Error>,
    {
        let cursor = self.cursor;
        let tokens_len = self.tokens.len();
        let events_len = self.events.len();
        let open_len = self.open.len();

        if construct(self)? {
            return Ok(true);
        }

        self.cursor = cursor;
        self.tokens.truncate(tokens_len);
        self.events.truncate(events_len);
        self.open.truncate(open_len);
        Ok(false)
    }

    /// Push a synthesized token (used by the resolver pass for wrapper
    /// tokens) and return its index.
    pub(crate) fn push_token(&mut self, kind: TokenKind, start: Spot, end: Spot) -> usize {
        let index = self.tokens.len();
        self.tokens.push(Token { kind, start, end });
        index
    }

    /// The raw source substring covered by a token.
    pub(crate) fn slice(&self, token: &Token) -> &'a str {
        self.source
            .get(token.start.offset..token.end.offset)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_rolls_back_tokens_and_cursor() {
        let mut tok = Tokenizer::new("abc", Spot::start());
        let matched = tok
            .attempt(|t| {
                t.enter(TokenKind::ReferenceNameIsh);
                t.consume();
                t.consume();
                Ok(false)
            })
            .unwrap();
        assert!(!matched);
        assert_eq!(tok.spot().offset, 0);
        assert!(tok.tokens.is_empty());
        assert!(tok.events.is_empty());
    }

    #[test]
    fn test_enter_exit_records_span() {
        let mut tok = Tokenizer::new("ab", Spot::start());
        tok.enter(TokenKind::ReferenceNameIsh);
        tok.consume();
        tok.consume();
        tok.exit(TokenKind::ReferenceNameIsh);
        assert_eq!(tok.events.len(), 2);
        let token = &tok.tokens[0];
        assert_eq!(token.start.offset, 0);
        assert_eq!(token.end.offset, 2);
        assert_eq!(tok.slice(token), "ab");
    }
}
