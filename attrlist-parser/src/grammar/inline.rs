use crate::{Error, Options};

use super::list::attribute_list;
use super::token::TokenKind;
use super::tokenizer::Tokenizer;

/// A block inline attribute list: `{: #id .class key="value" ref}` on a line
/// of its own.
pub(crate) fn block_inline_list(tok: &mut Tokenizer, options: &Options) -> Result<bool, Error> {
    if tok.peek() != Some('{') {
        return Ok(false);
    }
    tok.enter(TokenKind::BlockInlineList);
    tok.enter(TokenKind::BlockInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::BlockInlineListMarker);

    if tok.peek() != Some(':') {
        return Ok(false);
    }
    tok.enter(TokenKind::BlockInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::BlockInlineListMarker);

    if !tok.attempt(|t| attribute_list(t, options))? {
        return Ok(false);
    }

    if tok.peek() != Some('}') {
        return Ok(false);
    }
    tok.enter(TokenKind::BlockInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::BlockInlineListMarker);
    tok.exit(TokenKind::BlockInlineList);
    Ok(true)
}

/// A span inline attribute list inside flow text. `{::}` is the explicit
/// empty variant; otherwise the body follows the shared list grammar.
pub(crate) fn span_inline_list(tok: &mut Tokenizer, options: &Options) -> Result<bool, Error> {
    if tok.peek() != Some('{') {
        return Ok(false);
    }
    tok.enter(TokenKind::SpanInlineList);
    tok.enter(TokenKind::SpanInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::SpanInlineListMarker);

    if tok.peek() != Some(':') {
        return Ok(false);
    }
    tok.enter(TokenKind::SpanInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::SpanInlineListMarker);

    if tok.peek() == Some(':') {
        tok.enter(TokenKind::SpanInlineListMarker);
        tok.consume();
        tok.exit(TokenKind::SpanInlineListMarker);
    } else if !tok.attempt(|t| attribute_list(t, options))? {
        return Ok(false);
    }

    if tok.peek() != Some('}') {
        return Ok(false);
    }
    tok.enter(TokenKind::SpanInlineListMarker);
    tok.consume();
    tok.exit(TokenKind::SpanInlineListMarker);
    tok.exit(TokenKind::SpanInlineList);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::cursor::Spot;
    use crate::grammar::token::EventKind;

    fn matches(
        construct: fn(&mut Tokenizer, &Options) -> Result<bool, Error>,
        input: &str,
    ) -> bool {
        let options = Options::default();
        let mut tok = Tokenizer::new(input, Spot::start());
        tok.attempt(|t| construct(t, &options)).unwrap()
    }

    #[test]
    fn test_block_inline_list() {
        assert!(matches(block_inline_list, "{: #id .cls}"));
        assert!(matches(block_inline_list, "{: }"));
        assert!(!matches(block_inline_list, "{:}"));
        assert!(!matches(block_inline_list, "{ #id}"));
    }

    #[test]
    fn test_span_inline_list_empty_variant() {
        assert!(matches(span_inline_list, "{::}"));
        assert!(matches(span_inline_list, "{: .cls}"));
        assert!(!matches(span_inline_list, "{:}"));
    }

    #[test]
    fn test_span_inline_list_consumes_through_closing_brace() {
        let options = Options::default();
        let mut tok = Tokenizer::new("{: #id} rest", Spot::start());
        assert!(span_inline_list(&mut tok, &options).unwrap());
        assert_eq!(tok.peek(), Some(' '));

        let outer = tok
            .events
            .iter()
            .rev()
            .find(|e| e.kind == EventKind::Exit && tok.tokens[e.token].kind == TokenKind::SpanInlineList)
            .copied()
            .unwrap();
        assert_eq!(tok.tokens[outer.token].end.offset, "{: #id}".len());
    }
}
