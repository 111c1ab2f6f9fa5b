use crate::Error;

use super::token::TokenKind;
use super::tokenizer::Tokenizer;

/// The shared `NAME` sub-construct: an ASCII alphanumeric followed by any run
/// of alphanumerics and dashes.
///
/// A bare `NAME` is lexically identical whether it is a reference, a
/// key-value key, or a definition's label, so it is emitted as the
/// provisional `ReferenceNameIsh` kind and reclassified by the resolver pass
/// once lookahead can tell.
// The `Result` shape is what `Tokenizer::attempt` expects of a construct.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn reference_name_ish(tok: &mut Tokenizer) -> Result<bool, Error> {
    match tok.peek() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        Some(_) | None => return Ok(false),
    }

    tok.enter(TokenKind::ReferenceNameIsh);
    tok.consume();
    while let Some(c) = tok.peek() {
        if c.is_ascii_alphanumeric() || c == '-' {
            tok.consume();
        } else {
            break;
        }
    }
    tok.exit(TokenKind::ReferenceNameIsh);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::cursor::Spot;

    #[test]
    fn test_name_ish_accepts_alnum_and_dash() {
        let mut tok = Tokenizer::new("ref-2 rest", Spot::start());
        assert!(reference_name_ish(&mut tok).unwrap());
        assert_eq!(tok.slice(&tok.tokens[0]), "ref-2");
    }

    #[test]
    fn test_name_ish_rejects_leading_dash() {
        let mut tok = Tokenizer::new("-ref", Spot::start());
        assert!(!reference_name_ish(&mut tok).unwrap());
    }
}
