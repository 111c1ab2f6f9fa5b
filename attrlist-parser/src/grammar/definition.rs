use crate::{Error, Options};

use super::list::attribute_list;
use super::name::reference_name_ish;
use super::token::{EventKind, TokenKind};
use super::tokenizer::Tokenizer;

/// An attribute list definition: `{:label: #id .class key="value" ref}`.
///
/// The label between the colons is tokenized with the shared name-ish
/// sub-construct and reclassified once the construct as a whole matches.
pub(crate) fn definition(tok: &mut Tokenizer, options: &Options) -> Result<bool, Error> {
    let first_event = tok.events.len();

    if tok.peek() != Some('{') {
        return Ok(false);
    }
    tok.enter(TokenKind::Definition);
    tok.enter(TokenKind::DefinitionMarker);
    tok.consume();
    tok.exit(TokenKind::DefinitionMarker);

    if tok.peek() != Some(':') {
        return Ok(false);
    }
    tok.enter(TokenKind::DefinitionReference);
    tok.enter(TokenKind::DefinitionReferenceMarker);
    tok.consume();
    tok.exit(TokenKind::DefinitionReferenceMarker);

    if !tok.attempt(reference_name_ish)? {
        return Ok(false);
    }

    if tok.peek() != Some(':') {
        return Ok(false);
    }
    tok.enter(TokenKind::DefinitionReferenceMarker);
    tok.consume();
    tok.exit(TokenKind::DefinitionReferenceMarker);
    tok.exit(TokenKind::DefinitionReference);

    if !tok.attempt(|t| attribute_list(t, options))? {
        return Ok(false);
    }

    if tok.peek() != Some('}') {
        return Ok(false);
    }
    tok.enter(TokenKind::DefinitionMarker);
    tok.consume();
    tok.exit(TokenKind::DefinitionMarker);
    tok.exit(TokenKind::Definition);

    resolve_definition(tok, first_event)?;
    Ok(true)
}

/// Rename the label's provisional name-ish token, found right after the exit
/// of the first reference marker.
fn resolve_definition(tok: &mut Tokenizer, first_event: usize) -> Result<(), Error> {
    let marker_exit = tok.events[first_event..].iter().position(|e| {
        e.kind == EventKind::Exit
            && tok.tokens[e.token].kind == TokenKind::DefinitionReferenceMarker
    });

    let name_enter = marker_exit
        .and_then(|at| tok.events.get(first_event + at + 1))
        .copied()
        .ok_or(Error::MissingOpenNode {
            expected: TokenKind::ReferenceNameIsh.label(),
        })?;

    let name = &mut tok.tokens[name_enter.token];
    if name_enter.kind != EventKind::Enter || name.kind != TokenKind::ReferenceNameIsh {
        return Err(Error::ResolverDesync {
            expected: TokenKind::ReferenceNameIsh.label(),
            found: name.kind.label().to_string(),
            position: name.location().start,
        });
    }
    name.kind = TokenKind::DefinitionReferenceName;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::cursor::Spot;
    use pretty_assertions::assert_eq;

    fn try_definition(input: &str, options: &Options) -> (bool, Vec<TokenKind>) {
        let mut tok = Tokenizer::new(input, Spot::start());
        let matched = tok.attempt(|t| definition(t, options)).unwrap();
        let kinds = tok
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Enter)
            .map(|e| tok.tokens[e.token].kind)
            .collect();
        (matched, kinds)
    }

    #[test]
    fn test_definition_with_attributes() {
        let options = Options::default();
        let (matched, kinds) = try_definition("{:label: #id .cls}", &options);
        assert!(matched);
        assert!(kinds.contains(&TokenKind::Definition));
        assert!(kinds.contains(&TokenKind::DefinitionReferenceName));
        assert!(!kinds.contains(&TokenKind::ReferenceNameIsh));
    }

    #[test]
    fn test_definition_with_empty_list_fails() {
        // `{:label:}` has no list body at all, which the list construct
        // rejects.
        let options = Options::default();
        let (matched, kinds) = try_definition("{:label:}", &options);
        assert!(!matched);
        assert_eq!(kinds, Vec::<TokenKind>::new());
    }

    #[test]
    fn test_definition_label_keeps_own_name_kind() {
        let options = Options::default();
        let mut tok = Tokenizer::new("{:label: other}", Spot::start());
        assert!(tok.attempt(|t| definition(t, &options)).unwrap());

        let label = tok
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::DefinitionReferenceName)
            .copied()
            .unwrap();
        assert_eq!(tok.slice(&label), "label");
        // The body reference stays a plain reference attribute name.
        let body = tok
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::ReferenceAttributeName)
            .copied()
            .unwrap();
        assert_eq!(tok.slice(&body), "other");
    }

    #[test]
    fn test_definition_requires_closing_colon() {
        let options = Options::default();
        let (matched, _) = try_definition("{:label #id}", &options);
        assert!(!matched);
    }
}
