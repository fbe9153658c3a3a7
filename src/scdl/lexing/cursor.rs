//! Backtrackable cursor over a token array.
//!
//! Grammar execution never mutates the token array; it only moves a read
//! position. Each nested grammar scope forks a child cursor at the current
//! index, works on the child, and either commits the child's position back
//! or simply drops it. Dropping is the rollback: the parent position is
//! untouched by anything an abandoned child did.

use crate::scdl::lexing::tokens::Token;

/// A read position over a shared token slice, with nested transactions.
///
/// A fresh child must be forked for every retry attempt; a child is
/// single-use within its scope.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> TokenCursor<'t> {
        TokenCursor { tokens, index: 0 }
    }

    /// Fork a child transaction starting at the current position.
    pub fn child(&self) -> TokenCursor<'t> {
        TokenCursor {
            tokens: self.tokens,
            index: self.index,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Advance by one token. Running off the end is an ordinary `None`,
    /// not an error; the calling scope turns it into a match failure.
    pub fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Adopt the position of a finished child transaction.
    pub fn commit(&mut self, child: TokenCursor<'t>) {
        self.index = child.index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scdl::lexing::tokens::TokenKind;

    fn words(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .map(|text| Token::new(*text, TokenKind::Word))
            .collect()
    }

    #[test]
    fn child_starts_at_parent_position() {
        let tokens = words(&["aaa", "bbb", "ccc"]);
        let mut cursor = TokenCursor::new(&tokens);
        cursor.next();

        let mut child = cursor.child();
        assert_eq!(child.next().map(Token::text), Some("bbb"));
    }

    #[test]
    fn commit_adopts_the_child_position() {
        let tokens = words(&["aaa", "bbb", "ccc"]);
        let mut cursor = TokenCursor::new(&tokens);

        let mut child = cursor.child();
        child.next();
        child.next();
        cursor.commit(child);

        assert_eq!(cursor.next().map(Token::text), Some("ccc"));
    }

    #[test]
    fn dropping_a_child_leaves_the_parent_untouched() {
        let tokens = words(&["aaa", "bbb"]);
        let mut cursor = TokenCursor::new(&tokens);

        {
            let mut child = cursor.child();
            child.next();
            child.next();
            assert!(!child.has_next());
        }

        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next().map(Token::text), Some("aaa"));
    }

    #[test]
    fn next_past_the_end_is_none() {
        let tokens = words(&["aaa"]);
        let mut cursor = TokenCursor::new(&tokens);
        cursor.next();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.position(), 1);
    }
}
