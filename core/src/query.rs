//! Boolean queries over an [`InvertedIndex`].
//!
//! A query is a line of words joined by `and`/`or`; adjacent words are
//! implicitly and-ed, and `and` binds tighter than `or`. Each and-sequence
//! is the pairwise minimum of its words' counters, and the sequences are
//! summed together.

use std::fmt;

use crate::error::QueryError;
use crate::word::{first_invalid_char, normalize_word};
use crate::{Counter, InvertedIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    And,
    Or,
}

impl Token {
    fn is_operator(&self) -> bool {
        !matches!(self, Token::Word(_))
    }

    fn as_str(&self) -> &str {
        match self {
            Token::Word(w) => w.as_str(),
            Token::And => "and",
            Token::Or => "or",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, normalized query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    /// Tokenize and validate one query line. A blank line is an empty query.
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        if let Some(c) = first_invalid_char(line) {
            return Err(QueryError::BadCharacter(c));
        }

        let tokens: Vec<Token> = line
            .split_whitespace()
            .map(|raw| {
                let mut w = raw.to_string();
                normalize_word(&mut w);
                match w.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    _ => Token::Word(w),
                }
            })
            .collect();

        if let Some(first) = tokens.first().filter(|t| t.is_operator()) {
            return Err(QueryError::LeadingOperator(first.to_string()));
        }
        for pair in tokens.windows(2) {
            if pair[0].is_operator() && pair[1].is_operator() {
                return Err(QueryError::AdjacentOperators(pair[0].to_string(), pair[1].to_string()));
            }
        }
        if let Some(last) = tokens.last().filter(|t| t.is_operator()) {
            return Err(QueryError::TrailingOperator(last.to_string()));
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Score every matching document.
    ///
    /// A word missing from the index, which includes every word shorter
    /// than three letters, empties its whole and-sequence; evaluation picks
    /// up again after the next `or`.
    pub fn evaluate(&self, index: &InvertedIndex) -> Counter {
        let mut result = Counter::new();
        let mut sequence: Option<Counter> = None;
        let mut dead = false;

        for token in &self.tokens {
            match token {
                Token::And => {}
                Token::Or => {
                    if let Some(seq) = sequence.take() {
                        result.union_with(&seq);
                    }
                    dead = false;
                }
                Token::Word(_) if dead => {}
                Token::Word(word) => match index.lookup(word) {
                    None => {
                        sequence = None;
                        dead = true;
                    }
                    Some(found) => {
                        sequence = Some(match sequence.take() {
                            None => found.clone(),
                            Some(seq) => seq.intersect(found),
                        });
                    }
                },
            }
        }
        if let Some(seq) = sequence {
            result.union_with(&seq);
        }
        result
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
