//! Free-text reply → verdict.
//!
//! The model is asked to answer "Showered" or "Not Showered", but replies are
//! free text. Matching is case-insensitive over word tokens with a fixed
//! precedence:
//!
//! 1. a negated positive → negative. A negator counts when it sits in the
//!    same clause as the positive token and at most three words before it,
//!    so "not showered", "not yet showered" and "has not been showered" are
//!    all negative while "not sure, but showered" is not
//! 2. the positive token as a whole word → positive
//! 3. a reply that opens with a bare negation ("no", "not", ...) → negative
//! 4. anything else, including an empty reply → unparseable
//!
//! Rule 1 runs first because the negative answer contains the positive
//! token as a substring.

use lather_core::Verdict;

use crate::error::ClassifierError;

const POSITIVE_TOKEN: &str = "showered";

/// Words that negate a closely following positive token.
const NEGATORS: &[&str] = &[
    "not", "never", "hasn't", "hasnt", "haven't", "havent", "hadn't", "hadnt", "didn't",
    "didnt", "isn't", "isnt", "wasn't", "wasnt",
];

/// How many words before the positive token a negator may sit.
const NEGATION_REACH: usize = 3;

/// Characters that end a clause for negation purposes.
const CLAUSE_BREAKS: &[char] = &['.', ',', ';', '!', '?', ':'];

/// Words that, opening a reply, make it a negative answer.
const NEGATIVE_OPENERS: &[&str] = &["no", "not", "negative", "none", "nope"];

/// Map a reply to a [`Verdict`].
///
/// # Errors
///
/// Returns [`ClassifierError::UnparseableResponse`] if the reply matches no rule.
pub fn interpret_response(reply: &str) -> Result<Verdict, ClassifierError> {
    let lowered = reply.to_lowercase();

    if lowered.split(CLAUSE_BREAKS).any(|clause| negates_positive(&words(clause))) {
        return Ok(Verdict::Negative);
    }

    let tokens = words(&lowered);
    if tokens.contains(&POSITIVE_TOKEN) {
        return Ok(Verdict::Positive);
    }

    if tokens.first().is_some_and(|t| NEGATIVE_OPENERS.contains(t)) {
        return Ok(Verdict::Negative);
    }

    tracing::debug!(reply, "reply matched no verdict rule");
    Err(ClassifierError::UnparseableResponse)
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether some positive token in `clause` has a negator shortly before it.
fn negates_positive(clause: &[&str]) -> bool {
    clause.iter().enumerate().any(|(at, token)| {
        *token == POSITIVE_TOKEN
            && clause[at.saturating_sub(NEGATION_REACH)..at]
                .iter()
                .any(|word| NEGATORS.contains(word))
    })
}
