use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of classifying one photo.
///
/// Failures are carried separately as the classifier's error type, so a
/// full classification result is `Result<Verdict, ClassifierError>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The photo shows the activity; today has been recorded.
    Positive,
    /// The photo does not show the activity; nothing was recorded.
    Negative,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    /// The answer wording the classifier prompt asks for.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Showered",
            Self::Negative => "Not Showered",
        }
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
