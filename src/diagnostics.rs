use std::fmt;

use serde::{Deserialize, Serialize};

/// An advisory, non-fatal warning raised while analyzing a document.
///
/// The analysis never aborts. Warnings accompany the (possibly
/// approximate) output so callers can decide how much to trust it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    // A proof whose last sentence is not a recognized ender.
    // Glomming is abandoned for the rest of the document.
    UnterminatedProof(Option<String>),

    // A proof ender with no open assertion to close.
    UnmatchedEnder(usize),

    // A capitalized command absent from every vocabulary table.
    // Reported once per keyword.
    UnknownCommand(String),
}

impl Warning {
    pub fn unterminated_proof(statement: Option<&str>) -> Warning {
        Warning::UnterminatedProof(statement.map(|s| s.to_string()))
    }

    pub fn unmatched_ender(index: usize) -> Warning {
        Warning::UnmatchedEnder(index)
    }

    pub fn unknown_command(keyword: &str) -> Warning {
        Warning::UnknownCommand(keyword.to_string())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::UnterminatedProof(Some(statement)) => {
                write!(f, "unterminated proof of '{}'", statement)
            }
            Warning::UnterminatedProof(None) => {
                write!(f, "unterminated proof")
            }
            Warning::UnmatchedEnder(index) => {
                write!(f, "proof ender at sentence {} with no open assertion", index)
            }
            Warning::UnknownCommand(keyword) => {
                write!(f, "unknown command '{}' treated as a query", keyword)
            }
        }
    }
}
