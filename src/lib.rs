//! Heuristic structural analysis of Coq proof scripts.
//!
//! This crate recovers the coarse structure of a proof document without
//! running Coq: where each sentence begins and ends, which sentences
//! state goals, open and close proofs, or apply tactics, and how deeply
//! nested each one is. The analysis is purely lexical and never fails;
//! documents that would not compile still produce output, flagged as
//! partial and accompanied by warnings.

pub mod assertion;
pub mod classifier;
pub mod diagnostics;
pub mod engine;
pub mod sentence;
pub mod statistics;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use crate::assertion::Assertion;
pub use crate::classifier::{classify, Classification, SentenceKind};
pub use crate::diagnostics::Warning;
pub use crate::engine::{analyze, compute_statistics, Analysis};
pub use crate::sentence::{split_sentences, strip_comments, Sentence};
pub use crate::statistics::SentenceStatistics;

/// Splits raw source into sentences and analyzes them in one step.
///
/// With `glom_proofs`, each complete proof in the output sentence list
/// is joined into a single sentence.
pub fn parse_source(source: &str, glom_proofs: bool) -> Analysis {
    engine::analyze(&sentence::split_sentences(source), glom_proofs)
}
