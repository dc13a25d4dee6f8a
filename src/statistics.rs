//! Per-sentence structural statistics gathered during analysis.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Everything the nesting engine learns about a document, indexed by
/// sentence position. Index sets use ordered sets so serialized output
/// is stable; enders, programs, and obligations use vectors because
/// callers care about their arrival order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SentenceStatistics {
    /// Nesting depth of each sentence: the number of assertions open
    /// while it was processed, with starters counted inside the scope
    /// they open and enders inside the scope they close.
    pub depths: Vec<usize>,

    /// Sentences stating a theorem-like goal.
    pub theorem_indices: BTreeSet<usize>,

    /// Sentences entering proof mode: `Proof.`, `Goal`, obligations.
    pub starter_indices: BTreeSet<usize>,

    /// Sentences applying a tactic.
    pub tactic_indices: BTreeSet<usize>,

    /// Structurally inert sentences: queries, requirements, pragmas,
    /// unrecognized commands.
    pub query_indices: BTreeSet<usize>,

    /// Sentences wrapped in `Fail`, whatever the wrapped command was.
    pub fail_indices: BTreeSet<usize>,

    /// Every sentence participating in proof structure: the union of
    /// theorem, starter, tactic, ender, program, and obligation indices.
    pub proof_indices: BTreeSet<usize>,

    /// Sentences concluding a proof, in arrival order.
    pub ender_indices: Vec<usize>,

    /// Sentences carrying the `Program` attribute.
    pub program_indices: Vec<usize>,

    /// Obligation-opening sentences.
    pub obligation_indices: Vec<usize>,

    /// Whether opening a nested assertion was legal at each sentence:
    /// true under the `Nested Proofs Allowed` flag, inside a focus
    /// brace, or inside a `Program` still discharging obligations.
    pub nesting_allowed: Vec<bool>,

    /// Logical names of required libraries, `From` dirpaths applied.
    pub requirements: BTreeSet<String>,

    /// Tactic names defined or invoked that are not in the built-in
    /// tactic index.
    pub custom_tactics: BTreeSet<String>,

    /// The document left proof state unbalanced: an ender had nothing
    /// to close, or an assertion was still open at end of input.
    pub partial: bool,
}

impl SentenceStatistics {
    /// Rebuilds `proof_indices` from the individual index collections.
    pub(crate) fn unify_proof_indices(&mut self) {
        let mut union = BTreeSet::new();
        union.extend(&self.theorem_indices);
        union.extend(&self.starter_indices);
        union.extend(&self.tactic_indices);
        union.extend(self.ender_indices.iter().copied());
        union.extend(self.program_indices.iter().copied());
        union.extend(self.obligation_indices.iter().copied());
        self.proof_indices = union;
    }
}
