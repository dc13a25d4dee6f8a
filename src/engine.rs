//! The stack-based nesting engine.
//!
//! Sentences are folded left to right over a stack of open assertions.
//! Starters push, enders pop and discharge, tactics and inert sentences
//! flow into whichever proof is open. The fold never fails: malformed
//! documents produce warnings, a `partial` flag, and the best
//! approximation of the intended structure.

use std::collections::BTreeSet;

use crate::assertion::{discharge_all, Assertion};
use crate::classifier::{classify, extract_requirements, SentenceKind};
use crate::diagnostics::Warning;
use crate::sentence::{split_ellipses, Sentence};
use crate::statistics::SentenceStatistics;

/// The complete output of one analysis pass: the reconstructed sentence
/// list (proofs glommed if requested), the per-sentence statistics
/// (indexed by the *input* sentence order), and any warnings raised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Analysis {
    pub sentences: Vec<String>,
    pub statistics: SentenceStatistics,
    pub warnings: Vec<Warning>,
}

/// Analyzes an ordered sentence list. With `glom_proofs`, each complete
/// proof is joined into a single output sentence; glomming is abandoned
/// for the rest of the document as soon as one proof turns out to be
/// unterminated.
pub fn analyze(sentences: &[Sentence], glom_proofs: bool) -> Analysis {
    Engine::new(glom_proofs).run(sentences)
}

/// Analyzes an ordered sentence list and keeps only the statistics.
pub fn compute_statistics(sentences: &[Sentence]) -> SentenceStatistics {
    analyze(sentences, false).statistics
}

struct Engine {
    stack: Vec<Assertion>,
    // Bullet and brace sentences seen since the last proof step. They
    // belong to the next proof that advances, not to the output stream.
    pending: Vec<Sentence>,
    custom_tactics: BTreeSet<String>,
    warned_keywords: BTreeSet<String>,
    warnings: Vec<Warning>,
    result: Vec<String>,
    glom: bool,
    brace_depth: usize,
    nested_pragma: bool,
    stats: SentenceStatistics,
}

impl Engine {
    fn new(glom_proofs: bool) -> Engine {
        Engine {
            stack: Vec::new(),
            pending: Vec::new(),
            custom_tactics: BTreeSet::new(),
            warned_keywords: BTreeSet::new(),
            warnings: Vec::new(),
            result: Vec::new(),
            glom: glom_proofs,
            brace_depth: 0,
            nested_pragma: false,
            stats: SentenceStatistics::default(),
        }
    }

    fn run(mut self, sentences: &[Sentence]) -> Analysis {
        for (index, sentence) in sentences.iter().enumerate() {
            let opens_focus = self.process(index, sentence);
            let allowed = self.nested_pragma
                || self.brace_depth > 0
                || self
                    .stack
                    .iter()
                    .any(|assertion| assertion.is_program() && assertion.in_proof());
            self.stats.nesting_allowed.push(allowed);
            if opens_focus {
                // The focus opened by `{` covers the following
                // sentences, not the brace itself.
                self.brace_depth += 1;
            }
        }
        self.finish()
    }

    /// Handles one sentence, recording exactly one depth entry. Returns
    /// whether the sentence opened a focus brace.
    fn process(&mut self, index: usize, sentence: &Sentence) -> bool {
        let classification = classify(sentence.as_str(), &self.custom_tactics);

        // A failed command leaves no trace in Coq, so it must leave no
        // trace on the stack either. Record it and move on.
        if classification.fail_wrapped {
            self.record_depth();
            self.stats.fail_indices.insert(index);
            self.sink(sentence.clone());
            return false;
        }

        // The Program attribute opens a scope of its own, whatever the
        // command underneath was. The command's own proof obligations
        // arrive later as separate sentences, so the statement goes
        // straight to the output and an anonymous scope is pushed.
        if classification.program {
            self.record_depth();
            self.stats.program_indices.push(index);
            if classification.kind == SentenceKind::TheoremStarter {
                self.stats.theorem_indices.insert(index);
            }
            self.flush_pending();
            self.sink(sentence.clone());
            self.stack.push(Assertion::new(None, true));
            return false;
        }

        match classification.kind {
            SentenceKind::BraceOrBullet => {
                self.record_depth();
                let text = sentence.as_str();
                if text == "}" {
                    self.brace_depth = self.brace_depth.saturating_sub(1);
                }
                self.pending.push(sentence.clone());
                return text == "{";
            }
            SentenceKind::TheoremStarter => {
                self.flush_pending();
                self.stack
                    .push(Assertion::new(Some(sentence.clone()), false));
                // Starters are counted inside the scope they open.
                self.record_depth();
                self.stats.theorem_indices.insert(index);
            }
            SentenceKind::ObligationStarter { self_contained } => {
                self.ensure_open(true);
                self.record_depth();
                self.stats.obligation_indices.push(index);
                self.stats.starter_indices.insert(index);
                if self_contained {
                    self.stats.ender_indices.push(index);
                }
                if let Some(top) = self.stack.last_mut() {
                    top.start_proof(sentence.clone(), &mut self.pending);
                }
            }
            SentenceKind::ProofStarter => {
                self.ensure_open(false);
                self.record_depth();
                self.stats.starter_indices.insert(index);
                if let Some(top) = self.stack.last_mut() {
                    top.start_proof(sentence.clone(), &mut self.pending);
                }
            }
            SentenceKind::ProofEnder { self_contained } => {
                // Enders are counted inside the scope they close.
                self.record_depth();
                self.stats.ender_indices.push(index);
                if self_contained {
                    self.stats.starter_indices.insert(index);
                }
                match self.stack.pop() {
                    Some(mut assertion) => {
                        assertion.end_proof(sentence.clone(), &mut self.pending);
                        self.glom =
                            assertion.discharge(self.glom, &mut self.result, &mut self.warnings);
                    }
                    None => {
                        tracing::warn!(index, sentence = sentence.as_str(), "unmatched ender");
                        self.warnings.push(Warning::unmatched_ender(index));
                        self.stats.partial = true;
                        self.glom = false;
                        // Stray bullets ahead of the ender still come
                        // first in the output.
                        self.flush_pending();
                        self.sink(sentence.clone());
                    }
                }
            }
            SentenceKind::Tactic { custom } => {
                self.ensure_open(true);
                self.record_depth();
                self.stats.tactic_indices.insert(index);
                if let Some(name) = custom {
                    self.custom_tactics.insert(name);
                }
                if let Some(top) = self.stack.last_mut() {
                    // A `tac1... tac2.` chain is several tactic steps
                    // in one sentence; each fragment counts on its own.
                    for fragment in split_ellipses(sentence) {
                        top.apply_tactic(fragment, &mut self.pending);
                    }
                }
            }
            SentenceKind::TacticDefinition { name } => {
                self.custom_tactics.insert(name);
                self.record_inert(index);
                self.sink(sentence.clone());
            }
            SentenceKind::Requirement => {
                let requirements = extract_requirements(sentence.as_str());
                self.stats.requirements.extend(requirements);
                self.record_inert(index);
                self.sink(sentence.clone());
            }
            SentenceKind::NestedProofsPragma { allowed } => {
                self.nested_pragma = allowed;
                self.record_inert(index);
                self.sink(sentence.clone());
            }
            SentenceKind::Query => {
                self.record_inert(index);
                self.sink(sentence.clone());
            }
            SentenceKind::Unknown { keyword } => {
                if self.warned_keywords.insert(keyword.clone()) {
                    tracing::warn!(keyword = keyword.as_str(), "unknown command treated as query");
                    self.warnings.push(Warning::unknown_command(&keyword));
                }
                self.record_inert(index);
                self.sink(sentence.clone());
            }
            SentenceKind::Other => {
                self.record_depth();
                self.sink(sentence.clone());
            }
        }
        false
    }

    fn finish(mut self) -> Analysis {
        let pending = std::mem::take(&mut self.pending);
        for sentence in pending {
            self.sink(sentence);
        }
        if self.stack.iter().any(Assertion::in_proof) {
            self.stats.partial = true;
        }
        discharge_all(
            &mut self.stack,
            self.glom,
            &mut self.result,
            &mut self.warnings,
        );
        self.stats.custom_tactics = self.custom_tactics;
        self.stats.unify_proof_indices();
        Analysis {
            sentences: self.result,
            statistics: self.stats,
            warnings: self.warnings,
        }
    }

    /// Routes a structurally inert sentence: into the open proof if one
    /// is open, otherwise straight to the output.
    fn sink(&mut self, sentence: Sentence) {
        match self.stack.last_mut() {
            Some(top) if top.in_proof() => top.absorb(sentence),
            _ => self.result.push(sentence.into_string()),
        }
    }

    fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for sentence in pending {
            self.sink(sentence);
        }
    }

    /// A proof step with nothing on the stack reopens an anonymous
    /// scope, e.g. obligations arriving after their Program was already
    /// closed, or a `Goal` with no statement.
    fn ensure_open(&mut self, is_program: bool) {
        if self.stack.is_empty() {
            self.stack.push(Assertion::new(None, is_program));
        }
    }

    /// Records one depth entry, capping the rise at one per sentence.
    /// A theorem starter directly after a Program command would
    /// otherwise jump by two, since the Program is counted outside the
    /// scope it opens while the theorem is counted inside its own.
    fn record_depth(&mut self) {
        let depth = match self.stats.depths.last() {
            Some(&previous) => self.stack.len().min(previous + 1),
            None => self.stack.len(),
        };
        self.stats.depths.push(depth);
    }

    fn record_inert(&mut self, index: usize) {
        self.record_depth();
        self.stats.query_indices.insert(index);
    }
}
