//! The assertion model: one stated goal plus the proofs discharging it.
//!
//! An assertion is born when a theorem-like command (or a `Program`
//! scope) is seen and lives on the nesting stack until its final ender.
//! A plain assertion owns exactly one proof; a `Program` owns one proof
//! per obligation. Sentences inside proof mode accumulate here rather
//! than going straight to the output, so a finished proof can be
//! glommed into a single sentence.

use crate::diagnostics::Warning;
use crate::sentence::Sentence;
use crate::vocabulary;

#[derive(Clone, Debug)]
pub struct Assertion {
    // The stating sentence. None for anonymous scopes: a bare `Proof.`
    // or `Goal`, or a Program whose obligations outlive its command.
    statement: Option<Sentence>,
    is_program: bool,
    // One inner Vec per proof. Programs accumulate several; everything
    // else gets at most one.
    proofs: Vec<Vec<Sentence>>,
}

impl Assertion {
    pub fn new(statement: Option<Sentence>, is_program: bool) -> Assertion {
        Assertion {
            statement,
            is_program,
            proofs: Vec::new(),
        }
    }

    pub fn is_program(&self) -> bool {
        self.is_program
    }

    pub fn statement(&self) -> Option<&Sentence> {
        self.statement.as_ref()
    }

    /// Whether the most recent proof is still open.
    pub fn in_proof(&self) -> bool {
        match self.proofs.last().and_then(|proof| proof.last()) {
            Some(last) => !vocabulary::is_proof_ender(last.as_str()),
            None => false,
        }
    }

    /// Records a proof-opening sentence. A starter arriving while a
    /// proof is already open (a stray `Proof.` mid-proof) joins the open
    /// proof instead of opening another.
    pub fn start_proof(&mut self, starter: Sentence, pending: &mut Vec<Sentence>) {
        if !self.in_proof() {
            self.proofs.push(Vec::new());
        }
        self.drain_pending(pending);
        self.active_proof().push(starter);
    }

    /// Records a tactic. Tactics may arrive without any explicit proof
    /// starter, in which case they open the proof themselves.
    pub fn apply_tactic(&mut self, tactic: Sentence, pending: &mut Vec<Sentence>) {
        if !self.in_proof() {
            self.proofs.push(Vec::new());
        }
        self.drain_pending(pending);
        self.active_proof().push(tactic);
    }

    /// Records a proof-closing sentence. An ender with no open proof
    /// (`Solve Obligations` on a fresh Program, or an `Admitted.` right
    /// after the statement) closes a proof of its own.
    pub fn end_proof(&mut self, ender: Sentence, pending: &mut Vec<Sentence>) {
        if !self.in_proof() {
            self.proofs.push(Vec::new());
        }
        self.drain_pending(pending);
        self.active_proof().push(ender);
    }

    /// Appends a structurally inert sentence to the open proof.
    pub fn absorb(&mut self, sentence: Sentence) {
        if self.proofs.is_empty() {
            self.proofs.push(Vec::new());
        }
        self.active_proof().push(sentence);
    }

    fn active_proof(&mut self) -> &mut Vec<Sentence> {
        if self.proofs.is_empty() {
            self.proofs.push(Vec::new());
        }
        // The vector was just made nonempty.
        self.proofs.last_mut().unwrap()
    }

    fn drain_pending(&mut self, pending: &mut Vec<Sentence>) {
        let proof = self.active_proof();
        proof.extend(pending.drain(..));
    }

    /// Flushes this assertion to the output. Each complete proof is
    /// either glommed into one sentence or emitted verbatim; a proof
    /// missing its ender raises a warning and disables glomming for the
    /// rest of the document. Returns the updated glom flag.
    pub fn discharge(
        self,
        mut glom: bool,
        result: &mut Vec<String>,
        warnings: &mut Vec<Warning>,
    ) -> bool {
        if let Some(statement) = &self.statement {
            // Program statements were already emitted when seen, since
            // the command itself sits outside its obligations.
            if !self.is_program {
                result.push(statement.as_str().to_string());
            }
        }
        let statement = self.statement;
        for proof in self.proofs {
            let terminated = proof
                .last()
                .is_some_and(|last| vocabulary::is_proof_ender(last.as_str()));
            if !terminated {
                tracing::warn!(
                    statement = statement.as_ref().map(Sentence::as_str),
                    "unterminated proof"
                );
                warnings.push(Warning::unterminated_proof(
                    statement.as_ref().map(Sentence::as_str),
                ));
                glom = false;
            }
            if glom {
                let joined = proof
                    .iter()
                    .map(Sentence::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                result.push(joined);
            } else {
                result.extend(proof.into_iter().map(Sentence::into_string));
            }
        }
        glom
    }
}

/// Discharges every assertion still on the stack, innermost first, the
/// order their enders would have arrived in. Returns the updated glom
/// flag.
pub fn discharge_all(
    stack: &mut Vec<Assertion>,
    mut glom: bool,
    result: &mut Vec<String>,
    warnings: &mut Vec<Warning>,
) -> bool {
    while let Some(assertion) = stack.pop() {
        glom = assertion.discharge(glom, result, warnings);
    }
    glom
}
