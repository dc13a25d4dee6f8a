//! Fixed vocabulary tables for the lexical classifier.
//!
//! Everything here is loaded once into process-wide statics and shared
//! read-only. The tables come from the Coq reference manual: commands
//! that start assertions and proofs, commands that end proof mode, the
//! standard tactic index, and prefixes that modify other sentences.

use std::sync::LazyLock;

use regex::Regex;

fn starter_regex(words: &[&str]) -> Regex {
    // Every word is plain text, so no escaping is needed. Sentences
    // always end in a period, so the boundary class also matches
    // single-word commands like "Let." or "Proof.".
    let alternation = words.join("|");
    Regex::new(&format!(r"^(?:{})[\s.]", alternation)).unwrap()
}

/// Commands that may (but are not guaranteed to) require proofs.
pub static THEOREM_STARTERS: LazyLock<Regex> = LazyLock::new(|| {
    starter_regex(&[
        "Add Parametric Morphism",
        "Add Morphism",
        "Add Setoid",
        "Declare Morphism",
        "Theorem",
        "Lemma",
        "Fact",
        "Remark",
        "Corollary",
        "Proposition",
        "Property",
        "Definition",
        "Example",
        "Instance",
        "Let",
        "Function",
        "Fixpoint",
        "Coercion",
    ])
});

/// Proof environments associated with Programs.
pub static OBLIGATION_STARTERS: LazyLock<Regex> = LazyLock::new(|| {
    starter_regex(&[
        "Next Obligation",
        "Solve All Obligations",
        "Solve Obligations",
        "Solve Obligation",
        "Obligation",
    ])
});

/// Commands that would otherwise be mistaken for obligation or proof
/// starters.
pub static PROOF_NON_STARTERS: LazyLock<Regex> =
    LazyLock::new(|| starter_regex(&["Obligation Tactic", "Obligations"]));

/// Commands that enter proof mode directly.
pub static PROOF_STARTERS: LazyLock<Regex> = LazyLock::new(|| starter_regex(&["Proof", "Goal"]));

/// The `Solve Obligation(s)` family both opens and closes an obligation
/// proof in one sentence.
pub static SOLVE_OBLIGATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Solve (?:All )?Obligations?[\s.]").unwrap());

/// Sentences that conclude proof mode, matched exactly.
pub const EXACT_ENDERS: &[&str] = &["Abort All.", "Abort.", "Admitted.", "Defined.", "Qed.", "Save."];

/// Control commands that wrap and modify arbitrary sentences.
/// `Fail` is special-cased by the classifier; the others are stripped.
pub const CONTROL_PREFIXES: &[&str] = &["Fail", "Redirect", "Succeed", "Time", "Timeout"];

/// Legacy attributes that may prefix a command.
pub const ATTRIBUTE_WORDS: &[&str] = &[
    "Cumulative",
    "Global",
    "Local",
    "Monomorphic",
    "NonCumulative",
    "Polymorphic",
    "Private",
    "Program",
];

/// New-style attribute lists, e.g. `#[program, universes(polymorphic)]`.
pub static ATTRIBUTE_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\[[^\]]*\]").unwrap());

/// Query commands: read-only, no effect on proof structure.
pub static QUERIES: LazyLock<Regex> = LazyLock::new(|| {
    starter_regex(&[
        "About",
        "Check",
        "Compute",
        "Eval",
        "Locate",
        "Print",
        "SearchAbout",
        "SearchHead",
        "SearchPattern",
        "SearchRewrite",
        "Search",
        "Show",
        "Set",
        "Test",
        "Unset",
    ])
});

/// Commands that load compiled files and libraries.
pub static REQUIREMENT_STARTERS: LazyLock<Regex> =
    LazyLock::new(|| starter_regex(&["From", "Require"]));

/// The command that defines a custom tactic.
pub static TACTIC_DEFINERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Ltac\s").unwrap());

/// Common vernacular that never affects proof nesting. Recognizing these
/// keeps the unknown-command warning channel for genuine surprises.
/// Sorted for binary search; first word of the sentence is looked up.
pub const INERT_COMMANDS: &[&str] = &[
    "Arguments",
    "Axiom",
    "Axioms",
    "Bind",
    "Canonical",
    "Class",
    "Close",
    "CoFixpoint",
    "CoInductive",
    "Collection",
    "Comment",
    "Conjecture",
    "Constraint",
    "Context",
    "Create",
    "Declare",
    "Derive",
    "End",
    "Existing",
    "Export",
    "Extract",
    "Extraction",
    "Generalizable",
    "Hint",
    "Hypotheses",
    "Hypothesis",
    "Identity",
    "Implicit",
    "Import",
    "Include",
    "Inductive",
    "Infix",
    "Module",
    "Notation",
    "Opaque",
    "Open",
    "Parameter",
    "Parameters",
    "Primitive",
    "Record",
    "Register",
    "Remove",
    "Reserved",
    "Scheme",
    "Section",
    "Strategy",
    "Structure",
    "Tactic",
    "Transparent",
    "Universe",
    "Universes",
    "Variable",
    "Variables",
    "Variant",
];

/// The standard tactic index, all lower-case, sorted for binary search.
pub const TACTICS: &[&str] = &[
    "abstract",
    "absurd",
    "admit",
    "all",
    "apply",
    "assert",
    "assert_fails",
    "assert_succeeds",
    "assumption",
    "auto",
    "autoapply",
    "autorewrite",
    "autounfold",
    "bfs",
    "btauto",
    "by",
    "case",
    "case_eq",
    "casetype",
    "cbn",
    "cbv",
    "change",
    "change_no_check",
    "classical_left",
    "classical_right",
    "clear",
    "clearbody",
    "cofix",
    "compare",
    "compute",
    "congr",
    "congruence",
    "constr_eq",
    "constr_eq_nounivs",
    "constr_eq_strict",
    "constructor",
    "context",
    "contradict",
    "contradiction",
    "cut",
    "cutrewrite",
    "cycle",
    "debug",
    "decide",
    "decompose",
    "dependent",
    "destruct",
    "dintuition",
    "discrR",
    "discriminate",
    "do",
    "done",
    "dtauto",
    "eapply",
    "eassert",
    "eassumption",
    "easy",
    "eauto",
    "ecase",
    "econstructor",
    "edestruct",
    "ediscriminate",
    "eelim",
    "eenough",
    "eexact",
    "eexists",
    "einduction",
    "einjection",
    "eintros",
    "eleft",
    "elim",
    "elimtype",
    "enough",
    "epose",
    "eremember",
    "erewrite",
    "eright",
    "eset",
    "esimplify_eq",
    "esplit",
    "etransitivity",
    "eval",
    "evar",
    "exact",
    "exact_no_check",
    "exactly_once",
    "exfalso",
    "exists",
    "f_equal",
    "fail",
    "field",
    "field_simplify",
    "field_simplify_eq",
    "finish_timing",
    "first",
    "firstorder",
    "fix",
    "fold",
    "fresh",
    "fun",
    "functional",
    "generalize",
    "generally",
    "gfail",
    "give_up",
    "guard",
    "has_evar",
    "have",
    "hnf",
    "idtac",
    "in",
    "induction",
    "info_auto",
    "info_eauto",
    "info_trivial",
    "injection",
    "instantiate",
    "intro",
    "intros",
    "intuition",
    "inversion",
    "inversion_clear",
    "inversion_sigma",
    "is_cofix",
    "is_const",
    "is_constructor",
    "is_evar",
    "is_fix",
    "is_ground",
    "is_ind",
    "is_proj",
    "is_var",
    "lapply",
    "last",
    "lazy",
    "lazy_match",
    "lazymatch",
    "left",
    "let",
    "lia",
    "lra",
    "match",
    "move",
    "multi_match",
    "multimatch",
    "native_cast_no_check",
    "native_compute",
    "nia",
    "notypeclasses",
    "now",
    "now_show",
    "nra",
    "nsatz",
    "numgoals",
    "omega",
    "once",
    "only",
    "optimize_heap",
    "over",
    "pattern",
    "pose",
    "progress",
    "psatz",
    "rapply",
    "red",
    "refine",
    "reflexivity",
    "remember",
    "rename",
    "repeat",
    "replace",
    "reset",
    "restart_timer",
    "revert",
    "revgoals",
    "rewrite",
    "rewrite_db",
    "rewrite_strat",
    "right",
    "ring",
    "ring_simplify",
    "rtauto",
    "set",
    "setoid_reflexivity",
    "setoid_replace",
    "setoid_rewrite",
    "setoid_symmetry",
    "setoid_transitivity",
    "shelve",
    "shelve_unifiable",
    "show",
    "simpl",
    "simple",
    "simplify_eq",
    "solve",
    "solve_constraints",
    "specialize",
    "split",
    "split_Rabs",
    "split_Rmult",
    "start",
    "subst",
    "substitute",
    "suff",
    "suffices",
    "swap",
    "symmetry",
    "tauto",
    "time",
    "time_constr",
    "timeout",
    "transitivity",
    "transparent_abstract",
    "trivial",
    "try",
    "tryif",
    "type",
    "type_term",
    "typeclasses",
    "under",
    "unfold",
    "unify",
    "unlock",
    "unshelve",
    "vm_cast_no_check",
    "vm_compute",
    "with_strategy",
    "without",
    "wlog",
    "zify",
];

/// The leading identifier of a sentence: letters, digits, underscores,
/// and primes.
pub fn leading_identifier(sentence: &str) -> &str {
    let end = sentence
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '\''))
        .unwrap_or(sentence.len());
    &sentence[..end]
}

pub fn is_builtin_tactic(identifier: &str) -> bool {
    TACTICS.binary_search(&identifier).is_ok()
}

pub fn is_inert_command(keyword: &str) -> bool {
    INERT_COMMANDS.binary_search(&keyword).is_ok()
}

/// Whether a sentence concludes proof mode.
///
/// Exact enders like `Qed.`, the `Solve Obligation(s)` family, and the
/// self-contained `Proof <term>.` form all count. The check is purely
/// lexical and applies to the sentence as stored, so a `Fail Qed.` does
/// not count as an ender.
pub fn is_proof_ender(sentence: &str) -> bool {
    if EXACT_ENDERS.contains(&sentence) {
        return true;
    }
    if SOLVE_OBLIGATIONS.is_match(sentence) {
        return true;
    }
    is_self_contained_proof(sentence)
}

/// `Proof <term>.` supplies the proof term directly, so one sentence
/// both opens and closes the proof. `Proof.`, `Proof with ...`, and
/// `Proof using ...` do not qualify.
pub fn is_self_contained_proof(sentence: &str) -> bool {
    let Some(rest) = sentence.strip_prefix("Proof") else {
        return false;
    };
    if !rest.starts_with(char::is_whitespace) {
        return false;
    }
    let tail = rest.trim_start();
    if tail.is_empty() || tail == "." {
        return false;
    }
    let first_word = tail.split_whitespace().next().unwrap_or("");
    let first_word = first_word.trim_end_matches('.');
    first_word != "with" && first_word != "using"
}
