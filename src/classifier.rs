//! Pure, per-sentence lexical classification.
//!
//! Classification runs a sentence through an explicit, ordered rule
//! table against the fixed vocabularies. Rules are checked in priority
//! order and the first match decides the primary kind; the fail-wrapped
//! and program facets are computed while stripping prefixes and can
//! accompany any kind. No cross-sentence state is consulted, except the
//! caller-supplied set of already-discovered custom tactics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vocabulary as vocab;

/// The primary structural role of one sentence.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SentenceKind {
    /// `{`, `}`, or a homogeneous run of `-`, `+`, `*`.
    BraceOrBullet,

    /// A command that may require a proof, e.g. `Lemma` or `Definition`.
    TheoremStarter,

    /// `Next Obligation` and friends. `Solve Obligation(s)` both opens
    /// and closes its proof, marked by `self_contained`.
    ObligationStarter { self_contained: bool },

    /// `Proof.`, `Proof with ...`, `Proof using ...`, or `Goal`.
    ProofStarter,

    /// `Qed.` and the other enders. `Proof <term>.` is self-contained:
    /// it opens and closes a proof in one sentence.
    ProofEnder { self_contained: bool },

    /// `Set`/`Unset Nested Proofs Allowed.`
    NestedProofsPragma { allowed: bool },

    /// An `Ltac` definition; `name` is the tactic being defined.
    TacticDefinition { name: String },

    /// `Require` / `From ... Require ...`.
    Requirement,

    /// A recognized command with no effect on proof structure.
    Query,

    /// A tactic invocation. `custom` carries the leading identifier
    /// when it is absent from the built-in tactic vocabulary.
    Tactic { custom: Option<String> },

    /// A capitalized command absent from every vocabulary table,
    /// treated conservatively as a query.
    Unknown { keyword: String },

    /// Anything else, e.g. a sentence starting with punctuation.
    Other,
}

/// The full classification of one sentence: its primary kind plus the
/// facets that can accompany any kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: SentenceKind,

    /// The sentence was wrapped in `Fail`: its effect on state must be
    /// ignored, since Coq guarantees it leaves no trace.
    pub fail_wrapped: bool,

    /// The sentence carried a `Program` attribute (word or `#[...]`
    /// form) and opens a multi-obligation scope.
    pub program: bool,
}

struct RuleContext<'a> {
    body: &'a str,
    custom_tactics: &'a BTreeSet<String>,
}

struct Rule {
    #[allow(dead_code)] // read only by the precedence test
    name: &'static str,
    matcher: fn(&RuleContext) -> Option<SentenceKind>,
}

/// The classification rules, in priority order.
const RULES: &[Rule] = &[
    Rule { name: "theorem-starter", matcher: r_theorem },
    Rule { name: "obligation-starter", matcher: r_obligation },
    Rule { name: "proof-starter-or-term", matcher: r_proof },
    Rule { name: "proof-ender", matcher: r_ender },
    Rule { name: "nested-proofs-pragma", matcher: r_pragma },
    Rule { name: "tactic-definition", matcher: r_ltac },
    Rule { name: "requirement", matcher: r_requirement },
    Rule { name: "query", matcher: r_query },
    Rule { name: "inert-command", matcher: r_inert },
    Rule { name: "tactic", matcher: r_tactic },
    Rule { name: "custom-tactic", matcher: r_custom_tactic },
    Rule { name: "unknown-command", matcher: r_unknown },
];

/// Classifies one sentence. `custom_tactics` holds tactic names already
/// discovered in this document, so capitalized custom tactics can still
/// be recognized.
pub fn classify(sentence: &str, custom_tactics: &BTreeSet<String>) -> Classification {
    let trimmed = sentence.trim();
    if is_brace_or_bullet(trimmed) {
        return Classification {
            kind: SentenceKind::BraceOrBullet,
            fail_wrapped: false,
            program: false,
        };
    }
    let (body, fail_wrapped) = strip_control(trimmed);
    let (body, program) = strip_attributes(body);
    let ctx = RuleContext {
        body,
        custom_tactics,
    };
    for rule in RULES {
        if let Some(kind) = (rule.matcher)(&ctx) {
            return Classification {
                kind,
                fail_wrapped,
                program,
            };
        }
    }
    Classification {
        kind: SentenceKind::Other,
        fail_wrapped,
        program,
    }
}

pub fn is_brace_or_bullet(sentence: &str) -> bool {
    if sentence == "{" || sentence == "}" {
        return true;
    }
    let mut chars = sentence.chars();
    match chars.next() {
        Some(c @ ('-' | '+' | '*')) => chars.all(|x| x == c),
        _ => false,
    }
}

/// Strips control prefixes (`Time`, `Timeout`, `Redirect`, `Succeed`,
/// `Fail`) from the front of a sentence. `Fail` is reported separately
/// since the wrapped command must not take effect.
fn strip_control(sentence: &str) -> (&str, bool) {
    let mut rest = sentence;
    let mut fail = false;
    while let Some(word) = rest.split_whitespace().next() {
        if !vocab::CONTROL_PREFIXES.contains(&word.trim_end_matches('.')) {
            break;
        }
        if word.trim_end_matches('.') == "Fail" {
            fail = true;
        }
        rest = rest[word.len()..].trim_start();
    }
    (rest, fail)
}

/// Strips leading attributes, reporting whether any of them marked the
/// command as a `Program`.
fn strip_attributes(sentence: &str) -> (&str, bool) {
    let mut rest = sentence;
    let mut program = false;
    loop {
        if let Some(m) = vocab::ATTRIBUTE_LIST.find(rest) {
            if m.as_str().to_ascii_lowercase().contains("program") {
                program = true;
            }
            rest = rest[m.end()..].trim_start();
            continue;
        }
        let Some(word) = rest.split_whitespace().next() else {
            break;
        };
        let core = word.trim_end_matches('.');
        if !vocab::ATTRIBUTE_WORDS.contains(&core) {
            break;
        }
        if core == "Program" {
            program = true;
        }
        rest = rest[word.len()..].trim_start();
    }
    (rest, program)
}

fn r_theorem(ctx: &RuleContext) -> Option<SentenceKind> {
    vocab::THEOREM_STARTERS
        .is_match(ctx.body)
        .then_some(SentenceKind::TheoremStarter)
}

fn r_obligation(ctx: &RuleContext) -> Option<SentenceKind> {
    if vocab::PROOF_NON_STARTERS.is_match(ctx.body) {
        return None;
    }
    vocab::OBLIGATION_STARTERS
        .is_match(ctx.body)
        .then_some(SentenceKind::ObligationStarter {
            self_contained: ctx.body.starts_with("Solve"),
        })
}

fn r_proof(ctx: &RuleContext) -> Option<SentenceKind> {
    if !vocab::PROOF_STARTERS.is_match(ctx.body) {
        return None;
    }
    if vocab::is_self_contained_proof(ctx.body) {
        Some(SentenceKind::ProofEnder {
            self_contained: true,
        })
    } else {
        Some(SentenceKind::ProofStarter)
    }
}

fn r_ender(ctx: &RuleContext) -> Option<SentenceKind> {
    vocab::EXACT_ENDERS
        .contains(&ctx.body)
        .then_some(SentenceKind::ProofEnder {
            self_contained: false,
        })
}

fn r_pragma(ctx: &RuleContext) -> Option<SentenceKind> {
    match ctx.body {
        "Set Nested Proofs Allowed." => Some(SentenceKind::NestedProofsPragma { allowed: true }),
        "Unset Nested Proofs Allowed." => Some(SentenceKind::NestedProofsPragma { allowed: false }),
        _ => None,
    }
}

fn r_ltac(ctx: &RuleContext) -> Option<SentenceKind> {
    if !vocab::TACTIC_DEFINERS.is_match(ctx.body) {
        return None;
    }
    let name = ctx.body["Ltac".len()..]
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string();
    Some(SentenceKind::TacticDefinition { name })
}

fn r_requirement(ctx: &RuleContext) -> Option<SentenceKind> {
    vocab::REQUIREMENT_STARTERS
        .is_match(ctx.body)
        .then_some(SentenceKind::Requirement)
}

fn r_query(ctx: &RuleContext) -> Option<SentenceKind> {
    vocab::QUERIES.is_match(ctx.body).then_some(SentenceKind::Query)
}

fn r_inert(ctx: &RuleContext) -> Option<SentenceKind> {
    if vocab::PROOF_NON_STARTERS.is_match(ctx.body) {
        return Some(SentenceKind::Query);
    }
    let keyword = vocab::leading_identifier(ctx.body);
    vocab::is_inert_command(keyword).then_some(SentenceKind::Query)
}

fn r_tactic(ctx: &RuleContext) -> Option<SentenceKind> {
    let first = ctx.body.chars().next()?;
    if !first.is_lowercase() && !first.is_ascii_digit() {
        return None;
    }
    let ident = vocab::leading_identifier(ctx.body);
    let custom = (!ident.is_empty()
        && ident.chars().next().is_some_and(|c| c.is_alphabetic())
        && !vocab::is_builtin_tactic(ident))
    .then(|| ident.to_string());
    Some(SentenceKind::Tactic { custom })
}

fn r_custom_tactic(ctx: &RuleContext) -> Option<SentenceKind> {
    ctx.custom_tactics
        .iter()
        .any(|t| ctx.body.starts_with(t.as_str()))
        .then_some(SentenceKind::Tactic { custom: None })
}

fn r_unknown(ctx: &RuleContext) -> Option<SentenceKind> {
    let first = ctx.body.chars().next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(SentenceKind::Unknown {
        keyword: vocab::leading_identifier(ctx.body).to_string(),
    })
}

/// Extracts the logical names of libraries loaded by a `Require` or
/// `From ... Require ...` sentence, with the `From` dirpath applied.
pub fn extract_requirements(sentence: &str) -> BTreeSet<String> {
    let trimmed = sentence.trim().trim_end_matches('.');
    let mut tokens = trimmed.split_whitespace().peekable();
    let mut dirpath = None;
    if tokens.peek() == Some(&"From") {
        tokens.next();
        dirpath = tokens.next();
    }
    let mut requirements = BTreeSet::new();
    for token in tokens {
        if matches!(token, "Require" | "Import" | "Export" | "-") {
            continue;
        }
        let name = token.trim_end_matches('.');
        if name.is_empty() {
            continue;
        }
        match dirpath {
            Some(dir) => requirements.insert(format!("{}.{}", dir, name)),
            None => requirements.insert(name.to_string()),
        };
    }
    requirements
}

/// The name of the first rule matching a sentence, for auditing rule
/// precedence.
#[cfg(test)]
fn matching_rule(sentence: &str, custom_tactics: &BTreeSet<String>) -> Option<&'static str> {
    let (body, _) = strip_control(sentence.trim());
    let (body, _) = strip_attributes(body);
    let ctx = RuleContext {
        body,
        custom_tactics,
    };
    RULES
        .iter()
        .find(|rule| (rule.matcher)(&ctx).is_some())
        .map(|rule| rule.name)
}
