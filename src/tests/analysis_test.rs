use indoc::indoc;

use crate::diagnostics::Warning;
use crate::parse_source;

#[test]
fn test_simple_theorem_document() {
    let source = indoc! {"
        Lemma add_0 : forall n, n + 0 = n.
        Proof.
          induction n.
          - reflexivity.
          - simpl. rewrite IHn. reflexivity.
        Qed.
    "};
    let analysis = parse_source(source, true);
    let stats = &analysis.statistics;

    // 10 sentences: the bullets count as sentences of their own.
    assert_eq!(stats.depths, vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(
        stats.theorem_indices.iter().copied().collect::<Vec<_>>(),
        vec![0]
    );
    assert_eq!(
        stats.starter_indices.iter().copied().collect::<Vec<_>>(),
        vec![1]
    );
    assert_eq!(
        stats.tactic_indices.iter().copied().collect::<Vec<_>>(),
        vec![2, 4, 6, 7, 8]
    );
    assert_eq!(stats.ender_indices, vec![9]);
    assert!(!stats.partial);
    assert!(analysis.warnings.is_empty());

    assert_eq!(
        analysis.sentences,
        vec![
            "Lemma add_0 : forall n, n + 0 = n.",
            "Proof. induction n. - reflexivity. - simpl. rewrite IHn. reflexivity. Qed.",
        ]
    );
}

#[test]
fn test_without_glomming_sentences_pass_through() {
    let source = "Lemma l : True. Proof. trivial. Qed.";
    let analysis = parse_source(source, false);
    assert_eq!(
        analysis.sentences,
        vec!["Lemma l : True.", "Proof.", "trivial.", "Qed."]
    );
}

#[test]
fn test_nested_theorems() {
    let source = indoc! {"
        Lemma outer : True.
        Proof.
        Lemma inner : True.
        Proof.
        trivial.
        Qed.
        trivial.
        Qed.
    "};
    let analysis = parse_source(source, true);
    let stats = &analysis.statistics;
    assert_eq!(stats.depths, vec![1, 1, 2, 2, 2, 2, 1, 1]);
    assert!(!stats.partial);

    // The inner lemma closes first, so it reaches the output first.
    assert_eq!(
        analysis.sentences,
        vec![
            "Lemma inner : True.",
            "Proof. trivial. Qed.",
            "Lemma outer : True.",
            "Proof. trivial. Qed.",
        ]
    );
}

#[test]
fn test_anonymous_goal() {
    let analysis = parse_source("Goal True. trivial. Abort.", true);
    assert_eq!(analysis.sentences, vec!["Goal True. trivial. Abort."]);
    assert!(!analysis.statistics.partial);
    assert_eq!(analysis.statistics.depths, vec![1, 1, 1]);
}

#[test]
fn test_unterminated_proof() {
    let source = indoc! {"
        Lemma l : True.
        Proof.
        trivial.
    "};
    let analysis = parse_source(source, true);
    assert!(analysis.statistics.partial);
    assert_eq!(
        analysis.warnings,
        vec![Warning::unterminated_proof(Some("Lemma l : True."))]
    );
    // Glomming is off, so the proof comes out verbatim.
    assert_eq!(
        analysis.sentences,
        vec!["Lemma l : True.", "Proof.", "trivial."]
    );
}

#[test]
fn test_glom_survives_until_first_unterminated_proof() {
    let source = indoc! {"
        Lemma a : True.
        Proof.
        trivial.
        Qed.
        Lemma b : True.
        Proof.
        trivial.
    "};
    let analysis = parse_source(source, true);
    assert!(analysis.statistics.partial);
    // The first proof closed while glomming was still on.
    assert_eq!(
        analysis.sentences,
        vec![
            "Lemma a : True.",
            "Proof. trivial. Qed.",
            "Lemma b : True.",
            "Proof.",
            "trivial.",
        ]
    );
}

#[test]
fn test_unmatched_ender_disables_glom_for_the_rest() {
    let source = indoc! {"
        Qed.
        Lemma a : True.
        Proof.
        trivial.
        Qed.
    "};
    let analysis = parse_source(source, true);
    assert!(analysis.statistics.partial);
    assert_eq!(analysis.warnings, vec![Warning::unmatched_ender(0)]);
    assert_eq!(
        analysis.sentences,
        vec!["Qed.", "Lemma a : True.", "Proof.", "trivial.", "Qed."]
    );
}

#[test]
fn test_requirements_collected() {
    let source = indoc! {"
        Require Import Arith.
        From Coq Require Import List Lia.
        Lemma l : True.
        Proof.
        trivial.
        Qed.
    "};
    let stats = parse_source(source, false).statistics;
    assert_eq!(
        stats.requirements.iter().cloned().collect::<Vec<_>>(),
        vec!["Arith", "Coq.Lia", "Coq.List"]
    );
    assert!(stats.query_indices.contains(&0));
    assert!(stats.query_indices.contains(&1));
}

#[test]
fn test_custom_tactic_discovery() {
    let source = indoc! {"
        Ltac crush := repeat (auto; simpl).
        Lemma l : True.
        Proof.
        crush.
        Qed.
    "};
    let stats = parse_source(source, false).statistics;
    assert!(stats.custom_tactics.contains("crush"));
    assert!(stats.tactic_indices.contains(&3));
}

#[test]
fn test_capitalized_custom_tactic_needs_its_definition() {
    let source = indoc! {"
        Ltac MyCrush := auto.
        Lemma l : True.
        Proof.
        MyCrush.
        Qed.
    "};
    let analysis = parse_source(source, false);
    let stats = &analysis.statistics;
    assert!(stats.custom_tactics.contains("MyCrush"));
    assert!(stats.tactic_indices.contains(&3));
    // With the definition in scope, the invocation is not unknown.
    assert!(analysis.warnings.is_empty());
}

#[test]
fn test_proof_indices_union() {
    let source = indoc! {"
        Require Import Arith.
        Section S.
        Variable n : nat.
        Lemma n_le_n : n <= n.
        Proof.
        auto.
        Qed.
        End S.
        Check n_le_n.
    "};
    let analysis = parse_source(source, true);
    let stats = &analysis.statistics;
    assert_eq!(stats.depths, vec![0, 0, 0, 1, 1, 1, 1, 0, 0]);
    assert_eq!(
        stats.proof_indices.iter().copied().collect::<Vec<_>>(),
        vec![3, 4, 5, 6]
    );
    assert_eq!(
        stats.query_indices.iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2, 7, 8]
    );
    assert_eq!(
        analysis.sentences,
        vec![
            "Require Import Arith.",
            "Section S.",
            "Variable n : nat.",
            "Lemma n_le_n : n <= n.",
            "Proof. auto. Qed.",
            "End S.",
            "Check n_le_n.",
        ]
    );
}

#[test]
fn test_unglommed_output_reparses_identically() {
    let source = indoc! {"
        Lemma add_0 : forall n, n + 0 = n.
        Proof. (* by induction *)
          induction n.
          - reflexivity.
          - simpl. rewrite IHn. reflexivity.
        Qed.
        Check add_0.
    "};
    let first = parse_source(source, false);
    let rejoined = first.sentences.join(" ");
    let second = parse_source(&rejoined, false);
    assert_eq!(first.sentences, second.sentences);
    assert_eq!(first.statistics, second.statistics);
}

#[test]
fn test_ellipsis_chain_splits_into_tactic_steps() {
    let source = indoc! {"
        Lemma l : True.
        Proof with auto.
        split... trivial.
        Qed.
    "};
    let analysis = parse_source(source, false);
    // One input sentence, two tactic steps in the output.
    assert_eq!(
        analysis.sentences,
        vec![
            "Lemma l : True.",
            "Proof with auto.",
            "split...",
            "trivial.",
            "Qed.",
        ]
    );
    let stats = &analysis.statistics;
    assert_eq!(stats.depths.len(), 4);
    assert!(stats.tactic_indices.contains(&2));
    assert!(!stats.partial);
}

#[test]
fn test_self_contained_proof_term() {
    let source = indoc! {"
        Lemma refl : 1 = 1.
        Proof eq_refl.
        Check refl.
    "};
    let analysis = parse_source(source, true);
    let stats = &analysis.statistics;
    assert_eq!(stats.depths, vec![1, 1, 0]);
    assert_eq!(stats.ender_indices, vec![1]);
    assert!(stats.starter_indices.contains(&1));
    assert!(!stats.partial);
    assert_eq!(
        analysis.sentences,
        vec!["Lemma refl : 1 = 1.", "Proof eq_refl.", "Check refl."]
    );
}
