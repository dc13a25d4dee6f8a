//! Splits raw Coq source into normalized sentences.
//!
//! Comments are removed first (they nest, so a counter is required),
//! then the text is split on periods followed by whitespace. Runs of
//! two or more periods are left alone so recursive-pattern notations
//! like `..` survive. Leading braces and bullets are peeled off into
//! standalone sentences of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One normalized unit of source: comment-stripped, internal whitespace
/// collapsed to single spaces, ending in a period. Brace and bullet
/// sentences are the exception: they carry no period.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Sentence(String);

impl Sentence {
    pub fn new(text: impl Into<String>) -> Sentence {
        Sentence(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Removes comments, tracking nesting depth since Coq comments nest.
/// An unterminated comment silently consumes the rest of the file.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut depth = 0usize;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' if chars.peek() == Some(&'*') => {
                chars.next();
                depth += 1;
            }
            '*' if depth > 0 && chars.peek() == Some(&')') => {
                chars.next();
                depth -= 1;
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Splits source text into the ordered sentence list.
///
/// Malformed input never raises an error; it just yields degenerate
/// sentences that the classifier treats as unknown.
pub fn split_sentences(source: &str) -> Vec<Sentence> {
    let text = strip_comments(source);
    let mut sentences = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        // A splitting period: not part of a multi-period run, followed
        // by whitespace. The period boundary is ASCII, so byte slicing
        // is safe here.
        if bytes[i] == b'.'
            && (i == 0 || bytes[i - 1] != b'.')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            push_chunk(&text[start..i], &mut sentences);
            start = i + 2;
            i = start;
            continue;
        }
        i += 1;
    }
    if start <= text.len() {
        push_chunk(&text[start..], &mut sentences);
    }
    sentences
}

/// Normalizes one period-delimited chunk and appends the resulting
/// sentences: leading braces and bullets first, then the remainder with
/// its final period restored.
fn push_chunk(chunk: &str, sentences: &mut Vec<Sentence>) {
    let collapsed = chunk.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut rest = collapsed.as_str();
    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            return;
        };
        match first {
            '{' | '}' => {
                sentences.push(Sentence::new(&rest[..1]));
                rest = &rest[1..];
            }
            '-' | '+' | '*' => {
                let run = rest.chars().take_while(|&c| c == first).count();
                sentences.push(Sentence::new(&rest[..run]));
                rest = &rest[run..];
            }
            _ => break,
        }
    }
    if rest == "." {
        // A blank chunk reduces to a lone period; drop it.
        return;
    }
    let mut sentence = rest.to_string();
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    sentences.push(Sentence::new(sentence));
}

/// Splits a tactic sentence chained with `...` into one sentence per
/// tactic, re-terminating every fragment but the last with its
/// ellipsis. Under `Proof with`, `tac...` also runs the deferred
/// tactic, so `split... trivial.` is really two tactic sentences.
///
/// A sentence without an internal ellipsis comes back unchanged.
pub fn split_ellipses(sentence: &Sentence) -> Vec<Sentence> {
    let text = sentence.as_str();
    if !text.contains("...") {
        return vec![sentence.clone()];
    }
    let parts: Vec<&str> = text.split("...").collect();
    let last = parts.len() - 1;
    let mut fragments = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if i < last {
            fragments.push(Sentence::new(format!("{}...", part)));
        } else {
            fragments.push(Sentence::new(part));
        }
    }
    if fragments.is_empty() {
        vec![sentence.clone()]
    } else {
        fragments
    }
}
