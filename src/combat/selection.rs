//! Choices the engine asks the presentation layer for.
//!
//! The engine never blocks on input itself. When a command needs a target or
//! a party member it builds a request and hands it to a [`Selector`], which
//! answers synchronously. Answers that are missing or do not match any
//! candidate fall back to the first candidate.

use super::types::{Choice, MemberRequest, TargetRequest};

pub trait Selector {
    /// Returns the `index` of one of `request.candidates`.
    fn choose_target(&mut self, request: &TargetRequest) -> Option<usize>;

    /// Returns the `index` of one of `request.candidates`.
    fn choose_member(&mut self, request: &MemberRequest) -> Option<usize>;
}

/// Always takes the default (first) candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl Selector for FirstChoice {
    fn choose_target(&mut self, _request: &TargetRequest) -> Option<usize> {
        None
    }

    fn choose_member(&mut self, _request: &MemberRequest) -> Option<usize> {
        None
    }
}

/// Answers every request with preset indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedChoice {
    pub target: Option<usize>,
    pub member: Option<usize>,
}

impl FixedChoice {
    pub fn target(index: usize) -> Self {
        Self {
            target: Some(index),
            member: None,
        }
    }

    pub fn member(index: usize) -> Self {
        Self {
            target: None,
            member: Some(index),
        }
    }
}

impl Selector for FixedChoice {
    fn choose_target(&mut self, _request: &TargetRequest) -> Option<usize> {
        self.target
    }

    fn choose_member(&mut self, _request: &MemberRequest) -> Option<usize> {
        self.member
    }
}

/// Validates an answer against the candidates, falling back to the first.
/// `candidates` must be non-empty.
pub fn settle(candidates: &[Choice], answer: Option<usize>) -> usize {
    answer
        .filter(|wanted| candidates.iter().any(|c| c.index == *wanted))
        .or_else(|| candidates.first().map(|c| c.index))
        .unwrap_or(0)
}
