//! Relevance scoring boundary for directed crawls
//!
//! Directed mode biases the frontier toward a target page using an injected
//! `(goal, candidate) -> cost` function. How the cost is computed is none of
//! the orchestrator's business; production deployments plug in an embedding
//! model behind this trait, while [`TokenOverlapScorer`] gives a
//! dependency-free fallback good enough for closely-titled targets.

use crate::page::PageId;
use std::collections::BTreeSet;

/// External collaborator estimating how far a candidate is from the goal
///
/// The output is a cost: smaller means judged closer to the target. Pure
/// function from the orchestrator's perspective, no side effects assumed.
pub trait RelevanceScorer {
    fn score(&self, goal: &PageId, candidate: &PageId) -> f64;
}

impl<F> RelevanceScorer for F
where
    F: Fn(&PageId, &PageId) -> f64,
{
    fn score(&self, goal: &PageId, candidate: &PageId) -> f64 {
        self(goal, candidate)
    }
}

/// Lexical fallback scorer: 1 minus the Jaccard overlap of title tokens
///
/// `Video_game` vs `Video_game_console` share tokens and score low (cheap to
/// expand); unrelated titles score 1.0. Tokens are compared
/// case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenOverlapScorer;

impl TokenOverlapScorer {
    fn tokens(page: &PageId) -> BTreeSet<String> {
        page.as_str()
            .split(|c: char| c == '_' || c == '-' || c == '(' || c == ')')
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

impl RelevanceScorer for TokenOverlapScorer {
    fn score(&self, goal: &PageId, candidate: &PageId) -> f64 {
        let goal_tokens = Self::tokens(goal);
        let candidate_tokens = Self::tokens(candidate);

        let union = goal_tokens.union(&candidate_tokens).count();
        if union == 0 {
            return 1.0;
        }
        let shared = goal_tokens.intersection(&candidate_tokens).count();

        1.0 - (shared as f64 / union as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(s: &str) -> PageId {
        PageId::parse(s).unwrap()
    }

    #[test]
    fn test_identical_titles_cost_zero() {
        let scorer = TokenOverlapScorer;
        assert_eq!(scorer.score(&page("Video_game"), &page("Video_game")), 0.0);
    }

    #[test]
    fn test_disjoint_titles_cost_one() {
        let scorer = TokenOverlapScorer;
        assert_eq!(scorer.score(&page("Minecraft"), &page("Baroque_music")), 1.0);
    }

    #[test]
    fn test_partial_overlap_between_zero_and_one() {
        let scorer = TokenOverlapScorer;
        let cost = scorer.score(&page("Video_game"), &page("Video_game_console"));
        assert!(cost > 0.0 && cost < 1.0);
    }

    #[test]
    fn test_case_insensitive() {
        let scorer = TokenOverlapScorer;
        assert_eq!(scorer.score(&page("video_GAME"), &page("Video_game")), 0.0);
    }

    #[test]
    fn test_closure_is_a_scorer() {
        let scorer = |_goal: &PageId, candidate: &PageId| candidate.as_str().len() as f64;
        assert_eq!(scorer.score(&page("x"), &page("abc")), 3.0);
    }
}
