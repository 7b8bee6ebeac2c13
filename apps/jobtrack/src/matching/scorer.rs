//! Matcher Service — pluggable, trait-based résumé vs job-description scorer.
//!
//! Default: the backend's `/analyze/` endpoint (`ApiClient`).
//! Offline: `KeywordMatcher`, a pure-Rust keyword overlap for use without a
//! backend. It makes no attempt to reproduce the backend's formula.
//!
//! `AppState` holds an `Arc<dyn MatcherService>`, chosen at startup via config.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{MatchRequest, MatchResult};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap matching backends without touching the controller.
#[async_trait]
pub trait MatcherService: Send + Sync {
    async fn analyze(&self, request: &MatchRequest) -> Result<MatchResult, ClientError>;

    /// Short label for logs, e.g. "remote" or "keyword".
    fn backend_name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher
// ────────────────────────────────────────────────────────────────────────────

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is",
    "it", "of", "on", "or", "our", "the", "to", "we", "will", "with", "you", "your", "this",
    "that", "who", "what", "years", "year", "experience", "work", "team", "role", "job", "plus",
    "strong", "ability", "skills", "required", "preferred", "including", "using", "etc",
];

/// Minimum strength for a JD keyword to count as matched.
const MATCH_THRESHOLD: f64 = 0.4;

/// Keyword-overlap matcher. Fast, deterministic, no network.
///
/// Algorithm:
/// 1. JD keywords = distinct non-stop-word tokens, weighted by frequency.
/// 2. Per keyword: résumé token exact match → 1.0, résumé substring → 0.6,
///    otherwise 0.0.
/// 3. score = Σ(strength × weight) / Σ(weight) × 100.
/// 4. strength ≥ 0.4 → matched, else missing. Both keep JD order.
pub struct KeywordMatcher;

#[async_trait]
impl MatcherService for KeywordMatcher {
    async fn analyze(&self, request: &MatchRequest) -> Result<MatchResult, ClientError> {
        Ok(compute_keyword_match(&request.resume_text, &request.jd_text))
    }

    fn backend_name(&self) -> &'static str {
        "keyword"
    }
}

/// Splits text into lowercase tokens. Keeps `+`, `#`, `.` inside tokens so
/// "c++", "c#" and "node.js" survive.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_keyword(token: &str) -> bool {
    token.chars().count() > 1
        && !token.chars().all(|c| c.is_ascii_digit())
        && !STOP_WORDS.contains(&token)
}

/// Distinct JD keywords in first-seen order, with original casing and frequency.
fn extract_keywords(jd_text: &str) -> Vec<(String, u32)> {
    let mut order: Vec<String> = Vec::new();
    let mut display: HashMap<String, String> = HashMap::new();
    let mut frequency: HashMap<String, u32> = HashMap::new();

    let originals = jd_text
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty());

    for original in originals {
        let token = original.to_lowercase();
        if !is_keyword(&token) {
            continue;
        }
        *frequency.entry(token.clone()).or_insert(0) += 1;
        if !display.contains_key(&token) {
            display.insert(token.clone(), original.to_string());
            order.push(token);
        }
    }

    order
        .into_iter()
        .map(|token| {
            let count = frequency.get(&token).copied().unwrap_or(1);
            let shown = display.remove(&token).unwrap_or(token);
            (shown, count)
        })
        .collect()
}

fn compute_keyword_match(resume_text: &str, jd_text: &str) -> MatchResult {
    let keywords = extract_keywords(jd_text);

    if keywords.is_empty() {
        return MatchResult {
            score: 0.0,
            missing_keywords: vec![],
            matched_keywords: Some(vec![]),
        };
    }

    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();
    let resume_lower = resume_text.to_lowercase();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total_weighted = 0.0_f64;
    let mut total_score = 0.0_f64;

    for (keyword, frequency) in keywords {
        let keyword_lower = keyword.to_lowercase();
        let weight = f64::from(frequency);
        total_weighted += weight;

        let strength = if resume_tokens.contains(&keyword_lower) {
            1.0
        } else if resume_lower.contains(&keyword_lower) {
            0.6
        } else {
            0.0
        };
        total_score += strength * weight;

        if strength >= MATCH_THRESHOLD {
            matched.push(keyword);
        } else {
            missing.push(keyword);
        }
    }

    MatchResult {
        score: (total_score / total_weighted) * 100.0,
        missing_keywords: missing,
        matched_keywords: Some(matched),
    }
}
