use serde::{Deserialize, Serialize};

/// POST /analyze/ body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// Matcher Service answer. `matched_keywords` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64, // 0 – 100
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub matched_keywords: Option<Vec<String>>,
}

impl MatchResult {
    /// Nearest-integer score, clamped to the gauge range.
    pub fn rounded_score(&self) -> u32 {
        if self.score.is_nan() {
            return 0;
        }
        self.score.round().clamp(0.0, 100.0) as u32
    }

    /// Matched keywords, treating an absent field as empty.
    pub fn matched(&self) -> &[String] {
        self.matched_keywords.as_deref().unwrap_or(&[])
    }
}
