use std::fmt;

use crate::matching::controller::{MatchState, ResultPane};

/// Circumference of the score ring (2π·70, rounded).
pub const GAUGE_CIRCUMFERENCE: f64 = 440.0;

pub const ANALYZE_LABEL: &str = "Analyze Match";
pub const BUSY_LABEL: &str = "Analyzing...";
pub const NO_MISSING_LABEL: &str = "No missing keywords! 🎉";
pub const NO_MATCHES_LABEL: &str = "No matches found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeColor {
    Success,
    Warning,
    Danger,
}

impl GaugeColor {
    /// ≥80 success, 50–79 warning, below 50 danger.
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            GaugeColor::Success
        } else if score >= 50 {
            GaugeColor::Warning
        } else {
            GaugeColor::Danger
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            GaugeColor::Success => "#10b981",
            GaugeColor::Warning => "#f59e0b",
            GaugeColor::Danger => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeView {
    pub score: u32,
    /// Stroke dash offset: the hidden part of the ring.
    pub offset: f64,
    pub color: GaugeColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Missing,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub kind: ChipKind,
}

impl Chip {
    fn new(label: impl Into<String>, kind: ChipKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchView {
    pub button: ButtonView,
    pub pane: ResultPane,
    /// Animated counter value.
    pub score_text: String,
    pub gauge: Option<GaugeView>,
    pub missing: Vec<Chip>,
    pub matched: Vec<Chip>,
}

pub fn render_gauge(score: u32) -> GaugeView {
    let score = score.min(100);
    GaugeView {
        score,
        offset: GAUGE_CIRCUMFERENCE - (f64::from(score) / 100.0) * GAUGE_CIRCUMFERENCE,
        color: GaugeColor::for_score(score),
    }
}

/// Missing chips in response order, or one celebration chip when none are missing.
pub fn render_missing_chips(missing: &[String]) -> Vec<Chip> {
    if missing.is_empty() {
        return vec![Chip::new(NO_MISSING_LABEL, ChipKind::Matched)];
    }
    missing
        .iter()
        .map(|word| Chip::new(word.as_str(), ChipKind::Missing))
        .collect()
}

/// Matched chips, or one "no matches" chip when there are none.
pub fn render_matched_chips(matched: &[String]) -> Vec<Chip> {
    if matched.is_empty() {
        return vec![Chip::new(NO_MATCHES_LABEL, ChipKind::Missing)];
    }
    matched
        .iter()
        .map(|word| Chip::new(word.as_str(), ChipKind::Matched))
        .collect()
}

/// Projects matcher state into the view. Pure.
pub fn render_match(state: &MatchState) -> MatchView {
    let button = ButtonView {
        label: if state.busy { BUSY_LABEL } else { ANALYZE_LABEL },
        disabled: state.busy,
    };

    match &state.result {
        Some(result) => MatchView {
            button,
            pane: state.pane,
            score_text: state.displayed_score.to_string(),
            gauge: Some(render_gauge(result.rounded_score())),
            missing: render_missing_chips(&result.missing_keywords),
            matched: render_matched_chips(result.matched()),
        },
        None => MatchView {
            button,
            pane: state.pane,
            score_text: "0".to_string(),
            gauge: None,
            missing: vec![],
            matched: vec![],
        },
    }
}

const BAR_WIDTH: usize = 40;

fn write_chips(f: &mut fmt::Formatter<'_>, title: &str, chips: &[Chip]) -> fmt::Result {
    let rendered: Vec<String> = chips
        .iter()
        .map(|chip| match chip.kind {
            ChipKind::Missing => format!("[- {}]", chip.label),
            ChipKind::Matched => format!("[+ {}]", chip.label),
        })
        .collect();
    writeln!(f, "{title}: {}", rendered.join(" "))
}

impl fmt::Display for MatchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gauge = match (self.pane, &self.gauge) {
            (ResultPane::Result, Some(gauge)) => gauge,
            _ => {
                return writeln!(
                    f,
                    "Paste your resume and a job description, then run {}.",
                    self.button.label
                );
            }
        };

        // Bar mirrors the ring: the unfilled part is the dash offset.
        let shown = (GAUGE_CIRCUMFERENCE - gauge.offset) / GAUGE_CIRCUMFERENCE;
        let filled = ((shown * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let color = match gauge.color {
            GaugeColor::Success => "success",
            GaugeColor::Warning => "warning",
            GaugeColor::Danger => "danger",
        };
        writeln!(f, "Match score: {}%", self.score_text)?;
        writeln!(
            f,
            "[{}{}] {color} ({}), offset {:.1}",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            gauge.color.hex(),
            gauge.offset
        )?;
        write_chips(f, "Missing keywords", &self.missing)?;
        write_chips(f, "Matched keywords", &self.matched)
    }
}
