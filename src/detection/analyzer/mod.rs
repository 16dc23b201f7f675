//! Verdict scoring for deepfake analysis responses.
//!
//! The external vision-language model returns free text rather than structured
//! fields, so the verdict is derived heuristically: the response is matched
//! against fixed phrase lists and the keyword counts drive both the categorical
//! verdict and the numeric scores. Scoring is a pure function of the response
//! text and is safe to run concurrently without coordination.

/// Phrases signaling manipulation, AI generation, or fakery.
const NEGATIVE_PHRASES: &[&str] = &[
    "not a real",
    "not real",
    "appears to be fake",
    "digital creation",
    "manipulation",
    "ai-generated",
    "deepfake",
    "synthetic",
    "artificial",
    "generated",
    "fake",
    "edited image",
    "altered image",
    "digital manipulation",
    "unrealistic",
    "unnatural",
    "artificial intelligence",
    "computer generated",
];

/// Phrases signaling authenticity.
const POSITIVE_PHRASES: &[&str] = &[
    "appears to be real",
    "real photograph",
    "authentic",
    "genuine",
    "natural photograph",
    "real image",
    "real photo",
    "legitimate",
    "unmanipulated",
    "original",
];

/// Maximum number of findings extracted from the model response.
const MAX_FINDINGS: usize = 3;

/// Character limit for the fallback finding when no sentences are found.
const FINDING_FALLBACK_CHARS: usize = 200;

/// Character limit for the explanation field.
const EXPLANATION_CHARS: usize = 500;

/// Categorical verdict produced by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The image appears to be an authentic photograph.
    Real,
    /// Mixed or absent signals; manual verification advised.
    Suspicious,
    /// The image shows strong signs of manipulation or AI generation.
    Deepfake,
}

impl Verdict {
    /// Lowercase label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "real",
            Verdict::Suspicious => "suspicious",
            Verdict::Deepfake => "deepfake",
        }
    }
}

/// Verdict plus the four derived scores, all clamped into [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictScores {
    pub verdict: Verdict,
    pub confidence: f64,
    pub deepfake_probability: f64,
    pub face_consistency: f64,
    pub texture_anomaly: f64,
}

impl VerdictScores {
    /// Derives the verdict and scores from the keyword counts.
    ///
    /// Whichever list matched more phrases wins; a tie (including zero
    /// matches on both sides) is scored as suspicious with fixed values.
    pub fn from_counts(negative: usize, positive: usize) -> Self {
        if negative > positive {
            let n = negative as f64;
            Self {
                verdict: Verdict::Deepfake,
                confidence: (70.0 + n * 5.0).min(95.0),
                deepfake_probability: (75.0 + n * 5.0).min(95.0),
                face_consistency: (40.0 - n * 5.0).max(20.0),
                texture_anomaly: (65.0 + n * 5.0).min(90.0),
            }
        } else if positive > negative {
            let p = positive as f64;
            Self {
                verdict: Verdict::Real,
                confidence: (75.0 + p * 5.0).min(95.0),
                deepfake_probability: (25.0 - p * 5.0).max(5.0),
                face_consistency: (80.0 + p * 3.0).min(95.0),
                texture_anomaly: (20.0 - p * 3.0).max(5.0),
            }
        } else {
            Self {
                verdict: Verdict::Suspicious,
                confidence: 65.0,
                deepfake_probability: 50.0,
                face_consistency: 65.0,
                texture_anomaly: 45.0,
            }
        }
    }
}

/// Complete scored analysis of one model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnalysis {
    pub scores: VerdictScores,
    /// Key observations extracted from the response text.
    pub findings: Vec<String>,
    /// Truncated copy of the response text.
    pub explanation: String,
}

/// Counts how many phrases from the list occur in the text.
///
/// Matching is presence-based: a phrase contributes at most 1 no matter how
/// often it occurs, while distinct phrases match independently even when they
/// overlap (e.g. "generated" inside "ai-generated").
fn phrase_hits(text: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| text.contains(*p)).count()
}

/// Truncates a string to at most `max` characters, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Extracts up to three sentence findings from the response text.
///
/// Sentences are the non-empty segments around ". " separators. When the text
/// contains no such segment, the first 200 characters of the raw text stand in
/// as a single finding.
pub fn extract_findings(text: &str) -> Vec<String> {
    let findings: Vec<String> = text
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_FINDINGS)
        .map(str::to_string)
        .collect();

    if findings.is_empty() {
        vec![truncate_chars(text, FINDING_FALLBACK_CHARS)]
    } else {
        findings
    }
}

/// Scores a raw model response into a verdict, numeric scores, and findings.
///
/// Deterministic for any input, including the empty string (scored as a tie).
pub fn score_response(text: &str) -> ScoredAnalysis {
    let lowered = text.to_lowercase();
    let negative = phrase_hits(&lowered, NEGATIVE_PHRASES);
    let positive = phrase_hits(&lowered, POSITIVE_PHRASES);

    let scores = VerdictScores::from_counts(negative, positive);
    tracing::debug!(
        negative_count = negative,
        positive_count = positive,
        verdict = scores.verdict.as_str(),
        "Scored model response"
    );

    ScoredAnalysis {
        scores,
        findings: extract_findings(text),
        explanation: truncate_chars(text, EXPLANATION_CHARS),
    }
}
