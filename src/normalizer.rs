// src/normalizer.rs
//! Turns a loosely shaped analysis reply into a score, tier, five-metric
//! breakdown and recommendation list. Pure: no I/O, no logging.

use regex_lite::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use crate::types::AnalysisResult;

pub const DEFAULT_SCORE: i64 = 75;
pub const DEFAULT_METRIC: i64 = 3;

const SCORE_KEYS: &[&str] = &["overall_score", "overallScore", "score"];

static RAW_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)score[:\s]*(\d+)").expect("raw score regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Tier {
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Good => "Good Match",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    /// CSS class used by the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "needs-improvement",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedScore {
    pub value: i64,
    pub tier: Tier,
}

impl NormalizedScore {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            tier: Tier::from_score(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Keywords,
    Skills,
    Experience,
    Verbs,
    Format,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Keywords,
        Metric::Skills,
        Metric::Experience,
        Metric::Verbs,
        Metric::Format,
    ];

    /// Accepted breakdown keys, in lookup order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Keywords => &["keywords", "keyword_density", "keywords_match", "keywordsMatch"],
            Self::Skills => &["skills", "skills_match", "skillsMatch", "technical_skills"],
            Self::Experience => &[
                "experience",
                "experience_match",
                "experienceMatch",
                "relevant_experience",
            ],
            Self::Verbs => &["verbs", "action_verbs", "actionVerbs", "strong_verbs"],
            Self::Format => &["format", "formatting", "ats_format", "atsFormat"],
        }
    }

    /// Value used when the reply carries no breakdown object at all.
    fn missing_breakdown_default(&self) -> i64 {
        match self {
            Self::Keywords | Self::Experience | Self::Format => 4,
            Self::Skills | Self::Verbs => 3,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Verbs => "verbs",
            Self::Format => "format",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Keywords => "Keywords Match",
            Self::Skills => "Skills Alignment",
            Self::Experience => "Experience Relevance",
            Self::Verbs => "Action Verbs",
            Self::Format => "ATS Format",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub keywords: i64,
    pub skills: i64,
    pub experience: i64,
    pub verbs: i64,
    pub format: i64,
}

impl Breakdown {
    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Keywords => self.keywords,
            Metric::Skills => self.skills,
            Metric::Experience => self.experience,
            Metric::Verbs => self.verbs,
            Metric::Format => self.format,
        }
    }

    fn from_fn(mut f: impl FnMut(Metric) -> i64) -> Self {
        Self {
            keywords: f(Metric::Keywords),
            skills: f(Metric::Skills),
            experience: f(Metric::Experience),
            verbs: f(Metric::Verbs),
            format: f(Metric::Format),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, i64)> + '_ {
        Metric::ALL.iter().map(move |m| (*m, self.get(*m)))
    }
}

pub const GENERIC_RECOMMENDATIONS: [&str; 3] = [
    "Add more keywords from the job description to your resume",
    "Quantify your achievements with specific metrics and numbers",
    "Use strong action verbs to start each bullet point",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Server-provided suggestion, kept verbatim.
    QuickWin(String),
    MissingKeywords(Vec<String>),
    Generic(&'static str),
}

impl Recommendation {
    pub fn text(&self) -> String {
        match self {
            Self::QuickWin(text) => text.clone(),
            Self::MissingKeywords(keywords) => {
                format!("Add these missing keywords: {}", keywords.join(", "))
            }
            Self::Generic(text) => (*text).to_string(),
        }
    }
}

/// Everything the renderer needs, with every fallback already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub cleaned: Option<String>,
    pub optimized: Option<String>,
    pub final_text: Option<String>,
    pub score: NormalizedScore,
    pub breakdown: Breakdown,
    pub recommendations: Vec<Recommendation>,
    pub evaluation: Value,
}

pub fn normalize(result: &AnalysisResult) -> NormalizedResult {
    let evaluation = &result.evaluation;

    NormalizedResult {
        cleaned: result.cleaned.clone(),
        optimized: result.rewritten.clone(),
        final_text: result.final_text.clone(),
        score: NormalizedScore::new(resolve_score(evaluation)),
        breakdown: resolve_breakdown(evaluation),
        recommendations: resolve_recommendations(evaluation),
        evaluation: evaluation.clone(),
    }
}

pub fn resolve_score(evaluation: &Value) -> i64 {
    if let Some(score) = SCORE_KEYS
        .iter()
        .find_map(|key| evaluation.get(key).and_then(as_integer))
    {
        return score;
    }

    evaluation
        .get("raw")
        .and_then(Value::as_str)
        .and_then(|raw| RAW_SCORE.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| parse_digits_saturating(m.as_str()))
        .unwrap_or(DEFAULT_SCORE)
}

pub fn resolve_breakdown(evaluation: &Value) -> Breakdown {
    match evaluation.get("breakdown") {
        Some(Value::Object(breakdown)) => Breakdown::from_fn(|metric| {
            metric
                .aliases()
                .iter()
                .find_map(|key| breakdown.get(*key).and_then(as_integer))
                .unwrap_or(DEFAULT_METRIC)
        }),
        _ => Breakdown::from_fn(|metric| metric.missing_breakdown_default()),
    }
}

pub fn resolve_recommendations(evaluation: &Value) -> Vec<Recommendation> {
    let mut items: Vec<Recommendation> = match evaluation.get("quick_wins") {
        Some(Value::Array(wins)) => wins
            .iter()
            .map(|win| match win {
                Value::String(s) => Recommendation::QuickWin(s.clone()),
                other => Recommendation::QuickWin(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    };

    let keywords = missing_keywords(evaluation.get("missing_keywords"));
    if !keywords.is_empty() {
        items.push(Recommendation::MissingKeywords(keywords));
    }

    if items.is_empty() {
        return GENERIC_RECOMMENDATIONS
            .iter()
            .map(|text| Recommendation::Generic(*text))
            .collect();
    }

    items
}

/// Accepts a list or a comma-delimited string; entries are trimmed and
/// empty ones dropped.
fn missing_keywords(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        Some(Value::Array(list)) => list
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// A run of ASCII digits; overflow pins to `i64::MAX`.
fn parse_digits_saturating(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(i64::MAX)
}

/// JSON numbers (fractions rounded) and numeric strings; anything else is
/// absent. Out-of-range values saturate at the `i64` bounds.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(saturating_round)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| !f.is_nan()).map(saturating_round))
        }
        _ => None,
    }
}

fn saturating_round(value: f64) -> i64 {
    // float-to-int `as` casts saturate
    value.round() as i64
}
