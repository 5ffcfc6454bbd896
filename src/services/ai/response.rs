//! Parsing and rendering the model's JSON answer.

use serde::Deserialize;

/// Source reported when the model's reply could not be parsed.
pub const FALLBACK_SOURCE: &str = "resume_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Unknown labels degrade to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Confidence::High => "●●●",
            Confidence::Medium => "●●○",
            Confidence::Low => "●○○",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiQueryResult {
    pub answer: String,
    pub confidence: Confidence,
    /// Deduplicated, in the order the model listed them.
    pub sources_used: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

#[derive(Deserialize)]
struct RawAnswer {
    answer: String,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    sources_used: Vec<String>,
    #[serde(default)]
    follow_up_questions: Vec<String>,
}

impl AiQueryResult {
    /// Parse the model's reply. Never fails: anything that is not the
    /// expected JSON object becomes a low-confidence raw-text answer.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<RawAnswer>(strip_code_fence(raw)) {
            Ok(parsed) => Self::from_raw(parsed),
            Err(e) => {
                tracing::debug!("AI reply is not the expected JSON ({}), using raw text", e);
                Self::fallback(raw)
            }
        }
    }

    pub fn fallback(raw: &str) -> Self {
        Self {
            answer: raw.trim().to_string(),
            confidence: Confidence::Low,
            sources_used: vec![FALLBACK_SOURCE.to_string()],
            follow_up_questions: Vec::new(),
        }
    }

    fn from_raw(raw: RawAnswer) -> Self {
        let mut sources_used: Vec<String> = Vec::new();
        for source in raw.sources_used {
            let source = source.trim().to_string();
            if !source.is_empty() && !sources_used.contains(&source) {
                sources_used.push(source);
            }
        }

        Self {
            answer: raw.answer.trim().to_string(),
            confidence: raw
                .confidence
                .as_deref()
                .map(Confidence::from_label)
                .unwrap_or(Confidence::Low),
            sources_used,
            follow_up_questions: raw
                .follow_up_questions
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect(),
        }
    }

    /// Scrollback lines for this answer, without the trailing blank.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["AI Response:".to_string()];
        lines.extend(self.answer.split('\n').map(str::to_string));

        lines.push(String::new());
        lines.push(format!(
            "Confidence: {} {}",
            self.confidence.marker(),
            self.confidence.label()
        ));

        if !self.sources_used.is_empty() {
            lines.push(format!("Sources: {}", self.sources_used.join(", ")));
        }

        if !self.follow_up_questions.is_empty() {
            lines.push(String::new());
            lines.push("Suggested follow-up questions:".to_string());
            for (index, question) in self.follow_up_questions.iter().enumerate() {
                lines.push(format!("  {}. {}", index + 1, question));
            }
        }

        lines
    }
}

/// Models sometimes wrap JSON in a Markdown fence despite being told not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as "json" on the opening line.
    match body.split_once('\n') {
        Some((info, content)) if !info.trim_start().starts_with('{') => content.trim(),
        _ => body.trim(),
    }
}
