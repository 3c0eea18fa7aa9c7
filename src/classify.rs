//! Classification of event text into status narration vs. analysis content.
//!
//! The feed interleaves two kinds of text in the same `text` field:
//! operational narration ("Trying model: ...", "Starting analysis...") and
//! the substantive analysis output itself. The service marks narration only
//! by phrasing, so classification is a fixed substring test. The marker set
//! lives here so it can grow without touching dispatch logic.

/// Fixed, case-sensitive markers identifying operational narration.
pub const STATUS_MARKERS: &[&str] = &[
    "Trying model:",
    "Successfully connected",
    "Model",
    "failed",
    "Starting analysis",
    "Streaming failed",
];

/// What an event's text turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Operational narration about the stream itself.
    Status,
    /// An incremental fragment of the analysis result.
    Content,
}

/// Classify a text fragment.
///
/// Pure and stateless: the same text always classifies the same way,
/// regardless of surrounding frames or other payload fields.
///
/// # Example
/// ```
/// use mailsift::classify::{classify, MessageKind};
///
/// assert_eq!(classify("Trying model: gpt-4..."), MessageKind::Status);
/// assert_eq!(classify("This email is safe."), MessageKind::Content);
/// ```
pub fn classify(text: &str) -> MessageKind {
    if STATUS_MARKERS.iter().any(|marker| text.contains(marker)) {
        MessageKind::Status
    } else {
        MessageKind::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_markers_match() {
        assert_eq!(classify("Trying model: gemini-2.0-flash..."), MessageKind::Status);
        assert_eq!(
            classify("Successfully connected to model: gemini-pro"),
            MessageKind::Status
        );
        assert_eq!(classify("Model gemini-pro failed: quota"), MessageKind::Status);
        assert_eq!(classify("Starting analysis..."), MessageKind::Status);
        assert_eq!(
            classify("Streaming failed, trying non-streaming mode..."),
            MessageKind::Status
        );
    }

    #[test]
    fn test_plain_text_is_content() {
        assert_eq!(classify("The email "), MessageKind::Content);
        assert_eq!(classify("is safe."), MessageKind::Content);
        assert_eq!(classify("# Email Phishing Analysis"), MessageKind::Content);
        assert_eq!(classify(""), MessageKind::Content);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(classify("trying model: gpt-4"), MessageKind::Content);
        assert_eq!(classify("FAILED"), MessageKind::Content);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for text in ["Trying model: gpt-4", "plain fragment", "SPF check failed"] {
            assert_eq!(classify(text), classify(text));
        }
    }
}
