//! View state for the emotion analysis page.
//!
//! One [`ViewState`] backs one screen: the web page re-renders it after every
//! request and the CLI renders it once to the terminal. A submit runs at most
//! once at a time; a second submit while loading is ignored.

pub mod chart;
pub mod http;

use async_trait::async_trait;

use crate::model::EmotionScores;
use crate::proxy::EmotionService;

pub use chart::{Bar, Chart};
pub use http::HttpBackend;

/// Shown when the backend answers with a failure but no message.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Shown when the backend cannot be reached at all.
pub const CONNECT_ERROR: &str = "Failed to connect to the server";

/// Text of the "About This App" panel.
pub const ABOUT_TEXT: &str = "This app uses the Text to Emotion API to analyze the emotions \
embedded in text. The API employs complex NLP algorithms to detect emotions such as happiness, \
surprise, anger, sadness, and fear. It processes the text, identifies emotion-expressing words, \
and provides a score (0.00 to 1.00) for each emotion category. This granular approach goes \
beyond simple sentiment analysis, offering insights into the nuanced feelings expressed in the \
text.";

/// Where the view sends text to be analyzed.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Analyze text. The error is the message to show the user.
    async fn analyze(&self, text: &str) -> Result<EmotionScores, String>;
}

#[async_trait]
impl Backend for EmotionService {
    async fn analyze(&self, text: &str) -> Result<EmotionScores, String> {
        self.analyze_text(text).await
    }
}

/// Transient UI state of the analysis view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub text: String,
    pub result: Option<EmotionScores>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_info: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    /// Label of the info toggle button.
    pub fn info_label(&self) -> &'static str {
        if self.show_info {
            "Hide Info"
        } else {
            "Show Info"
        }
    }

    /// Enter the loading state. Returns the text to send, or `None` if a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.text.clone())
    }

    /// Record the outcome of a submit and leave the loading state.
    ///
    /// A failure keeps the previous result.
    pub fn finish_submit(&mut self, outcome: Result<EmotionScores, String>) {
        match outcome {
            Ok(scores) => self.result = Some(scores),
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }

    /// Run one full submit against a backend. Returns false if ignored.
    pub async fn submit<B: Backend + ?Sized>(&mut self, backend: &B) -> bool {
        let Some(text) = self.begin_submit() else {
            return false;
        };
        let outcome = backend.analyze(&text).await;
        self.finish_submit(outcome);
        true
    }

    /// The chart to draw, if any. Nothing is drawn while loading.
    pub fn chart(&self) -> Option<Chart> {
        if self.loading {
            return None;
        }
        self.result.as_ref().map(Chart::from_scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedBackend {
        outcome: Result<EmotionScores, String>,
        calls: AtomicUsize,
    }

    impl FixedBackend {
        fn new(outcome: Result<EmotionScores, String>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Backend for FixedBackend {
        async fn analyze(&self, text: &str) -> Result<EmotionScores, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.is_empty() {
                return Err("Text is required".to_string());
            }
            self.outcome.clone()
        }
    }

    fn happy_scores() -> EmotionScores {
        [("Happy", 0.9), ("Angry", 0.0)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_submit_sets_result_and_chart() {
        let backend = FixedBackend::new(Ok(happy_scores()));
        let mut state = ViewState::with_text("I am happy");

        assert!(state.submit(&backend).await);
        assert!(!state.loading);
        assert!(state.error.is_none());

        let chart = state.chart().unwrap();
        assert_eq!(chart.labels(), vec!["Happy", "Angry"]);
        assert_eq!(chart.bars[0].score, 0.9);
        assert_eq!(chart.bars[1].score, 0.0);
    }

    #[tokio::test]
    async fn test_empty_text_surfaces_validation_error() {
        let backend = FixedBackend::new(Ok(happy_scores()));
        let mut state = ViewState::new();

        state.submit(&backend).await;
        assert_eq!(state.error.as_deref(), Some("Text is required"));
        assert!(state.result.is_none());
        assert!(state.chart().is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_error_keeps_previous_result() {
        let mut state = ViewState::with_text("I am happy");
        state.submit(&FixedBackend::new(Ok(happy_scores()))).await;

        state.set_text("again");
        state
            .submit(&FixedBackend::new(Err(CONNECT_ERROR.to_string())))
            .await;

        assert_eq!(state.error.as_deref(), Some(CONNECT_ERROR));
        assert_eq!(state.result, Some(happy_scores()));
    }

    #[tokio::test]
    async fn test_submit_clears_previous_error() {
        let mut state = ViewState::with_text("x");
        state
            .submit(&FixedBackend::new(Err(GENERIC_ERROR.to_string())))
            .await;
        assert!(state.error.is_some());

        state.submit(&FixedBackend::new(Ok(happy_scores()))).await;
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_submit_ignored_while_loading() {
        let backend = FixedBackend::new(Ok(happy_scores()));
        let mut state = ViewState::with_text("I am happy");

        assert_eq!(state.begin_submit().as_deref(), Some("I am happy"));
        assert!(state.loading);
        assert!(state.begin_submit().is_none());
        assert!(!state.submit(&backend).await);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_chart_while_loading() {
        let mut state = ViewState::with_text("I am happy");
        state.result = Some(happy_scores());
        state.begin_submit();
        assert!(state.chart().is_none());

        state.finish_submit(Ok(happy_scores()));
        assert!(state.chart().is_some());
    }

    #[test]
    fn test_toggle_info() {
        let mut state = ViewState::new();
        assert_eq!(state.info_label(), "Show Info");
        state.toggle_info();
        assert!(state.show_info);
        assert_eq!(state.info_label(), "Hide Info");
        state.toggle_info();
        assert!(!state.show_info);
    }
}
