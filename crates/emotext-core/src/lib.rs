//! Emotext Core Library
//!
//! Domain models, configuration and the upstream proxy for emotext, plus the
//! view state shared by the web page and the CLI.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod proxy;
pub mod view;

pub use client::{ApiLayerClient, EmotionApi};
pub use config::{ApiKey, ConfigFile, ConfigOverrides, EmotionConfig};
pub use error::{EmotionError, EmotionResult};
pub use model::{AnalysisRequest, EmotionScores, UpstreamReply};
pub use proxy::{EmotionService, ProxyOutcome};
pub use view::{Backend, Chart, ViewState};
