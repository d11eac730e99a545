//! Core library for prose-probe.
//!
//! Scores a piece of English prose for how likely it is to be
//! machine-generated, using five statistical signals and a fixed rubric.
//!
//! # Modules
//!
//! - [`text`] - Normalization and sentence/word splitting
//! - [`metrics`] - The five statistical signals
//! - [`scoring`] - Rubric that turns signals into a probability
//! - [`narrative`] - Verdict headline and observations
//! - [`detect`] - End-to-end entry point
//! - [`markdown`] - Markdown-to-prose preprocessing
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use prose_probe_core::score_text;
//!
//! let report = score_text("The cat sat. The dog ran. The bird flew. The fish swam.")
//!     .expect("enough text to score");
//! assert_eq!(report.ai_probability, 60.0);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod detect;
pub mod error;
pub mod markdown;
pub mod metrics;
pub mod narrative;
pub mod scoring;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use detect::{Detection, DetectionReport, detect, score_text};
pub use error::{ConfigError, ConfigResult, DetectionError, DetectionResult};
pub use metrics::MetricSet;
pub use narrative::Verdict;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
