#![forbid(unsafe_code)]
//! Oncall-summary — résumé des heures d'astreinte par ingénieur à partir d'un planning PagerDuty.
//!
//! - Re-interrogation du service tour par tour (fenêtres étroites).
//! - Détection heuristique des overrides (tour découpé en plusieurs entrées).
//! - Agrégation ingénieur → layer → durées, normales et overrides séparées.
//! - Les erreurs de source sont absorbées et comptées, jamais fatales.

pub mod aggregate;
pub mod config;
pub mod coverage;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod timespan;

pub use aggregate::{EngineerOverview, OnCallAggregator, UnknownEngineerPolicy};
pub use config::{ConfigError, Settings, SourceSettings};
pub use coverage::{CoverageExtractor, OverrideClassifier, SplitTurnClassifier};
pub use model::{CoverageKind, CoverageRecord, EngineerId, ScheduleId, ScheduleView};
pub use pipeline::{collect_coverage, CoverageRun, RunOptions, RunStats};
pub use report::{render_report, summarize, ReportOptions, SummaryRenderer, TextSummary};
pub use source::{JsonScheduleSource, PagerDutyClient, ScheduleDump, ScheduleSource, SourceError};
pub use timespan::{TimeFormatError, TimeSpan};
