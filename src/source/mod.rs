mod dump;
mod pagerduty;

pub use dump::{JsonScheduleSource, Rendering, ScheduleDump, ScheduleEntry};
pub use pagerduty::PagerDutyClient;

use crate::model::{EngineerId, ScheduleId, ScheduleView};
use thiserror::Error;

/// Échec d'une requête vers la source de plannings.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("no rendering of schedule {id} for {since}..{until}")]
    MissingRendering {
        id: String,
        since: String,
        until: String,
    },
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),
}

/// Fournit les plannings, la liste des ingénieurs et les rendus par fenêtre.
pub trait ScheduleSource {
    /// Premier planning dont le nom correspond à la requête.
    fn find_schedule_id(&self, query: &str) -> Result<Option<ScheduleId>, SourceError>;
    fn list_engineers(&self) -> Result<Vec<EngineerId>, SourceError>;
    /// Rendu du planning entre `since` et `until` (format texte du service).
    fn get_schedule(
        &self,
        id: &ScheduleId,
        since: &str,
        until: &str,
    ) -> Result<ScheduleView, SourceError>;
}
