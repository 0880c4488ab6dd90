use crate::model::CoverageRecord;
use crate::timespan::TimeFormatError;
use thiserror::Error;

/// Raison pour laquelle une entrée résolue n'a produit aucun enregistrement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error(transparent)]
    BadTimestamp(#[from] TimeFormatError),
    #[error("entry ends before it starts ({minutes} min)")]
    NegativeDuration { minutes: i64 },
    #[error("entry has no user")]
    MissingEngineer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub layer: String,
    /// Position dans la liste finale de la fenêtre
    pub index: usize,
    pub reason: SkipReason,
}

/// Résultat d'une extraction : enregistrements valides + entrées écartées.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOutcome {
    pub records: Vec<CoverageRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.skipped.is_empty()
    }
}
