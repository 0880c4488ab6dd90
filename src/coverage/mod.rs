mod classify;
mod types;

pub use classify::{OverrideClassifier, SplitTurnClassifier};
pub use types::{ExtractOutcome, SkipReason, SkippedEntry};

use crate::model::{CoverageKind, CoverageRecord, RenderedEntry, ScheduleView};
use crate::timespan::TimeSpan;

/// Extracteur : encapsule la politique de classification des overrides
#[derive(Debug, Default, Clone)]
pub struct CoverageExtractor<C = SplitTurnClassifier> {
    classifier: C,
}

impl CoverageExtractor {
    pub fn new() -> Self {
        Self {
            classifier: SplitTurnClassifier,
        }
    }
}

impl<C: OverrideClassifier> CoverageExtractor<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Convertit une vue « étroite » (fenêtre d'un seul tour) en enregistrements pour `layer`.
    ///
    /// Chaque layer portant exactement ce nom fait parcourir la liste finale ;
    /// un layer absent ne produit rien. Une entrée invalide est écartée seule.
    pub fn extract(&self, view: &ScheduleView, layer: &str) -> ExtractOutcome {
        let mut out = ExtractOutcome::default();
        let resolved = view.final_entries();

        let kind = self.classifier.classify(resolved);

        for _ in view.layers_named(layer) {
            for (index, entry) in resolved.iter().enumerate() {
                match to_record(entry, layer, kind) {
                    Ok(record) => out.records.push(record),
                    Err(reason) => {
                        tracing::warn!(layer, index, start = %entry.start, end = %entry.end, %reason, "skipping resolved entry");
                        out.skipped.push(SkippedEntry {
                            layer: layer.to_owned(),
                            index,
                            reason,
                        });
                    }
                }
            }
        }

        out
    }
}

fn to_record(entry: &RenderedEntry, layer: &str, kind: CoverageKind) -> Result<CoverageRecord, SkipReason> {
    let user = entry.user.as_ref().ok_or(SkipReason::MissingEngineer)?;
    let span = TimeSpan::parse(&entry.start, &entry.end)?;
    let minutes = span.duration_minutes();
    let duration_minutes =
        u64::try_from(minutes).map_err(|_| SkipReason::NegativeDuration { minutes })?;
    Ok(CoverageRecord {
        engineer: user.engineer(),
        layer: layer.to_owned(),
        duration_minutes,
        kind,
    })
}
