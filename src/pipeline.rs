use crate::aggregate::{AggregateError, FoldOutcome, OnCallAggregator, UnknownEngineerPolicy};
use crate::coverage::{CoverageExtractor, OverrideClassifier, SkippedEntry};
use crate::model::ScheduleId;
use crate::source::ScheduleSource;
use thiserror::Error;

/// Paramètres d'une extraction.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub schedule_name: String,
    pub since: String,
    pub until: String,
    pub unknown_engineers: UnknownEngineerPolicy,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Compteurs d'une exécution : ce qui a été lu, ignoré ou perdu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub windows_queried: usize,
    pub windows_failed: usize,
    pub records: usize,
    pub skipped: Vec<SkippedEntry>,
    pub dropped_records: usize,
    pub created_engineers: usize,
    /// Échecs de recherche du planning, de la liste d'utilisateurs ou du rendu initial
    pub lookup_failures: usize,
}

impl RunStats {
    /// Vrai si des données ont pu manquer au résumé.
    pub fn is_partial(&self) -> bool {
        self.windows_failed > 0
            || !self.skipped.is_empty()
            || self.dropped_records > 0
            || self.lookup_failures > 0
    }
}

#[derive(Debug)]
pub struct CoverageRun {
    pub schedule_id: Option<ScheduleId>,
    pub aggregator: OnCallAggregator,
    pub stats: RunStats,
}

/// Reconstitue la couverture par ingénieur et par layer.
///
/// Pour chaque layer du planning initial et chaque entrée rendue de ce layer,
/// la source est ré-interrogée sur la fenêtre exacte de l'entrée ; c'est la liste
/// finale de cette réponse étroite qui alimente l'extraction. Les erreurs de la
/// source sont journalisées et comptées, jamais propagées.
pub fn collect_coverage<S, C>(
    source: &S,
    opts: &RunOptions,
    extractor: &CoverageExtractor<C>,
) -> Result<CoverageRun, PipelineError>
where
    S: ScheduleSource + ?Sized,
    C: OverrideClassifier,
{
    let mut stats = RunStats::default();

    let engineers = source.list_engineers().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not list engineers");
        stats.lookup_failures += 1;
        Vec::new()
    });
    let mut aggregator = OnCallAggregator::new(engineers, opts.unknown_engineers);

    let schedule_id = match source.find_schedule_id(&opts.schedule_name) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            tracing::warn!(name = %opts.schedule_name, "no schedule matches");
            stats.lookup_failures += 1;
            None
        }
        Err(err) => {
            tracing::warn!(name = %opts.schedule_name, error = %err, "schedule lookup failed");
            stats.lookup_failures += 1;
            None
        }
    };

    let Some(id) = schedule_id else {
        return Ok(CoverageRun {
            schedule_id: None,
            aggregator,
            stats,
        });
    };
    tracing::info!(schedule = %id, since = %opts.since, until = %opts.until, "extracting schedule");

    let schedule = match source.get_schedule(&id, &opts.since, &opts.until) {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(schedule = %id, error = %err, "could not fetch schedule");
            stats.lookup_failures += 1;
            return Ok(CoverageRun {
                schedule_id: Some(id),
                aggregator,
                stats,
            });
        }
    };

    for layer in &schedule.schedule_layers {
        for turn in &layer.rendered_schedule_entries {
            stats.windows_queried += 1;
            let narrow = match source.get_schedule(&id, &turn.start, &turn.end) {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(layer = %layer.name, start = %turn.start, end = %turn.end, error = %err, "skipping window");
                    stats.windows_failed += 1;
                    continue;
                }
            };
            tracing::debug!(layer = %layer.name, start = %turn.start, end = %turn.end, "window fetched");

            let outcome = extractor.extract(&narrow, &layer.name);
            stats.skipped.extend(outcome.skipped);
            for record in outcome.records {
                stats.records += 1;
                match aggregator.fold(record)? {
                    FoldOutcome::Applied => {}
                    FoldOutcome::Created => stats.created_engineers += 1,
                    FoldOutcome::Dropped => stats.dropped_records += 1,
                }
            }
        }
    }

    Ok(CoverageRun {
        schedule_id: Some(id),
        aggregator,
        stats,
    })
}
