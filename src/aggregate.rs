use crate::model::{CoverageRecord, EngineerId};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use thiserror::Error;

/// Politique quand un enregistrement cite un ingénieur absent de la liste initiale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownEngineerPolicy {
    /// Ignore l'enregistrement (warning + compteur)
    #[default]
    Drop,
    /// Crée la vue de l'ingénieur à la volée
    Create,
    /// Interrompt l'agrégation
    Fail,
}

impl FromStr for UnknownEngineerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "create" => Ok(Self::Create),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown policy {other:?} (expected drop, create or fail)")),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("coverage references unknown engineer: {0}")]
    UnknownEngineer(EngineerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Applied,
    Created,
    Dropped,
}

/// Vue cumulée d'un ingénieur : durées (minutes) par layer, normales et overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineerOverview {
    pub engineer: EngineerId,
    pub shifts: BTreeMap<String, Vec<u64>>,
    pub overrides: BTreeMap<String, Vec<u64>>,
}

impl EngineerOverview {
    pub fn new(engineer: EngineerId) -> Self {
        Self {
            engineer,
            shifts: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.overrides.is_empty()
    }

    fn push(&mut self, record: CoverageRecord) {
        let target = if record.is_override() {
            &mut self.overrides
        } else {
            &mut self.shifts
        };
        target.entry(record.layer).or_default().push(record.duration_minutes);
    }
}

/// Agrégateur : une vue par ingénieur, adressée par index.
#[derive(Debug, Clone, Default)]
pub struct OnCallAggregator {
    overviews: Vec<EngineerOverview>,
    index: HashMap<EngineerId, usize>,
    policy: UnknownEngineerPolicy,
    dropped: usize,
}

impl OnCallAggregator {
    /// Initialise une vue vide par ingénieur connu (doublons fusionnés, premier conservé).
    pub fn new<I>(engineers: I, policy: UnknownEngineerPolicy) -> Self
    where
        I: IntoIterator<Item = EngineerId>,
    {
        let mut agg = Self {
            policy,
            ..Self::default()
        };
        for engineer in engineers {
            agg.insert(engineer);
        }
        agg
    }

    fn insert(&mut self, engineer: EngineerId) -> usize {
        if let Some(&pos) = self.index.get(&engineer) {
            return pos;
        }
        let pos = self.overviews.len();
        self.index.insert(engineer.clone(), pos);
        self.overviews.push(EngineerOverview::new(engineer));
        pos
    }

    pub fn fold(&mut self, record: CoverageRecord) -> Result<FoldOutcome, AggregateError> {
        if let Some(&pos) = self.index.get(&record.engineer) {
            self.overviews[pos].push(record);
            return Ok(FoldOutcome::Applied);
        }
        match self.policy {
            UnknownEngineerPolicy::Drop => {
                tracing::warn!(engineer = %record.engineer, layer = %record.layer, "dropping coverage for unknown engineer");
                self.dropped += 1;
                Ok(FoldOutcome::Dropped)
            }
            UnknownEngineerPolicy::Create => {
                tracing::debug!(engineer = %record.engineer, "adding engineer missing from the user list");
                let pos = self.insert(record.engineer.clone());
                self.overviews[pos].push(record);
                Ok(FoldOutcome::Created)
            }
            UnknownEngineerPolicy::Fail => Err(AggregateError::UnknownEngineer(record.engineer)),
        }
    }

    pub fn fold_all<I>(&mut self, records: I) -> Result<(), AggregateError>
    where
        I: IntoIterator<Item = CoverageRecord>,
    {
        for record in records {
            self.fold(record)?;
        }
        Ok(())
    }

    /// Vues dans l'ordre d'initialisation (puis de création).
    pub fn overviews(&self) -> &[EngineerOverview] {
        &self.overviews
    }
    pub fn into_overviews(self) -> Vec<EngineerOverview> {
        self.overviews
    }
    pub fn get(&self, engineer: &EngineerId) -> Option<&EngineerOverview> {
        self.index.get(engineer).map(|&pos| &self.overviews[pos])
    }
    pub fn policy(&self) -> UnknownEngineerPolicy {
        self.policy
    }
    /// Nombre d'enregistrements ignorés (politique `Drop`).
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
