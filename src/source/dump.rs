use super::{ScheduleSource, SourceError};
use crate::model::{EngineerId, ScheduleId, ScheduleView};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Planning connu (pour la recherche par nom)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleId,
    pub name: String,
}

/// Rendu enregistré pour une fenêtre exacte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendering {
    pub schedule_id: ScheduleId,
    pub since: String,
    pub until: String,
    pub schedule: ScheduleView,
}

/// Instantané hors-ligne des réponses du service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDump {
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
    #[serde(default)]
    pub engineers: Vec<EngineerId>,
    #[serde(default)]
    pub renderings: Vec<Rendering>,
}

impl ScheduleDump {
    pub fn add_rendering<S: Into<String>, U: Into<String>>(
        &mut self,
        id: &ScheduleId,
        since: S,
        until: U,
        schedule: ScheduleView,
    ) {
        self.renderings.push(Rendering {
            schedule_id: id.clone(),
            since: since.into(),
            until: until.into(),
            schedule,
        });
    }
}

impl ScheduleSource for ScheduleDump {
    /// Recherche insensible à la casse sur une sous-chaîne du nom, comme `query` côté API.
    fn find_schedule_id(&self, query: &str) -> Result<Option<ScheduleId>, SourceError> {
        let needle = query.to_lowercase();
        Ok(self
            .schedules
            .iter()
            .find(|s| s.name.to_lowercase().contains(&needle))
            .map(|s| s.id.clone()))
    }

    fn list_engineers(&self) -> Result<Vec<EngineerId>, SourceError> {
        Ok(self.engineers.clone())
    }

    fn get_schedule(
        &self,
        id: &ScheduleId,
        since: &str,
        until: &str,
    ) -> Result<ScheduleView, SourceError> {
        self.renderings
            .iter()
            .find(|r| &r.schedule_id == id && r.since == since && r.until == until)
            .map(|r| r.schedule.clone())
            .ok_or_else(|| SourceError::MissingRendering {
                id: id.as_str().to_owned(),
                since: since.to_owned(),
                until: until.to_owned(),
            })
    }
}

/// Source adossée à un fichier JSON (`ScheduleDump`).
#[derive(Debug)]
pub struct JsonScheduleSource {
    path: PathBuf,
    dump: ScheduleDump,
}

impl JsonScheduleSource {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let dump: ScheduleDump =
            serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self { path, dump })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn dump(&self) -> &ScheduleDump {
        &self.dump
    }
}

impl ScheduleSource for JsonScheduleSource {
    fn find_schedule_id(&self, query: &str) -> Result<Option<ScheduleId>, SourceError> {
        self.dump.find_schedule_id(query)
    }
    fn list_engineers(&self) -> Result<Vec<EngineerId>, SourceError> {
        self.dump.list_engineers()
    }
    fn get_schedule(
        &self,
        id: &ScheduleId,
        since: &str,
        until: &str,
    ) -> Result<ScheduleView, SourceError> {
        self.dump.get_schedule(id, since, until)
    }
}
