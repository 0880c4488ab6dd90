use serde::{Deserialize, Serialize};

/// Identifiant fort pour un ingénieur (nom affiché côté PagerDuty)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineerId(String);

impl EngineerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EngineerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour un planning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Référence utilisateur telle que rendue par le service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub summary: String,
}

impl UserRef {
    pub fn engineer(&self) -> EngineerId {
        EngineerId::new(&self.summary)
    }
}

/// Intervalle rendu (qui couvre, de quand à quand). Horodatages au format texte du service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEntry {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub user: Option<UserRef>,
}

impl RenderedEntry {
    pub fn new<S: Into<String>, E: Into<String>>(engineer: &str, start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            user: Some(UserRef {
                id: None,
                summary: engineer.to_owned(),
            }),
        }
    }
}

/// Layer de rotation ("Primary", "Secondary", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLayer {
    pub name: String,
    #[serde(default)]
    pub rendered_schedule_entries: Vec<RenderedEntry>,
}

/// Couverture résolue (overrides appliqués) pour toute la fenêtre demandée.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalSchedule {
    #[serde(default)]
    pub rendered_schedule_entries: Vec<RenderedEntry>,
}

/// Vue d'un planning sur une fenêtre `[since, until]`.
///
/// Les noms de champs suivent le format JSON de l'API PagerDuty v2 ;
/// les mêmes types décodent les réponses HTTP et les dumps JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schedule_layers: Vec<ScheduleLayer>,
    #[serde(default)]
    pub final_schedule: FinalSchedule,
}

impl ScheduleView {
    pub fn layers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ScheduleLayer> {
        self.schedule_layers.iter().filter(move |l| l.name == name)
    }
    pub fn final_entries(&self) -> &[RenderedEntry] {
        &self.final_schedule.rendered_schedule_entries
    }
}

/// Nature d'un intervalle couvert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageKind {
    Normal,
    Override,
}

/// Un intervalle couvert par un ingénieur sur un layer donné.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub engineer: EngineerId,
    pub layer: String,
    pub duration_minutes: u64,
    pub kind: CoverageKind,
}

impl CoverageRecord {
    pub fn is_override(&self) -> bool {
        self.kind == CoverageKind::Override
    }
}
