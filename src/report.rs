use crate::aggregate::EngineerOverview;
use crate::model::EngineerId;
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Options de rendu du résumé.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Rapporte aussi les layers où l'ingénieur n'a fait que des overrides.
    pub include_override_only_layers: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_override_only_layers: true,
        }
    }
}

/// Totaux d'un ingénieur sur un layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub layer: String,
    pub total_minutes: u64,
    pub shift_count: usize,
    pub override_count: usize,
    pub override_minutes: u64,
}

impl LayerSummary {
    pub fn hours(&self) -> u64 {
        self.total_minutes / 60
    }
    pub fn minutes(&self) -> u64 {
        self.total_minutes % 60
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineerSummary {
    pub engineer: EngineerId,
    pub layers: Vec<LayerSummary>,
}

/// Calcule les totaux par ingénieur (ordre des vues) et par layer (ordre alphabétique).
pub fn summarize(overviews: &[EngineerOverview], opts: ReportOptions) -> Vec<EngineerSummary> {
    overviews
        .iter()
        .map(|ov| summarize_engineer(ov, opts))
        .collect()
}

fn summarize_engineer(ov: &EngineerOverview, opts: ReportOptions) -> EngineerSummary {
    let mut names: BTreeSet<&str> = ov.shifts.keys().map(String::as_str).collect();
    if opts.include_override_only_layers {
        names.extend(ov.overrides.keys().map(String::as_str));
    }

    let layers = names
        .into_iter()
        .map(|layer| {
            let shifts = ov.shifts.get(layer).map(Vec::as_slice).unwrap_or_default();
            let overrides = ov.overrides.get(layer).map(Vec::as_slice).unwrap_or_default();
            LayerSummary {
                layer: layer.to_owned(),
                total_minutes: shifts.iter().sum(),
                shift_count: shifts.len(),
                override_count: overrides.len(),
                override_minutes: overrides.iter().sum(),
            }
        })
        .collect();

    EngineerSummary {
        engineer: ov.engineer.clone(),
        layers,
    }
}

/// Permet de customiser le rendu d'un bloc ingénieur.
pub trait SummaryRenderer {
    fn render(&self, summary: &EngineerSummary) -> String;
}

/// Rendu texte brut, un bloc par ingénieur, une ligne par layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, summary: &EngineerSummary) -> String {
        let mut out = format!("Engineer: {}\n", summary.engineer);
        if summary.layers.is_empty() {
            out.push_str("No coverage in this window\n");
        }
        for l in &summary.layers {
            let _ = writeln!(
                out,
                "{layer}: {h} h {m} min in {n} shift(s) and {o} override(s)",
                layer = l.layer,
                h = l.hours(),
                m = l.minutes(),
                n = l.shift_count,
                o = l.override_count,
            );
        }
        out.push('\n');
        out
    }
}

pub fn render_report(summaries: &[EngineerSummary], renderer: &dyn SummaryRenderer) -> String {
    summaries.iter().map(|s| renderer.render(s)).collect()
}
