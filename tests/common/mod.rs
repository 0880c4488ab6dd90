#![allow(dead_code)]
use oncall_summary::model::{FinalSchedule, RenderedEntry, ScheduleLayer};
use oncall_summary::source::ScheduleEntry;
use oncall_summary::{EngineerId, ScheduleDump, ScheduleId, ScheduleView};

pub const SINCE: &str = "2018-06-01T00:00:00+02:00";
pub const UNTIL: &str = "2018-06-02T00:00:00+02:00";

pub fn schedule_id() -> ScheduleId {
    ScheduleId::new("PSCHED1")
}

pub fn entry(who: &str, start: &str, end: &str) -> RenderedEntry {
    RenderedEntry::new(who, start, end)
}

pub fn view(layers: Vec<(&str, Vec<RenderedEntry>)>, resolved: Vec<RenderedEntry>) -> ScheduleView {
    ScheduleView {
        id: schedule_id().as_str().to_owned(),
        name: "ACDC Oncall Schedule".into(),
        schedule_layers: layers
            .into_iter()
            .map(|(name, entries)| ScheduleLayer {
                name: name.to_owned(),
                rendered_schedule_entries: entries,
            })
            .collect(),
        final_schedule: FinalSchedule {
            rendered_schedule_entries: resolved,
        },
    }
}

/// Deux layers, trois tours : un tour Primary normal, un tour Primary découpé
/// par un override de Bob, un tour Secondary normal. Carol n'est jamais d'astreinte.
pub fn acdc_dump() -> ScheduleDump {
    let id = schedule_id();
    let turn1 = entry("Alice", "2018-06-01T09:00:00+02:00", "2018-06-01T10:00:00+02:00");
    let turn2 = entry("Alice", "2018-06-01T10:00:00+02:00", "2018-06-01T11:00:00+02:00");
    let turn3 = entry("Bob", "2018-06-01T09:00:00+02:00", "2018-06-01T09:30:00+02:00");

    let top = view(
        vec![
            ("Primary", vec![turn1.clone(), turn2.clone()]),
            ("Secondary", vec![turn3.clone()]),
        ],
        Vec::new(),
    );

    let narrow = |turn: &RenderedEntry, resolved: Vec<RenderedEntry>| {
        view(
            vec![
                ("Primary", vec![turn.clone()]),
                ("Secondary", vec![turn.clone()]),
            ],
            resolved,
        )
    };

    let mut dump = ScheduleDump {
        schedules: vec![ScheduleEntry {
            id: id.clone(),
            name: "ACDC Oncall Schedule".into(),
        }],
        engineers: ["Alice", "Bob", "Carol"].iter().map(EngineerId::new).collect(),
        renderings: Vec::new(),
    };
    dump.add_rendering(&id, SINCE, UNTIL, top);
    dump.add_rendering(&id, &turn1.start, &turn1.end, narrow(&turn1, vec![turn1.clone()]));
    dump.add_rendering(
        &id,
        &turn2.start,
        &turn2.end,
        narrow(
            &turn2,
            vec![
                entry("Alice", "2018-06-01T10:00:00+02:00", "2018-06-01T10:20:00+02:00"),
                entry("Bob", "2018-06-01T10:20:00+02:00", "2018-06-01T11:00:00+02:00"),
            ],
        ),
    );
    dump.add_rendering(&id, &turn3.start, &turn3.end, narrow(&turn3, vec![turn3.clone()]));
    dump
}
