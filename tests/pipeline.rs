#![forbid(unsafe_code)]
mod common;

use common::{acdc_dump, entry, schedule_id, SINCE, UNTIL};
use oncall_summary::coverage::SkipReason;
use oncall_summary::pipeline::PipelineError;
use oncall_summary::{
    collect_coverage, render_report, summarize, CoverageExtractor, EngineerId, ReportOptions,
    RunOptions, ScheduleId, ScheduleSource, ScheduleView, SourceError, TextSummary,
    UnknownEngineerPolicy,
};

fn opts() -> RunOptions {
    RunOptions {
        schedule_name: "ACDC".into(),
        since: SINCE.into(),
        until: UNTIL.into(),
        unknown_engineers: UnknownEngineerPolicy::Drop,
    }
}

#[test]
fn reconciles_normal_turns_and_overrides() {
    let run = collect_coverage(&acdc_dump(), &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(run.schedule_id, Some(schedule_id()));
    assert_eq!(run.stats.windows_queried, 3);
    assert_eq!(run.stats.records, 4);
    assert!(!run.stats.is_partial());

    let alice = run.aggregator.get(&EngineerId::new("Alice")).unwrap();
    assert_eq!(alice.shifts["Primary"], vec![60]);
    assert_eq!(alice.overrides["Primary"], vec![20]);

    let bob = run.aggregator.get(&EngineerId::new("Bob")).unwrap();
    assert_eq!(bob.overrides["Primary"], vec![40]);
    assert!(!bob.shifts.contains_key("Primary"));
    assert_eq!(bob.shifts["Secondary"], vec![30]);

    assert!(run.aggregator.get(&EngineerId::new("Carol")).unwrap().is_empty());
}

#[test]
fn renders_one_block_per_engineer() {
    let run = collect_coverage(&acdc_dump(), &opts(), &CoverageExtractor::new()).unwrap();
    let summaries = summarize(run.aggregator.overviews(), ReportOptions::default());
    let expected = "\
Engineer: Alice
Primary: 1 h 0 min in 1 shift(s) and 1 override(s)

Engineer: Bob
Primary: 0 h 0 min in 0 shift(s) and 1 override(s)
Secondary: 0 h 30 min in 1 shift(s) and 0 override(s)

Engineer: Carol
No coverage in this window

";
    assert_eq!(render_report(&summaries, &TextSummary), expected);
}

#[test]
fn running_twice_gives_identical_totals() {
    let dump = acdc_dump();
    let first = collect_coverage(&dump, &opts(), &CoverageExtractor::new()).unwrap();
    let second = collect_coverage(&dump, &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(first.aggregator.overviews(), second.aggregator.overviews());
    assert_eq!(first.stats, second.stats);
}

#[test]
fn failed_window_is_counted_and_skipped() {
    let mut dump = acdc_dump();
    // retire le rendu étroit du tour Secondary
    dump.renderings.retain(|r| r.until != "2018-06-01T09:30:00+02:00");
    let run = collect_coverage(&dump, &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(run.stats.windows_failed, 1);
    assert!(run.stats.is_partial());
    let bob = run.aggregator.get(&EngineerId::new("Bob")).unwrap();
    assert!(!bob.shifts.contains_key("Secondary"));
}

#[test]
fn malformed_resolved_entry_is_reported_not_fatal() {
    let mut dump = acdc_dump();
    let turn = dump
        .renderings
        .iter_mut()
        .find(|r| r.until == "2018-06-01T09:30:00+02:00")
        .unwrap();
    turn.schedule.final_schedule.rendered_schedule_entries =
        vec![entry("Bob", "2018-06-01T09:00:00", "2018-06-01T09:30:00+02:00")];

    let run = collect_coverage(&dump, &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(run.stats.skipped.len(), 1);
    assert_eq!(run.stats.skipped[0].layer, "Secondary");
    assert!(matches!(run.stats.skipped[0].reason, SkipReason::BadTimestamp(_)));
    assert_eq!(run.stats.records, 3);
}

fn with_stranger(dump: &mut oncall_summary::ScheduleDump) {
    let turn = dump
        .renderings
        .iter_mut()
        .find(|r| r.until == "2018-06-01T09:30:00+02:00")
        .unwrap();
    turn.schedule.final_schedule.rendered_schedule_entries =
        vec![entry("Dave", "2018-06-01T09:00:00+02:00", "2018-06-01T09:30:00+02:00")];
}

#[test]
fn unknown_engineer_policies() {
    let mut dump = acdc_dump();
    with_stranger(&mut dump);

    let dropped = collect_coverage(&dump, &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(dropped.stats.dropped_records, 1);
    assert!(dropped.aggregator.get(&EngineerId::new("Dave")).is_none());

    let mut create = opts();
    create.unknown_engineers = UnknownEngineerPolicy::Create;
    let created = collect_coverage(&dump, &create, &CoverageExtractor::new()).unwrap();
    assert_eq!(created.stats.created_engineers, 1);
    let dave = created.aggregator.get(&EngineerId::new("Dave")).unwrap();
    assert_eq!(dave.shifts["Secondary"], vec![30]);

    let mut fail = opts();
    fail.unknown_engineers = UnknownEngineerPolicy::Fail;
    let err = collect_coverage(&dump, &fail, &CoverageExtractor::new()).unwrap_err();
    assert!(matches!(err, PipelineError::Aggregate(_)));
}

#[test]
fn unknown_schedule_name_degrades_to_empty_report() {
    let mut o = opts();
    o.schedule_name = "does not exist".into();
    let run = collect_coverage(&acdc_dump(), &o, &CoverageExtractor::new()).unwrap();
    assert_eq!(run.schedule_id, None);
    assert_eq!(run.stats.lookup_failures, 1);
    assert_eq!(run.aggregator.overviews().len(), 3);
    assert!(run.aggregator.overviews().iter().all(|ov| ov.is_empty()));
}

struct Unreachable;

impl ScheduleSource for Unreachable {
    fn find_schedule_id(&self, _query: &str) -> Result<Option<ScheduleId>, SourceError> {
        Err(SourceError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        })
    }
    fn list_engineers(&self) -> Result<Vec<EngineerId>, SourceError> {
        Err(SourceError::InvalidResponse("truncated".into()))
    }
    fn get_schedule(&self, _: &ScheduleId, _: &str, _: &str) -> Result<ScheduleView, SourceError> {
        unreachable!("no schedule id was resolved")
    }
}

#[test]
fn remote_failures_never_abort_the_run() {
    let run = collect_coverage(&Unreachable, &opts(), &CoverageExtractor::new()).unwrap();
    assert_eq!(run.schedule_id, None);
    assert_eq!(run.stats.lookup_failures, 2);
    assert!(run.aggregator.overviews().is_empty());
}
