#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use oncall_summary::{
    collect_coverage,
    config::{RawArgs, DEFAULT_SCHEDULE_NAME, DEFAULT_SINCE, DEFAULT_UNTIL},
    render_report, summarize, CoverageExtractor, JsonScheduleSource, PagerDutyClient,
    ScheduleSource, Settings, SourceSettings, TextSummary, UnknownEngineerPolicy,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Résumé des heures d'astreinte par ingénieur et par layer d'un planning PagerDuty
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs sur stderr (feature `logging`, filtre via RUST_LOG)
    #[arg(long)]
    log: bool,

    /// Token d'API PagerDuty
    #[arg(long)]
    token: Option<String>,

    /// Nom du planning à extraire (premier résultat de la recherche)
    #[arg(long, default_value = DEFAULT_SCHEDULE_NAME)]
    name: String,

    /// Début de la période (YYYY-MM-DDTHH:MM:SS±HH:MM)
    #[arg(long, default_value = DEFAULT_SINCE)]
    since: String,

    /// Fin de la période (YYYY-MM-DDTHH:MM:SS±HH:MM)
    #[arg(long, default_value = DEFAULT_UNTIL)]
    until: String,

    /// Couverture d'un ingénieur absent de la liste des utilisateurs : drop, create ou fail
    #[arg(long, default_value = "drop")]
    unknown_engineers: UnknownEngineerPolicy,

    /// Ne rapporte que les layers avec au moins un tour normal
    #[arg(long)]
    shift_layers_only: bool,

    /// Dump JSON à utiliser à la place de l'API
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// URL de base de l'API PagerDuty
    #[arg(long)]
    base_url: Option<String>,
}

impl From<Cli> for RawArgs {
    fn from(cli: Cli) -> Self {
        RawArgs {
            token: cli.token,
            name: cli.name,
            since: cli.since,
            until: cli.until,
            unknown_engineers: cli.unknown_engineers,
            shift_layers_only: cli.shift_layers_only,
            source_file: cli.source_file,
            base_url: cli.base_url,
        }
    }
}

fn open_source(settings: &SourceSettings) -> Result<Box<dyn ScheduleSource>> {
    Ok(match settings {
        SourceSettings::PagerDuty { token, base_url } => {
            let mut client = PagerDutyClient::new(token).context("building PagerDuty client")?;
            if let Some(url) = base_url {
                client = client.with_base_url(url.as_str());
            }
            Box::new(client)
        }
        SourceSettings::File(path) => Box::new(JsonScheduleSource::open(path)?),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let settings = match Settings::from_args(cli.into()) {
        Ok(s) => s,
        Err(err) => {
            // Code 2 = configuration invalide, aucun appel distant
            eprintln!("error: {err}\n\n{}", Cli::command().render_usage());
            std::process::exit(2);
        }
    };

    let source = open_source(&settings.source)?;
    let run = collect_coverage(source.as_ref(), &settings.run, &CoverageExtractor::new())?;

    let id = run.schedule_id.as_ref().map_or("-", |id| id.as_str());
    println!(
        "Extracting Schedule {} from {} to {}\n",
        id, settings.run.since, settings.run.until
    );

    let summaries = summarize(run.aggregator.overviews(), settings.report);
    print!("{}", render_report(&summaries, &TextSummary));

    let stats = &run.stats;
    if stats.is_partial() {
        eprintln!(
            "warning: partial data ({} lookup failure(s), {}/{} window(s) failed, {} entr(y/ies) skipped, {} record(s) dropped)",
            stats.lookup_failures,
            stats.windows_failed,
            stats.windows_queried,
            stats.skipped.len(),
            stats.dropped_records,
        );
    }

    Ok(())
}
