use crate::aggregate::UnknownEngineerPolicy;
use crate::pipeline::RunOptions;
use crate::report::ReportOptions;
use crate::timespan::{parse_service_time, TimeFormatError};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SCHEDULE_NAME: &str = "ACDC Oncall Schedule";
pub const DEFAULT_SINCE: &str = "2018-06-01T00:00:01+00:00";
pub const DEFAULT_UNTIL: &str = "2018-07-01T00:00:01+00:00";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("an API token is required (--token)")]
    MissingToken,
    #[error("invalid --{flag}: {source}")]
    InvalidTimestamp {
        flag: &'static str,
        #[source]
        source: TimeFormatError,
    },
}

/// D'où viennent les plannings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    PagerDuty {
        token: String,
        base_url: Option<String>,
    },
    File(PathBuf),
}

/// Arguments bruts, tels que saisis sur la ligne de commande.
#[derive(Debug, Clone, Default)]
pub struct RawArgs {
    pub token: Option<String>,
    pub name: String,
    pub since: String,
    pub until: String,
    pub unknown_engineers: UnknownEngineerPolicy,
    pub shift_layers_only: bool,
    pub source_file: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Configuration validée d'une exécution.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceSettings,
    pub run: RunOptions,
    pub report: ReportOptions,
}

impl Settings {
    /// Valide les arguments avant tout appel distant.
    ///
    /// Le token est obligatoire sauf si un dump JSON remplace le service.
    pub fn from_args(args: RawArgs) -> Result<Self, ConfigError> {
        for (flag, value) in [("since", &args.since), ("until", &args.until)] {
            parse_service_time(value)
                .map_err(|source| ConfigError::InvalidTimestamp { flag, source })?;
        }

        let source = match (args.source_file, args.token) {
            (Some(path), _) => SourceSettings::File(path),
            (None, Some(token)) if !token.trim().is_empty() => SourceSettings::PagerDuty {
                token,
                base_url: args.base_url,
            },
            (None, _) => return Err(ConfigError::MissingToken),
        };

        Ok(Self {
            source,
            run: RunOptions {
                schedule_name: args.name,
                since: args.since,
                until: args.until,
                unknown_engineers: args.unknown_engineers,
            },
            report: ReportOptions {
                include_override_only_layers: !args.shift_layers_only,
            },
        })
    }
}
