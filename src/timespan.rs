use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Format fixe des horodatages du service : `YYYY-MM-DDTHH:MM:SS±HH:MM`.
pub const SERVICE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimeFormatError {
    pub input: String,
    pub reason: String,
}

/// Parse un horodatage au format du service (offset obligatoire, pas de fractions).
///
/// chrono accepte des champs à un chiffre et un offset sans `:` ; la forme
/// à largeur fixe est donc vérifiée avant le parsing.
pub fn parse_service_time(raw: &str) -> Result<DateTime<FixedOffset>, TimeFormatError> {
    let error = |reason: String| TimeFormatError {
        input: raw.to_owned(),
        reason,
    };
    if !has_fixed_layout(raw) {
        return Err(error("expected YYYY-MM-DDTHH:MM:SS±HH:MM".to_owned()));
    }
    DateTime::parse_from_str(raw, SERVICE_TIME_FORMAT).map_err(|err| error(err.to_string()))
}

fn has_fixed_layout(raw: &str) -> bool {
    const LAYOUT: &[u8; 25] = b"dddd-dd-ddTdd:dd:dd#dd:dd";
    let bytes = raw.as_bytes();
    bytes.len() == LAYOUT.len()
        && bytes.iter().zip(LAYOUT).all(|(&b, &want)| match want {
            b'd' => b.is_ascii_digit(),
            b'#' => b == b'+' || b == b'-',
            lit => b == lit,
        })
}

/// Intervalle de couverture `[start, end]`.
///
/// `start <= end` est attendu mais pas imposé : un intervalle inversé
/// donne une durée négative, c'est à l'appelant de la rejeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TimeSpan {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, TimeFormatError> {
        Ok(Self::new(parse_service_time(start)?, parse_service_time(end)?))
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Durée en minutes entières, arrondie vers le bas (-30 s donne -1).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_seconds().div_euclid(60)
    }
}
