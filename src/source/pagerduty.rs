use super::{ScheduleSource, SourceError};
use crate::model::{EngineerId, ScheduleId, ScheduleView, UserRef};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";
const PAGE_LIMIT: usize = 100;

/// Client bloquant pour l'API REST PagerDuty v2.
///
/// Une requête à la fois, pas de retry : un échec remonte en `SourceError`
/// et c'est au pipeline de décider de continuer.
pub struct PagerDutyClient {
    http: Client,
    base_url: String,
}

impl fmt::Debug for PagerDutyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerDutyClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl PagerDutyClient {
    pub fn new(token: &str) -> Result<Self, SourceError> {
        if token.trim().is_empty() {
            return Err(SourceError::InvalidToken("token cannot be empty"));
        }
        let mut auth = HeaderValue::from_str(&format!("Token token={}", token.trim()))
            .map_err(|_| SourceError::InvalidToken("token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V2));

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "GET");
        let response = self.http.get(&url).query(query).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleList {
    schedules: Vec<ScheduleSummary>,
}

#[derive(Debug, Deserialize)]
struct ScheduleSummary {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserPage {
    users: Vec<UserRef>,
    #[serde(default)]
    more: bool,
}

#[derive(Debug, Deserialize)]
struct ScheduleEnvelope {
    schedule: ScheduleView,
}

fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, SourceError> {
    if !(200..300).contains(&status) {
        return Err(SourceError::Api {
            status,
            message: parse_api_error(body).unwrap_or_else(|| body.to_owned()),
        });
    }
    serde_json::from_str(body).map_err(|err| SourceError::InvalidResponse(err.to_string()))
}

fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
        #[serde(default)]
        errors: Vec<String>,
    }

    serde_json::from_str::<ErrorPayload>(body).ok().map(|p| {
        if p.error.errors.is_empty() {
            p.error.message
        } else {
            format!("{} ({})", p.error.message, p.error.errors.join("; "))
        }
    })
}

impl ScheduleSource for PagerDutyClient {
    fn find_schedule_id(&self, query: &str) -> Result<Option<ScheduleId>, SourceError> {
        let list: ScheduleList = self.get("/schedules", &[("query", query)])?;
        Ok(list.schedules.into_iter().next().map(|s| ScheduleId::new(s.id)))
    }

    fn list_engineers(&self) -> Result<Vec<EngineerId>, SourceError> {
        let limit = PAGE_LIMIT.to_string();
        let mut offset = 0usize;
        let mut out = Vec::new();
        loop {
            let off = offset.to_string();
            let page: UserPage = self.get("/users", &[("offset", off.as_str()), ("limit", limit.as_str())])?;
            offset += page.users.len();
            let more = page.more && !page.users.is_empty();
            out.extend(page.users.iter().map(UserRef::engineer));
            if !more {
                break;
            }
        }
        Ok(out)
    }

    fn get_schedule(
        &self,
        id: &ScheduleId,
        since: &str,
        until: &str,
    ) -> Result<ScheduleView, SourceError> {
        let path = format!("/schedules/{}", id.as_str());
        let envelope: ScheduleEnvelope =
            self.get(&path, &[("since", since), ("until", until)])?;
        Ok(envelope.schedule)
    }
}
