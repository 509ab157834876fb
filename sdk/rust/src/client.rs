use chrono::{DateTime, Utc};
use reqwest::{header::LOCATION, Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const RAIN_PATH: &str = "/api/v1/rain";
const USER_HEADER: &str = "x-userid";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordRequest {
    rain: bool,
}

/// Body of a `201 Created` answer, plus its `Location` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recorded {
    pub id: String,
    pub message: String,
    #[serde(skip)]
    pub location: Option<String>,
}

/// One listed observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub rain: bool,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct RainClient {
    client: Client,
    base_url: String,
}

impl RainClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Record today's observation for `user_id`.
    pub async fn record(&self, user_id: &str, rain: bool) -> Result<Recorded, ClientError> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, RAIN_PATH))
            .header(USER_HEADER, user_id)
            .json(&RecordRequest { rain })
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut recorded: Recorded = resp.json().await?;
        recorded.location = location;
        Ok(recorded)
    }

    /// All observations for `user_id`, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Observation>, ClientError> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, RAIN_PATH))
            .header(USER_HEADER, user_id)
            .send()
            .await?;

        let list: ListResponse = check_status(resp).await?.json().await?;
        Ok(list.data)
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
