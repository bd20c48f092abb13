//! HTTP session with the arena server.

use anyhow::{anyhow, Context, Result};
use arena_core::{Action, ArenaLimits, Observation};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

pub const PLAYER_MONIKER_HEADER: &str = "X-Sm-Playermoniker";
pub const PLAYER_ID_HEADER: &str = "X-Sm-Playerid";

/// Where the next observation comes from. The game loop only needs this.
pub trait Session {
    fn submit(&mut self, action: Action) -> Result<Observation>;
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub host: String,
    pub port: u16,
    pub game: String,
    pub moniker: String,
}

impl SessionOptions {
    fn base_url(&self) -> String {
        format!("http://{}:{}/game/{}", self.host, self.port, self.game)
    }
}

#[derive(Debug, Deserialize)]
struct JoinBody {
    config: ArenaLimits,
    #[serde(flatten)]
    observation: Observation,
}

pub struct Joined {
    pub client: ArenaClient,
    pub player_id: String,
    pub limits: ArenaLimits,
    pub observation: Observation,
}

pub struct ArenaClient {
    http: Client,
    base_url: String,
    player_id: String,
}

impl ArenaClient {
    pub fn join(opts: &SessionOptions) -> Result<Joined> {
        info!(game = %opts.game, moniker = %opts.moniker, "joining game");
        let http = Client::builder()
            .build()
            .context("failed to build http client")?;
        let base_url = opts.base_url();
        let response = http
            .post(format!("{base_url}/join"))
            .header(PLAYER_MONIKER_HEADER, &opts.moniker)
            .send()
            .with_context(|| format!("join request to {base_url} failed"))?;
        let response = ensure_ok(response, "join")?;

        let player_id = response
            .headers()
            .get(PLAYER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("join response is missing {PLAYER_ID_HEADER}"))?;
        let body = response.text().context("failed reading join body")?;
        let joined: JoinBody =
            serde_json::from_str(&body).context("join body is not a valid status")?;

        Ok(Joined {
            client: ArenaClient {
                http,
                base_url,
                player_id: player_id.clone(),
            },
            player_id,
            limits: joined.config,
            observation: joined.observation,
        })
    }
}

impl Session for ArenaClient {
    fn submit(&mut self, action: Action) -> Result<Observation> {
        let url = format!("{}/{}", self.base_url, action.as_str());
        let response = self
            .http
            .post(&url)
            .header(PLAYER_ID_HEADER, &self.player_id)
            .send()
            .with_context(|| format!("{action} request failed"))?;
        let response = ensure_ok(response, action.as_str())?;
        let body = response
            .text()
            .with_context(|| format!("failed reading {action} response"))?;
        serde_json::from_str(&body)
            .with_context(|| format!("{action} response is not a valid status"))
    }
}

fn ensure_ok(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        Err(anyhow!("bad {what} response: {status} {body}"))
    }
}
