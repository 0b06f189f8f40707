//! JSON-over-HTTP plumbing shared by every remote client.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, WelpError};
use crate::models::ErrorResponse;

/// Deadline applied to every outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// == Http Peer ==
/// A base URL plus a pooled client. Path segments are percent-encoded, so
/// keys may contain spaces or slashes.
#[derive(Debug, Clone)]
pub struct HttpPeer {
    client: Client,
    base: Url,
}

impl HttpPeer {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|err| {
            WelpError::InvalidConfiguration(format!("invalid peer url {}: {}", base_url, err))
        })?;
        if base.cannot_be_a_base() {
            return Err(WelpError::InvalidConfiguration(format!(
                "invalid peer url {}",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| WelpError::InvalidConfiguration(err.to_string()))?;

        Ok(Self { client, base })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.client.get(self.url(segments)).send().await?;
        decode(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = self.client.put(self.url(segments)).json(body).send().await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = self.client.post(self.url(segments)).json(body).send().await?;
        decode(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.client.delete(self.url(segments)).send().await?;
        decode(response).await
    }
}

/// Maps the peer's status back onto `WelpError`: 404 is `NotFound`, 400 is
/// `InvalidRequest`, anything else unsuccessful is `Transport`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let url = response.url().to_string();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("{} returned {}", url, status),
    };
    Err(match status {
        StatusCode::NOT_FOUND => WelpError::NotFound(message),
        StatusCode::BAD_REQUEST => WelpError::InvalidRequest(message),
        _ => WelpError::Transport(message),
    })
}
