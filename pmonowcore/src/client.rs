//! HTTP client for the companion endpoints.
//!
//! Both fetches are bounded by a 1 s connect timeout and a 1 s total
//! timeout, and both are deliberately silent: any non-200 status, timeout,
//! connection error, or body/JSON error yields `None`. The caller must
//! treat an absent value as "no update this cycle", never as fatal —
//! retrying is the poller's job through its 1 Hz cadence.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::errors::NowPlayingError;
use crate::model::MediaInfo;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(1000);
const READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// Client for the two companion endpoints (`media_info`, `media_image.jpg`).
#[derive(Debug, Clone)]
pub struct MediaEndpoint {
    http: reqwest::Client,
    info_url: String,
    image_url: String,
}

impl MediaEndpoint {
    /// Build a client for `base_url` (e.g. `http://localhost:58888`).
    pub fn new(base_url: &str) -> Result<Self, NowPlayingError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .map_err(|error| NowPlayingError::HttpClient(error.to_string()))?;

        let base = base_url.trim_end_matches('/');
        Ok(MediaEndpoint {
            http,
            info_url: format!("{base}/media_info"),
            image_url: format!("{base}/media_image.jpg"),
        })
    }

    /// Fetch and parse the current media information.
    ///
    /// Returns `None` on any failure; no retry within a single call.
    pub async fn fetch_info(&self) -> Option<MediaInfo> {
        let response = match self.http.get(&self.info_url).send().await {
            Ok(response) => response,
            Err(error) => {
                debug!("media_info request failed: {error}");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("media_info returned HTTP {}", response.status());
            return None;
        }

        match response.json::<MediaInfo>().await {
            Ok(info) => Some(info),
            Err(error) => {
                debug!("media_info body is not valid JSON: {error}");
                None
            }
        }
    }

    /// Fetch the raw cover art bytes.
    ///
    /// An empty body counts as a failure: the companion serves an empty
    /// image when no cover is available, and the caller reacts to both the
    /// same way (clear the displayed image).
    pub async fn fetch_image(&self) -> Option<Vec<u8>> {
        let response = match self.http.get(&self.image_url).send().await {
            Ok(response) => response,
            Err(error) => {
                debug!("media_image request failed: {error}");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("media_image returned HTTP {}", response.status());
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => {
                debug!("media_image returned an empty body");
                None
            }
            Ok(bytes) => Some(bytes.to_vec()),
            Err(error) => {
                debug!("media_image body read failed: {error}");
                None
            }
        }
    }
}
