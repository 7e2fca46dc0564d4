use std::future::Future;

use reqwest::Url;
use tracing::debug;

use crate::core::RawRecord;
use crate::error::{ScatterError, ScatterResult};
use crate::loader::{ChunkWindow, ReweightRequest};

/// Remote word-frequency service.
///
/// Futures must be `Send` so chunk fetches can run as independent tasks.
pub trait DataSource: Send + Sync + 'static {
    /// Asks the service to recompute scores; the response body is ignored.
    fn reweight(&self, request: &ReweightRequest) -> impl Future<Output = ScatterResult<()>> + Send;

    fn fetch_chunk(
        &self,
        window: ChunkWindow,
    ) -> impl Future<Output = ScatterResult<Vec<RawRecord>>> + Send;
}

/// `DataSource` over HTTP: `GET {base}/data/reweight/{year}/{weights}` and
/// `GET {base}/data/{offset}/{count}`.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: &str) -> ScatterResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> ScatterResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|err| {
            ScatterError::InvalidConfig(format!("invalid base url `{base_url}`: {err}"))
        })?;
        Ok(Self { http, base_url })
    }

    pub fn reweight_url(&self, request: &ReweightRequest) -> ScatterResult<Url> {
        self.url_for(&request.path())
    }

    pub fn chunk_url(&self, window: ChunkWindow) -> ScatterResult<Url> {
        self.url_for(&window.path())
    }

    fn url_for(&self, path: &str) -> ScatterResult<Url> {
        let raw = format!("{}/{path}", self.base_url);
        Url::parse(&raw)
            .map_err(|err| ScatterError::InvalidConfig(format!("invalid request url `{raw}`: {err}")))
    }
}

impl DataSource for HttpDataSource {
    async fn reweight(&self, request: &ReweightRequest) -> ScatterResult<()> {
        let url = self.reweight_url(request)?;
        debug!(%url, "requesting reweight");
        self.http.get(url).send().await?.error_for_status()?;
        Ok(())
    }

    async fn fetch_chunk(&self, window: ChunkWindow) -> ScatterResult<Vec<RawRecord>> {
        let url = self.chunk_url(window)?;
        debug!(%url, "requesting chunk");
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        decode_chunk(&body)
    }
}

/// Decodes a chunk body. A JSON `null` is an empty chunk.
pub(crate) fn decode_chunk(body: &[u8]) -> ScatterResult<Vec<RawRecord>> {
    let records: Option<Vec<RawRecord>> = serde_json::from_slice(body)
        .map_err(|err| ScatterError::Decode(format!("invalid chunk payload: {err}")))?;
    Ok(records.unwrap_or_default())
}
