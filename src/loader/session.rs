use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::{LoadPlan, ScatterEngine};
use crate::core::RawRecord;
use crate::error::ScatterResult;
use crate::loader::{ChunkWindow, DataSource, ReweightRequest, chunk_windows};
use crate::render::Renderer;

/// What one load run did. Failures are counted here and logged, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadSummary {
    pub reweighted: bool,
    pub chunks_requested: usize,
    pub chunks_loaded: usize,
    pub chunks_failed: usize,
    pub points_ingested: usize,
    pub records_rejected: usize,
    /// Windows in the order their responses were ingested.
    pub arrival_order: Vec<ChunkWindow>,
}

/// Drives the reweight call and the concurrent chunk fetches against one
/// `DataSource`, feeding every arrival into a `ScatterEngine`.
#[derive(Debug)]
pub struct Loader<S: DataSource> {
    source: Arc<S>,
    windows: Vec<ChunkWindow>,
}

impl<S: DataSource> Loader<S> {
    pub fn new(
        source: Arc<S>,
        window_start: usize,
        window_count: usize,
        chunk_size: usize,
    ) -> ScatterResult<Self> {
        let windows = chunk_windows(window_start, window_count, chunk_size)?;
        Ok(Self { source, windows })
    }

    pub fn from_plan(source: Arc<S>, plan: &LoadPlan) -> ScatterResult<Self> {
        Self::new(source, plan.window_start, plan.window_count, plan.chunk_size)
    }

    #[must_use]
    pub fn windows(&self) -> &[ChunkWindow] {
        &self.windows
    }

    /// Requests the reweight and, once it succeeds, loads every chunk.
    ///
    /// A failed reweight is logged and ends the run with nothing requested.
    pub async fn start<R: Renderer>(
        &self,
        request: &ReweightRequest,
        engine: &mut ScatterEngine<R>,
    ) -> LoadSummary {
        info!(
            year = request.year(),
            weights = %request.weights(),
            "starting load"
        );
        if let Err(err) = self.source.reweight(request).await {
            warn!(error = %err, "reweight failed; nothing will be loaded");
            return LoadSummary::default();
        }

        let mut summary = self.load_chunks(engine).await;
        summary.reweighted = true;
        summary
    }

    /// Fetches every window concurrently and ingests each response as it
    /// completes.
    ///
    /// Every arrival triggers a full render pass over the accumulated store.
    /// Failed chunks are logged and skipped; their points never appear.
    pub async fn load_chunks<R: Renderer>(&self, engine: &mut ScatterEngine<R>) -> LoadSummary {
        let mut summary = LoadSummary {
            chunks_requested: self.windows.len(),
            ..LoadSummary::default()
        };

        let mut in_flight: JoinSet<(ChunkWindow, ScatterResult<Vec<RawRecord>>)> = JoinSet::new();
        for &window in &self.windows {
            let source = Arc::clone(&self.source);
            in_flight.spawn(async move {
                let result = source.fetch_chunk(window).await;
                (window, result)
            });
        }
        debug!(chunks = summary.chunks_requested, "dispatched chunk requests");

        while let Some(joined) = in_flight.join_next().await {
            let (window, result) = match joined {
                Ok(completed) => completed,
                Err(err) => {
                    warn!(error = %err, "chunk task did not complete");
                    summary.chunks_failed += 1;
                    continue;
                }
            };

            let records = match result {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        offset = window.offset,
                        count = window.count,
                        error = %err,
                        "chunk fetch failed; skipping"
                    );
                    summary.chunks_failed += 1;
                    continue;
                }
            };

            summary.chunks_loaded += 1;
            summary.arrival_order.push(window);
            let (report, rendered) = engine.ingest_and_render(records);
            summary.points_ingested += report.accepted;
            summary.records_rejected += report.rejected;
            if let Err(err) = rendered {
                warn!(
                    offset = window.offset,
                    error = %err,
                    "render after chunk arrival failed"
                );
            }
        }

        info!(
            loaded = summary.chunks_loaded,
            failed = summary.chunks_failed,
            points = engine.store().len(),
            "load finished"
        );
        summary
    }
}
