//! The query → reconcile → publish loop
//!
//! The driver owns the accumulator. Queries may be in flight concurrently
//! (up to [`DriverConfig::max_in_flight`]), but their results are reconciled
//! one at a time in completion order, and each reconcile runs to completion
//! without suspending. A late response for a stale viewport is still merged:
//! it can only add points, never remove them.

use crate::core::config::DriverConfig;
use crate::core::viewport::Viewport;
use crate::data::poi::Poi;
use crate::rendering::sink::RenderSink;
use crate::session::accumulator::Accumulator;
use crate::source::{DataSourceError, GeoSource};
use crate::{Error, Result};
use futures::stream::{Stream, StreamExt};

/// What a single settled-viewport cycle did
#[derive(Debug)]
pub enum CycleOutcome {
    /// The full set was handed to the renderer, either because new POIs were
    /// found or because an earlier snapshot was rejected and is now resent
    Published { added: usize, total: usize },
    /// Every candidate was already known and the renderer is up to date
    Unchanged { total: usize },
    /// The merge succeeded but the renderer rejected the snapshot. The full
    /// set is offered again on the next successful cycle.
    RenderFailed {
        added: usize,
        total: usize,
        error: Error,
    },
    /// The query failed; session state is untouched
    Failed(DataSourceError),
}

impl CycleOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, CycleOutcome::Published { .. })
    }
}

/// Counters accumulated over a [`Driver::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub cycles: usize,
    pub published: usize,
    pub unchanged: usize,
    pub render_failed: usize,
    pub failed: usize,
    pub total_points: usize,
}

impl DriverStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Published { total, .. } => {
                self.published += 1;
                self.total_points = *total;
            }
            CycleOutcome::Unchanged { total } => {
                self.unchanged += 1;
                self.total_points = *total;
            }
            CycleOutcome::RenderFailed { total, .. } => {
                self.render_failed += 1;
                self.total_points = *total;
            }
            CycleOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// The part of the driver the loop body mutates
struct Session<R> {
    accumulator: Accumulator,
    sink: R,
    /// The renderer missed the latest snapshot
    render_pending: bool,
}

impl<R: RenderSink> Session<R> {
    fn apply(
        &mut self,
        source: &str,
        viewport: &Viewport,
        result: std::result::Result<Vec<Poi>, DataSourceError>,
    ) -> CycleOutcome {
        let candidates = match result {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!(
                    "{} geosearch around {} failed, skipping cycle: {}",
                    source,
                    viewport.center,
                    e
                );
                return CycleOutcome::Failed(e);
            }
        };

        let fetched = candidates.len();
        let reconciliation = self.accumulator.reconcile(candidates);
        let added = reconciliation.newly_added.len();
        let total = reconciliation.full_set.len();

        if added == 0 && !self.render_pending {
            log::debug!(
                "{}: {} candidates around {}, none new ({} known)",
                source,
                fetched,
                viewport.center,
                total
            );
            return CycleOutcome::Unchanged { total };
        }

        if added > 0 {
            log::info!(
                "{}: {} new of {} candidates around {}, {} known",
                source,
                added,
                fetched,
                viewport.center,
                total
            );
        } else {
            log::info!("resending {} articles the renderer missed", total);
        }

        match self.sink.replace_all(self.accumulator.feature_collection()) {
            Ok(()) => {
                self.render_pending = false;
                CycleOutcome::Published { added, total }
            }
            Err(error) => {
                log::warn!(
                    "render sink rejected {} articles, retrying next cycle: {}",
                    total,
                    error
                );
                self.render_pending = true;
                CycleOutcome::RenderFailed {
                    added,
                    total,
                    error,
                }
            }
        }
    }
}

/// Drives one discovery session
pub struct Driver<S, R> {
    source: S,
    session: Session<R>,
    config: DriverConfig,
}

impl<S: GeoSource, R: RenderSink> Driver<S, R> {
    pub fn new(source: S, sink: R, config: DriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            session: Session {
                accumulator: Accumulator::new(),
                sink,
                render_pending: false,
            },
            config,
        })
    }

    /// Read-only view of the session state
    pub fn accumulator(&self) -> &Accumulator {
        &self.session.accumulator
    }

    /// Runs one cycle for a settled viewport
    pub async fn handle_settled(&mut self, viewport: Viewport) -> CycleOutcome {
        let viewport = viewport.with_radius(self.config.radius_m);
        let result = self
            .source
            .query(viewport.center, viewport.search_radius_m, self.config.limit)
            .await;
        self.session.apply(self.source.name(), &viewport, result)
    }

    /// Processes a finite stream of settled viewports until it ends
    pub async fn run<E>(&mut self, events: E) -> DriverStats
    where
        E: Stream<Item = Viewport>,
    {
        let source = &self.source;
        let session = &mut self.session;
        let radius_m = self.config.radius_m;
        let limit = self.config.limit;

        let queries = events
            .map(move |viewport| async move {
                let viewport = viewport.with_radius(radius_m);
                let result = source.query(viewport.center, radius_m, limit).await;
                (viewport, result)
            })
            .buffer_unordered(self.config.max_in_flight);
        futures::pin_mut!(queries);

        let mut stats = DriverStats::default();
        while let Some((viewport, result)) = queries.next().await {
            let outcome = session.apply(source.name(), &viewport, result);
            stats.record(&outcome);
        }

        stats.total_points = session.accumulator.len();
        log::info!(
            "{} session ended after {} cycles: {} published, {} unchanged, {} not rendered, {} failed, {} articles",
            source.name(),
            stats.cycles,
            stats.published,
            stats.unchanged,
            stats.render_failed,
            stats.failed,
            stats.total_points
        );
        stats
    }
}

#[cfg(feature = "tokio-runtime")]
impl<S, R> Driver<S, R>
where
    S: GeoSource + 'static,
    R: RenderSink + 'static,
{
    /// Runs the session as a tokio task, handing the driver back when the
    /// event stream ends. Pair with a `ChannelSink` to feed a UI thread.
    pub fn spawn<E>(mut self, events: E) -> tokio::task::JoinHandle<(Self, DriverStats)>
    where
        E: Stream<Item = Viewport> + Send + 'static,
    {
        tokio::spawn(async move {
            let stats = self.run(events).await;
            (self, stats)
        })
    }
}
