use crate::data::geojson::FeatureCollection;
use crate::{Error, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::Write;

/// The rendering collaborator's "replace all points" operation.
///
/// Implementations always receive the complete accumulated set, never a
/// delta, so applying the same snapshot twice must be harmless.
pub trait RenderSink: Send {
    fn replace_all(&mut self, points: &FeatureCollection) -> Result<()>;
}

impl<R: RenderSink + ?Sized> RenderSink for Box<R> {
    fn replace_all(&mut self, points: &FeatureCollection) -> Result<()> {
        (**self).replace_all(points)
    }
}

/// Logs every snapshot; the full document goes to the debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn replace_all(&mut self, points: &FeatureCollection) -> Result<()> {
        log::info!("rendering {} articles", points.len());
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("{}", points.to_json()?);
        }
        Ok(())
    }
}

/// Forwards snapshots to another thread, e.g. a UI loop owning the map widget
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<FeatureCollection>,
}

impl ChannelSink {
    /// Creates a sink together with the receiving end of its channel
    pub fn new() -> (Self, Receiver<FeatureCollection>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl RenderSink for ChannelSink {
    fn replace_all(&mut self, points: &FeatureCollection) -> Result<()> {
        self.tx
            .send(points.clone())
            .map_err(|_| Error::Render("render channel disconnected".to_string()))
    }
}

/// Writes each snapshot as one GeoJSON document per line
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RenderSink for JsonLinesSink<W> {
    fn replace_all(&mut self, points: &FeatureCollection) -> Result<()> {
        let json = points.to_json()?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}
