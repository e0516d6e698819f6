use crate::core::viewport::Viewport;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

/// Map lifecycle events as a map widget reports them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The map finished its initial load
    Load { viewport: Viewport },
    /// The user started panning or zooming
    MoveStart,
    /// Intermediate position during a drag or zoom animation
    Move { viewport: Viewport },
    /// Panning or zooming stopped
    MoveEnd { viewport: Viewport },
}

impl MapEvent {
    /// The viewport to query for, if this event means the view has settled
    pub fn settled_viewport(&self) -> Option<Viewport> {
        match self {
            MapEvent::Load { viewport } | MapEvent::MoveEnd { viewport } => Some(*viewport),
            MapEvent::MoveStart | MapEvent::Move { .. } => None,
        }
    }
}

/// Turns a stream of raw map events into the viewport-settled stream the
/// driver consumes: one item per `Load` or `MoveEnd`, nothing while moving.
pub fn settled<S>(events: S) -> impl Stream<Item = Viewport>
where
    S: Stream<Item = MapEvent>,
{
    events.filter_map(|event| futures::future::ready(event.settled_viewport()))
}
