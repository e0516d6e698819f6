pub mod sink;

// Re-export main types
pub use sink::{ChannelSink, JsonLinesSink, LogSink, RenderSink};
