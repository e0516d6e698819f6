pub mod accumulator;
pub mod driver;
pub mod events;

// Re-exports for convenience
pub use accumulator::{Accumulator, Reconciliation};
pub use driver::{CycleOutcome, Driver, DriverStats};
pub use events::{settled, MapEvent};
