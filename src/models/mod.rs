// Domain models: widget readings and the provider's status report

mod reading;
mod status;

pub use reading::{Observation, Resource, ResourceReading};
pub use status::{AcceleratorStatus, RamStatus, StatusReport, usage_percent};
