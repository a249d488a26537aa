//! Ports to external services
//!
//! Adapters in the infrastructure layer implement these traits on top of
//! the integration crates.

mod map_matching_port;
mod transit_data_port;

pub use map_matching_port::MapMatchingPort;
pub use transit_data_port::TransitDataPort;

#[cfg(test)]
pub use map_matching_port::MockMapMatchingPort;
#[cfg(test)]
pub use transit_data_port::MockTransitDataPort;
