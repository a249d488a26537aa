//! Domain layer for Busway
//!
//! Contains the transit entities, geometry value objects, and the pure
//! travel-time estimation logic. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod travel_time;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
