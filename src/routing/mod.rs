//! Routing layer: path normalization and group tagging.
//!
//! Every location carries an explicit [`LocationGroup`] computed once by the
//! [`RouteTable`] when a path is resolved.

mod location;
mod table;

pub use location::{normalize_path, Location, LocationGroup};
pub use table::{is_route_identifier, RouteTable};
