//! Utility functions for geoloader and its dependents.

pub mod io;
