//! Test utilities for vdx development.
//!
//! Provides [`Record`](vdx_core::Record) fixtures built against the vdx
//! schema, shared by the codec's integration tests and the benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    automated_driving_function, geodetic, host_vehicle_data_with_wheels, orientation, pedalry,
    sample_host_vehicle_data, timestamp, version, vector, wheel,
};
