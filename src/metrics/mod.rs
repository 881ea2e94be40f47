//! Hit/miss and eviction counters for the policy cores.
//!
//! Compiled only with the `metrics` feature. Recording is split from reading:
//! cores write through the recorder traits, callers read through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider) and publish
//! through [`MetricsExporter`](traits::MetricsExporter).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
