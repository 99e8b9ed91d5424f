//! Service layer: aggregation queries and the pure logic that shapes,
//! filters, and exports their results.

pub mod dashboard;
pub mod export;
pub mod metrics;
pub mod selection;
pub mod shaping;
