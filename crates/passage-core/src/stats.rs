//! Dashboard aggregates.

use serde::Serialize;

/// Counters and sums computed over the whole client table.
///
/// Each value comes from an independent query at call time; a write landing
/// between two queries can make the response momentarily inconsistent,
/// which is acceptable for a dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub total_clients: i64,
    pub interview_pending: i64,
    pub interview_passed: i64,
    pub visa_approved: i64,
    pub visa_processing: i64,
    pub total_advance: f64,
    pub total_full_payment: f64,
    pub total_passport_fee: f64,
    /// Sum of the three payment totals, computed by the store.
    pub total_revenue: f64,
    pub ready_to_fly: i64,
}
