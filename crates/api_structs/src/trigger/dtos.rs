use nurture_scheduler_domain::ReminderStage;
use serde::{Deserialize, Serialize};

/// Aggregate outcome of one daily batch run. Individual email failures are
/// data in `errors`, not a failure of the run itself.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunSummaryDTO {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<BatchItemErrorDTO>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemErrorDTO {
    pub order_id: String,
    pub stage: ReminderStage,
    pub error: String,
}
