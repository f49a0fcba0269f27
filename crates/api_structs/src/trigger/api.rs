use crate::dtos::BatchRunSummaryDTO;
use serde::{Deserialize, Serialize};

pub mod run_daily_batch {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub summary: BatchRunSummaryDTO,
        pub timestamp: i64,
    }

    /// Returned when the run itself failed, e.g. the tracker store was
    /// unreachable during due-set selection
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ErrorResponse {
        pub message: String,
        pub timestamp: i64,
    }
}
