use nurture_scheduler_domain::{
    ReminderStage, ReminderTracker, StageRecord, TrackerStatus, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTrackerDTO {
    pub id: ID,
    pub order_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_link: Option<String>,
    pub review_link: Option<String>,
    pub submitted_at: i64,
    pub stages: StageRecordsDTO,
    pub status: TrackerStatus,
    pub is_active: bool,
    pub reviewed_stage: Option<ReminderStage>,
    pub reviewed_at: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StageRecordsDTO {
    pub day3: StageRecordDTO,
    pub day7: StageRecordDTO,
    pub day14: StageRecordDTO,
    pub day30: StageRecordDTO,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StageRecordDTO {
    pub due_at: i64,
    pub sent: bool,
    pub sent_at: Option<i64>,
    pub last_error: Option<String>,
}

impl StageRecordDTO {
    fn new(record: &StageRecord) -> Self {
        Self {
            due_at: record.due_at,
            sent: record.sent,
            sent_at: record.sent_at,
            last_error: record.last_error.clone(),
        }
    }
}

impl ReminderTrackerDTO {
    pub fn new(tracker: ReminderTracker) -> Self {
        Self {
            id: tracker.id.clone(),
            order_id: tracker.order_id,
            customer_email: tracker.customer.email,
            customer_name: tracker.customer.name,
            customer_phone: tracker.customer.phone,
            product_id: tracker.product.id,
            product_name: tracker.product.name,
            product_link: tracker.product.link,
            review_link: tracker.product.review_link,
            submitted_at: tracker.submitted_at,
            stages: StageRecordsDTO {
                day3: StageRecordDTO::new(&tracker.stages.day3),
                day7: StageRecordDTO::new(&tracker.stages.day7),
                day14: StageRecordDTO::new(&tracker.stages.day14),
                day30: StageRecordDTO::new(&tracker.stages.day30),
            },
            status: tracker.status,
            is_active: tracker.is_active,
            reviewed_stage: tracker.reviewed_stage,
            reviewed_at: tracker.reviewed_at,
            notes: tracker.notes,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountDTO {
    pub status: TrackerStatus,
    pub count: i64,
}
