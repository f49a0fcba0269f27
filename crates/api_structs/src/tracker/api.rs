use crate::dtos::{ReminderTrackerDTO, StatusCountDTO};
use nurture_scheduler_domain::{ReminderStage, ReminderTracker};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerResponse {
    pub tracker: ReminderTrackerDTO,
}

impl TrackerResponse {
    pub fn new(tracker: ReminderTracker) -> Self {
        Self {
            tracker: ReminderTrackerDTO::new(tracker),
        }
    }
}

pub mod create_tracker {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub order_id: String,
        pub customer_email: String,
        pub customer_name: String,
        pub customer_phone: Option<String>,
        pub product_id: Option<String>,
        pub product_name: Option<String>,
        pub product_link: Option<String>,
        pub review_link: Option<String>,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod get_tracker {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod get_trackers {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub skip: Option<u64>,
        pub limit: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub trackers: Vec<ReminderTrackerDTO>,
    }

    impl APIResponse {
        pub fn new(trackers: Vec<ReminderTracker>) -> Self {
            Self {
                trackers: trackers.into_iter().map(ReminderTrackerDTO::new).collect(),
            }
        }
    }
}

pub mod delete_tracker {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod mark_reviewed {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The stage whose email prompted the review, when known
        pub stage: Option<ReminderStage>,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod mark_unreviewed {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod cancel_emails {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub notes: Option<String>,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod reactivate_tracker {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub order_id: String,
    }

    pub type APIResponse = TrackerResponse;
}

pub mod get_tracker_stats {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub counts: Vec<StatusCountDTO>,
    }
}
