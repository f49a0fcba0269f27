mod inmemory;
mod mongo;

pub use inmemory::InMemoryTrackerRepo;
pub use mongo::MongoTrackerRepo;
use nurture_scheduler_domain::{ReminderTracker, TrackerStatus, ID};

/// Due-set selection: active, pending trackers with at least one unsent
/// stage whose due timestamp lies before the end of the current day. A
/// stage left unsent by an earlier failure stays selectable on every
/// following day until it is resolved or the tracker is cancelled.
#[derive(Debug, Clone)]
pub struct DueTrackersQuery {
    /// Exclusive upper bound, the end of the current day
    pub due_before: i64,
    /// Cap on the number of returned trackers
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: TrackerStatus,
    pub count: i64,
}

#[async_trait::async_trait]
pub trait ITrackerRepo: Send + Sync {
    async fn insert(&self, tracker: &ReminderTracker) -> anyhow::Result<()>;
    async fn save(&self, tracker: &ReminderTracker) -> anyhow::Result<()>;
    async fn find(&self, tracker_id: &ID) -> Option<ReminderTracker>;
    async fn find_by_order_id(&self, order_id: &str) -> Option<ReminderTracker>;
    async fn find_due(&self, query: DueTrackersQuery) -> anyhow::Result<Vec<ReminderTracker>>;
    async fn find_all(&self, skip: u64, limit: i64) -> anyhow::Result<Vec<ReminderTracker>>;
    async fn delete(&self, tracker_id: &ID) -> Option<ReminderTracker>;
    async fn count_by_status(&self) -> anyhow::Result<Vec<StatusCount>>;
}
