use super::{DueTrackersQuery, ITrackerRepo, StatusCount};
use crate::repos::shared::inmemory_repo;
use nurture_scheduler_domain::{ReminderTracker, TrackerStatus, ID};
use std::sync::Mutex;

pub struct InMemoryTrackerRepo {
    trackers: Mutex<Vec<ReminderTracker>>,
}

impl InMemoryTrackerRepo {
    pub fn new() -> Self {
        Self {
            trackers: Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryTrackerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITrackerRepo for InMemoryTrackerRepo {
    async fn insert(&self, tracker: &ReminderTracker) -> anyhow::Result<()> {
        inmemory_repo::insert(tracker, &self.trackers);
        Ok(())
    }

    async fn save(&self, tracker: &ReminderTracker) -> anyhow::Result<()> {
        inmemory_repo::save(tracker, &self.trackers);
        Ok(())
    }

    async fn find(&self, tracker_id: &ID) -> Option<ReminderTracker> {
        inmemory_repo::find(tracker_id, &self.trackers)
    }

    async fn find_by_order_id(&self, order_id: &str) -> Option<ReminderTracker> {
        inmemory_repo::find_by(&self.trackers, |t: &ReminderTracker| t.order_id == order_id)
            .into_iter()
            .next()
    }

    async fn find_due(&self, query: DueTrackersQuery) -> anyhow::Result<Vec<ReminderTracker>> {
        let mut due = inmemory_repo::find_by(&self.trackers, |t: &ReminderTracker| {
            t.is_active
                && t.status == TrackerStatus::Pending
                && t.next_due_stage(query.due_before).is_some()
        });
        due.truncate(query.limit.max(0) as usize);
        Ok(due)
    }

    async fn find_all(&self, skip: u64, limit: i64) -> anyhow::Result<Vec<ReminderTracker>> {
        let trackers = self.trackers.lock().unwrap();
        Ok(trackers
            .iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, tracker_id: &ID) -> Option<ReminderTracker> {
        inmemory_repo::delete(tracker_id, &self.trackers)
    }

    async fn count_by_status(&self) -> anyhow::Result<Vec<StatusCount>> {
        let trackers = self.trackers.lock().unwrap();
        let statuses = [
            TrackerStatus::Pending,
            TrackerStatus::Reviewed,
            TrackerStatus::Unreviewed,
            TrackerStatus::Cancelled,
        ];
        Ok(statuses
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: trackers.iter().filter(|t| t.status == status).count() as i64,
            })
            .filter(|c| c.count > 0)
            .collect())
    }
}
