use super::{DueTrackersQuery, ITrackerRepo, StatusCount};
use crate::repos::shared::mongo_repo;
use futures::stream::StreamExt;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Database,
};
use nurture_scheduler_domain::{
    CustomerContact, ProductContext, ReminderTracker, StageRecords, TrackerStatus, ID,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoTrackerRepo {
    collection: Collection<Document>,
}

impl MongoTrackerRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminder-trackers"),
        }
    }
}

#[async_trait::async_trait]
impl ITrackerRepo for MongoTrackerRepo {
    async fn insert(&self, tracker: &ReminderTracker) -> anyhow::Result<()> {
        mongo_repo::insert::<_, TrackerMongo>(&self.collection, tracker).await
    }

    async fn save(&self, tracker: &ReminderTracker) -> anyhow::Result<()> {
        mongo_repo::save::<_, TrackerMongo>(&self.collection, tracker).await
    }

    async fn find(&self, tracker_id: &ID) -> Option<ReminderTracker> {
        mongo_repo::find::<_, TrackerMongo>(&self.collection, tracker_id.inner_ref()).await
    }

    async fn find_by_order_id(&self, order_id: &str) -> Option<ReminderTracker> {
        let filter = doc! {
            "order_id": order_id
        };
        mongo_repo::find_one_by::<_, TrackerMongo>(&self.collection, filter).await
    }

    async fn find_due(&self, query: DueTrackersQuery) -> anyhow::Result<Vec<ReminderTracker>> {
        let filter = doc! {
            "is_active": true,
            "status": TrackerStatus::Pending.as_str(),
            "$or": [
                { "stages.day30.sent": false, "stages.day30.due_at": { "$lt": query.due_before } },
                { "stages.day14.sent": false, "stages.day14.due_at": { "$lt": query.due_before } },
                { "stages.day7.sent": false, "stages.day7.due_at": { "$lt": query.due_before } },
                { "stages.day3.sent": false, "stages.day3.due_at": { "$lt": query.due_before } },
            ],
        };
        let mut find_options = FindOptions::builder().build();
        find_options.limit = Some(query.limit);

        mongo_repo::find_with_options::<_, TrackerMongo>(&self.collection, filter, find_options)
            .await
    }

    async fn find_all(&self, skip: u64, limit: i64) -> anyhow::Result<Vec<ReminderTracker>> {
        let mut find_options = FindOptions::builder().build();
        find_options.skip = Some(skip);
        find_options.limit = Some(limit);

        mongo_repo::find_with_options::<_, TrackerMongo>(&self.collection, doc! {}, find_options)
            .await
    }

    async fn delete(&self, tracker_id: &ID) -> Option<ReminderTracker> {
        mongo_repo::delete::<_, TrackerMongo>(&self.collection, tracker_id.inner_ref()).await
    }

    async fn count_by_status(&self) -> anyhow::Result<Vec<StatusCount>> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": "$status",
                "count": { "$sum": 1 },
            }
        }];
        let mut cursor = self.collection.aggregate(pipeline, None).await?;

        let mut counts = vec![];
        while let Some(result) = cursor.next().await {
            let doc = result?;
            let status = match doc.get_str("_id") {
                Ok("pending") => TrackerStatus::Pending,
                Ok("reviewed") => TrackerStatus::Reviewed,
                Ok("unreviewed") => TrackerStatus::Unreviewed,
                Ok("cancelled") => TrackerStatus::Cancelled,
                other => {
                    error!("Unexpected tracker status in aggregation: {:?}", other);
                    continue;
                }
            };
            let count = doc
                .get_i32("count")
                .map(i64::from)
                .or_else(|_| doc.get_i64("count"))?;
            counts.push(StatusCount { status, count });
        }

        Ok(counts)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TrackerMongo {
    _id: ObjectId,
    order_id: String,
    customer: CustomerContact,
    product: ProductContext,
    submitted_at: i64,
    stages: StageRecords,
    status: TrackerStatus,
    is_active: bool,
    reviewed_stage: Option<u32>,
    reviewed_at: Option<i64>,
    notes: Option<String>,
}

impl MongoDocument<ReminderTracker> for TrackerMongo {
    fn to_domain(self) -> ReminderTracker {
        ReminderTracker {
            id: ID::from(self._id),
            order_id: self.order_id,
            customer: self.customer,
            product: self.product,
            submitted_at: self.submitted_at,
            stages: self.stages,
            status: self.status,
            is_active: self.is_active,
            reviewed_stage: self.reviewed_stage.and_then(|day| day.try_into().ok()),
            reviewed_at: self.reviewed_at,
            notes: self.notes,
        }
    }

    fn from_domain(tracker: &ReminderTracker) -> Self {
        Self {
            _id: *tracker.id.inner_ref(),
            order_id: tracker.order_id.clone(),
            customer: tracker.customer.clone(),
            product: tracker.product.clone(),
            submitted_at: tracker.submitted_at,
            stages: tracker.stages.clone(),
            status: tracker.status,
            is_active: tracker.is_active,
            reviewed_stage: tracker.reviewed_stage.map(|stage| stage.day()),
            reviewed_at: tracker.reviewed_at,
            notes: tracker.notes.clone(),
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}
