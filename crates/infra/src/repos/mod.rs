mod shared;
mod template;
mod tracker;

use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;
use template::{InMemoryTemplateRepo, MongoTemplateRepo};
use tracing::info;
use tracker::{InMemoryTrackerRepo, MongoTrackerRepo};

pub use template::ITemplateRepo;
pub use tracker::{DueTrackersQuery, ITrackerRepo, StatusCount};

#[derive(Clone)]
pub struct Repos {
    pub trackers: Arc<dyn ITrackerRepo>,
    pub templates: Arc<dyn ITemplateRepo>,
}

impl Repos {
    pub async fn create_mongodb(
        connection_string: &str,
        db_name: &str,
    ) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.collection("server-start")
            .insert_one(
                mongodb::bson::doc! {
                "server-start": 1
                },
                None,
            )
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            trackers: Arc::new(MongoTrackerRepo::new(&db)),
            templates: Arc::new(MongoTemplateRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            trackers: Arc::new(InMemoryTrackerRepo::new()),
            templates: Arc::new(InMemoryTemplateRepo::new()),
        }
    }
}
