mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpSettings};
pub use repos::Repos;
pub use repos::{DueTrackersQuery, ITemplateRepo, ITrackerRepo, StatusCount};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, StaticTimeSys};
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct NurtureContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

struct ContextParams {
    // (connection_string, db_name)
    pub mongodb: (String, String),
}

impl NurtureContext {
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let mailer = create_mailer(&config);
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_mongodb(&params.mongodb.0, &params.mongodb.1)
            .await
            .expect("Mongo db creds must be set and valid");
        let config = Config::new();
        let mailer = create_mailer(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        }
    }
}

fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.smtp {
        Some(settings) => match SmtpMailer::new(settings) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                warn!(
                    "Invalid SMTP settings: {:?}. Outbound email is disabled.",
                    e
                );
                Arc::new(DisabledMailer)
            }
        },
        None => Arc::new(DisabledMailer),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NurtureContext {
    const MONGODB_CONNECTION_STRING: &str = "MONGODB_CONNECTION_STRING";
    const MONGODB_NAME: &str = "MONGODB_NAME";

    let connection_string = std::env::var(MONGODB_CONNECTION_STRING);
    let db_name = std::env::var(MONGODB_NAME);

    match (connection_string, db_name) {
        (Ok(connection_string), Ok(db_name)) => {
            info!(
                "{} and {} env vars were provided. Going to use mongodb.",
                MONGODB_CONNECTION_STRING, MONGODB_NAME
            );
            NurtureContext::create(ContextParams {
                mongodb: (connection_string, db_name),
            })
            .await
        }
        _ => {
            info!(
                "{} and {} env vars were not provided. Going to use inmemory infra.",
                MONGODB_CONNECTION_STRING, MONGODB_NAME
            );
            NurtureContext::create_inmemory()
        }
    }
}
