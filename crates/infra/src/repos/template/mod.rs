mod inmemory;
mod mongo;

pub use inmemory::InMemoryTemplateRepo;
pub use mongo::MongoTemplateRepo;
use nurture_scheduler_domain::{EmailTemplate, ReminderStage, ID};

#[async_trait::async_trait]
pub trait ITemplateRepo: Send + Sync {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()>;
    async fn save(&self, template: &EmailTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<EmailTemplate>;
    /// The override for a stage, whether active or not. There is at most one.
    async fn find_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate>;
    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>>;
    async fn delete_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate>;
}
