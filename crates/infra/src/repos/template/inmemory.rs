use super::ITemplateRepo;
use crate::repos::shared::inmemory_repo;
use nurture_scheduler_domain::{EmailTemplate, ReminderStage, ID};
use std::sync::Mutex;

pub struct InMemoryTemplateRepo {
    templates: Mutex<Vec<EmailTemplate>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryTemplateRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for InMemoryTemplateRepo {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        inmemory_repo::insert(template, &self.templates);
        Ok(())
    }

    async fn save(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        inmemory_repo::save(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<EmailTemplate> {
        inmemory_repo::find(template_id, &self.templates)
    }

    async fn find_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate> {
        inmemory_repo::find_by(&self.templates, |t: &EmailTemplate| t.stage == stage)
            .into_iter()
            .next()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>> {
        Ok(inmemory_repo::find_by(&self.templates, |_| true))
    }

    async fn delete_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate> {
        inmemory_repo::delete_by(&self.templates, |t: &EmailTemplate| t.stage == stage)
    }
}
