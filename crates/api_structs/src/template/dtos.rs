use nurture_scheduler_domain::{EmailTemplate, ReminderStage, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateDTO {
    pub id: ID,
    pub stage: ReminderStage,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl EmailTemplateDTO {
    pub fn new(template: EmailTemplate) -> Self {
        Self {
            id: template.id.clone(),
            stage: template.stage,
            subject: template.subject,
            body: template.body,
            is_active: template.is_active,
            created: template.created,
            updated: template.updated,
        }
    }
}
