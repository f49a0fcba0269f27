use crate::dtos::EmailTemplateDTO;
use nurture_scheduler_domain::{EmailTemplate, ReminderStage};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub template: EmailTemplateDTO,
}

impl TemplateResponse {
    pub fn new(template: EmailTemplate) -> Self {
        Self {
            template: EmailTemplateDTO::new(template),
        }
    }
}

pub mod set_template {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub stage: ReminderStage,
        pub subject: String,
        pub body: String,
        pub is_active: Option<bool>,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod get_templates {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub templates: Vec<EmailTemplateDTO>,
    }

    impl APIResponse {
        pub fn new(templates: Vec<EmailTemplate>) -> Self {
            Self {
                templates: templates.into_iter().map(EmailTemplateDTO::new).collect(),
            }
        }
    }
}

pub mod delete_template {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub stage: ReminderStage,
    }

    pub type APIResponse = TemplateResponse;
}
