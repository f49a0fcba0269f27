use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::set_template::*;
use nurture_scheduler_domain::{EmailTemplate, ReminderStage};
use nurture_scheduler_infra::NurtureContext;

pub async fn set_template_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = SetTemplateUseCase {
        stage: body.stage,
        subject: body.subject,
        body: body.body,
        is_active: body.is_active.unwrap_or(true),
    };

    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Ok().json(APIResponse::new(template)))
        .map_err(NurtureError::from)
}

/// Create-or-replace of the override for one stage. Replacing keeps the
/// original id and created timestamp.
#[derive(Debug)]
pub struct SetTemplateUseCase {
    pub stage: ReminderStage,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptySubject,
    StorageError,
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptySubject => {
                Self::BadClientData("Template subject cannot be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetTemplateUseCase {
    type Response = EmailTemplate;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        if self.subject.trim().is_empty() {
            return Err(UseCaseError::EmptySubject);
        }

        let now = ctx.sys.get_timestamp_millis();
        match ctx.repos.templates.find_by_stage(self.stage).await {
            Some(mut template) => {
                template.subject = self.subject.clone();
                template.body = self.body.clone();
                template.is_active = self.is_active;
                template.updated = now;
                ctx.repos
                    .templates
                    .save(&template)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(template)
            }
            None => {
                let template = EmailTemplate {
                    id: Default::default(),
                    stage: self.stage,
                    subject: self.subject.clone(),
                    body: self.body.clone(),
                    is_active: self.is_active,
                    created: now,
                    updated: now,
                };
                ctx.repos
                    .templates
                    .insert(&template)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(template)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usecase(subject: &str) -> SetTemplateUseCase {
        SetTemplateUseCase {
            stage: ReminderStage::Day7,
            subject: subject.into(),
            body: "Hi {{customerName}}".into(),
            is_active: true,
        }
    }

    #[actix_web::main]
    #[test]
    async fn replaces_existing_override_for_stage() {
        let ctx = NurtureContext::create_inmemory();

        let first = usecase("First subject")
            .execute(&ctx)
            .await
            .expect("To create template");
        let second = usecase("Second subject")
            .execute(&ctx)
            .await
            .expect("To replace template");

        assert_eq!(first.id, second.id);
        assert_eq!(second.subject, "Second subject");

        let all = ctx.repos.templates.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_subject() {
        let ctx = NurtureContext::create_inmemory();
        let res = usecase("   ").execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::EmptySubject)));
    }
}
