use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::delete_template::*;
use nurture_scheduler_domain::{EmailTemplate, ReminderStage};
use nurture_scheduler_infra::NurtureContext;

pub async fn delete_template_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let usecase = DeleteTemplateUseCase {
        stage: path_params.stage,
    };

    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Ok().json(APIResponse::new(template)))
        .map_err(NurtureError::from)
}

/// Removes the override for a stage, reverting it to the packaged default
#[derive(Debug)]
pub struct DeleteTemplateUseCase {
    pub stage: ReminderStage,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ReminderStage),
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(stage) => Self::NotFound(format!(
                "There is no template override for the {} stage.",
                stage
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTemplateUseCase {
    type Response = EmailTemplate;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .templates
            .delete_by_stage(self.stage)
            .await
            .ok_or(UseCaseError::NotFound(self.stage))
    }
}
