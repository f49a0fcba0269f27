use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::get_templates::*;
use nurture_scheduler_domain::EmailTemplate;
use nurture_scheduler_infra::NurtureContext;

pub async fn get_templates_controller(
    http_req: HttpRequest,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    execute(GetTemplatesUseCase {}, &ctx)
        .await
        .map(|templates| HttpResponse::Ok().json(APIResponse::new(templates)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct GetTemplatesUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTemplatesUseCase {
    type Response = Vec<EmailTemplate>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .templates
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
