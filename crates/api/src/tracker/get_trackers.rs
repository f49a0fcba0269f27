use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::get_trackers::*;
use nurture_scheduler_domain::ReminderTracker;
use nurture_scheduler_infra::NurtureContext;

pub async fn get_trackers_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetTrackersUseCase {
        skip: query_params.skip.unwrap_or(0),
        limit: query_params.limit.unwrap_or(50),
    };

    execute(usecase, &ctx)
        .await
        .map(|trackers| HttpResponse::Ok().json(APIResponse::new(trackers)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct GetTrackersUseCase {
    pub skip: u64,
    pub limit: i64,
}

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
impl UseCase for GetTrackersUseCase {
    type Response = Vec<ReminderTracker>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        let limit = self.limit.clamp(1, 200);
        ctx.repos
            .trackers
            .find_all(self.skip, limit)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
