use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::dtos::StatusCountDTO;
use nurture_scheduler_api_structs::get_tracker_stats::*;
use nurture_scheduler_infra::{NurtureContext, StatusCount};

pub async fn get_tracker_stats_controller(
    http_req: HttpRequest,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    execute(GetTrackerStatsUseCase {}, &ctx)
        .await
        .map(|counts| {
            HttpResponse::Ok().json(APIResponse {
                counts: counts
                    .into_iter()
                    .map(|c| StatusCountDTO {
                        status: c.status,
                        count: c.count,
                    })
                    .collect(),
            })
        })
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct GetTrackerStatsUseCase {}

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
impl UseCase for GetTrackerStatsUseCase {
    type Response = Vec<StatusCount>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .trackers
            .count_by_status()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
