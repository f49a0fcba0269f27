use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::get_tracker::*;
use nurture_scheduler_domain::ReminderTracker;
use nurture_scheduler_infra::NurtureContext;

pub async fn get_tracker_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetTrackerUseCase {
        order_id: path_params.order_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|tracker| HttpResponse::Ok().json(APIResponse::new(tracker)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct GetTrackerUseCase {
    pub order_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(String),
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(order_id) => Self::NotFound(format!(
                "The reminder tracker for order: {}, was not found.",
                order_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTrackerUseCase {
    type Response = ReminderTracker;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .trackers
            .find_by_order_id(&self.order_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.order_id.clone()))
    }
}
