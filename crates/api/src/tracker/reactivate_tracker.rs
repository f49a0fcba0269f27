use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::reactivate_tracker::*;
use nurture_scheduler_domain::{InvalidStatusTransition, ReminderTracker};
use nurture_scheduler_infra::NurtureContext;

pub async fn reactivate_tracker_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let usecase = ReactivateTrackerUseCase {
        order_id: path_params.order_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|tracker| HttpResponse::Ok().json(APIResponse::new(tracker)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct ReactivateTrackerUseCase {
    pub order_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(String),
    InvalidTransition(InvalidStatusTransition),
    StorageError,
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(order_id) => Self::NotFound(format!(
                "The reminder tracker for order: {}, was not found.",
                order_id
            )),
            UseCaseError::InvalidTransition(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReactivateTrackerUseCase {
    type Response = ReminderTracker;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        let mut tracker = ctx
            .repos
            .trackers
            .find_by_order_id(&self.order_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.order_id.clone()))?;

        tracker
            .reactivate()
            .map_err(UseCaseError::InvalidTransition)?;

        ctx.repos
            .trackers
            .save(&tracker)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurture_scheduler_domain::{CustomerContact, TrackerStatus};

    #[actix_web::main]
    #[test]
    async fn reactivates_only_cancelled_trackers() {
        let ctx = NurtureContext::create_inmemory();
        let mut tracker = ReminderTracker::new(
            "o-1".into(),
            CustomerContact {
                email: "ana@nurture.test".into(),
                name: "Ana".into(),
                phone: None,
            },
            Default::default(),
            0,
        );
        ctx.repos.trackers.insert(&tracker).await.unwrap();

        let mut usecase = ReactivateTrackerUseCase {
            order_id: "o-1".into(),
        };
        // Pending trackers cannot be reactivated
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTransition(_))
        ));

        tracker.cancel(None).unwrap();
        ctx.repos.trackers.save(&tracker).await.unwrap();

        let mut usecase = ReactivateTrackerUseCase {
            order_id: "o-1".into(),
        };
        let tracker = usecase.execute(&ctx).await.expect("To reactivate");
        assert_eq!(tracker.status, TrackerStatus::Pending);
        assert!(tracker.is_active);
    }
}
