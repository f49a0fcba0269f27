use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::mark_reviewed::*;
use nurture_scheduler_domain::{InvalidStatusTransition, ReminderStage, ReminderTracker};
use nurture_scheduler_infra::NurtureContext;

pub async fn mark_reviewed_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let usecase = MarkReviewedUseCase {
        order_id: path_params.order_id.clone(),
        stage: body.0.stage,
    };

    execute(usecase, &ctx)
        .await
        .map(|tracker| HttpResponse::Ok().json(APIResponse::new(tracker)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct MarkReviewedUseCase {
    pub order_id: String,
    pub stage: Option<ReminderStage>,
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
impl UseCase for MarkReviewedUseCase {
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
            .mark_reviewed(self.stage, ctx.sys.get_timestamp_millis())
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

    async fn seed(ctx: &NurtureContext, order_id: &str) {
        let tracker = ReminderTracker::new(
            order_id.into(),
            CustomerContact {
                email: "ana@nurture.test".into(),
                name: "Ana".into(),
                phone: None,
            },
            Default::default(),
            0,
        );
        ctx.repos.trackers.insert(&tracker).await.unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn marks_pending_tracker_reviewed() {
        let ctx = NurtureContext::create_inmemory();
        seed(&ctx, "o-1").await;

        let mut usecase = MarkReviewedUseCase {
            order_id: "o-1".into(),
            stage: Some(ReminderStage::Day7),
        };
        let tracker = usecase.execute(&ctx).await.expect("To mark reviewed");

        assert_eq!(tracker.status, TrackerStatus::Reviewed);
        assert!(!tracker.is_active);
        assert_eq!(tracker.reviewed_stage, Some(ReminderStage::Day7));
        assert!(tracker.reviewed_at.is_some());

        let stored = ctx.repos.trackers.find_by_order_id("o-1").await.unwrap();
        assert_eq!(stored.status, TrackerStatus::Reviewed);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_second_review() {
        let ctx = NurtureContext::create_inmemory();
        seed(&ctx, "o-1").await;

        let mut usecase = MarkReviewedUseCase {
            order_id: "o-1".into(),
            stage: None,
        };
        usecase.execute(&ctx).await.expect("To mark reviewed");

        let mut usecase = MarkReviewedUseCase {
            order_id: "o-1".into(),
            stage: None,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTransition(_))
        ));
    }
}
