use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::create_tracker::*;
use nurture_scheduler_domain::{CustomerContact, ProductContext, ReminderTracker};
use nurture_scheduler_infra::NurtureContext;

pub async fn create_tracker_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateTrackerUseCase {
        order_id: body.order_id,
        customer: CustomerContact {
            email: body.customer_email,
            name: body.customer_name,
            phone: body.customer_phone,
        },
        product: ProductContext {
            id: body.product_id,
            name: body.product_name,
            link: body.product_link,
            review_link: body.review_link,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|tracker| HttpResponse::Created().json(APIResponse::new(tracker)))
        .map_err(NurtureError::from)
}

#[derive(Debug)]
pub struct CreateTrackerUseCase {
    pub order_id: String,
    pub customer: CustomerContact,
    pub product: ProductContext,
}

#[derive(Debug)]
pub enum UseCaseError {
    DuplicateOrderId(String),
    StorageError,
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::DuplicateOrderId(order_id) => Self::Conflict(format!(
                "A reminder tracker already exists for the order: {}",
                order_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTrackerUseCase {
    type Response = ReminderTracker;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .trackers
            .find_by_order_id(&self.order_id)
            .await
            .is_some()
        {
            return Err(UseCaseError::DuplicateOrderId(self.order_id.clone()));
        }

        let tracker = ReminderTracker::new(
            self.order_id.clone(),
            self.customer.clone(),
            self.product.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .trackers
            .insert(&tracker)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurture_scheduler_domain::TrackerStatus;

    fn usecase(order_id: &str) -> CreateTrackerUseCase {
        CreateTrackerUseCase {
            order_id: order_id.into(),
            customer: CustomerContact {
                email: "ana@nurture.test".into(),
                name: "Ana".into(),
                phone: None,
            },
            product: Default::default(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_pending_active_tracker() {
        let ctx = NurtureContext::create_inmemory();
        let tracker = usecase("111-2222222-3333333")
            .execute(&ctx)
            .await
            .expect("To create tracker");

        assert_eq!(tracker.status, TrackerStatus::Pending);
        assert!(tracker.is_active);
        assert!(ctx
            .repos
            .trackers
            .find_by_order_id("111-2222222-3333333")
            .await
            .is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_order_id() {
        let ctx = NurtureContext::create_inmemory();
        usecase("111-2222222-3333333")
            .execute(&ctx)
            .await
            .expect("To create tracker");

        let res = usecase("111-2222222-3333333").execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::DuplicateOrderId(_))));
    }
}
