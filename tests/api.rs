use actix_web::{test, web, App};
use nurture_scheduler_api::configure_server_api;
use nurture_scheduler_api_structs::{
    create_tracker, get_tracker_stats, get_trackers, run_daily_batch, set_template,
};
use nurture_scheduler_domain::{ReminderStage, TrackerStatus};
use nurture_scheduler_infra::NurtureContext;
use serde_json::json;

const SECRET: &str = "opnsesame";

fn test_ctx() -> NurtureContext {
    let mut ctx = NurtureContext::create_inmemory();
    ctx.config.api_secret = SECRET.into();
    ctx.config.send_delay_millis = 0;
    ctx
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.clone()))
                .service(web::scope("/api/v1").configure(configure_server_api)),
        )
        .await
    };
}

fn authed(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", SECRET)))
}

fn tracker_body(order_id: &str) -> serde_json::Value {
    json!({
        "orderId": order_id,
        "customerEmail": "ana@nurture.test",
        "customerName": "Ana",
    })
}

#[actix_web::test]
async fn health_check_is_public() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    let res = test::TestRequest::get()
        .uri("/api/v1/")
        .send_request(&app)
        .await;
    assert!(res.status().is_success());
}

#[actix_web::test]
async fn trigger_requires_the_shared_secret() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    let res = test::TestRequest::post()
        .uri("/api/v1/reminders/daily-run")
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 401);

    let res = test::TestRequest::post()
        .uri("/api/v1/reminders/daily-run")
        .insert_header(("Authorization", "Bearer not-the-secret"))
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 401);
}

#[actix_web::test]
async fn trigger_runs_an_empty_batch() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    let res = authed(test::TestRequest::post().uri("/api/v1/reminders/daily-run"))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    let body: run_daily_batch::APIResponse = test::read_body_json(res).await;
    assert_eq!(body.summary.processed, 0);
    assert_eq!(body.summary.sent, 0);
    assert!(body.summary.errors.is_empty());
}

#[actix_web::test]
async fn creating_a_tracker_twice_for_the_same_order_conflicts() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    let res = authed(test::TestRequest::post().uri("/api/v1/trackers"))
        .set_json(tracker_body("111-2222222-3333333"))
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 201);
    let body: create_tracker::APIResponse = test::read_body_json(res).await;
    assert_eq!(body.tracker.order_id, "111-2222222-3333333");

    let res = authed(test::TestRequest::post().uri("/api/v1/trackers"))
        .set_json(tracker_body("111-2222222-3333333"))
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 409);
}

#[actix_web::test]
async fn tracker_admin_flow() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    authed(test::TestRequest::post().uri("/api/v1/trackers"))
        .set_json(tracker_body("o-1"))
        .send_request(&app)
        .await;

    // Cancel, then reactivate
    let res = authed(test::TestRequest::post().uri("/api/v1/trackers/o-1/cancel"))
        .set_json(json!({ "notes": "customer opted out" }))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    let res = authed(test::TestRequest::post().uri("/api/v1/trackers/o-1/reactivate"))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    // Marking an unknown order fails with 404
    let res = authed(test::TestRequest::post().uri("/api/v1/trackers/missing/unreviewed"))
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 404);

    // Review with the stage that prompted it
    let res = authed(test::TestRequest::post().uri("/api/v1/trackers/o-1/reviewed"))
        .set_json(json!({ "stage": 7 }))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    let res = authed(test::TestRequest::get().uri("/api/v1/trackers"))
        .send_request(&app)
        .await;
    let body: get_trackers::APIResponse = test::read_body_json(res).await;
    assert_eq!(body.trackers.len(), 1);
    assert_eq!(body.trackers[0].reviewed_stage, Some(ReminderStage::Day7));
}

#[actix_web::test]
async fn status_counts_reflect_the_tracker_population() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    for order_id in ["o-1", "o-2", "o-3"] {
        authed(test::TestRequest::post().uri("/api/v1/trackers"))
            .set_json(tracker_body(order_id))
            .send_request(&app)
            .await;
    }
    authed(test::TestRequest::post().uri("/api/v1/trackers/o-3/cancel"))
        .set_json(json!({ "notes": null }))
        .send_request(&app)
        .await;

    let res = authed(test::TestRequest::get().uri("/api/v1/trackers/stats"))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    let body: get_tracker_stats::APIResponse = test::read_body_json(res).await;
    let count_for = |status: TrackerStatus| {
        body.counts
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
    };
    assert_eq!(count_for(TrackerStatus::Pending), Some(2));
    assert_eq!(count_for(TrackerStatus::Cancelled), Some(1));
    // Statuses with no trackers are omitted from the response
    assert_eq!(count_for(TrackerStatus::Reviewed), None);
    assert_eq!(count_for(TrackerStatus::Unreviewed), None);
}

#[actix_web::test]
async fn template_override_lifecycle() {
    let ctx = test_ctx();
    let app = test_app!(ctx);

    let res = authed(test::TestRequest::post().uri("/api/v1/templates"))
        .set_json(json!({
            "stage": 14,
            "subject": "Hello {{customerName}}",
            "body": "<p>Visit {{reviewLink}}</p>",
        }))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());
    let body: set_template::APIResponse = test::read_body_json(res).await;
    assert_eq!(body.template.stage, ReminderStage::Day14);

    let res = authed(test::TestRequest::delete().uri("/api/v1/templates/14"))
        .send_request(&app)
        .await;
    assert!(res.status().is_success());

    // A second delete finds nothing to remove
    let res = authed(test::TestRequest::delete().uri("/api/v1/templates/14"))
        .send_request(&app)
        .await;
    assert_eq!(res.status().as_u16(), 404);
}
