mod run_daily_batch;
mod send_stage_reminder;
mod template_resolver;

use actix_web::web;
use run_daily_batch::run_daily_batch_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/daily-run",
        web::post().to(run_daily_batch_controller),
    );
}
