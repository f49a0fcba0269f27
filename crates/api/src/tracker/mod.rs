mod cancel_emails;
mod create_tracker;
mod delete_tracker;
mod get_tracker;
mod get_tracker_stats;
mod get_trackers;
mod mark_reviewed;
mod mark_unreviewed;
mod reactivate_tracker;

use actix_web::web;
use cancel_emails::cancel_emails_controller;
use create_tracker::create_tracker_controller;
use delete_tracker::delete_tracker_controller;
use get_tracker::get_tracker_controller;
use get_tracker_stats::get_tracker_stats_controller;
use get_trackers::get_trackers_controller;
use mark_reviewed::mark_reviewed_controller;
use mark_unreviewed::mark_unreviewed_controller;
use reactivate_tracker::reactivate_tracker_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/trackers", web::post().to(create_tracker_controller));
    cfg.route("/trackers", web::get().to(get_trackers_controller));
    cfg.route("/trackers/stats", web::get().to(get_tracker_stats_controller));
    cfg.route("/trackers/{order_id}", web::get().to(get_tracker_controller));
    cfg.route(
        "/trackers/{order_id}",
        web::delete().to(delete_tracker_controller),
    );
    cfg.route(
        "/trackers/{order_id}/reviewed",
        web::post().to(mark_reviewed_controller),
    );
    cfg.route(
        "/trackers/{order_id}/unreviewed",
        web::post().to(mark_unreviewed_controller),
    );
    cfg.route(
        "/trackers/{order_id}/cancel",
        web::post().to(cancel_emails_controller),
    );
    cfg.route(
        "/trackers/{order_id}/reactivate",
        web::post().to(reactivate_tracker_controller),
    );
}
