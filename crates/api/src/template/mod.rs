mod delete_template;
mod get_templates;
mod set_template;

use actix_web::web;
use delete_template::delete_template_controller;
use get_templates::get_templates_controller;
use set_template::set_template_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/templates", web::post().to(set_template_controller));
    cfg.route("/templates", web::get().to(get_templates_controller));
    cfg.route(
        "/templates/{stage}",
        web::delete().to(delete_template_controller),
    );
}
