use crate::handler::DashboardHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/dashboard/summary", web::get().to(DashboardHandler::summary))
		.route("/dashboard/recommendations", web::get().to(DashboardHandler::recommendations))
		.route("/dashboard/goal-plan", web::get().to(DashboardHandler::goal_plan));
}
