use crate::handler::GoalHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/goals", web::post().to(GoalHandler::create))
		.route("/goals", web::get().to(GoalHandler::list));
}
