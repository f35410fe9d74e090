use crate::handler::AuthHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/auth/register", web::post().to(AuthHandler::register))
		.route("/auth/token", web::post().to(AuthHandler::token));
}
