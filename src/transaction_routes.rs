use crate::handler::TransactionHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/transactions", web::post().to(TransactionHandler::create))
		.route("/transactions", web::get().to(TransactionHandler::list));
}
