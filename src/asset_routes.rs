use crate::handler::AssetHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/assets", web::post().to(AssetHandler::create))
		.route("/assets", web::get().to(AssetHandler::list))
		.route("/assets/{asset_id}", web::get().to(AssetHandler::get))
		.route("/assets/{asset_id}", web::put().to(AssetHandler::update))
		.route("/assets/{asset_id}", web::delete().to(AssetHandler::delete));
}
