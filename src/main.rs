mod advisor;
mod aggregate;
mod asset_routes;
mod auth_routes;
mod config;
mod constants;
mod dashboard_routes;
mod db;
mod goal_routes;
mod handler;
mod midware;
mod models;
mod repo;
mod schema;
mod tests;
mod transaction_routes;

use actix_cors::Cors;
use actix_web::{
	middleware::{Logger, NormalizePath},
	web, App, HttpServer,
};

use dotenv::dotenv;
use env_logger::Env;

use crate::advisor::Advisor;
use crate::config::AppConfig;
use crate::midware::jwt::{Authentication, JWT};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	dotenv().ok();
	env_logger::init_from_env(Env::default().default_filter_or("info"));
	let config = AppConfig::from_env().expect("invalid configuration");
	let pool = db::get_db_pool(&config.database_url);
	if let Err(e) = db::init(&pool).await {
		panic!("Unable to initialize the db. Err: {:?}", e);
	}
	let jwt = JWT::new(&config.jwt_secret, config.token_expiry_minutes);
	let advisor = web::Data::new(Advisor::new(&config));
	println!("Listening on: {}..", config.socket_url);

	let cors_origin = config.cors_origin.clone();
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(pool.clone()))
			.app_data(web::Data::new(jwt.clone()))
			.app_data(advisor.clone())
			.wrap(
				Cors::default()
					.allowed_origin(&cors_origin)
					.allow_any_method()
					.allow_any_header()
					.supports_credentials()
					.max_age(3600),
			)
			.wrap(Logger::default())
			.wrap(Authentication::new(jwt.clone()))
			.wrap(NormalizePath::trim())
			.route("/", web::get().to(handler::index))
			.route("/health", web::get().to(handler::health))
			.configure(auth_routes::init)
			.configure(transaction_routes::init)
			.configure(goal_routes::init)
			.configure(asset_routes::init)
			.configure(dashboard_routes::init)
	})
	.bind(&config.socket_url)?
	.run()
	.await
}
