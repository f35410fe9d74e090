use std::env;

use anyhow::Context;

use crate::advisor::DEFAULT_GEMINI_URL;
use crate::constants::DEFAULT_TOKEN_EXPIRY_MINUTES;

/// Process configuration, read once at startup and injected everywhere.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub socket_url: String,
	pub database_url: String,
	pub jwt_secret: String,
	pub token_expiry_minutes: i64,
	pub cors_origin: String,
	pub gemini_api_key: Option<String>,
	pub gemini_api_url: String,
}

impl AppConfig {
	pub fn from_env() -> anyhow::Result<Self> {
		let socket_url = env::var("SOCKET_URL").context("SOCKET_URL must be set")?;
		let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
		let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
		let token_expiry_minutes = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
			Ok(raw) => raw.parse().context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?,
			Err(_) => DEFAULT_TOKEN_EXPIRY_MINUTES,
		};
		let cors_origin =
			env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());
		let gemini_api_key = env::var("GEMINI_API_KEY").ok();
		let gemini_api_url =
			env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());

		Ok(Self {
			socket_url,
			database_url,
			jwt_secret,
			token_expiry_minutes,
			cors_origin,
			gemini_api_key,
			gemini_api_url,
		})
	}
}
