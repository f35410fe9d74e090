use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::midware::jwt::{Authentication, JWT};
use crate::tests::test_utils::{generate_test_token, test_jwt, TEST_SECRET};

#[::core::prelude::v1::test]
fn token_round_trip_preserves_the_subject() {
	let jwt = test_jwt();

	let token = jwt.create_token("user@example.com").expect("token creation failed");
	let claims = jwt.verify_token(&token).expect("token verification failed");

	assert_eq!(claims.sub, "user@example.com");
	assert!(claims.exp > chrono::Utc::now().timestamp() as usize);
}

#[::core::prelude::v1::test]
fn tokens_signed_with_another_secret_are_rejected() {
	let other = JWT::new("another_secret", 30);

	let token = other.create_token("user@example.com").expect("token creation failed");

	assert!(test_jwt().verify_token(&token).is_err());
}

#[::core::prelude::v1::test]
fn expired_tokens_are_rejected() {
	let jwt = JWT::new(TEST_SECRET, -5);

	let token = jwt.create_token("user@example.com").expect("token creation failed");

	assert!(jwt.verify_token(&token).is_err());
}

#[::core::prelude::v1::test]
fn password_hashes_verify_only_the_original_password() {
	let hashed = hash("correct horse battery", DEFAULT_COST).expect("hashing failed");

	assert!(verify("correct horse battery", &hashed).unwrap());
	assert!(!verify("wrong password", &hashed).unwrap());
}

async fn protected() -> HttpResponse {
	HttpResponse::Ok().finish()
}

#[actix_web::test]
async fn missing_token_gets_401_with_bearer_challenge() {
	let app = test::init_service(
		App::new()
			.wrap(Authentication::new(test_jwt()))
			.route("/transactions", web::get().to(protected)),
	)
	.await;

	let resp = test::TestRequest::get().uri("/transactions").send_request(&app).await;

	assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
	let challenge = resp.headers().get("WWW-Authenticate").expect("challenge header missing");
	assert_eq!(challenge.to_str().unwrap(), "Bearer");
}

#[actix_web::test]
async fn garbage_token_gets_401() {
	let app = test::init_service(
		App::new()
			.wrap(Authentication::new(test_jwt()))
			.route("/transactions", web::get().to(protected)),
	)
	.await;

	let resp = test::TestRequest::get()
		.uri("/transactions")
		.insert_header(("Authorization", "Bearer not-a-token"))
		.send_request(&app)
		.await;

	assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn valid_token_passes_the_middleware() {
	let app = test::init_service(
		App::new()
			.wrap(Authentication::new(test_jwt()))
			.route("/transactions", web::get().to(protected)),
	)
	.await;

	let token = generate_test_token("user@example.com");
	let resp = test::TestRequest::get()
		.uri("/transactions")
		.insert_header(("Authorization", format!("Bearer {}", token)))
		.send_request(&app)
		.await;

	assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_routes_skip_authentication() {
	let app = test::init_service(
		App::new()
			.wrap(Authentication::new(test_jwt()))
			.route("/", web::get().to(protected))
			.route("/health", web::get().to(protected))
			.route("/auth/token", web::post().to(protected)),
	)
	.await;

	let resp = test::TestRequest::get().uri("/").send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let resp = test::TestRequest::get().uri("/health").send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let resp = test::TestRequest::post().uri("/auth/token").send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::OK);
}
