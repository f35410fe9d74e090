use crate::{
	advisor::{Advisor, Snapshot},
	aggregate::{assemble_dashboard, summarize},
	constants::{DASHBOARD_TRANSACTION_LIMIT, DEFAULT_PAGE_LIMIT},
	db::{DbConn, DbPool},
	midware::jwt::JWT,
	models::{
		Asset, AssetCreate, AssetPatch, ErrorResponse, Goal, GoalCreate, NewUser, Pagination,
		RegisterRequest, TokenForm, TokenResponse, Transaction, TransactionCreate, TransactionKind,
		UserResponse,
	},
	repo::{authenticate, Records},
};
use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

pub async fn index() -> impl Responder {
	HttpResponse::Ok().json(json!({ "message": "Welcome to the Wealth Management API" }))
}

pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(json!({ "status": "ok", "database": "postgres" }))
}

fn get_conn(pool: &web::Data<DbPool>) -> Result<DbConn, HttpResponse> {
	pool.get().map_err(|e| {
		log::error!("Database connection error: {:?}", e);
		internal_error("Database error")
	})
}

fn bad_request(message: &str) -> HttpResponse {
	HttpResponse::BadRequest().json(ErrorResponse { error: message.to_string() })
}

fn not_found(message: &str) -> HttpResponse {
	HttpResponse::NotFound().json(ErrorResponse { error: message.to_string() })
}

fn internal_error(message: &str) -> HttpResponse {
	HttpResponse::InternalServerError().json(ErrorResponse { error: message.to_string() })
}

pub struct AuthHandler {}

impl AuthHandler {
	pub async fn register(
		pool: web::Data<DbPool>,
		req: web::Json<RegisterRequest>,
	) -> impl Responder {
		log::info!("Incoming registration for email: {}", req.email);

		if let Err(e) = req.validate() {
			log::error!("Validation error: {:?}", e);
			return bad_request(&e.to_string());
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::find_user_by_email(&mut conn, &req.email) {
			Ok(Some(_)) => {
				log::warn!("Email already registered: {}", req.email);
				return HttpResponse::Conflict()
					.json(ErrorResponse { error: "Email already registered".to_string() });
			},
			Ok(None) => {},
			Err(e) => {
				log::error!("User fetch error: {:?}", e);
				return internal_error("Database error");
			},
		}

		let password_hash = match hash(req.password.as_bytes(), DEFAULT_COST) {
			Ok(hashed) => hashed,
			Err(e) => {
				log::error!("Password hashing failed for email {}: {}", req.email, e);
				return internal_error("Failed to hash password");
			},
		};

		let new_user = NewUser {
			id: Uuid::new_v4(),
			email: &req.email,
			name: &req.name,
			password_hash: &password_hash,
			created_at: Utc::now(),
		};

		match Records::insert_user(&mut conn, &new_user) {
			Ok(user) => {
				log::info!("User registered: {}", user.email);
				HttpResponse::Ok().json(UserResponse::from(user))
			},
			Err(e) => {
				log::error!("User creation error: {:?}", e);
				internal_error(&format!("Failed to create user: {}", e))
			},
		}
	}

	pub async fn token(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		form: web::Form<TokenForm>,
	) -> impl Responder {
		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match Records::find_user_by_email(&mut conn, &form.username) {
			Ok(user) => user,
			Err(e) => {
				log::error!("User fetch error: {:?}", e);
				return internal_error("Database error");
			},
		};

		// Bad email and bad password answer identically.
		let verified = user
			.as_ref()
			.map(|u| verify(form.password.as_bytes(), &u.password_hash).unwrap_or(false))
			.unwrap_or(false);
		let user = match (user, verified) {
			(Some(user), true) => user,
			_ => {
				log::warn!("Failed login attempt for {}", form.username);
				return HttpResponse::Unauthorized()
					.insert_header((header::WWW_AUTHENTICATE, "Bearer"))
					.json(ErrorResponse { error: "Incorrect email or password".to_string() });
			},
		};

		match jwt.create_token(&user.email) {
			Ok(access_token) => {
				log::info!("Issued token for {}", user.email);
				HttpResponse::Ok()
					.json(TokenResponse { access_token, token_type: "bearer".to_string() })
			},
			Err(e) => {
				log::error!("Token creation error: {:?}", e);
				internal_error("Failed to create authentication token")
			},
		}
	}
}

pub struct TransactionHandler {}

impl TransactionHandler {
	pub async fn create(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		req: web::Json<TransactionCreate>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let kind = match TransactionKind::parse(&req.kind) {
			Some(kind) => kind,
			None => {
				log::error!("Invalid transaction type: {}", req.kind);
				return bad_request("Invalid transaction type");
			},
		};
		if req.amount < 0.0 {
			log::error!("Invalid transaction amount: {}", req.amount);
			return bad_request("Invalid transaction amount");
		}

		let transaction = Transaction {
			id: Uuid::new_v4(),
			user_id: user.id,
			amount: req.amount,
			kind: kind.as_str().to_string(),
			category: req.category.clone(),
			description: req.description.clone(),
			occurred_at: req.occurred_at.unwrap_or_else(Utc::now),
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::insert_transaction(&mut conn, &transaction) {
			Ok(created) => {
				log::info!("Transaction {} created for user {}", created.id, user.id);
				HttpResponse::Created().json(created)
			},
			Err(e) => {
				log::error!("Transaction creation error: {:?}", e);
				internal_error("Failed to create transaction")
			},
		}
	}

	pub async fn list(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		page: web::Query<Pagination>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::list_transactions(&mut conn, user.id, page.skip, page.limit) {
			Ok(transactions) => {
				log::info!("Listed {} transactions for user {}", transactions.len(), user.id);
				HttpResponse::Ok().json(transactions)
			},
			Err(e) => {
				log::error!("Failed to list transactions for user {}: {:?}", user.id, e);
				internal_error("Failed to list transactions")
			},
		}
	}
}

pub struct GoalHandler {}

impl GoalHandler {
	pub async fn create(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		req: web::Json<GoalCreate>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		if req.target_amount <= 0.0 {
			log::error!("Invalid goal target amount: {}", req.target_amount);
			return bad_request("Invalid target amount");
		}
		if req.current_amount < 0.0 {
			log::error!("Invalid goal current amount: {}", req.current_amount);
			return bad_request("Invalid current amount");
		}

		let goal = Goal {
			id: Uuid::new_v4(),
			user_id: user.id,
			name: req.name.clone(),
			target_amount: req.target_amount,
			current_amount: req.current_amount,
			deadline: req.deadline,
			completed: req.completed,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::insert_goal(&mut conn, &goal) {
			Ok(created) => {
				log::info!("Goal {} created for user {}", created.id, user.id);
				HttpResponse::Created().json(created)
			},
			Err(e) => {
				log::error!("Goal creation error: {:?}", e);
				internal_error("Failed to create goal")
			},
		}
	}

	pub async fn list(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		page: web::Query<Pagination>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::list_goals(&mut conn, user.id, page.skip, page.limit) {
			Ok(goals) => HttpResponse::Ok().json(goals),
			Err(e) => {
				log::error!("Failed to list goals for user {}: {:?}", user.id, e);
				internal_error("Failed to list goals")
			},
		}
	}
}

pub struct AssetHandler {}

impl AssetHandler {
	pub async fn create(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		req: web::Json<AssetCreate>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		if req.current_value < 0.0 {
			log::error!("Invalid asset value: {}", req.current_value);
			return bad_request("Invalid asset value");
		}

		let asset = Asset {
			id: Uuid::new_v4(),
			user_id: user.id,
			name: req.name.clone(),
			kind: req.kind.clone(),
			current_value: req.current_value,
			purchase_date: req.purchase_date,
			notes: req.notes.clone(),
			created_at: Utc::now(),
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::insert_asset(&mut conn, &asset) {
			Ok(created) => {
				log::info!("Asset {} created for user {}", created.id, user.id);
				HttpResponse::Created().json(created)
			},
			Err(e) => {
				log::error!("Asset creation error: {:?}", e);
				internal_error("Failed to create asset")
			},
		}
	}

	pub async fn list(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		page: web::Query<Pagination>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::list_assets(&mut conn, user.id, page.skip, page.limit) {
			Ok(assets) => HttpResponse::Ok().json(assets),
			Err(e) => {
				log::error!("Failed to list assets for user {}: {:?}", user.id, e);
				internal_error("Failed to list assets")
			},
		}
	}

	pub async fn get(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		path: web::Path<String>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let asset_id = match Uuid::parse_str(&path.into_inner()) {
			Ok(id) => id,
			Err(e) => {
				log::error!("Invalid asset ID format: {:?}", e);
				return bad_request("Invalid asset ID format");
			},
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::get_asset(&mut conn, asset_id) {
			// A foreign owner's asset looks exactly like a missing one.
			Ok(Some(asset)) if asset.user_id == user.id => HttpResponse::Ok().json(asset),
			Ok(_) => not_found("Asset not found"),
			Err(e) => {
				log::error!("Asset fetch error: {:?}", e);
				internal_error("Database error")
			},
		}
	}

	pub async fn update(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		path: web::Path<String>,
		req: web::Json<AssetPatch>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let asset_id = match Uuid::parse_str(&path.into_inner()) {
			Ok(id) => id,
			Err(e) => {
				log::error!("Invalid asset ID format: {:?}", e);
				return bad_request("Invalid asset ID format");
			},
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let existing = match Records::get_asset(&mut conn, asset_id) {
			Ok(Some(asset)) if asset.user_id == user.id => asset,
			Ok(_) => return not_found("Asset not found"),
			Err(e) => {
				log::error!("Asset fetch error: {:?}", e);
				return internal_error("Database error");
			},
		};

		if req.is_empty() {
			return HttpResponse::Ok().json(existing);
		}

		match Records::update_asset(&mut conn, asset_id, &req) {
			Ok(updated) => {
				log::info!("Asset {} updated for user {}", asset_id, user.id);
				HttpResponse::Ok().json(updated)
			},
			Err(e) => {
				log::error!("Asset update error: {:?}", e);
				internal_error("Failed to update asset")
			},
		}
	}

	pub async fn delete(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		path: web::Path<String>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let asset_id = match Uuid::parse_str(&path.into_inner()) {
			Ok(id) => id,
			Err(e) => {
				log::error!("Invalid asset ID format: {:?}", e);
				return bad_request("Invalid asset ID format");
			},
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match Records::get_asset(&mut conn, asset_id) {
			Ok(Some(asset)) if asset.user_id == user.id => {},
			Ok(_) => return not_found("Asset not found"),
			Err(e) => {
				log::error!("Asset fetch error: {:?}", e);
				return internal_error("Database error");
			},
		}

		match Records::delete_asset(&mut conn, asset_id) {
			Ok(_) => {
				log::info!("Asset {} deleted for user {}", asset_id, user.id);
				HttpResponse::Ok().json(json!({ "message": "Asset deleted successfully" }))
			},
			Err(e) => {
				log::error!("Asset delete error: {:?}", e);
				internal_error("Failed to delete asset")
			},
		}
	}
}

pub struct DashboardHandler {}

impl DashboardHandler {
	pub async fn summary(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let transactions =
			match Records::list_transactions(&mut conn, user.id, 0, DASHBOARD_TRANSACTION_LIMIT) {
				Ok(transactions) => transactions,
				Err(e) => {
					log::error!("Failed to fetch transactions for user {}: {:?}", user.id, e);
					return internal_error("Failed to load dashboard");
				},
			};

		let summary = summarize(&transactions, Utc::now());
		HttpResponse::Ok().json(assemble_dashboard(summary, user.name))
	}

	pub async fn recommendations(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		advisor: web::Data<Advisor>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let transactions =
			match Records::list_transactions(&mut conn, user.id, 0, DASHBOARD_TRANSACTION_LIMIT) {
				Ok(transactions) => transactions,
				Err(e) => {
					log::error!("Failed to fetch transactions for user {}: {:?}", user.id, e);
					return internal_error("Failed to load financial data");
				},
			};
		let goals = match Records::list_goals(&mut conn, user.id, 0, DEFAULT_PAGE_LIMIT) {
			Ok(goals) => goals,
			Err(e) => {
				log::error!("Failed to fetch goals for user {}: {:?}", user.id, e);
				return internal_error("Failed to load financial data");
			},
		};
		let assets = match Records::list_assets(&mut conn, user.id, 0, DEFAULT_PAGE_LIMIT) {
			Ok(assets) => assets,
			Err(e) => {
				log::error!("Failed to fetch assets for user {}: {:?}", user.id, e);
				return internal_error("Failed to load financial data");
			},
		};
		let total_assets = match Records::total_assets_value(&mut conn, user.id) {
			Ok(total) => total,
			Err(e) => {
				log::error!("Failed to total assets for user {}: {:?}", user.id, e);
				return internal_error("Failed to load financial data");
			},
		};

		let summary = summarize(&transactions, Utc::now());
		let snapshot = Snapshot {
			monthly_income: summary.total_income,
			monthly_expenses: summary.total_expenses,
			net_worth: summary.net_worth,
			total_assets,
			category_expenses: summary.category_expenses,
			goals,
			assets,
		};

		HttpResponse::Ok().json(advisor.recommendations(&snapshot).await)
	}

	pub async fn goal_plan(
		pool: web::Data<DbPool>,
		jwt: web::Data<JWT>,
		advisor: web::Data<Advisor>,
		http_req: HttpRequest,
	) -> impl Responder {
		let user = match authenticate(&http_req, &jwt, &pool).await {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let goals = match Records::list_goals(&mut conn, user.id, 0, DEFAULT_PAGE_LIMIT) {
			Ok(goals) => goals,
			Err(e) => {
				log::error!("Failed to fetch goals for user {}: {:?}", user.id, e);
				return internal_error("Failed to load financial data");
			},
		};
		let transactions =
			match Records::list_transactions(&mut conn, user.id, 0, DASHBOARD_TRANSACTION_LIMIT) {
				Ok(transactions) => transactions,
				Err(e) => {
					log::error!("Failed to fetch transactions for user {}: {:?}", user.id, e);
					return internal_error("Failed to load financial data");
				},
			};

		let summary = summarize(&transactions, Utc::now());
		HttpResponse::Ok()
			.json(advisor.goal_plan(&goals, summary.total_income, summary.total_expenses).await)
	}
}
