use crate::{
	constants::{AUTHORIZATION, MESSAGE_INVALID_TOKEN},
	db::DbPool,
	midware::jwt::JWT,
	models::{Asset, AssetPatch, ErrorResponse, Goal, NewUser, Transaction, User},
	schema::{assets, goals, transactions, users},
};
use actix_web::{http::header, HttpRequest, HttpResponse};
use diesel::prelude::*;
use uuid::Uuid;

/// Owner-scoped access to the persisted financial records. Every list query
/// filters by `user_id` in SQL; point lookups return the row regardless of
/// owner and leave the ownership check to the caller, which must surface a
/// mismatch exactly like absence.
pub struct Records;

impl Records {
	pub fn find_user_by_email(conn: &mut PgConnection, email: &str) -> QueryResult<Option<User>> {
		users::dsl::users
			.filter(users::dsl::email.eq(email))
			.select(User::as_select())
			.first::<User>(conn)
			.optional()
	}

	pub fn insert_user(conn: &mut PgConnection, new_user: &NewUser) -> QueryResult<User> {
		diesel::insert_into(users::table)
			.values(new_user)
			.returning(User::as_returning())
			.get_result(conn)
	}

	pub fn list_transactions(
		conn: &mut PgConnection,
		owner: Uuid,
		skip: i64,
		limit: i64,
	) -> QueryResult<Vec<Transaction>> {
		transactions::dsl::transactions
			.filter(transactions::dsl::user_id.eq(owner))
			.order(transactions::dsl::occurred_at.asc())
			.offset(skip)
			.limit(limit)
			.select(Transaction::as_select())
			.load(conn)
	}

	pub fn insert_transaction(
		conn: &mut PgConnection,
		transaction: &Transaction,
	) -> QueryResult<Transaction> {
		diesel::insert_into(transactions::table)
			.values(transaction)
			.returning(Transaction::as_returning())
			.get_result(conn)
	}

	pub fn list_goals(
		conn: &mut PgConnection,
		owner: Uuid,
		skip: i64,
		limit: i64,
	) -> QueryResult<Vec<Goal>> {
		goals::dsl::goals
			.filter(goals::dsl::user_id.eq(owner))
			.order(goals::dsl::name.asc())
			.offset(skip)
			.limit(limit)
			.select(Goal::as_select())
			.load(conn)
	}

	pub fn insert_goal(conn: &mut PgConnection, goal: &Goal) -> QueryResult<Goal> {
		diesel::insert_into(goals::table)
			.values(goal)
			.returning(Goal::as_returning())
			.get_result(conn)
	}

	pub fn list_assets(
		conn: &mut PgConnection,
		owner: Uuid,
		skip: i64,
		limit: i64,
	) -> QueryResult<Vec<Asset>> {
		assets::dsl::assets
			.filter(assets::dsl::user_id.eq(owner))
			.order(assets::dsl::created_at.asc())
			.offset(skip)
			.limit(limit)
			.select(Asset::as_select())
			.load(conn)
	}

	pub fn insert_asset(conn: &mut PgConnection, asset: &Asset) -> QueryResult<Asset> {
		diesel::insert_into(assets::table)
			.values(asset)
			.returning(Asset::as_returning())
			.get_result(conn)
	}

	pub fn get_asset(conn: &mut PgConnection, asset_id: Uuid) -> QueryResult<Option<Asset>> {
		assets::dsl::assets
			.filter(assets::dsl::id.eq(asset_id))
			.select(Asset::as_select())
			.first::<Asset>(conn)
			.optional()
	}

	pub fn update_asset(
		conn: &mut PgConnection,
		asset_id: Uuid,
		patch: &AssetPatch,
	) -> QueryResult<Asset> {
		diesel::update(assets::dsl::assets.filter(assets::dsl::id.eq(asset_id)))
			.set(patch)
			.returning(Asset::as_returning())
			.get_result(conn)
	}

	pub fn delete_asset(conn: &mut PgConnection, asset_id: Uuid) -> QueryResult<usize> {
		diesel::delete(assets::dsl::assets.filter(assets::dsl::id.eq(asset_id))).execute(conn)
	}

	pub fn total_assets_value(conn: &mut PgConnection, owner: Uuid) -> QueryResult<f64> {
		let owned = assets::dsl::assets
			.filter(assets::dsl::user_id.eq(owner))
			.select(Asset::as_select())
			.load::<Asset>(conn)?;
		Ok(owned.iter().map(|asset| asset.current_value).sum())
	}
}

/// Resolves the calling user from the bearer token, or produces the 401
/// response the caller should return as-is.
pub async fn authenticate(
	req: &HttpRequest,
	jwt: &JWT,
	pool: &DbPool,
) -> Result<User, HttpResponse> {
	let token = req
		.headers()
		.get(AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.ok_or_else(unauthorized)?;

	let claims = jwt.verify_token(token).map_err(|e| {
		log::error!("Token validation error: {:?}", e);
		unauthorized()
	})?;

	let mut conn = pool.get().map_err(|e| {
		log::error!("Database connection error: {:?}", e);
		HttpResponse::InternalServerError()
			.json(ErrorResponse { error: "Database error".to_string() })
	})?;

	match Records::find_user_by_email(&mut conn, &claims.sub) {
		Ok(Some(user)) => Ok(user),
		Ok(None) => Err(unauthorized()),
		Err(e) => {
			log::error!("User fetch error: {:?}", e);
			Err(unauthorized())
		},
	}
}

fn unauthorized() -> HttpResponse {
	HttpResponse::Unauthorized()
		.insert_header((header::WWW_AUTHENTICATE, "Bearer"))
		.json(ErrorResponse { error: MESSAGE_INVALID_TOKEN.to_string() })
}
