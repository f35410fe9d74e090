use diesel::{
	prelude::*,
	r2d2::{self, ConnectionManager},
};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub fn get_db_pool(database_url: &str) -> DbPool {
	let manager = ConnectionManager::<PgConnection>::new(database_url);
	r2d2::Pool::builder().build(manager).expect("Failed to create pool.")
}

pub async fn init(pool: &DbPool) -> Result<(), diesel::result::Error> {
	let mut conn = pool.get().expect("can not get the pool address");
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS users (
			id UUID PRIMARY KEY,
			email VARCHAR(255) NOT NULL UNIQUE,
			name VARCHAR(100) NOT NULL,
			password_hash TEXT NOT NULL,
			created_at TIMESTAMPTZ NOT NULL
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS transactions (
			id UUID PRIMARY KEY,
			user_id UUID NOT NULL REFERENCES users(id),
			amount DOUBLE PRECISION NOT NULL,
			kind VARCHAR(20) NOT NULL,
			category VARCHAR(100) NOT NULL,
			description TEXT,
			occurred_at TIMESTAMPTZ NOT NULL
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS goals (
			id UUID PRIMARY KEY,
			user_id UUID NOT NULL REFERENCES users(id),
			name VARCHAR(120) NOT NULL,
			target_amount DOUBLE PRECISION NOT NULL,
			current_amount DOUBLE PRECISION NOT NULL DEFAULT 0,
			deadline TIMESTAMPTZ,
			completed BOOLEAN NOT NULL DEFAULT FALSE
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS assets (
			id UUID PRIMARY KEY,
			user_id UUID NOT NULL REFERENCES users(id),
			name VARCHAR(120) NOT NULL,
			kind VARCHAR(50) NOT NULL,
			current_value DOUBLE PRECISION NOT NULL,
			purchase_date TIMESTAMPTZ,
			notes TEXT,
			created_at TIMESTAMPTZ NOT NULL
		);",
	)
	.execute(&mut conn)?;

	Ok(())
}
