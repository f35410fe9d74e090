use crate::constants::DEFAULT_PAGE_LIMIT;
use crate::schema::*;
use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id: Uuid,
	pub email: String,
	pub name: String,
	pub password_hash: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
	pub id: Uuid,
	pub email: &'a str,
	pub name: &'a str,
	pub password_hash: &'a str,
	pub created_at: DateTime<Utc>,
}

/// Outward user shape. The password hash never leaves the service.
#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
	pub id: Uuid,
	pub email: String,
	pub name: String,
	pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self { id: user.id, email: user.email, name: user.name, created_at: user.created_at }
	}
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 1, max = 100))]
	pub name: String,
	#[validate(length(min = 8))]
	pub password: String,
}

#[derive(Deserialize)]
pub struct TokenForm {
	pub username: String,
	pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
	pub access_token: String,
	pub token_type: String,
}

#[derive(Debug, Deserialize, Serialize, Insertable, Queryable, Selectable, Clone)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(Pg))]
pub struct Transaction {
	pub id: Uuid,
	pub user_id: Uuid,
	pub amount: f64,
	#[serde(rename = "type")]
	pub kind: String,
	pub category: String,
	pub description: Option<String>,
	#[serde(rename = "date")]
	pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionCreate {
	pub amount: f64,
	#[serde(rename = "type")]
	pub kind: String,
	pub category: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default, rename = "date")]
	pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
	Income,
	Expense,
}

impl TransactionKind {
	pub fn as_str(&self) -> &str {
		match self {
			TransactionKind::Income => "income",
			TransactionKind::Expense => "expense",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"income" => Some(TransactionKind::Income),
			"expense" => Some(TransactionKind::Expense),
			_ => None,
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Insertable, Queryable, Selectable, Clone)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(Pg))]
pub struct Goal {
	pub id: Uuid,
	pub user_id: Uuid,
	pub name: String,
	pub target_amount: f64,
	pub current_amount: f64,
	pub deadline: Option<DateTime<Utc>>,
	pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct GoalCreate {
	pub name: String,
	pub target_amount: f64,
	#[serde(default)]
	pub current_amount: f64,
	#[serde(default)]
	pub deadline: Option<DateTime<Utc>>,
	#[serde(default)]
	pub completed: bool,
}

#[derive(Debug, Deserialize, Serialize, Insertable, Queryable, Selectable, Clone)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(Pg))]
pub struct Asset {
	pub id: Uuid,
	pub user_id: Uuid,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub current_value: f64,
	pub purchase_date: Option<DateTime<Utc>>,
	pub notes: Option<String>,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AssetCreate {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub current_value: f64,
	#[serde(default)]
	pub purchase_date: Option<DateTime<Utc>>,
	#[serde(default)]
	pub notes: Option<String>,
}

/// Partial update. Only fields present in the request body are applied.
#[derive(Debug, Deserialize, AsChangeset, Default)]
#[diesel(table_name = assets)]
pub struct AssetPatch {
	pub name: Option<String>,
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub current_value: Option<f64>,
	pub purchase_date: Option<DateTime<Utc>>,
	pub notes: Option<String>,
}

impl AssetPatch {
	pub fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.kind.is_none()
			&& self.current_value.is_none()
			&& self.purchase_date.is_none()
			&& self.notes.is_none()
	}
}

#[derive(Serialize)]
pub struct ErrorResponse {
	pub error: String,
}

#[derive(Deserialize, Debug)]
pub struct Pagination {
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_page_limit")]
	pub limit: i64,
}

fn default_page_limit() -> i64 {
	DEFAULT_PAGE_LIMIT
}

/// One labelled data point on a dashboard chart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NamedValue {
	pub name: String,
	pub value: f64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardSummary {
	pub net_worth: f64,
	pub monthly_income: f64,
	pub monthly_expenses: f64,
	pub category_expenses: Vec<NamedValue>,
	pub monthly_series: Vec<NamedValue>,
	pub user_name: String,
}
