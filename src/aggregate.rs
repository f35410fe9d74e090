//! Dashboard aggregation over a user's transaction history.
//!
//! Turns a flat transaction list into the totals, per-category expense
//! breakdown and trailing monthly net-worth series the dashboard renders.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use crate::constants::SERIES_MONTHS;
use crate::models::{DashboardSummary, NamedValue, Transaction, TransactionKind};

const MONTH_LABELS: [&str; 12] =
	["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Aggregated view of one owner's transactions. Totals are exact sums;
/// rounding happens when the summary is assembled into a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
	pub total_income: f64,
	pub total_expenses: f64,
	pub net_worth: f64,
	pub category_expenses: Vec<NamedValue>,
	pub monthly_series: Vec<NamedValue>,
}

/// Computes the dashboard summary for a transaction list.
///
/// `now` anchors the 6-month series window at its calendar month. Category
/// entries keep the order in which each category is first seen; labels are
/// matched case-sensitively. The monthly series is the cumulative sum of
/// per-month net change inside the window only; transactions from earlier
/// months do not seed the running total.
pub fn summarize(transactions: &[Transaction], now: DateTime<Utc>) -> Summary {
	let mut total_income = 0.0;
	let mut total_expenses = 0.0;
	let mut category_expenses: Vec<NamedValue> = Vec::new();
	let mut monthly_net: HashMap<(i32, u32), f64> = HashMap::new();

	for tx in transactions {
		let bucket = (tx.occurred_at.year(), tx.occurred_at.month());
		match TransactionKind::parse(&tx.kind) {
			Some(TransactionKind::Income) => {
				total_income += tx.amount;
				*monthly_net.entry(bucket).or_insert(0.0) += tx.amount;
			},
			Some(TransactionKind::Expense) => {
				total_expenses += tx.amount;
				*monthly_net.entry(bucket).or_insert(0.0) -= tx.amount;
				match category_expenses.iter_mut().find(|c| c.name == tx.category) {
					Some(entry) => entry.value += tx.amount,
					None => category_expenses
						.push(NamedValue { name: tx.category.clone(), value: tx.amount }),
				}
			},
			None => {},
		}
	}

	let mut monthly_series = Vec::with_capacity(SERIES_MONTHS);
	let mut running = 0.0;
	for (year, month) in trailing_months(now) {
		running += monthly_net.get(&(year, month)).copied().unwrap_or(0.0);
		monthly_series
			.push(NamedValue { name: month_label(month).to_string(), value: round2(running) });
	}

	Summary {
		total_income,
		total_expenses,
		net_worth: total_income - total_expenses,
		category_expenses,
		monthly_series,
	}
}

/// Packages a summary into the dashboard response, rounding the totals.
pub fn assemble_dashboard(summary: Summary, user_name: String) -> DashboardSummary {
	DashboardSummary {
		net_worth: round2(summary.net_worth),
		monthly_income: round2(summary.total_income),
		monthly_expenses: round2(summary.total_expenses),
		category_expenses: summary.category_expenses,
		monthly_series: summary.monthly_series,
		user_name,
	}
}

/// The last `SERIES_MONTHS` calendar months ending at `now`, oldest first.
pub fn trailing_months(now: DateTime<Utc>) -> Vec<(i32, u32)> {
	let mut year = now.year();
	let mut month = now.month();
	let mut months = vec![(year, month)];
	for _ in 1..SERIES_MONTHS {
		if month == 1 {
			year -= 1;
			month = 12;
		} else {
			month -= 1;
		}
		months.push((year, month));
	}
	months.reverse();
	months
}

pub fn month_label(month: u32) -> &'static str {
	MONTH_LABELS[(month - 1) as usize]
}

pub fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}
