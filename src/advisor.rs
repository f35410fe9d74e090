//! Best-effort financial recommendations from an external text generator.
//!
//! The generator is advisory only. Whatever goes wrong here (transport
//! errors, a missing API key, an unparsable reply), the caller still gets a
//! well-formed payload built from the static fallbacks below.

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AppConfig;
use crate::models::{Asset, Goal, NamedValue};

pub const DEFAULT_GEMINI_URL: &str =
	"https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

// Replies are scanned for a JSON object at most this far in.
const MAX_REPLY_SCAN: usize = 64 * 1024;

/// Point-in-time financial picture handed to the generator.
#[derive(Debug, Serialize)]
pub struct Snapshot {
	pub monthly_income: f64,
	pub monthly_expenses: f64,
	pub net_worth: f64,
	pub total_assets: f64,
	pub category_expenses: Vec<NamedValue>,
	pub goals: Vec<Goal>,
	pub assets: Vec<Asset>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recommendations {
	pub short_term_suggestions: Vec<String>,
	pub medium_term_suggestions: Vec<String>,
	pub long_term_suggestions: Vec<String>,
	pub expense_reduction_opportunities: Vec<String>,
	pub personalized_goal_plans: Vec<String>,
	pub overall_financial_health_score: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GoalAllocation {
	pub goal_name: String,
	pub monthly_contribution: f64,
	pub estimated_timeline_months: f64,
	pub investment_strategy: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GoalPlan {
	pub goal_allocation_plan: Vec<GoalAllocation>,
	pub timeline_summary: String,
	pub investment_recommendations: Vec<String>,
	pub trade_off_analysis: String,
	pub income_expense_optimization: Vec<String>,
}

/// Served when the generator answered but the reply carried no usable JSON.
pub fn unparsable_fallback() -> Recommendations {
	Recommendations {
		short_term_suggestions: vec![
			"Consult with a financial advisor for personalized guidance".to_string(),
		],
		medium_term_suggestions: vec![
			"Consider diversifying your investment portfolio".to_string(),
		],
		long_term_suggestions: vec![
			"Plan for retirement by increasing contributions".to_string(),
		],
		expense_reduction_opportunities: vec![
			"Review subscription services for potential cuts".to_string(),
		],
		personalized_goal_plans: vec!["Set up automatic savings transfers".to_string()],
		overall_financial_health_score: 50.0,
	}
}

/// Served when the generator call itself failed.
pub fn unavailable_fallback() -> Recommendations {
	Recommendations {
		short_term_suggestions: vec!["Consider reviewing your budget".to_string()],
		medium_term_suggestions: vec!["Look into low-risk investment options".to_string()],
		long_term_suggestions: vec!["Plan for retirement and emergency funds".to_string()],
		expense_reduction_opportunities: vec![
			"Identify unnecessary subscriptions".to_string(),
		],
		personalized_goal_plans: vec![
			"Set specific, measurable financial goals".to_string(),
		],
		overall_financial_health_score: 50.0,
	}
}

pub fn goal_plan_fallback() -> GoalPlan {
	GoalPlan {
		goal_allocation_plan: Vec::new(),
		timeline_summary: "Could not generate a detailed plan. Please consult a financial advisor."
			.to_string(),
		investment_recommendations: Vec::new(),
		trade_off_analysis: String::new(),
		income_expense_optimization: Vec::new(),
	}
}

pub struct Advisor {
	client: reqwest::Client,
	api_url: String,
	api_key: Option<String>,
}

impl Advisor {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			client: reqwest::Client::new(),
			api_url: config.gemini_api_url.clone(),
			api_key: config.gemini_api_key.clone(),
		}
	}

	/// Narrative recommendations for a financial snapshot. Never fails.
	pub async fn recommendations(&self, snapshot: &Snapshot) -> Recommendations {
		let prompt = recommendation_prompt(snapshot);
		match self.generate(&prompt).await {
			Ok(reply) => match parse_reply::<Recommendations>(&reply) {
				Some(recommendations) => recommendations,
				None => {
					log::warn!("generator reply carried no usable JSON, serving fallback");
					unparsable_fallback()
				},
			},
			Err(e) => {
				log::warn!("recommendation generator unavailable: {:#}", e);
				unavailable_fallback()
			},
		}
	}

	/// Savings/investment plan for the user's goals. Never fails.
	pub async fn goal_plan(&self, goals: &[Goal], income: f64, expenses: f64) -> GoalPlan {
		let prompt = goal_plan_prompt(goals, income, expenses);
		match self.generate(&prompt).await {
			Ok(reply) => match parse_reply::<GoalPlan>(&reply) {
				Some(plan) => plan,
				None => {
					log::warn!("generator reply carried no usable JSON, serving goal plan fallback");
					goal_plan_fallback()
				},
			},
			Err(e) => {
				log::warn!("goal plan generator unavailable: {:#}", e);
				goal_plan_fallback()
			},
		}
	}

	async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
		let api_key = self.api_key.as_deref().ok_or_else(|| anyhow!("GEMINI_API_KEY is not set"))?;
		let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
		let reply = self
			.client
			.post(&self.api_url)
			.query(&[("key", api_key)])
			.json(&body)
			.send()
			.await?
			.error_for_status()?
			.json::<serde_json::Value>()
			.await?;
		reply["candidates"][0]["content"]["parts"][0]["text"]
			.as_str()
			.map(str::to_owned)
			.ok_or_else(|| anyhow!("generator reply carries no text part"))
	}
}

pub fn recommendation_prompt(snapshot: &Snapshot) -> String {
	let categories = serde_json::to_string(&snapshot.category_expenses).unwrap_or_default();
	let goals = serde_json::to_string(&snapshot.goals).unwrap_or_default();
	let assets = serde_json::to_string(&snapshot.assets).unwrap_or_default();
	format!(
		"As a personal financial advisor, analyze the following user financial data and provide \
		 personalized recommendations:\n\n\
		 User Profile:\n\
		 - Monthly Income: {}\n\
		 - Monthly Expenses: {}\n\
		 - Net Worth: {}\n\
		 - Total Assets: {}\n\
		 - Expense Categories: {}\n\
		 - Current Goals: {}\n\
		 - Current Assets: {}\n\n\
		 Please provide specific, actionable recommendations in the following format:\n\
		 1. Short-term savings recommendations (next 3-6 months)\n\
		 2. Medium-term investment suggestions (6 months - 2 years)\n\
		 3. Long-term wealth building strategies (2+ years)\n\
		 4. Specific expense reduction opportunities\n\
		 5. Personalized goal achievement plans\n\n\
		 Structure the response as a JSON object with the following keys:\n\
		 {{\n\
		   \"short_term_suggestions\": [...],\n\
		   \"medium_term_suggestions\": [...],\n\
		   \"long_term_suggestions\": [...],\n\
		   \"expense_reduction_opportunities\": [...],\n\
		   \"personalized_goal_plans\": [...],\n\
		   \"overall_financial_health_score\": number (1-100)\n\
		 }}\n\n\
		 Be specific, actionable, and realistic based on the user's financial situation.",
		snapshot.monthly_income,
		snapshot.monthly_expenses,
		snapshot.net_worth,
		snapshot.total_assets,
		categories,
		goals,
		assets,
	)
}

pub fn goal_plan_prompt(goals: &[Goal], income: f64, expenses: f64) -> String {
	let mut goals_description = String::new();
	for goal in goals {
		goals_description.push_str(&format!("- {}: Target amount {}", goal.name, goal.target_amount));
		if let Some(deadline) = goal.deadline {
			goals_description.push_str(&format!(", Deadline: {}", deadline));
		}
		goals_description.push('\n');
	}
	let available = if income > expenses { income - expenses } else { 0.0 };
	format!(
		"Based on the following user financial situation and goals, create a detailed financial \
		 plan:\n\n\
		 User Financial Situation:\n\
		 - Monthly Income: {}\n\
		 - Monthly Expenses: {}\n\
		 - Available Monthly Savings: {}\n\n\
		 User Goals:\n{}\n\
		 Create a prioritized financial plan with:\n\
		 1. Monthly savings allocation for each goal\n\
		 2. Timeline to achieve each goal\n\
		 3. Investment strategy for reaching goals\n\
		 4. Potential trade-offs between goals\n\
		 5. Recommendations for increasing income or reducing expenses to meet goals faster\n\n\
		 Return as JSON with this structure:\n\
		 {{\n\
		   \"goal_allocation_plan\": [\n\
		     {{\n\
		       \"goal_name\": \"...\",\n\
		       \"monthly_contribution\": number,\n\
		       \"estimated_timeline_months\": number,\n\
		       \"investment_strategy\": \"...\"\n\
		     }}\n\
		   ],\n\
		   \"timeline_summary\": \"...\",\n\
		   \"investment_recommendations\": [...],\n\
		   \"trade_off_analysis\": \"...\",\n\
		   \"income_expense_optimization\": [...]\n\
		 }}",
		income, expenses, available, goals_description,
	)
}

/// Pulls a typed value out of a generator reply: strict parse of the whole
/// text first, then the first balanced brace span.
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Option<T> {
	if let Ok(parsed) = serde_json::from_str::<T>(text.trim()) {
		return Some(parsed);
	}
	serde_json::from_str::<T>(balanced_brace_span(text)?).ok()
}

/// First balanced `{ ... }` span in `text`. Braces inside string literals
/// are ignored; the scan gives up after `MAX_REPLY_SCAN` characters.
pub(crate) fn balanced_brace_span(text: &str) -> Option<&str> {
	let start = text.find('{')?;
	let mut depth = 0usize;
	let mut in_string = false;
	let mut escaped = false;
	for (offset, ch) in text[start..].char_indices().take(MAX_REPLY_SCAN) {
		if in_string {
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}
			continue;
		}
		match ch {
			'"' => in_string = true,
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth == 0 {
					return Some(&text[start..start + offset + ch.len_utf8()]);
				}
			},
			_ => {},
		}
	}
	None
}
