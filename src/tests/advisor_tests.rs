use crate::advisor::{
	balanced_brace_span, goal_plan_fallback, goal_plan_prompt, parse_reply, recommendation_prompt,
	unavailable_fallback, unparsable_fallback, GoalPlan, Recommendations, Snapshot,
};
use crate::models::NamedValue;
use crate::tests::fixtures::TestFixtures;

fn sample_reply_json() -> String {
	serde_json::json!({
		"short_term_suggestions": ["Build a one-month cash buffer"],
		"medium_term_suggestions": ["Open an index fund position"],
		"long_term_suggestions": ["Raise retirement contributions"],
		"expense_reduction_opportunities": ["Cancel unused subscriptions"],
		"personalized_goal_plans": ["Automate 200 per month toward the house deposit"],
		"overall_financial_health_score": 72
	})
	.to_string()
}

#[test]
fn parses_a_strict_json_reply() {
	let parsed = parse_reply::<Recommendations>(&sample_reply_json());

	let recommendations = parsed.expect("strict JSON should parse");
	assert_eq!(recommendations.overall_financial_health_score, 72.0);
	assert_eq!(recommendations.short_term_suggestions.len(), 1);
}

#[test]
fn parses_json_wrapped_in_prose_and_code_fences() {
	let reply = format!(
		"Here is your personalized plan:\n```json\n{}\n```\nStay disciplined!",
		sample_reply_json()
	);

	let parsed = parse_reply::<Recommendations>(&reply);

	assert_eq!(parsed.expect("embedded JSON should parse").overall_financial_health_score, 72.0);
}

#[test]
fn brace_scan_handles_nesting_and_braces_inside_strings() {
	let text = r#"noise {"a": "curly } in a string", "b": {"c": 1}} trailing"#;

	let span = balanced_brace_span(text).expect("span should be found");

	assert_eq!(span, r#"{"a": "curly } in a string", "b": {"c": 1}}"#);
}

#[test]
fn unusable_replies_yield_none() {
	assert!(parse_reply::<Recommendations>("no structured content here").is_none());
	assert!(parse_reply::<Recommendations>("{ \"short_term_suggestions\": [").is_none());
	// Well-formed JSON of the wrong shape is rejected too.
	assert!(parse_reply::<Recommendations>("{\"foo\": 1}").is_none());
}

#[test]
fn fallbacks_share_the_shape_but_not_the_wording() {
	let unparsable = unparsable_fallback();
	let unavailable = unavailable_fallback();

	for payload in [&unparsable, &unavailable] {
		assert_eq!(payload.overall_financial_health_score, 50.0);
		assert_eq!(payload.short_term_suggestions.len(), 1);
		assert_eq!(payload.medium_term_suggestions.len(), 1);
		assert_eq!(payload.long_term_suggestions.len(), 1);
		assert_eq!(payload.expense_reduction_opportunities.len(), 1);
		assert_eq!(payload.personalized_goal_plans.len(), 1);
	}
	assert_ne!(unparsable.short_term_suggestions, unavailable.short_term_suggestions);
}

#[test]
fn goal_plan_fallback_is_empty_but_well_formed() {
	let plan = goal_plan_fallback();

	assert!(plan.goal_allocation_plan.is_empty());
	assert!(plan.timeline_summary.contains("financial advisor"));
	assert!(plan.investment_recommendations.is_empty());
}

#[test]
fn goal_plan_replies_parse_like_recommendations() {
	let reply = r#"{
		"goal_allocation_plan": [{
			"goal_name": "House deposit",
			"monthly_contribution": 400,
			"estimated_timeline_months": 24,
			"investment_strategy": "High-yield savings"
		}],
		"timeline_summary": "Two years to the deposit.",
		"investment_recommendations": ["Keep three months of expenses liquid"],
		"trade_off_analysis": "Car replacement slips by a year.",
		"income_expense_optimization": ["Renegotiate the phone contract"]
	}"#;

	let plan = parse_reply::<GoalPlan>(reply).expect("goal plan should parse");

	assert_eq!(plan.goal_allocation_plan.len(), 1);
	assert_eq!(plan.goal_allocation_plan[0].monthly_contribution, 400.0);
}

#[test]
fn recommendation_prompt_carries_the_snapshot_figures() {
	let snapshot = Snapshot {
		monthly_income: 4321.5,
		monthly_expenses: 1234.5,
		net_worth: 3087.0,
		total_assets: 99000.0,
		category_expenses: vec![NamedValue { name: "Groceries".to_string(), value: 640.0 }],
		goals: vec![TestFixtures::goal("House deposit", 25000.0)],
		assets: vec![],
	};

	let prompt = recommendation_prompt(&snapshot);

	assert!(prompt.contains("4321.5"));
	assert!(prompt.contains("1234.5"));
	assert!(prompt.contains("Groceries"));
	assert!(prompt.contains("House deposit"));
	assert!(prompt.contains("overall_financial_health_score"));
}

#[test]
fn goal_plan_prompt_floors_available_savings_at_zero() {
	let goals = vec![TestFixtures::goal("Emergency fund", 5000.0)];

	let prompt = goal_plan_prompt(&goals, 1000.0, 1500.0);

	assert!(prompt.contains("Available Monthly Savings: 0"));
	assert!(prompt.contains("Emergency fund"));
	assert!(prompt.contains("Target amount 5000"));
}
