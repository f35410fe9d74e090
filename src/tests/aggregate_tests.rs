use crate::aggregate::{assemble_dashboard, month_label, round2, summarize, trailing_months};
use crate::tests::fixtures::TestFixtures;

#[test]
fn net_worth_is_income_minus_expenses_before_rounding() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::income(2500.75, TestFixtures::at(2024, 5, 1)),
		TestFixtures::expense(120.25, "Food", TestFixtures::at(2024, 5, 3)),
		TestFixtures::expense(80.10, "Transport", TestFixtures::at(2024, 6, 2)),
		TestFixtures::income(99.99, TestFixtures::at(2024, 6, 7)),
	];

	let summary = summarize(&transactions, now);

	assert_eq!(summary.net_worth, summary.total_income - summary.total_expenses);
	assert_eq!(summary.total_income, 2500.75 + 99.99);
	assert_eq!(summary.total_expenses, 120.25 + 80.10);
}

#[test]
fn category_totals_sum_to_total_expenses() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::expense(10.10, "Food", TestFixtures::at(2024, 4, 1)),
		TestFixtures::expense(20.20, "Rent", TestFixtures::at(2024, 4, 2)),
		TestFixtures::expense(30.30, "Food", TestFixtures::at(2024, 5, 3)),
		TestFixtures::income(500.0, TestFixtures::at(2024, 5, 4)),
	];

	let summary = summarize(&transactions, now);

	let category_sum: f64 = summary.category_expenses.iter().map(|c| c.value).sum();
	assert!((category_sum - summary.total_expenses).abs() < 1e-9);
}

#[test]
fn categories_keep_first_seen_order_and_case() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::expense(5.0, "Food", TestFixtures::at(2024, 6, 1)),
		TestFixtures::expense(7.0, "Rent", TestFixtures::at(2024, 6, 2)),
		TestFixtures::expense(3.0, "food", TestFixtures::at(2024, 6, 3)),
		TestFixtures::expense(1.0, "Food", TestFixtures::at(2024, 6, 4)),
	];

	let summary = summarize(&transactions, now);

	let names: Vec<&str> = summary.category_expenses.iter().map(|c| c.name.as_str()).collect();
	assert_eq!(names, vec!["Food", "Rent", "food"]);
	assert_eq!(summary.category_expenses[0].value, 6.0);
	assert_eq!(summary.category_expenses[2].value, 3.0);
}

#[test]
fn empty_input_yields_zeroed_six_month_series() {
	let now = TestFixtures::at(2024, 6, 15);

	let summary = summarize(&[], now);

	assert_eq!(summary.total_income, 0.0);
	assert_eq!(summary.total_expenses, 0.0);
	assert_eq!(summary.net_worth, 0.0);
	assert!(summary.category_expenses.is_empty());
	assert_eq!(summary.monthly_series.len(), 6);
	let labels: Vec<&str> = summary.monthly_series.iter().map(|p| p.name.as_str()).collect();
	assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
	assert!(summary.monthly_series.iter().all(|p| p.value == 0.0));
}

#[test]
fn series_accumulates_net_change_across_the_window() {
	let now = TestFixtures::at(2024, 2, 20);
	let transactions = vec![
		TestFixtures::income(1000.0, TestFixtures::at(2024, 1, 5)),
		TestFixtures::expense(200.0, "Food", TestFixtures::at(2024, 1, 12)),
		TestFixtures::income(1000.0, TestFixtures::at(2024, 2, 5)),
		TestFixtures::expense(300.0, "Food", TestFixtures::at(2024, 2, 12)),
	];

	let summary = summarize(&transactions, now);

	assert_eq!(summary.total_income, 2000.0);
	assert_eq!(summary.total_expenses, 500.0);
	assert_eq!(summary.net_worth, 1500.0);
	assert_eq!(summary.category_expenses.len(), 1);
	assert_eq!(summary.category_expenses[0].name, "Food");
	assert_eq!(summary.category_expenses[0].value, 500.0);

	let labels: Vec<&str> = summary.monthly_series.iter().map(|p| p.name.as_str()).collect();
	assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
	let values: Vec<f64> = summary.monthly_series.iter().map(|p| p.value).collect();
	assert_eq!(values, vec![0.0, 0.0, 0.0, 0.0, 800.0, 1500.0]);
}

#[test]
fn transactions_before_the_window_do_not_seed_the_running_total() {
	let now = TestFixtures::at(2024, 1, 15);
	let transactions = vec![
		// July 2023 sits just outside the Aug 2023 - Jan 2024 window.
		TestFixtures::income(5000.0, TestFixtures::at(2023, 7, 1)),
		TestFixtures::income(100.0, TestFixtures::at(2023, 8, 1)),
	];

	let summary = summarize(&transactions, now);

	assert_eq!(summary.monthly_series[0].value, 100.0);
	assert_eq!(summary.monthly_series[5].value, 100.0);
	// The excluded month still counts toward the overall totals.
	assert_eq!(summary.total_income, 5100.0);
}

#[test]
fn window_labels_cross_a_year_boundary() {
	let now = TestFixtures::at(2024, 1, 15);

	let months = trailing_months(now);

	assert_eq!(months.len(), 6);
	assert_eq!(months[0], (2023, 8));
	assert_eq!(months[5], (2024, 1));
	let labels: Vec<&str> = months.iter().map(|(_, m)| month_label(*m)).collect();
	assert_eq!(labels, vec!["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
}

#[test]
fn summarize_is_idempotent() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::income(1234.56, TestFixtures::at(2024, 3, 1)),
		TestFixtures::expense(78.90, "Food", TestFixtures::at(2024, 4, 1)),
	];

	assert_eq!(summarize(&transactions, now), summarize(&transactions, now));
}

#[test]
fn series_values_are_rounded_to_two_decimals() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::income(0.1, TestFixtures::at(2024, 6, 1)),
		TestFixtures::income(0.2, TestFixtures::at(2024, 6, 2)),
	];

	let summary = summarize(&transactions, now);

	// 0.1 + 0.2 leaves float residue; the rendered point must not.
	assert_eq!(summary.monthly_series[5].value, 0.3);
	assert_eq!(round2(summary.total_income), 0.3);
}

#[test]
fn dashboard_assembly_rounds_totals_and_attaches_user_name() {
	let now = TestFixtures::at(2024, 6, 15);
	let transactions = vec![
		TestFixtures::income(0.1, TestFixtures::at(2024, 6, 1)),
		TestFixtures::income(0.2, TestFixtures::at(2024, 6, 2)),
		TestFixtures::expense(0.015, "Food", TestFixtures::at(2024, 6, 3)),
	];

	let summary = summarize(&transactions, now);
	let dashboard = assemble_dashboard(summary, "Ada".to_string());

	assert_eq!(dashboard.monthly_income, 0.3);
	assert_eq!(dashboard.monthly_expenses, 0.02);
	assert_eq!(dashboard.net_worth, 0.29);
	assert_eq!(dashboard.user_name, "Ada");
	assert_eq!(dashboard.monthly_series.len(), 6);
}

#[test]
fn month_labels_cover_the_calendar() {
	assert_eq!(month_label(1), "Jan");
	assert_eq!(month_label(6), "Jun");
	assert_eq!(month_label(12), "Dec");
}
