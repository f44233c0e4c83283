use budgetflow_core::{BudgetSnapshot, normalize_budget};
use serde_json::json;

#[test]
fn normalized_budget_matches_expected_json() {
    let snapshot: BudgetSnapshot = serde_json::from_value(json!({
        "incomeSources": [
            { "name": "Salary", "value": 2400.0 },
            { "name": "Freelance", "value": 600.0 }
        ],
        "expenseCategories": { "Rent": 1100.0, "Groceries": 450.0, "Transport": 0.0 },
        "savings": 300.0,
        "remaining": 1150.0
    }))
    .expect("snapshot json");

    let normalized = normalize_budget(&snapshot).expect("normalize ok");
    let got = serde_json::to_value(&normalized).expect("serialize");
    assert_eq!(
        got,
        json!({
            "incomeSources": [
                { "name": "Salary", "value": 2400.0 },
                { "name": "Freelance", "value": 600.0 }
            ],
            "destinations": [
                { "name": "Rent", "value": 1100.0, "color": "#4e79a7", "kind": "expense" },
                { "name": "Groceries", "value": 450.0, "color": "#f28e2c", "kind": "expense" },
                { "name": "Savings", "value": 300.0, "color": "#3b82f6", "kind": "savings" },
                { "name": "Remaining", "value": 1150.0, "color": "#22c55e", "kind": "remaining" }
            ],
            "totalIncome": 3000.0,
            "totalAllocated": 1850.0
        })
    );
}

#[test]
fn over_budget_snapshot_reports_overflow_amount() {
    let snapshot: BudgetSnapshot = serde_json::from_value(json!({
        "incomeSources": [{ "name": "Salary", "value": 1000.0 }],
        "expenseCategories": { "Rent": 400.0, "Food": 300.0 },
        "savings": 400.0,
        "remaining": 0.0
    }))
    .expect("snapshot json");

    let normalized = normalize_budget(&snapshot).expect("normalize ok");
    let names: Vec<_> = normalized
        .destinations
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rent", "Food", "Savings", "Over Budget"]);
    assert!((normalized.over_budget_amount() - 100.0).abs() < 1e-9);
}
