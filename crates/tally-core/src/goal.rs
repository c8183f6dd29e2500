//! Goal comparison: budget ceilings and revenue floors

use rust_decimal::Decimal;

use crate::models::{GoalDirection, GoalStatus, GoalTarget, SummaryResult};

/// Compare a summary's relevant total against a goal.
///
/// Under a `Ceiling` goal the relevant total is the spending magnitude
/// `|total_expense|` and the goal is met while it stays at or below the
/// target. Under a `Floor` goal the relevant total is `total_income`
/// (revenue) and the goal is met once it reaches the target.
///
/// A target of zero is defined as fully used (`percent_used = 1`); the
/// division guard is a rule, never an error.
pub fn compare_to_goal(summary: &SummaryResult, goal: &GoalTarget) -> GoalStatus {
    let relevant_total = match goal.direction {
        GoalDirection::Ceiling => summary.total_expense.abs(),
        GoalDirection::Floor => summary.total_income,
    };

    let met = match goal.direction {
        GoalDirection::Ceiling => relevant_total <= goal.target,
        GoalDirection::Floor => relevant_total >= goal.target,
    };

    let percent_used = if goal.target > Decimal::ZERO {
        (relevant_total / goal.target).min(Decimal::ONE)
    } else {
        Decimal::ONE
    };

    GoalStatus {
        delta: relevant_total - goal.target,
        met,
        percent_used,
    }
}
