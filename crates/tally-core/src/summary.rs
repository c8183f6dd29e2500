//! Aggregate summaries over a filtered record set

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::{DayTotal, GroupTotal, SummaryResult, TransactionRecord};
use crate::schema::SchemaKind;

/// How many groups the ranked list keeps
const TOP_GROUP_LIMIT: usize = 10;

/// Compute the aggregate summary for a set of records.
///
/// Finance records split by sign into income and expense; retail records
/// all count as revenue (which lands in `total_income`) and their unit
/// counts are summed. Totals are order-independent; only `top_groups`
/// tie-breaking references input order, and only for exactly-equal sums.
pub fn summarize(records: &[TransactionRecord], kind: SchemaKind) -> SummaryResult {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut total_units = 0i64;

    // Group totals carry the first-seen position so equal sums order
    // deterministically instead of leaning on sort stability
    let mut groups: HashMap<&str, (usize, Decimal)> = HashMap::new();
    let mut by_date: BTreeMap<chrono::NaiveDate, Decimal> = BTreeMap::new();

    for record in records {
        match kind {
            SchemaKind::Finance => {
                if record.amount > Decimal::ZERO {
                    total_income += record.amount;
                } else {
                    total_expense += record.amount;
                }
            }
            SchemaKind::Retail => {
                total_income += record.amount;
            }
        }
        total_units += record.quantity;

        let next_index = groups.len();
        let entry = groups
            .entry(record.group.as_str())
            .or_insert((next_index, Decimal::ZERO));
        entry.1 += record.amount;

        if let Some(date) = record.date {
            *by_date.entry(date).or_insert(Decimal::ZERO) += record.amount;
        }
    }

    let mut top_groups: Vec<(usize, GroupTotal)> = groups
        .into_iter()
        .map(|(key, (first_seen, total))| {
            (
                first_seen,
                GroupTotal {
                    key: key.to_string(),
                    total,
                },
            )
        })
        .collect();
    top_groups.sort_unstable_by(|(a_seen, a), (b_seen, b)| {
        b.total.cmp(&a.total).then(a_seen.cmp(b_seen))
    });
    top_groups.truncate(TOP_GROUP_LIMIT);

    let cash_flow = by_date
        .into_iter()
        .map(|(date, total)| DayTotal { date, total })
        .collect();

    SummaryResult {
        schema: kind,
        total_income,
        total_expense,
        net_balance: total_income + total_expense,
        total_units,
        top_groups: top_groups.into_iter().map(|(_, g)| g).collect(),
        cash_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn finance_record(group: &str, amount: Decimal) -> TransactionRecord {
        TransactionRecord {
            date: None,
            group: group.to_string(),
            description: None,
            amount,
            quantity: 1,
        }
    }

    fn retail_record(group: &str, quantity: i64, unit_price: Decimal) -> TransactionRecord {
        TransactionRecord {
            date: None,
            group: group.to_string(),
            description: None,
            amount: Decimal::from(quantity) * unit_price,
            quantity,
        }
    }

    #[test]
    fn test_finance_sign_split() {
        let records = vec![
            finance_record("Food", dec!(-50)),
            finance_record("Food", dec!(-30)),
            finance_record("Pay", dec!(500)),
        ];

        let summary = summarize(&records, SchemaKind::Finance);
        assert_eq!(summary.total_income, dec!(500));
        assert_eq!(summary.total_expense, dec!(-80));
        assert_eq!(summary.net_balance, dec!(420));
    }

    #[test]
    fn test_retail_revenue_and_units() {
        let records = vec![
            retail_record("UK", 2, dec!(10)),
            retail_record("FR", 1, dec!(5)),
        ];

        let summary = summarize(&records, SchemaKind::Retail);
        assert_eq!(summary.total_income, dec!(25));
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.total_units, 3);
    }

    #[test]
    fn test_order_independent_totals() {
        let forward = vec![
            finance_record("A", dec!(-10.10)),
            finance_record("B", dec!(20.20)),
            finance_record("C", dec!(-30.30)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = summarize(&forward, SchemaKind::Finance);
        let b = summarize(&reversed, SchemaKind::Finance);
        assert_eq!(a.total_income, b.total_income);
        assert_eq!(a.total_expense, b.total_expense);
        assert_eq!(a.net_balance, b.net_balance);
        assert_eq!(a.top_groups, b.top_groups);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            finance_record("Food", dec!(-50)),
            finance_record("Pay", dec!(500)),
        ];
        assert_eq!(
            summarize(&records, SchemaKind::Finance),
            summarize(&records, SchemaKind::Finance)
        );
    }

    #[test]
    fn test_top_groups_capped_and_descending() {
        let records: Vec<TransactionRecord> = (0..15)
            .map(|i| finance_record(&format!("G{:02}", i), Decimal::from(i * 10)))
            .collect();

        let summary = summarize(&records, SchemaKind::Finance);
        assert_eq!(summary.top_groups.len(), 10);
        for pair in summary.top_groups.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
        assert_eq!(summary.top_groups[0].key, "G14");
    }

    #[test]
    fn test_top_groups_ties_keep_first_seen_order() {
        let records = vec![
            finance_record("Zeta", dec!(5)),
            finance_record("Alpha", dec!(5)),
            finance_record("Mid", dec!(7)),
        ];

        let summary = summarize(&records, SchemaKind::Finance);
        let keys: Vec<&str> = summary.top_groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Mid", "Zeta", "Alpha"]);
    }

    #[test]
    fn test_cash_flow_groups_by_date_ascending() {
        let jan_2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let jan_5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let mut records = vec![
            finance_record("Food", dec!(-10)),
            finance_record("Food", dec!(-20)),
            finance_record("Pay", dec!(100)),
        ];
        records[0].date = Some(jan_5);
        records[1].date = Some(jan_2);
        records[2].date = Some(jan_5);

        let summary = summarize(&records, SchemaKind::Finance);
        assert_eq!(
            summary.cash_flow,
            vec![
                DayTotal { date: jan_2, total: dec!(-20) },
                DayTotal { date: jan_5, total: dec!(90) },
            ]
        );
    }

    #[test]
    fn test_undated_records_absent_from_cash_flow() {
        let records = vec![finance_record("Food", dec!(-10))];
        let summary = summarize(&records, SchemaKind::Finance);
        assert!(summary.cash_flow.is_empty());
        assert_eq!(summary.total_expense, dec!(-10));
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&[], SchemaKind::Finance);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.net_balance, Decimal::ZERO);
        assert!(summary.top_groups.is_empty());
        assert!(summary.cash_flow.is_empty());
    }

    #[test]
    fn test_exact_cent_accumulation() {
        // 0.1 + 0.2 style sums stay exact under decimal arithmetic
        let records = vec![
            finance_record("A", dec!(0.10)),
            finance_record("A", dec!(0.20)),
            finance_record("A", dec!(0.30)),
        ];
        let summary = summarize(&records, SchemaKind::Finance);
        assert_eq!(summary.total_income, dec!(0.60));
    }
}
