//! Row grouping and aggregation shared by every chart kind.

use crate::model::{Aggregation, DataRow, SortOrder};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;

// Dashboard data often arrives as spreadsheet strings ("$1,234", "12%").
static NUMERIC_NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$€£,%\s]").unwrap());

/// Lenient numeric coercion for row values.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned = NUMERIC_NOISE_RE.replace_all(text.trim(), "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Category label for a row value; `None` for null/compound values.
pub fn categorical(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct GroupAcc {
    rows: usize,
    numeric_count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl GroupAcc {
    fn add(&mut self, value: f64) {
        if self.numeric_count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.numeric_count += 1;
        self.sum += value;
    }

    fn finish(&self, aggregation: Aggregation) -> Option<f64> {
        if aggregation == Aggregation::Count {
            return Some(self.rows as f64);
        }
        if self.numeric_count == 0 {
            return None;
        }
        Some(match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Average => self.sum / self.numeric_count as f64,
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
            Aggregation::Count => unreachable!(),
        })
    }
}

/// Groups rows by `x_column` in first-seen order and reduces `y_column`
/// with `aggregation`. Groups with nothing to aggregate are dropped, so a
/// binding to a column that exists nowhere yields an empty map.
pub fn aggregate_rows<'a>(
    rows: impl IntoIterator<Item = &'a DataRow>,
    x_column: &str,
    y_column: Option<&str>,
    aggregation: Aggregation,
) -> IndexMap<String, f64> {
    let mut groups: IndexMap<String, GroupAcc> = IndexMap::new();
    for row in rows {
        let Some(label) = row.get(x_column).and_then(categorical) else {
            continue;
        };
        let acc = groups.entry(label).or_default();
        acc.rows += 1;
        if let Some(column) = y_column {
            if let Some(value) = row.get(column).and_then(numeric) {
                acc.add(value);
            }
        }
    }
    groups
        .into_iter()
        .filter_map(|(label, acc)| acc.finish(aggregation).map(|value| (label, value)))
        .collect()
}

/// Reduces one column across the whole row set (metric cards).
pub fn aggregate_all<'a>(
    rows: impl IntoIterator<Item = &'a DataRow>,
    column: &str,
    aggregation: Aggregation,
) -> Option<f64> {
    let mut acc = GroupAcc::default();
    for row in rows {
        acc.rows += 1;
        if let Some(value) = row.get(column).and_then(numeric) {
            acc.add(value);
        }
    }
    if acc.rows == 0 {
        return None;
    }
    acc.finish(aggregation)
}

/// Splits rows by a secondary categorical column, first-seen order.
pub fn split_rows<'a>(
    rows: &'a [DataRow],
    series_column: &str,
) -> IndexMap<String, Vec<&'a DataRow>> {
    let mut split: IndexMap<String, Vec<&'a DataRow>> = IndexMap::new();
    for row in rows {
        let Some(name) = row.get(series_column).and_then(categorical) else {
            continue;
        };
        split.entry(name).or_default().push(row);
    }
    split
}

/// Applies optional value ordering and top-N truncation. A bare `limit`
/// implies descending order, matching top-N usage upstream.
pub fn apply_sort_limit(
    pairs: IndexMap<String, f64>,
    sort: Option<SortOrder>,
    limit: Option<usize>,
) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = pairs.into_iter().collect();
    let effective_sort = sort.or(if limit.is_some() {
        Some(SortOrder::Desc)
    } else {
        None
    });
    if let Some(order) = effective_sort {
        entries.sort_by(|a, b| {
            let ordering = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}
