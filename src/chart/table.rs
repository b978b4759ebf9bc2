use super::data::categorical;
use super::{ChartVisual, EmptyChart, TableGrid};
use crate::config::LayoutConfig;
use crate::model::{ChartConfig, DataRow};

pub(super) fn compute_table_grid(
    chart: &ChartConfig,
    rows: &[DataRow],
    config: &LayoutConfig,
) -> ChartVisual {
    let options = &chart.config;
    let columns: Vec<String> = match &options.columns {
        Some(columns) if !columns.is_empty() => columns.clone(),
        _ => rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default(),
    };
    if columns.is_empty() {
        return ChartVisual::Empty(EmptyChart {
            width: config.cartesian.plot_width,
            height: config.cartesian.plot_height / 2.0,
            title: None,
            message: "No rows to display".to_string(),
        });
    }

    let max_rows = options.max_rows.unwrap_or(config.table.max_rows).max(1);
    let body: Vec<Vec<String>> = rows
        .iter()
        .take(max_rows)
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).and_then(categorical).unwrap_or_default())
                .collect()
        })
        .collect();

    let overflow_note = (rows.len() > max_rows)
        .then(|| format!("Showing {} of {} rows", max_rows, rows.len()));

    ChartVisual::Table(TableGrid {
        columns,
        rows: body,
        overflow_note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_rows(count: usize) -> Vec<DataRow> {
        (0..count)
            .map(|index| {
                serde_json::from_value(json!({
                    "order": format!("ord-{index}"),
                    "total": index * 10
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn infers_columns_from_first_row_in_order() {
        let chart: ChartConfig = serde_json::from_value(json!({"type": "table"})).unwrap();
        let visual = compute_table_grid(&chart, &order_rows(3), &LayoutConfig::default());
        let ChartVisual::Table(table) = visual else {
            panic!("expected table visual");
        };
        assert_eq!(table.columns, vec!["order", "total"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1], vec!["ord-1", "10"]);
        assert!(table.overflow_note.is_none());
    }

    #[test]
    fn truncates_with_overflow_note() {
        let chart: ChartConfig = serde_json::from_value(json!({
            "type": "table",
            "config": {"maxRows": 2}
        }))
        .unwrap();
        let visual = compute_table_grid(&chart, &order_rows(5), &LayoutConfig::default());
        let ChartVisual::Table(table) = visual else {
            panic!("expected table visual");
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.overflow_note.as_deref(), Some("Showing 2 of 5 rows"));
    }

    #[test]
    fn explicit_columns_tolerate_missing_cells() {
        let chart: ChartConfig = serde_json::from_value(json!({
            "type": "table",
            "config": {"columns": ["order", "ghost"]}
        }))
        .unwrap();
        let visual = compute_table_grid(&chart, &order_rows(1), &LayoutConfig::default());
        let ChartVisual::Table(table) = visual else {
            panic!("expected table visual");
        };
        assert_eq!(table.rows[0], vec!["ord-0", ""]);
    }

    #[test]
    fn empty_rowset_degrades() {
        let chart: ChartConfig = serde_json::from_value(json!({"type": "table"})).unwrap();
        let visual = compute_table_grid(&chart, &[], &LayoutConfig::default());
        assert!(matches!(visual, ChartVisual::Empty(_)));
    }
}
