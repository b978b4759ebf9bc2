use std::cmp::Ordering;
use std::collections::HashMap;

use super::data::{aggregate_rows, apply_sort_limit};
use super::format::format_value;
use super::text::text_width;
use super::{
    empty_chart, palette_color, title_block, value_format, ChartVisual, PieChart, PieLegendItem,
    SliceMark,
};
use crate::config::LayoutConfig;
use crate::model::{Aggregation, ChartConfig, DataRow};
use crate::theme::Theme;

pub(super) fn compute_pie_chart(
    chart: &ChartConfig,
    rows: &[DataRow],
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    let pie_cfg = &config.pie;
    let options = &chart.config;
    let Some(label_axis) = options.x_axis.as_ref() else {
        return empty_chart(chart, theme, config, "No label column configured");
    };
    let value_column = options.y_axis.as_ref().map(|axis| axis.column.as_str());
    let aggregation = options
        .y_axis
        .as_ref()
        .and_then(|axis| axis.aggregation)
        .unwrap_or(if value_column.is_none() {
            Aggregation::Count
        } else {
            Aggregation::Sum
        });

    let grouped = aggregate_rows(rows, &label_axis.column, value_column, aggregation);
    if grouped.is_empty() {
        return empty_chart(chart, theme, config, "No data for the configured columns");
    }
    let entries = apply_sort_limit(grouped, options.sort, options.limit);
    let format = value_format(options);

    let mut color_map: HashMap<String, String> = HashMap::new();
    let mut color_index: usize = 0;
    let mut resolve_color = |label: &str| -> String {
        if let Some(color) = color_map.get(label) {
            return color.clone();
        }
        let color = palette_color(options, theme, color_index).to_string();
        color_index += 1;
        color_map.insert(label.to_string(), color.clone());
        color
    };

    let total: f64 = entries.iter().map(|(_, value)| value.max(0.0)).sum();
    if total <= 0.0 {
        return empty_chart(chart, theme, config, "No positive values to chart");
    }

    // Slices below the percent floor stay out of the wheel but keep their
    // legend entry.
    let mut wheel: Vec<(usize, f64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, (_, value))| {
            let value = value.max(0.0);
            let percent = value / total * 100.0;
            (percent >= pie_cfg.min_percent as f64).then_some((index, value))
        })
        .collect();
    wheel.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut slices = Vec::with_capacity(wheel.len());
    let mut angle = 0.0_f32;
    for (index, value) in &wheel {
        let span = (*value / total * std::f64::consts::TAU) as f32;
        let label = entries[*index].0.clone();
        let color = resolve_color(&label);
        slices.push(SliceMark {
            label,
            value: *value,
            start_angle: angle,
            end_angle: angle + span,
            color,
        });
        angle += span;
    }

    let title = title_block(chart, theme);
    let title_height = if title.is_some() { 28.0 } else { 0.0 };
    let height = pie_cfg.height.max(1.0) + title_height;
    let radius = (pie_cfg.height / 2.0 - pie_cfg.margin).max(1.0);
    let center_x = pie_cfg.height / 2.0;
    let center_y = title_height + pie_cfg.height / 2.0;
    let legend_x = center_x + radius + pie_cfg.margin * 0.6;

    let legend_item_height = pie_cfg.legend_rect_size + pie_cfg.legend_spacing;
    let legend_offset = legend_item_height * entries.len() as f32 / 2.0;
    let mut legend = Vec::with_capacity(entries.len());
    let mut legend_width: f32 = 0.0;
    for (index, (label, value)) in entries.iter().enumerate() {
        let text = format!("{} [{}]", label, format_value(*value, format));
        legend_width = legend_width.max(text_width(&text, theme.font_size));
        let color = resolve_color(label);
        legend.push(PieLegendItem {
            x: legend_x,
            y: center_y + index as f32 * legend_item_height - legend_offset,
            label: text,
            color,
            marker_size: pie_cfg.legend_rect_size,
        });
    }

    let width = legend_x
        + pie_cfg.legend_rect_size
        + pie_cfg.legend_spacing
        + legend_width
        + pie_cfg.margin * 0.4;
    let hole_radius = if options.doughnut {
        radius * pie_cfg.doughnut_hole_ratio
    } else {
        0.0
    };

    ChartVisual::Pie(PieChart {
        width: width.max(200.0),
        height,
        center: (center_x, center_y),
        radius,
        hole_radius,
        title,
        slices,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn share_chart(doughnut: bool) -> ChartConfig {
        serde_json::from_value(json!({
            "type": "pie",
            "title": "Revenue share",
            "config": {
                "xAxis": {"column": "segment"},
                "yAxis": {"column": "revenue", "aggregation": "sum"},
                "doughnut": doughnut
            }
        }))
        .unwrap()
    }

    fn share_rows() -> Vec<DataRow> {
        serde_json::from_value(json!([
            {"segment": "Enterprise", "revenue": 60},
            {"segment": "SMB", "revenue": 30},
            {"segment": "Self-serve", "revenue": 10}
        ]))
        .unwrap()
    }

    #[test]
    fn slice_angles_cover_the_full_circle() {
        let visual = compute_pie_chart(
            &share_chart(false),
            &share_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Pie(pie) = visual else {
            panic!("expected pie visual");
        };
        assert_eq!(pie.slices.len(), 3);
        let last = pie.slices.last().unwrap();
        assert_relative_eq!(last.end_angle, std::f32::consts::TAU, epsilon = 1e-4);
        // Largest slice first.
        assert_eq!(pie.slices[0].label, "Enterprise");
        assert_relative_eq!(
            pie.slices[0].end_angle - pie.slices[0].start_angle,
            std::f32::consts::TAU * 0.6,
            epsilon = 1e-4
        );
        assert!((pie.hole_radius - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn doughnut_gets_a_hole_and_legend_keeps_small_slices() {
        let mut rows = share_rows();
        let tiny: DataRow =
            serde_json::from_value(json!({"segment": "Trial", "revenue": 0.1})).unwrap();
        rows.push(tiny);
        let visual = compute_pie_chart(
            &share_chart(true),
            &rows,
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Pie(pie) = visual else {
            panic!("expected pie visual");
        };
        // Trial is under the 1% floor: no slice, still in the legend.
        assert_eq!(pie.slices.len(), 3);
        assert_eq!(pie.legend.len(), 4);
        assert!(pie.hole_radius > 0.0);
        assert!(pie.legend.iter().any(|item| item.label.starts_with("Trial")));
    }

    #[test]
    fn colors_are_stable_between_wheel_and_legend() {
        let visual = compute_pie_chart(
            &share_chart(false),
            &share_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Pie(pie) = visual else {
            panic!("expected pie visual");
        };
        for slice in &pie.slices {
            let legend = pie
                .legend
                .iter()
                .find(|item| item.label.starts_with(&slice.label))
                .unwrap();
            assert_eq!(legend.color, slice.color);
        }
    }

    #[test]
    fn all_negative_values_degrade_to_empty() {
        let rows: Vec<DataRow> = serde_json::from_value(json!([
            {"segment": "A", "revenue": -5}
        ]))
        .unwrap();
        let visual = compute_pie_chart(
            &share_chart(false),
            &rows,
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        assert!(matches!(visual, ChartVisual::Empty(_)));
    }
}
