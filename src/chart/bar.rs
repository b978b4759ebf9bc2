use super::format::format_value;
use super::{
    build_scaffold, build_series_table, empty_chart, palette_color, title_block, value_format,
    BarMark, CartesianChart, ChartVisual, PlotFrame, Tick,
};
use crate::config::LayoutConfig;
use crate::model::{ChartConfig, DataRow};
use crate::theme::Theme;

pub(super) fn compute_bar_chart(
    chart: &ChartConfig,
    rows: &[DataRow],
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    let options = &chart.config;
    let Some(table) = build_series_table(options, rows) else {
        return empty_chart(chart, theme, config, "No data for the configured columns");
    };
    if options.horizontal {
        return compute_horizontal(chart, &table, theme, config);
    }

    let scaffold = build_scaffold(&table, chart, theme, config);
    let format = value_format(options);
    let group_padding = scaffold.x_slot * config.bar.group_padding_ratio;
    let bar_width = ((scaffold.x_slot - group_padding * 2.0) / table.series.len() as f32).max(1.0);
    let baseline = scaffold.y_for(scaffold.y_min);

    let mut bars = Vec::new();
    for (series_index, series) in table.series.iter().enumerate() {
        let color = palette_color(options, theme, series_index).to_string();
        for (category_index, value) in series.values.iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            let top = scaffold.y_for(*value);
            let x = scaffold.plot.x
                + category_index as f32 * scaffold.x_slot
                + group_padding
                + series_index as f32 * bar_width;
            let category = &table.categories[category_index];
            let tooltip = match &series.name {
                Some(name) => format!("{name} · {category}: {}", format_value(*value, format)),
                None => format!("{category}: {}", format_value(*value, format)),
            };
            bars.push(BarMark {
                x,
                y: top.min(baseline),
                width: bar_width,
                height: (baseline - top).abs(),
                color: color.clone(),
                corner_radius: config.bar.corner_radius,
                tooltip,
            });
        }
    }

    ChartVisual::Cartesian(CartesianChart {
        width: scaffold.width,
        height: scaffold.height,
        plot: scaffold.plot,
        title: scaffold.title,
        x_ticks: scaffold.x_ticks,
        y_ticks: scaffold.y_ticks,
        gridlines: scaffold.gridlines,
        horizontal_grid: true,
        bars,
        lines: Vec::new(),
        points: Vec::new(),
        legend: scaffold.legend,
    })
}

// Categories run down the y axis, values along x. Laid out directly rather
// than through the vertical scaffold.
fn compute_horizontal(
    chart: &ChartConfig,
    table: &super::SeriesTable,
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    let cartesian = &config.cartesian;
    let options = &chart.config;
    let format = value_format(options);

    let title = title_block(chart, theme);
    let title_height = if title.is_some() {
        cartesian.title_height
    } else {
        0.0
    };

    let plot = PlotFrame {
        x: cartesian.padding + cartesian.y_axis_width,
        y: cartesian.padding + title_height,
        width: cartesian.plot_width,
        height: cartesian.plot_height,
    };
    let width = cartesian.padding * 2.0 + cartesian.y_axis_width + cartesian.plot_width;
    let height = cartesian.padding * 2.0
        + title_height
        + cartesian.plot_height
        + cartesian.x_axis_height;

    let all_values = table
        .series
        .iter()
        .flat_map(|series| series.values.iter().flatten().copied());
    let min = all_values.clone().fold(0.0_f64, f64::min).min(0.0);
    let max = all_values.fold(0.0_f64, f64::max);
    let range = (max - min).max(1.0);
    let x_for = |value: f64| plot.x + (((value - min) / range) as f32) * plot.width;

    let tick_count = cartesian.tick_count.max(1);
    let mut x_ticks = Vec::with_capacity(tick_count + 1);
    let mut gridlines = Vec::with_capacity(tick_count + 1);
    for step in 0..=tick_count {
        let fraction = step as f64 / tick_count as f64;
        let value = min + fraction * range;
        let x = plot.x + (fraction as f32) * plot.width;
        x_ticks.push(Tick {
            label: format_value(value, format),
            x,
            y: plot.y + plot.height + theme.font_size + 6.0,
        });
        gridlines.push(x);
    }

    let y_slot = plot.height / table.categories.len().max(1) as f32;
    let y_ticks: Vec<Tick> = table
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| Tick {
            label: category.clone(),
            x: plot.x - 8.0,
            y: plot.y + index as f32 * y_slot + y_slot / 2.0,
        })
        .collect();

    let group_padding = y_slot * config.bar.group_padding_ratio;
    let bar_height = ((y_slot - group_padding * 2.0) / table.series.len() as f32).max(1.0);
    let baseline = x_for(min);

    let mut bars = Vec::new();
    for (series_index, series) in table.series.iter().enumerate() {
        let color = palette_color(options, theme, series_index).to_string();
        for (category_index, value) in series.values.iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            let end = x_for(*value);
            let y = plot.y
                + category_index as f32 * y_slot
                + group_padding
                + series_index as f32 * bar_height;
            let category = &table.categories[category_index];
            let tooltip = match &series.name {
                Some(name) => format!("{name} · {category}: {}", format_value(*value, format)),
                None => format!("{category}: {}", format_value(*value, format)),
            };
            bars.push(BarMark {
                x: baseline.min(end),
                y,
                width: (end - baseline).abs(),
                height: bar_height,
                color: color.clone(),
                corner_radius: config.bar.corner_radius,
                tooltip,
            });
        }
    }

    let legend = super::build_legend(table, options, theme);

    ChartVisual::Cartesian(CartesianChart {
        width,
        height,
        plot,
        title,
        x_ticks,
        y_ticks,
        gridlines,
        horizontal_grid: false,
        bars,
        lines: Vec::new(),
        points: Vec::new(),
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn region_chart(extra: serde_json::Value) -> ChartConfig {
        let mut base = json!({
            "type": "bar",
            "config": {
                "xAxis": {"column": "region"},
                "yAxis": {"column": "sales", "aggregation": "sum"}
            }
        });
        if let (Some(config), Some(extra)) = (
            base.get_mut("config").and_then(|c| c.as_object_mut()),
            extra.as_object(),
        ) {
            for (key, value) in extra {
                config.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    fn region_rows() -> Vec<DataRow> {
        serde_json::from_value(json!([
            {"region": "NA", "sales": 120, "year": "2023"},
            {"region": "EU", "sales": 80, "year": "2023"},
            {"region": "NA", "sales": 150, "year": "2024"},
            {"region": "EU", "sales": 95, "year": "2024"}
        ]))
        .unwrap()
    }

    #[test]
    fn one_bar_per_category_for_single_series() {
        let visual = compute_bar_chart(
            &region_chart(json!({})),
            &region_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Cartesian(cartesian) = visual else {
            panic!("expected cartesian visual");
        };
        assert_eq!(cartesian.bars.len(), 2);
        assert!(cartesian.legend.is_empty());
        let na = &cartesian.bars[0];
        let eu = &cartesian.bars[1];
        assert!(na.height > eu.height, "larger total should draw taller");
    }

    #[test]
    fn split_series_produces_grouped_bars_and_legend() {
        let visual = compute_bar_chart(
            &region_chart(json!({"seriesColumn": "year"})),
            &region_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Cartesian(cartesian) = visual else {
            panic!("expected cartesian visual");
        };
        assert_eq!(cartesian.bars.len(), 4);
        assert_eq!(cartesian.legend.len(), 2);
        // Bars of one group must not overlap.
        let mut group: Vec<_> = cartesian
            .bars
            .iter()
            .filter(|bar| bar.tooltip.contains("NA"))
            .collect();
        group.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert!(group[0].x + group[0].width <= group[1].x + 0.01);
    }

    #[test]
    fn horizontal_orientation_swaps_axes() {
        let visual = compute_bar_chart(
            &region_chart(json!({"horizontal": true})),
            &region_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Cartesian(cartesian) = visual else {
            panic!("expected cartesian visual");
        };
        assert!(!cartesian.horizontal_grid);
        assert_eq!(cartesian.y_ticks.len(), 2);
        let na = &cartesian.bars[0];
        assert!(na.width > na.height, "horizontal bars extend along x");
    }

    #[test]
    fn explicit_palette_overrides_theme_colors() {
        let visual = compute_bar_chart(
            &region_chart(json!({"palette": ["#123456"]})),
            &region_rows(),
            &Theme::zeno_default(),
            &LayoutConfig::default(),
        );
        let ChartVisual::Cartesian(cartesian) = visual else {
            panic!("expected cartesian visual");
        };
        assert!(cartesian.bars.iter().all(|bar| bar.color == "#123456"));
    }
}
