use super::format::format_value;
use super::{
    build_scaffold, build_series_table, empty_chart, palette_color, value_format, CartesianChart,
    ChartVisual, LineMark, PointMark,
};
use crate::config::LayoutConfig;
use crate::model::{ChartConfig, DataRow};
use crate::theme::Theme;

pub(super) fn compute_line_chart(
    chart: &ChartConfig,
    rows: &[DataRow],
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    let options = &chart.config;
    let Some(table) = build_series_table(options, rows) else {
        return empty_chart(chart, theme, config, "No data for the configured columns");
    };
    let scaffold = build_scaffold(&table, chart, theme, config);
    let format = value_format(options);
    let fill_baseline = options
        .fill
        .then_some(scaffold.plot.y + scaffold.plot.height);

    let mut lines = Vec::with_capacity(table.series.len());
    let mut points = Vec::new();
    for (series_index, series) in table.series.iter().enumerate() {
        let color = palette_color(options, theme, series_index).to_string();
        let mut series_points = Vec::with_capacity(series.values.len());
        for (category_index, value) in series.values.iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            let x = scaffold.plot.x
                + category_index as f32 * scaffold.x_slot
                + scaffold.x_slot / 2.0;
            let y = scaffold.y_for(*value);
            series_points.push((x, y));
            if options.show_points {
                let category = &table.categories[category_index];
                let tooltip = match &series.name {
                    Some(name) => {
                        format!("{name} · {category}: {}", format_value(*value, format))
                    }
                    None => format!("{category}: {}", format_value(*value, format)),
                };
                points.push(PointMark {
                    x,
                    y,
                    radius: config.cartesian.point_radius,
                    color: color.clone(),
                    tooltip,
                });
            }
        }
        lines.push(LineMark {
            points: series_points,
            color,
            fill_baseline,
        });
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
        bars: Vec::new(),
        lines,
        points,
        legend: scaffold.legend,
    })
}
