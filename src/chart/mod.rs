mod bar;
pub mod data;
pub mod format;
mod line;
mod metric;
mod pie;
mod table;
pub(crate) mod text;
pub(crate) mod types;

pub use types::*;

use crate::config::LayoutConfig;
use crate::model::{Aggregation, ChartConfig, ChartKind, ChartOptions, DataRow, ValueFormat};
use crate::theme::Theme;
use data::{aggregate_rows, apply_sort_limit, split_rows};
use format::format_value;
use text::measure_label;

const LINE_HEIGHT: f32 = 1.4;

/// Pure mapping from (config, rows) to a visual tree. Total: configs that
/// bind to nothing render as an empty visual instead of failing.
pub fn compute_chart(
    chart: &ChartConfig,
    rows: &[DataRow],
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    match chart.kind {
        ChartKind::Line => line::compute_line_chart(chart, rows, theme, config),
        ChartKind::Bar => bar::compute_bar_chart(chart, rows, theme, config),
        ChartKind::Pie => pie::compute_pie_chart(chart, rows, theme, config),
        ChartKind::Metric => metric::compute_metric_card(chart, rows, theme, config),
        ChartKind::Table => table::compute_table_grid(chart, rows, config),
        ChartKind::Unknown => empty_chart(chart, theme, config, "Unsupported chart type"),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SeriesValues {
    pub name: Option<String>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub(crate) struct SeriesTable {
    pub categories: Vec<String>,
    pub series: Vec<SeriesValues>,
}

/// Groups, aggregates and optionally splits rows into aligned series.
/// `None` means there is nothing to plot (missing bindings or columns).
pub(crate) fn build_series_table(options: &ChartOptions, rows: &[DataRow]) -> Option<SeriesTable> {
    let x_axis = options.x_axis.as_ref()?;
    let y_column = options.y_axis.as_ref().map(|axis| axis.column.as_str());
    let aggregation = options
        .y_axis
        .as_ref()
        .and_then(|axis| axis.aggregation)
        .unwrap_or(if y_column.is_none() {
            Aggregation::Count
        } else {
            Aggregation::Sum
        });

    let totals = aggregate_rows(rows, &x_axis.column, y_column, aggregation);
    if totals.is_empty() {
        return None;
    }
    let ordered = apply_sort_limit(totals, options.sort, options.limit);
    let categories: Vec<String> = ordered.iter().map(|(label, _)| label.clone()).collect();

    let series = match options.series_column.as_deref() {
        None => vec![SeriesValues {
            name: None,
            values: ordered.into_iter().map(|(_, value)| Some(value)).collect(),
        }],
        Some(series_column) => {
            let split = split_rows(rows, series_column);
            if split.is_empty() {
                return None;
            }
            split
                .into_iter()
                .map(|(name, group)| {
                    let pairs = aggregate_rows(
                        group.iter().copied(),
                        &x_axis.column,
                        y_column,
                        aggregation,
                    );
                    SeriesValues {
                        name: Some(name),
                        values: categories
                            .iter()
                            .map(|category| pairs.get(category).copied())
                            .collect(),
                    }
                })
                .collect()
        }
    };

    Some(SeriesTable { categories, series })
}

pub(crate) fn value_format(options: &ChartOptions) -> ValueFormat {
    options
        .y_axis
        .as_ref()
        .and_then(|axis| axis.format)
        .or(options.format)
        .unwrap_or_default()
}

pub(crate) fn palette_color<'a>(
    options: &'a ChartOptions,
    theme: &'a Theme,
    index: usize,
) -> &'a str {
    if let Some(palette) = &options.palette {
        if !palette.is_empty() {
            return &palette[index % palette.len()];
        }
    }
    theme.series_color(index)
}

pub(crate) fn title_block(chart: &ChartConfig, theme: &Theme) -> Option<TextBlock> {
    chart
        .title
        .as_ref()
        .map(|title| measure_label(title, theme.font_size + 2.0, LINE_HEIGHT))
}

pub(crate) struct CartesianScaffold {
    pub width: f32,
    pub height: f32,
    pub plot: PlotFrame,
    pub title: Option<TextBlock>,
    pub y_min: f64,
    pub y_range: f64,
    pub y_ticks: Vec<Tick>,
    pub gridlines: Vec<f32>,
    pub x_ticks: Vec<Tick>,
    pub x_slot: f32,
    pub legend: Vec<LegendItem>,
}

impl CartesianScaffold {
    /// Plot-space y for a data value.
    pub fn y_for(&self, value: f64) -> f32 {
        let ratio = ((value - self.y_min) / self.y_range) as f32;
        self.plot.y + self.plot.height - ratio * self.plot.height
    }
}

pub(crate) fn build_scaffold(
    table: &SeriesTable,
    chart: &ChartConfig,
    theme: &Theme,
    config: &LayoutConfig,
) -> CartesianScaffold {
    let cartesian = &config.cartesian;
    let options = &chart.config;
    let format = value_format(options);

    let title = title_block(chart, theme);
    let title_height = if title.is_some() {
        cartesian.title_height
    } else {
        0.0
    };

    let legend = build_legend(table, options, theme);
    let legend_height = if legend.is_empty() {
        0.0
    } else {
        cartesian.legend_row_height + cartesian.legend_spacing
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
        + cartesian.x_axis_height
        + legend_height;

    let all_values = table
        .series
        .iter()
        .flat_map(|series| series.values.iter().flatten().copied());
    let y_min = all_values.clone().fold(0.0_f64, f64::min).min(0.0);
    let y_max = all_values.fold(0.0_f64, f64::max);
    let y_range = (y_max - y_min).max(1.0);

    let tick_count = cartesian.tick_count.max(1);
    let mut y_ticks = Vec::with_capacity(tick_count + 1);
    let mut gridlines = Vec::with_capacity(tick_count + 1);
    for step in 0..=tick_count {
        let fraction = step as f64 / tick_count as f64;
        let value = y_min + fraction * y_range;
        let y = plot.y + plot.height - (fraction as f32) * plot.height;
        y_ticks.push(Tick {
            label: format_value(value, format),
            x: plot.x - 8.0,
            y,
        });
        gridlines.push(y);
    }

    let x_slot = plot.width / table.categories.len().max(1) as f32;
    let x_ticks = table
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| Tick {
            label: category.clone(),
            x: plot.x + index as f32 * x_slot + x_slot / 2.0,
            y: plot.y + plot.height + theme.font_size + 6.0,
        })
        .collect();

    CartesianScaffold {
        width,
        height,
        plot,
        title,
        y_min,
        y_range,
        y_ticks,
        gridlines,
        x_ticks,
        x_slot,
        legend,
    }
}

pub(crate) fn build_legend(
    table: &SeriesTable,
    options: &ChartOptions,
    theme: &Theme,
) -> Vec<LegendItem> {
    let named = table.series.iter().any(|series| series.name.is_some());
    let show = options.show_legend.unwrap_or(named && table.series.len() > 1);
    if !show || !named {
        return Vec::new();
    }
    table
        .series
        .iter()
        .enumerate()
        .filter_map(|(index, series)| {
            series.name.as_ref().map(|name| LegendItem {
                label: name.clone(),
                color: palette_color(options, theme, index).to_string(),
            })
        })
        .collect()
}

pub(crate) fn empty_chart(
    chart: &ChartConfig,
    theme: &Theme,
    config: &LayoutConfig,
    message: &str,
) -> ChartVisual {
    let cartesian = &config.cartesian;
    ChartVisual::Empty(EmptyChart {
        width: cartesian.padding * 2.0 + cartesian.y_axis_width + cartesian.plot_width,
        height: cartesian.padding * 2.0 + cartesian.plot_height,
        title: title_block(chart, theme),
        message: message.to_string(),
    })
}
