use super::data::aggregate_all;
use super::format::format_value;
use super::{empty_chart, value_format, ChartVisual, MetricCard};
use crate::config::LayoutConfig;
use crate::model::{Aggregation, ChartConfig, DataRow};
use crate::theme::Theme;

pub(super) fn compute_metric_card(
    chart: &ChartConfig,
    rows: &[DataRow],
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartVisual {
    let options = &chart.config;
    // Metric cards reduce one column across the whole row set.
    let binding = options.y_axis.as_ref().or(options.x_axis.as_ref());
    let Some(binding) = binding else {
        return empty_chart(chart, theme, config, "No value column configured");
    };
    let aggregation = binding.aggregation.unwrap_or(Aggregation::Sum);
    let Some(value) = aggregate_all(rows, &binding.column, aggregation) else {
        return empty_chart(chart, theme, config, "No data for the configured columns");
    };

    let title = chart
        .title
        .clone()
        .or_else(|| binding.label.clone())
        .unwrap_or_else(|| binding.column.clone());

    ChartVisual::Metric(MetricCard {
        title,
        value_text: format_value(value, value_format(options)),
        subtitle: options.subtitle.clone(),
    })
}
