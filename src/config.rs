use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesianConfig {
    pub plot_width: f32,
    pub plot_height: f32,
    pub padding: f32,
    pub y_axis_width: f32,
    pub x_axis_height: f32,
    pub title_height: f32,
    pub tick_count: usize,
    pub legend_swatch_size: f32,
    pub legend_spacing: f32,
    pub legend_row_height: f32,
    pub point_radius: f32,
    pub stroke_width: f32,
    pub area_opacity: f32,
}

impl Default for CartesianConfig {
    fn default() -> Self {
        Self {
            plot_width: 480.0,
            plot_height: 280.0,
            padding: 24.0,
            y_axis_width: 56.0,
            x_axis_height: 36.0,
            title_height: 28.0,
            tick_count: 5,
            legend_swatch_size: 10.0,
            legend_spacing: 6.0,
            legend_row_height: 18.0,
            point_radius: 3.0,
            stroke_width: 2.0,
            area_opacity: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    pub group_padding_ratio: f32,
    pub corner_radius: f32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            group_padding_ratio: 0.1,
            corner_radius: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieChartConfig {
    pub height: f32,
    pub margin: f32,
    pub legend_rect_size: f32,
    pub legend_spacing: f32,
    pub min_percent: f32,
    pub doughnut_hole_ratio: f32,
    pub stroke_width: f32,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            height: 320.0,
            margin: 40.0,
            legend_rect_size: 14.0,
            legend_spacing: 6.0,
            min_percent: 1.0,
            doughnut_hole_ratio: 0.55,
            stroke_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricCardConfig {
    pub padding: f32,
    pub corner_radius: f32,
    pub title_font_size: f32,
    pub value_font_size: f32,
    pub subtitle_font_size: f32,
}

impl Default for MetricCardConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            corner_radius: 12.0,
            title_font_size: 14.0,
            value_font_size: 32.0,
            subtitle_font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableViewConfig {
    pub max_rows: usize,
    pub cell_padding: f32,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        Self {
            max_rows: 50,
            cell_padding: 12.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub cartesian: CartesianConfig,
    pub bar: BarConfig,
    pub pie: PieChartConfig,
    pub metric: MetricCardConfig,
    pub table: TableViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub max_width: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_width: 1400.0,
            background: "#F9FAFB".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::zeno_default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    palette: Option<Vec<String>>,
    primary_color: Option<String>,
    background: Option<String>,
    surface: Option<String>,
    text_color: Option<String>,
    muted_text_color: Option<String>,
    grid_color: Option<String>,
    axis_color: Option<String>,
    border_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CartesianConfigFile {
    plot_width: Option<f32>,
    plot_height: Option<f32>,
    padding: Option<f32>,
    y_axis_width: Option<f32>,
    x_axis_height: Option<f32>,
    title_height: Option<f32>,
    tick_count: Option<usize>,
    point_radius: Option<f32>,
    stroke_width: Option<f32>,
    area_opacity: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BarConfigFile {
    group_padding_ratio: Option<f32>,
    corner_radius: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PieConfigFile {
    height: Option<f32>,
    margin: Option<f32>,
    legend_rect_size: Option<f32>,
    legend_spacing: Option<f32>,
    min_percent: Option<f32>,
    doughnut_hole_ratio: Option<f32>,
    stroke_width: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MetricConfigFile {
    padding: Option<f32>,
    corner_radius: Option<f32>,
    title_font_size: Option<f32>,
    value_font_size: Option<f32>,
    subtitle_font_size: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TableConfigFile {
    max_rows: Option<usize>,
    cell_padding: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    max_width: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    cartesian: Option<CartesianConfigFile>,
    bar: Option<BarConfigFile>,
    pie: Option<PieConfigFile>,
    metric: Option<MetricConfigFile>,
    table: Option<TableConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "midnight" || theme_name == "dark" {
            config.theme = Theme::midnight();
        } else if theme_name == "default" || theme_name == "zeno" || theme_name == "light" {
            config.theme = Theme::zeno_default();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.palette {
            if !v.is_empty() {
                config.theme.palette = v;
            }
        }
        if let Some(v) = vars.primary_color {
            config.theme.primary_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
        if let Some(v) = vars.surface {
            config.theme.surface = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.muted_text_color {
            config.theme.muted_text_color = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
    }

    if let Some(cartesian) = parsed.cartesian {
        let target = &mut config.layout.cartesian;
        if let Some(v) = cartesian.plot_width {
            target.plot_width = v;
        }
        if let Some(v) = cartesian.plot_height {
            target.plot_height = v;
        }
        if let Some(v) = cartesian.padding {
            target.padding = v;
        }
        if let Some(v) = cartesian.y_axis_width {
            target.y_axis_width = v;
        }
        if let Some(v) = cartesian.x_axis_height {
            target.x_axis_height = v;
        }
        if let Some(v) = cartesian.title_height {
            target.title_height = v;
        }
        if let Some(v) = cartesian.tick_count {
            target.tick_count = v.max(1);
        }
        if let Some(v) = cartesian.point_radius {
            target.point_radius = v;
        }
        if let Some(v) = cartesian.stroke_width {
            target.stroke_width = v;
        }
        if let Some(v) = cartesian.area_opacity {
            target.area_opacity = v;
        }
    }

    if let Some(bar) = parsed.bar {
        if let Some(v) = bar.group_padding_ratio {
            config.layout.bar.group_padding_ratio = v;
        }
        if let Some(v) = bar.corner_radius {
            config.layout.bar.corner_radius = v;
        }
    }

    if let Some(pie) = parsed.pie {
        let target = &mut config.layout.pie;
        if let Some(v) = pie.height {
            target.height = v;
        }
        if let Some(v) = pie.margin {
            target.margin = v;
        }
        if let Some(v) = pie.legend_rect_size {
            target.legend_rect_size = v;
        }
        if let Some(v) = pie.legend_spacing {
            target.legend_spacing = v;
        }
        if let Some(v) = pie.min_percent {
            target.min_percent = v;
        }
        if let Some(v) = pie.doughnut_hole_ratio {
            target.doughnut_hole_ratio = v.clamp(0.0, 0.95);
        }
        if let Some(v) = pie.stroke_width {
            target.stroke_width = v;
        }
    }

    if let Some(metric) = parsed.metric {
        let target = &mut config.layout.metric;
        if let Some(v) = metric.padding {
            target.padding = v;
        }
        if let Some(v) = metric.corner_radius {
            target.corner_radius = v;
        }
        if let Some(v) = metric.title_font_size {
            target.title_font_size = v;
        }
        if let Some(v) = metric.value_font_size {
            target.value_font_size = v;
        }
        if let Some(v) = metric.subtitle_font_size {
            target.subtitle_font_size = v;
        }
    }

    if let Some(table) = parsed.table {
        if let Some(v) = table.max_rows {
            config.layout.table.max_rows = v.max(1);
        }
        if let Some(v) = table.cell_padding {
            config.layout.table.cell_padding = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.max_width {
            config.render.max_width = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}
