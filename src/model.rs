use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of dashboard data: column name to scalar, in source column order.
pub type DataRow = IndexMap<String, Value>;

/// The generation service's output shape: `{ html, charts, data }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInput {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub charts: IndexMap<String, ChartConfig>,
    #[serde(default)]
    pub data: Vec<DataRow>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Metric,
    Table,
    // Generators occasionally invent kinds; keep the rest of the dashboard
    // alive and fail that mount alone.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    #[serde(alias = "avg", alias = "mean")]
    Average,
    Count,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    #[default]
    Number,
    Currency,
    #[serde(alias = "percentage")]
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Column binding for one axis. `aggregation` only applies to value axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisBinding {
    pub column: String,
    #[serde(default)]
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub x_axis: Option<AxisBinding>,
    pub y_axis: Option<AxisBinding>,
    pub series_column: Option<String>,
    pub palette: Option<Vec<String>>,
    pub format: Option<ValueFormat>,
    pub sort: Option<SortOrder>,
    pub limit: Option<usize>,
    pub fill: bool,
    pub show_points: bool,
    pub show_legend: Option<bool>,
    pub show_grid: bool,
    pub horizontal: bool,
    pub doughnut: bool,
    pub columns: Option<Vec<String>>,
    pub max_rows: Option<usize>,
    pub subtitle: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            series_column: None,
            palette: None,
            format: None,
            sort: None,
            limit: None,
            fill: false,
            show_points: true,
            show_legend: None,
            show_grid: true,
            horizontal: false,
            doughnut: false,
            columns: None,
            max_rows: None,
            subtitle: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub config: ChartOptions,
}

impl ChartConfig {
    /// Applies a placeholder's inline option overrides on top of this
    /// config's options block. Overlay keys win; nested objects merge.
    pub fn with_overrides(&self, overlay: &Value) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(&self.config)?;
        merge_json(&mut base, overlay);
        let config: ChartOptions = serde_json::from_value(base)?;
        Ok(Self {
            config,
            ..self.clone()
        })
    }
}

fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
