#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub enum ChartVisual {
    Cartesian(CartesianChart),
    Pie(PieChart),
    Metric(MetricCard),
    Table(TableGrid),
    Empty(EmptyChart),
}

#[derive(Debug, Clone, Copy)]
pub struct PlotFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub label: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct BarMark {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub corner_radius: f32,
    pub tooltip: String,
}

#[derive(Debug, Clone)]
pub struct LineMark {
    pub points: Vec<(f32, f32)>,
    pub color: String,
    /// Baseline y for an area fill under the line, when filling is on.
    pub fill_baseline: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct PointMark {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct CartesianChart {
    pub width: f32,
    pub height: f32,
    pub plot: PlotFrame,
    pub title: Option<TextBlock>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Gridline y positions (x positions when the chart is horizontal).
    pub gridlines: Vec<f32>,
    pub horizontal_grid: bool,
    pub bars: Vec<BarMark>,
    pub lines: Vec<LineMark>,
    pub points: Vec<PointMark>,
    pub legend: Vec<LegendItem>,
}

#[derive(Debug, Clone)]
pub struct SliceMark {
    pub label: String,
    pub value: f64,
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct PieLegendItem {
    pub x: f32,
    pub y: f32,
    pub label: String,
    pub color: String,
    pub marker_size: f32,
}

#[derive(Debug, Clone)]
pub struct PieChart {
    pub width: f32,
    pub height: f32,
    pub center: (f32, f32),
    pub radius: f32,
    /// Zero for a full pie, positive for a doughnut.
    pub hole_radius: f32,
    pub title: Option<TextBlock>,
    pub slices: Vec<SliceMark>,
    pub legend: Vec<PieLegendItem>,
}

#[derive(Debug, Clone)]
pub struct MetricCard {
    pub title: String,
    pub value_text: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TableGrid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub overflow_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmptyChart {
    pub width: f32,
    pub height: f32,
    pub title: Option<TextBlock>,
    pub message: String,
}
