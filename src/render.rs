use crate::chart::text::text_width;
use crate::chart::{
    CartesianChart, ChartVisual, EmptyChart, MetricCard, PieChart, TableGrid, TextBlock,
};
use crate::config::{LayoutConfig, RenderConfig};
use crate::html::{escape_attr, escape_text};
use crate::theme::Theme;

/// Renders a chart visual into an HTML-embeddable fragment: inline SVG for
/// plots, plain HTML for metric cards and tables.
pub fn render_fragment(visual: &ChartVisual, theme: &Theme, config: &LayoutConfig) -> String {
    match visual {
        ChartVisual::Cartesian(chart) => cartesian_svg(chart, theme, config),
        ChartVisual::Pie(chart) => pie_svg(chart, theme),
        ChartVisual::Empty(chart) => empty_svg(chart, theme),
        ChartVisual::Metric(card) => metric_html(card, theme, config),
        ChartVisual::Table(table) => table_html(table, theme, config),
    }
}

fn svg_open(out: &mut String, width: f32, height: f32) {
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\" role=\"img\">",
    ));
}

fn title_svg(out: &mut String, title: &TextBlock, width: f32, theme: &Theme) {
    let x = width / 2.0;
    let y = theme.font_size + 10.0;
    out.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
        escape_attr(&theme.font_family),
        theme.font_size + 2.0,
        theme.text_color,
        escape_xml(&title.lines.join(" "))
    ));
}

fn cartesian_svg(chart: &CartesianChart, theme: &Theme, config: &LayoutConfig) -> String {
    let cartesian = &config.cartesian;
    let mut svg = String::new();
    svg_open(&mut svg, chart.width, chart.height);

    if let Some(title) = &chart.title {
        title_svg(&mut svg, title, chart.width, theme);
    }

    for position in &chart.gridlines {
        if chart.horizontal_grid {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{position:.2}\" x2=\"{:.2}\" y2=\"{position:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                chart.plot.x,
                chart.plot.x + chart.plot.width,
                theme.grid_color
            ));
        } else {
            svg.push_str(&format!(
                "<line x1=\"{position:.2}\" y1=\"{:.2}\" x2=\"{position:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                chart.plot.y,
                chart.plot.y + chart.plot.height,
                theme.grid_color
            ));
        }
    }

    for tick in &chart.y_ticks {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            tick.x,
            tick.y + 4.0,
            escape_attr(&theme.font_family),
            theme.font_size - 2.0,
            theme.muted_text_color,
            escape_xml(&tick.label)
        ));
    }
    for tick in &chart.x_ticks {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            tick.x,
            tick.y,
            escape_attr(&theme.font_family),
            theme.font_size - 2.0,
            theme.muted_text_color,
            escape_xml(&tick.label)
        ));
    }

    // Axis baselines.
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
        chart.plot.x,
        chart.plot.y + chart.plot.height,
        chart.plot.x + chart.plot.width,
        chart.plot.y + chart.plot.height,
        theme.axis_color
    ));
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
        chart.plot.x,
        chart.plot.y,
        chart.plot.x,
        chart.plot.y + chart.plot.height,
        theme.axis_color
    ));

    for bar in &chart.bars {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.1}\" fill=\"{}\"><title>{}</title></rect>",
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            bar.corner_radius.min(bar.width / 2.0),
            bar.color,
            escape_xml(&bar.tooltip)
        ));
    }

    for line in &chart.lines {
        if line.points.is_empty() {
            continue;
        }
        if let Some(baseline) = line.fill_baseline {
            let mut d = points_to_path(&line.points);
            let first = line.points[0];
            let last = line.points[line.points.len() - 1];
            d.push_str(&format!(
                " L {:.2} {baseline:.2} L {:.2} {baseline:.2} Z",
                last.0, first.0
            ));
            svg.push_str(&format!(
                "<path d=\"{d}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"none\"/>",
                line.color, cartesian.area_opacity
            ));
        }
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\" stroke-linecap=\"round\"/>",
            points_to_path(&line.points),
            line.color,
            cartesian.stroke_width
        ));
    }

    for point in &chart.points {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.1}\" fill=\"{}\"><title>{}</title></circle>",
            point.x,
            point.y,
            point.radius,
            point.color,
            escape_xml(&point.tooltip)
        ));
    }

    if !chart.legend.is_empty() {
        let swatch = cartesian.legend_swatch_size;
        let legend_y = chart.height - cartesian.padding - cartesian.legend_row_height / 2.0;
        let mut x = chart.plot.x;
        for item in &chart.legend {
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{swatch:.1}\" height=\"{swatch:.1}\" rx=\"2\" fill=\"{}\"/>",
                legend_y - swatch / 2.0,
                item.color
            ));
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                x + swatch + 5.0,
                legend_y + 4.0,
                escape_attr(&theme.font_family),
                theme.font_size - 2.0,
                theme.muted_text_color,
                escape_xml(&item.label)
            ));
            x += swatch + 5.0 + text_width(&item.label, theme.font_size - 2.0) + 16.0;
        }
    }

    svg.push_str("</svg>");
    svg
}

fn pie_svg(chart: &PieChart, theme: &Theme) -> String {
    let mut svg = String::new();
    svg_open(&mut svg, chart.width, chart.height);

    if let Some(title) = &chart.title {
        title_svg(&mut svg, title, chart.width, theme);
    }

    let (cx, cy) = chart.center;
    for slice in &chart.slices {
        let span = slice.end_angle - slice.start_angle;
        if span >= std::f32::consts::TAU - 1e-4 {
            svg.push_str(&format!(
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"><title>{}</title></circle>",
                chart.radius,
                slice.color,
                escape_xml(&slice.label)
            ));
            continue;
        }
        let (x1, y1) = polar(cx, cy, chart.radius, slice.start_angle);
        let (x2, y2) = polar(cx, cy, chart.radius, slice.end_angle);
        let large_arc = if span > std::f32::consts::PI { 1 } else { 0 };
        svg.push_str(&format!(
            "<path d=\"M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"><title>{}</title></path>",
            slice.color,
            theme.surface,
            escape_xml(&slice.label),
            r = chart.radius
        ));
    }

    if chart.hole_radius > 0.0 {
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            chart.hole_radius, theme.surface
        ));
    }

    for item in &chart.legend {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{size:.1}\" height=\"{size:.1}\" rx=\"2\" fill=\"{}\"/>",
            item.x,
            item.y - item.marker_size / 2.0,
            item.color,
            size = item.marker_size
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            item.x + item.marker_size + 6.0,
            item.y + 4.0,
            escape_attr(&theme.font_family),
            theme.font_size - 2.0,
            theme.text_color,
            escape_xml(&item.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn empty_svg(chart: &EmptyChart, theme: &Theme) -> String {
    let mut svg = String::new();
    svg_open(&mut svg, chart.width, chart.height);
    if let Some(title) = &chart.title {
        title_svg(&mut svg, title, chart.width, theme);
    }
    svg.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{:.1}\" height=\"{:.1}\" rx=\"8\" fill=\"none\" stroke=\"{}\" stroke-dasharray=\"4 4\"/>",
        chart.width - 1.0,
        chart.height - 1.0,
        theme.border_color
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        chart.width / 2.0,
        chart.height / 2.0,
        escape_attr(&theme.font_family),
        theme.font_size,
        theme.muted_text_color,
        escape_xml(&chart.message)
    ));
    svg.push_str("</svg>");
    svg
}

fn metric_html(card: &MetricCard, theme: &Theme, config: &LayoutConfig) -> String {
    let metric = &config.metric;
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"metric-card\" style=\"background: {}; border-radius: {:.0}px; padding: {:.0}px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); font-family: {};\">",
        theme.surface,
        metric.corner_radius,
        metric.padding,
        escape_attr(&theme.font_family)
    ));
    html.push_str(&format!(
        "<div style=\"color: {}; font-size: {:.0}px; margin-bottom: 8px;\">{}</div>",
        theme.muted_text_color,
        metric.title_font_size,
        escape_text(&card.title)
    ));
    html.push_str(&format!(
        "<div style=\"color: {}; font-size: {:.0}px; font-weight: 700;\">{}</div>",
        theme.text_color,
        metric.value_font_size,
        escape_text(&card.value_text)
    ));
    if let Some(subtitle) = &card.subtitle {
        html.push_str(&format!(
            "<div style=\"color: {}; font-size: {:.0}px; margin-top: 8px;\">{}</div>",
            theme.primary_color,
            metric.subtitle_font_size,
            escape_text(subtitle)
        ));
    }
    html.push_str("</div>");
    html
}

fn table_html(table: &TableGrid, theme: &Theme, config: &LayoutConfig) -> String {
    let padding = config.table.cell_padding;
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"table-container\" style=\"background: {}; border-radius: 12px; padding: 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); overflow-x: auto; font-family: {};\">",
        theme.surface,
        escape_attr(&theme.font_family)
    ));
    html.push_str(
        "<table style=\"width: 100%; border-collapse: collapse; font-size: 14px;\"><thead><tr>",
    );
    for column in &table.columns {
        html.push_str(&format!(
            "<th style=\"padding: {padding:.0}px; text-align: left; border-bottom: 2px solid {}; color: {}; font-weight: 600;\">{}</th>",
            theme.border_color,
            theme.text_color,
            escape_text(column)
        ));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!(
                "<td style=\"padding: {padding:.0}px; border-bottom: 1px solid {}; color: {};\">{}</td>",
                theme.border_color,
                theme.text_color,
                escape_text(cell)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    if let Some(note) = &table.overflow_note {
        html.push_str(&format!(
            "<div style=\"color: {}; font-size: 12px; margin-top: 12px;\">{}</div>",
            theme.muted_text_color,
            escape_text(note)
        ));
    }
    html.push_str("</div>");
    html
}

/// Wraps a hydrated fragment into a complete page, exposing the theme as
/// CSS custom properties around the rendered region.
pub fn render_page(body: &str, title: &str, theme: &Theme, render: &RenderConfig) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>{title}</title>\n<style>\n:root {{\n  --zeno-font: {font};\n  --zeno-primary: {primary};\n  --zeno-background: {background};\n  --zeno-surface: {surface};\n  --zeno-text: {text};\n  --zeno-muted: {muted};\n  --zeno-border: {border};\n}}\n* {{ margin: 0; padding: 0; box-sizing: border-box; }}\nbody {{ font-family: var(--zeno-font); background: var(--zeno-background); color: var(--zeno-text); line-height: 1.5; }}\n.container {{ max-width: {max_width:.0}px; margin: 0 auto; padding: 32px; }}\nh1 {{ font-size: 32px; font-weight: 700; margin-bottom: 24px; }}\n</style>\n</head>\n<body>\n<div class=\"container\">\n<h1>{title}</h1>\n{body}\n</div>\n</body>\n</html>\n",
        title = escape_text(title),
        font = theme.font_family,
        primary = theme.primary_color,
        background = render.background,
        surface = theme.surface,
        text = theme.text_color,
        muted = theme.muted_text_color,
        border = theme.border_color,
        max_width = render.max_width,
        body = body,
    )
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

// Angle 0 points at 12 o'clock, increasing clockwise.
fn polar(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
