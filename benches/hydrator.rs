use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use zeno_renderer::sanitize::sanitize;
use zeno_renderer::scan::scan_placeholders;
use zeno_renderer::{Config, DashboardInput, PageRenderer};

fn dashboard_source(charts: usize, rows: usize) -> String {
    let mut html = String::from("<div class=\"grid\">");
    for i in 0..charts {
        html.push_str(&format!(
            "<div class=\"chart-container\"><h3>Chart {i}</h3><div data-chart=\"c{i}\"></div></div>"
        ));
    }
    html.push_str("</div>");

    let mut chart_map = String::from("{");
    for i in 0..charts {
        if i > 0 {
            chart_map.push(',');
        }
        let kind = match i % 3 {
            0 => "line",
            1 => "bar",
            _ => "pie",
        };
        chart_map.push_str(&format!(
            "\"c{i}\": {{\"type\": \"{kind}\", \"title\": \"Chart {i}\", \"config\": {{\"xAxis\": {{\"column\": \"month\"}}, \"yAxis\": {{\"column\": \"value\", \"aggregation\": \"sum\"}}}}}}"
        ));
    }
    chart_map.push('}');

    let months = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let mut data = String::from("[");
    for i in 0..rows {
        if i > 0 {
            data.push(',');
        }
        data.push_str(&format!(
            "{{\"month\": \"{}\", \"value\": {}}}",
            months[i % months.len()],
            (i * 37) % 1000
        ));
    }
    data.push(']');

    format!("{{\"html\": {html:?}, \"charts\": {chart_map}, \"data\": {data}}}")
}

fn noisy_html(paragraphs: usize) -> String {
    let mut out = String::new();
    for i in 0..paragraphs {
        out.push_str(&format!(
            "<p class=\"copy\" onclick=\"track({i})\">Block {i} with a <a href=\"javascript:void(0)\">link</a> and <b>markup</b></p><script>probe({i})</script>"
        ));
    }
    out
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    for size in [10usize, 100, 500] {
        let input = noisy_html(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, data| {
            b.iter(|| {
                let clean = sanitize(black_box(data));
                black_box(clean.as_str().len());
            });
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for charts in [4usize, 16, 64] {
        let source = dashboard_source(charts, 0);
        let input: DashboardInput = serde_json::from_str(&source).expect("bench input");
        let clean = sanitize(&input.html);
        group.bench_with_input(BenchmarkId::from_parameter(charts), &clean, |b, data| {
            b.iter(|| {
                let scan = scan_placeholders(black_box(data));
                black_box(scan.placeholders.len());
            });
        });
    }
    group.finish();
}

fn bench_hydrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hydrate");
    for (charts, rows) in [(4usize, 100usize), (8, 1000), (16, 5000)] {
        let name = format!("charts_{charts}_rows_{rows}");
        let source = dashboard_source(charts, rows);
        let input: DashboardInput = serde_json::from_str(&source).expect("bench input");
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            let mut renderer = PageRenderer::new(Config::default());
            b.iter(|| {
                let output = renderer.render(black_box(data));
                black_box(output.html.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_sanitize, bench_scan, bench_hydrate
);
criterion_main!(benches);
