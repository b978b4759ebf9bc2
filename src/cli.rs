use crate::config::load_config;
use crate::model::DashboardInput;
use crate::page::PageRenderer;
use crate::render::render_page;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "zenor",
    version,
    about = "Hydrates a generated dashboard ({html, charts, data} JSON) into safe HTML"
)]
pub struct Args {
    /// Input dashboard JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "page")]
    pub format: OutputFormat,

    /// Config JSON file (theme name, themeVariables, per-kind layout knobs)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Page title (page format only; falls back to the input's title)
    #[arg(short = 't', long = "title")]
    pub title: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Complete HTML document with themed chrome
    Page,
    /// Just the hydrated region
    Fragment,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let _ = crate::telemetry::init_default_tracing();

    let config = load_config(args.config.as_deref())?;
    let raw = read_input(args.input.as_deref())?;
    let dashboard: DashboardInput =
        serde_json::from_str(&raw).context("input is not a {html, charts, data} dashboard")?;

    let mut renderer = PageRenderer::new(config);
    let output = renderer.render(&dashboard);

    let html = match args.format {
        OutputFormat::Fragment => output.html,
        OutputFormat::Page => {
            let title = args
                .title
                .as_deref()
                .or(dashboard.title.as_deref())
                .unwrap_or("Dashboard");
            render_page(
                &output.html,
                title,
                &renderer.config().theme,
                &renderer.config().render,
            )
        }
    };

    write_output(&html, args.output.as_deref())?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            print!("{html}");
        }
    }
    Ok(())
}
