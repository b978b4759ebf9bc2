pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod model;
pub mod mount;
pub mod page;
pub mod render;
pub mod sanitize;
pub mod scan;
pub mod telemetry;
pub mod theme;

pub use config::{Config, LayoutConfig};
pub use error::{Diagnostic, DiagnosticKind, HydrateError};
pub use model::{ChartConfig, ChartKind, DashboardInput, DataRow};
pub use page::{PageOutput, PageRenderer};
pub use render::render_page;
pub use sanitize::{sanitize, SanitizedHtml};
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;
