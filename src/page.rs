//! Top-level render pass: sanitize, scan, resolve, mount, splice.

use crate::config::Config;
use crate::error::{Diagnostic, HydrateError};
use crate::model::DashboardInput;
use crate::mount::{ChartBackend, MountManager, MountRoot, MountState, SvgBackend};
use crate::sanitize::{sanitize, SanitizedHtml};
use crate::scan::{resolve_charts, scan_placeholders};

#[derive(Debug)]
pub struct PageOutput {
    /// Sanitized HTML with chart fragments spliced into mounted placeholders.
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Owns the mount roots for one rendered dashboard region. Each call to
/// [`PageRenderer::render`] is a full pass: previous roots are torn down
/// before anything new mounts, so roots never accumulate across passes.
pub struct PageRenderer<B: ChartBackend = SvgBackend> {
    config: Config,
    manager: MountManager<B>,
}

impl PageRenderer<SvgBackend> {
    pub fn new(config: Config) -> Self {
        Self::with_backend(config, SvgBackend)
    }
}

impl<B: ChartBackend> PageRenderer<B> {
    pub fn with_backend(config: Config, backend: B) -> Self {
        Self {
            config,
            manager: MountManager::new(backend),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roots(&self) -> &[MountRoot] {
        self.manager.roots()
    }

    pub fn live_roots(&self) -> usize {
        self.manager.live_count()
    }

    pub fn render(&mut self, input: &DashboardInput) -> PageOutput {
        let mut diagnostics = Vec::new();
        let sanitized = sanitize(&input.html);

        self.manager.begin_pass(&mut diagnostics);

        let scan = scan_placeholders(&sanitized);
        diagnostics.extend(scan.diagnostics);
        let resolved = resolve_charts(scan.placeholders, &input.charts, &mut diagnostics);

        for mount in resolved {
            let span = mount.placeholder.content_span;
            let chart = match &mount.placeholder.options {
                Some(overlay) => match mount.chart.with_overrides(overlay) {
                    Ok(chart) => chart,
                    Err(err) => {
                        self.manager.record_failure(
                            span,
                            &mount.placeholder.chart_id,
                            HydrateError::InvalidOptions {
                                id: mount.placeholder.chart_id.clone(),
                                reason: err.to_string(),
                            },
                            &mut diagnostics,
                        );
                        continue;
                    }
                },
                None => mount.chart,
            };
            self.manager.mount(
                span,
                &chart,
                &input.data,
                &self.config.theme,
                &self.config.layout,
                &mut diagnostics,
            );
        }

        PageOutput {
            html: splice(&sanitized, self.manager.roots()),
            diagnostics,
        }
    }
}

impl<B: ChartBackend> Drop for PageRenderer<B> {
    fn drop(&mut self) {
        self.manager.teardown_all(&mut Vec::new());
    }
}

/// Replaces each mounted placeholder's content span with its fragment.
/// Unmounted and failed placeholders keep their original content.
fn splice(sanitized: &SanitizedHtml, roots: &[MountRoot]) -> String {
    let source = sanitized.as_str();
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for root in roots {
        if root.state != MountState::Mounted {
            continue;
        }
        let Some(fragment) = root.fragment() else {
            continue;
        };
        let (start, end) = root.content_span;
        if start < cursor || end > source.len() || start > end {
            continue;
        }
        out.push_str(&source[cursor..start]);
        out.push_str(fragment);
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    out
}
