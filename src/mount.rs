//! Mount root lifecycle.
//!
//! Each resolvable placeholder gets exactly one root per render pass. A root
//! moves `Unmounted -> Mounted` on success or `Unmounted -> MountFailed` on a
//! backend error; teardown returns mounted roots to `Unmounted`. Failures are
//! contained per placeholder and surfaced as diagnostics.

use crate::chart::compute_chart;
use crate::config::LayoutConfig;
use crate::error::{Diagnostic, DiagnosticKind, HydrateError, HydrateResult};
use crate::model::{ChartConfig, ChartKind, DataRow};
use crate::render::render_fragment;
use crate::theme::Theme;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Unmounted,
    Mounted,
    MountFailed,
}

/// A chart rendered into an HTML-embeddable fragment by a backend.
#[derive(Debug, Clone)]
pub struct MountedChart {
    pub fragment: String,
}

/// The rendering seam. The default backend produces inline SVG/HTML; tests
/// substitute failing backends to exercise the error paths.
pub trait ChartBackend {
    fn mount(
        &self,
        chart: &ChartConfig,
        rows: &[DataRow],
        theme: &Theme,
        config: &LayoutConfig,
    ) -> HydrateResult<MountedChart>;

    fn unmount(&self, chart_id: &str, mounted: &mut MountedChart) -> HydrateResult<()> {
        let _ = (chart_id, mounted);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SvgBackend;

impl ChartBackend for SvgBackend {
    fn mount(
        &self,
        chart: &ChartConfig,
        rows: &[DataRow],
        theme: &Theme,
        config: &LayoutConfig,
    ) -> HydrateResult<MountedChart> {
        if chart.kind == ChartKind::Unknown {
            return Err(HydrateError::UnsupportedKind {
                id: chart.id.clone(),
            });
        }
        let visual = compute_chart(chart, rows, theme, config);
        Ok(MountedChart {
            fragment: render_fragment(&visual, theme, config),
        })
    }
}

#[derive(Debug)]
pub struct MountRoot {
    pub chart_id: String,
    pub state: MountState,
    pub(crate) content_span: (usize, usize),
    pub(crate) mounted: Option<MountedChart>,
}

impl MountRoot {
    pub fn fragment(&self) -> Option<&str> {
        self.mounted.as_ref().map(|mounted| mounted.fragment.as_str())
    }
}

pub struct MountManager<B: ChartBackend> {
    backend: B,
    roots: Vec<MountRoot>,
}

impl<B: ChartBackend> MountManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            roots: Vec::new(),
        }
    }

    /// Tears down every root from the previous pass, exactly once each.
    /// Backend teardown errors are logged and swallowed.
    pub fn begin_pass(&mut self, diagnostics: &mut Vec<Diagnostic>) {
        for root in &mut self.roots {
            let Some(mut mounted) = root.mounted.take() else {
                root.state = MountState::Unmounted;
                continue;
            };
            if let Err(err) = self.backend.unmount(&root.chart_id, &mut mounted) {
                warn!(chart_id = %root.chart_id, %err, "teardown failed, discarding root");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::TeardownAnomaly,
                    &root.chart_id,
                    err.to_string(),
                ));
            }
            root.state = MountState::Unmounted;
        }
        self.roots.clear();
    }

    /// Attempts one mount. Errors land in `diagnostics` and as a
    /// `MountFailed` root; other placeholders are unaffected.
    pub fn mount(
        &mut self,
        content_span: (usize, usize),
        chart: &ChartConfig,
        rows: &[DataRow],
        theme: &Theme,
        config: &LayoutConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut root = MountRoot {
            chart_id: chart.id.clone(),
            state: MountState::Unmounted,
            content_span,
            mounted: None,
        };
        match self.backend.mount(chart, rows, theme, config) {
            Ok(mounted) => {
                root.mounted = Some(mounted);
                root.state = MountState::Mounted;
            }
            Err(err) => {
                warn!(chart_id = %chart.id, %err, "mount failed, placeholder left as-is");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::MountFailure,
                    &chart.id,
                    err.to_string(),
                ));
                root.state = MountState::MountFailed;
            }
        }
        self.roots.push(root);
    }

    /// Records a mount failure without calling the backend (for errors found
    /// before mounting, like bad inline option overlays).
    pub fn record_failure(
        &mut self,
        content_span: (usize, usize),
        chart_id: &str,
        err: HydrateError,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        warn!(chart_id = %chart_id, %err, "mount failed, placeholder left as-is");
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MountFailure,
            chart_id,
            err.to_string(),
        ));
        self.roots.push(MountRoot {
            chart_id: chart_id.to_string(),
            state: MountState::MountFailed,
            content_span,
            mounted: None,
        });
    }

    pub fn roots(&self) -> &[MountRoot] {
        &self.roots
    }

    pub fn live_count(&self) -> usize {
        self.roots
            .iter()
            .filter(|root| root.state == MountState::Mounted)
            .count()
    }

    pub fn teardown_all(&mut self, diagnostics: &mut Vec<Diagnostic>) {
        self.begin_pass(diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn line_chart(id: &str) -> ChartConfig {
        serde_json::from_value(json!({
            "id": id,
            "type": "line",
            "config": {
                "xAxis": {"column": "month"},
                "yAxis": {"column": "sales"}
            }
        }))
        .unwrap()
    }

    fn rows() -> Vec<DataRow> {
        serde_json::from_value(json!([{"month": "Jan", "sales": 3}])).unwrap()
    }

    /// Fails mounts and teardowns on demand, and counts unmount calls.
    struct FlakyBackend {
        fail_mount_for: Option<String>,
        fail_unmount: bool,
        unmounts: Rc<RefCell<Vec<String>>>,
    }

    impl FlakyBackend {
        fn new() -> Self {
            Self {
                fail_mount_for: None,
                fail_unmount: false,
                unmounts: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl ChartBackend for FlakyBackend {
        fn mount(
            &self,
            chart: &ChartConfig,
            _rows: &[DataRow],
            _theme: &Theme,
            _config: &LayoutConfig,
        ) -> HydrateResult<MountedChart> {
            if self.fail_mount_for.as_deref() == Some(chart.id.as_str()) {
                return Err(HydrateError::Backend("boom".to_string()));
            }
            Ok(MountedChart {
                fragment: format!("<svg data-id=\"{}\"/>", chart.id),
            })
        }

        fn unmount(&self, chart_id: &str, _mounted: &mut MountedChart) -> HydrateResult<()> {
            self.unmounts.borrow_mut().push(chart_id.to_string());
            if self.fail_unmount {
                return Err(HydrateError::Backend("teardown boom".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn failed_mount_does_not_affect_other_placeholders() {
        let mut backend = FlakyBackend::new();
        backend.fail_mount_for = Some("bad".to_string());
        let mut manager = MountManager::new(backend);
        let mut diagnostics = Vec::new();
        let theme = Theme::zeno_default();
        let config = LayoutConfig::default();
        let data = rows();

        manager.mount((0, 0), &line_chart("good"), &data, &theme, &config, &mut diagnostics);
        manager.mount((0, 0), &line_chart("bad"), &data, &theme, &config, &mut diagnostics);
        manager.mount((0, 0), &line_chart("also-good"), &data, &theme, &config, &mut diagnostics);

        assert_eq!(manager.live_count(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MountFailure);
        assert_eq!(manager.roots()[1].state, MountState::MountFailed);
    }

    #[test]
    fn begin_pass_unmounts_each_mounted_root_exactly_once() {
        let backend = FlakyBackend::new();
        let unmounts = Rc::clone(&backend.unmounts);
        let mut manager = MountManager::new(backend);
        let mut diagnostics = Vec::new();
        let theme = Theme::zeno_default();
        let config = LayoutConfig::default();
        let data = rows();

        manager.mount((0, 0), &line_chart("a"), &data, &theme, &config, &mut diagnostics);
        manager.mount((0, 0), &line_chart("b"), &data, &theme, &config, &mut diagnostics);
        manager.begin_pass(&mut diagnostics);

        assert_eq!(manager.roots().len(), 0);
        assert_eq!(manager.live_count(), 0);
        assert_eq!(*unmounts.borrow(), vec!["a".to_string(), "b".to_string()]);

        // A second teardown touches nothing.
        manager.begin_pass(&mut diagnostics);
        assert_eq!(unmounts.borrow().len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn teardown_errors_are_swallowed_and_logged() {
        let mut backend = FlakyBackend::new();
        backend.fail_unmount = true;
        let mut manager = MountManager::new(backend);
        let mut diagnostics = Vec::new();
        let theme = Theme::zeno_default();
        let config = LayoutConfig::default();
        let data = rows();

        manager.mount((0, 0), &line_chart("a"), &data, &theme, &config, &mut diagnostics);
        manager.begin_pass(&mut diagnostics);

        assert_eq!(manager.roots().len(), 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::TeardownAnomaly);
    }

    #[test]
    fn svg_backend_rejects_unknown_kinds_only() {
        let backend = SvgBackend;
        let theme = Theme::zeno_default();
        let config = LayoutConfig::default();
        let unknown: ChartConfig =
            serde_json::from_value(json!({"id": "x", "type": "hologram"})).unwrap();
        assert!(backend.mount(&unknown, &rows(), &theme, &config).is_err());
        let known = line_chart("x");
        assert!(backend.mount(&known, &rows(), &theme, &config).is_ok());
    }
}
