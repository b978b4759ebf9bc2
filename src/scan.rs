//! Placeholder scanner and chart config resolver.
//!
//! Walks sanitized HTML for elements carrying a `data-chart` attribute and
//! pairs each one with its chart config. Misses are diagnostics, never
//! failures.

use crate::error::{Diagnostic, DiagnosticKind};
use crate::html::{self, Token, TokenKind};
use crate::model::ChartConfig;
use crate::sanitize::SanitizedHtml;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

pub const CHART_ATTR: &str = "data-chart";
pub const CHART_OPTIONS_ATTR: &str = "data-chart-options";

#[derive(Debug, Clone)]
pub struct Placeholder {
    pub chart_id: String,
    pub tag_name: String,
    /// Byte span of the element's inner content in the sanitized HTML.
    /// Empty (start == end) for void, self-closing or unterminated elements.
    pub content_span: (usize, usize),
    /// Inline display overrides from `data-chart-options`, already parsed.
    pub options: Option<Value>,
}

#[derive(Debug, Default)]
pub struct ScanOutput {
    pub placeholders: Vec<Placeholder>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn scan_placeholders(html: &SanitizedHtml) -> ScanOutput {
    let source = html.as_str();
    let tokens = html::tokenize(source);
    let mut out = ScanOutput::default();
    let mut last_content_end = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        let TokenKind::StartTag(tag) = &token.kind else {
            continue;
        };
        let Some(chart_id) = tag.attr(CHART_ATTR).filter(|id| !id.is_empty()) else {
            continue;
        };

        if token.start < last_content_end {
            warn!(chart_id, "placeholder nested inside another placeholder, skipping");
            out.diagnostics.push(Diagnostic::new(
                DiagnosticKind::NestedPlaceholder,
                chart_id,
                "placeholder nested inside another placeholder",
            ));
            continue;
        }

        let options = match tag.attr(CHART_OPTIONS_ATTR) {
            Some(raw) => match json5::from_str::<Value>(raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(chart_id, %err, "unparseable data-chart-options, ignoring");
                    out.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::InvalidOptions,
                        chart_id,
                        format!("unparseable data-chart-options: {err}"),
                    ));
                    None
                }
            },
            None => None,
        };

        let content_span = if tag.self_closing || html::is_void(&tag.name) {
            (token.end, token.end)
        } else {
            content_span(&tokens, index, &tag.name).unwrap_or((token.end, token.end))
        };
        last_content_end = content_span.1.max(token.end);

        out.placeholders.push(Placeholder {
            chart_id: chart_id.to_string(),
            tag_name: tag.name.clone(),
            content_span,
            options,
        });
    }

    out
}

fn content_span(tokens: &[Token], open_index: usize, name: &str) -> Option<(usize, usize)> {
    let open_end = tokens[open_index].end;
    let mut depth = 0usize;
    for token in &tokens[open_index + 1..] {
        match &token.kind {
            TokenKind::StartTag(tag)
                if tag.name == name && !tag.self_closing && !html::is_void(&tag.name) =>
            {
                depth += 1;
            }
            TokenKind::EndTag(end_name) if end_name == name => {
                if depth == 0 {
                    return Some((open_end, token.start));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone)]
pub struct ResolvedMount {
    pub placeholder: Placeholder,
    pub chart: ChartConfig,
}

/// Pairs placeholders with their configs. The resolved config's embedded id
/// is normalized to the placeholder id so the two never diverge downstream.
pub fn resolve_charts(
    placeholders: Vec<Placeholder>,
    charts: &IndexMap<String, ChartConfig>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ResolvedMount> {
    let mut resolved = Vec::with_capacity(placeholders.len());
    for placeholder in placeholders {
        let Some(config) = charts.get(&placeholder.chart_id) else {
            warn!(
                chart_id = %placeholder.chart_id,
                "no chart config for placeholder, leaving it unmounted"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ResolutionMiss,
                &placeholder.chart_id,
                "no chart config for placeholder",
            ));
            continue;
        };
        let mut chart = config.clone();
        if chart.id != placeholder.chart_id {
            if !chart.id.is_empty() {
                debug!(
                    placeholder_id = %placeholder.chart_id,
                    config_id = %chart.id,
                    "chart config id differs from placeholder id, remapping"
                );
            }
            chart.id = placeholder.chart_id.clone();
        }
        resolved.push(ResolvedMount { placeholder, chart });
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartKind;
    use crate::sanitize::sanitize;
    use serde_json::json;

    fn chart_map(ids: &[&str]) -> IndexMap<String, ChartConfig> {
        ids.iter()
            .map(|id| {
                let chart: ChartConfig = serde_json::from_value(json!({
                    "id": id, "type": "line"
                }))
                .unwrap();
                (id.to_string(), chart)
            })
            .collect()
    }

    #[test]
    fn finds_placeholders_with_content_spans() {
        let html = sanitize("<div data-chart=\"c1\"><span>old</span></div><p>x</p>");
        let out = scan_placeholders(&html);
        assert_eq!(out.placeholders.len(), 1);
        let ph = &out.placeholders[0];
        assert_eq!(ph.chart_id, "c1");
        let (start, end) = ph.content_span;
        assert_eq!(&html.as_str()[start..end], "<span>old</span>");
    }

    #[test]
    fn unterminated_placeholder_gets_empty_span() {
        let html = sanitize("<div data-chart=\"c1\"><p>runs off");
        let out = scan_placeholders(&html);
        assert_eq!(out.placeholders.len(), 1);
        let (start, end) = out.placeholders[0].content_span;
        assert_eq!(start, end);
    }

    #[test]
    fn nested_placeholder_is_skipped_with_diagnostic() {
        let html =
            sanitize("<div data-chart=\"outer\"><div data-chart=\"inner\"></div></div>");
        let out = scan_placeholders(&html);
        assert_eq!(out.placeholders.len(), 1);
        assert_eq!(out.placeholders[0].chart_id, "outer");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::NestedPlaceholder);
    }

    #[test]
    fn parses_inline_options_leniently() {
        let html = sanitize("<div data-chart=\"c1\" data-chart-options=\"{fill: true}\"></div>");
        let out = scan_placeholders(&html);
        assert_eq!(out.placeholders[0].options, Some(json!({"fill": true})));
    }

    #[test]
    fn bad_inline_options_keep_placeholder() {
        let html = sanitize("<div data-chart=\"c1\" data-chart-options=\"{nope\"></div>");
        let out = scan_placeholders(&html);
        assert_eq!(out.placeholders.len(), 1);
        assert!(out.placeholders[0].options.is_none());
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::InvalidOptions);
    }

    #[test]
    fn resolution_miss_is_a_diagnostic_not_an_error() {
        let html = sanitize("<div data-chart=\"ghost\"></div>");
        let out = scan_placeholders(&html);
        let mut diagnostics = Vec::new();
        let resolved = resolve_charts(out.placeholders, &chart_map(&[]), &mut diagnostics);
        assert!(resolved.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ResolutionMiss);
    }

    #[test]
    fn resolved_config_id_is_normalized_to_placeholder_id() {
        let html = sanitize("<div data-chart=\"slot-1\"></div>");
        let out = scan_placeholders(&html);
        let mut charts = IndexMap::new();
        let chart: ChartConfig =
            serde_json::from_value(json!({"id": "generated-7", "type": "bar"})).unwrap();
        charts.insert("slot-1".to_string(), chart);
        let mut diagnostics = Vec::new();
        let resolved = resolve_charts(out.placeholders, &charts, &mut diagnostics);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].chart.id, "slot-1");
        assert_eq!(resolved[0].chart.kind, ChartKind::Bar);
        assert!(diagnostics.is_empty());
    }
}
