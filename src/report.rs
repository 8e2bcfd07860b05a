//! Plain-text rendering of an analysis.
//!
//! Produces the panel's tab title and one row per router, for terminals.
//! JSON consumers should serialize [`AnalysisResult`] directly.
//!
//! Each indentation column stands for one enclosing list: `┌` where the list
//! opens, `└` where it closes, `─` for a list holding a single router.

use crate::analyzer::{AnalysisResult, DiagnosticRecord, MatchStatus};
use crate::routing::params::{format_params, string_param, ACTION_KEY, PRESENTER_KEY};
use crate::routing::request::HttpRequest;

/// `Presenter:action` of the winning match, or `no route`.
pub fn tab_title(result: &AnalysisResult) -> String {
    let Some(matched) = &result.matched else {
        return "no route".to_string();
    };
    let presenter = string_param(matched, PRESENTER_KEY).unwrap_or("?");
    match string_param(matched, ACTION_KEY) {
        Some(action) => format!("{}:{}", presenter, action),
        None => presenter.to_string(),
    }
}

/// Full text report: header, result, source and the router table.
pub fn render_text(result: &AnalysisResult, request: &HttpRequest) -> String {
    let mut lines = Vec::new();

    lines.push("=== Routing ===".to_string());
    lines.push(format!("Request: {}", request));
    lines.push(format!("Result: {}", tab_title(result)));
    if let Some(source) = &result.source {
        lines.push(format!("Source: {}", source));
    }
    lines.push(String::new());

    let has_module = result.has_module();
    for record in &result.records {
        lines.push(render_row(record, has_module));
    }

    lines.join("\n")
}

fn render_row(record: &DiagnosticRecord, has_module: bool) -> String {
    let marker = match record.status {
        MatchStatus::Yes => '✓',
        MatchStatus::May => '~',
        MatchStatus::No => ' ',
    };

    let mut row = format!("{} {}{}", marker, indent(record), record.kind);
    if has_module {
        row.push_str(&format!(" [{}]", record.module));
    }
    if let Some(mask) = &record.mask {
        row.push_str(&format!(" {}", mask));
    }
    if !record.defaults.is_empty() {
        row.push_str(&format!(" defaults({})", format_params(&record.defaults)));
    }
    if let Some(params) = &record.params {
        row.push_str(&format!(" => {}", format_params(params)));
    }
    if let Some(error) = &record.error {
        row.push_str(&format!(" !! {}", error));
    }
    row
}

/// Tree columns for a row, closing and opening lists per its gutters.
fn indent(record: &DiagnosticRecord) -> String {
    let depth = record.depth;
    let opens_from = depth - record.gutter_top.unwrap_or(0).min(depth);
    let closes_from = depth - record.gutter_bottom.unwrap_or(0).min(depth);

    (0..depth)
        .map(|column| match (column >= opens_from, column >= closes_from) {
            (true, true) => "─ ",
            (true, false) => "┌ ",
            (false, true) => "└ ",
            (false, false) => "│ ",
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::presenter::{PresenterClass, PresenterRegistry};
    use crate::routing::{Route, RouteList};

    fn tree() -> RouteList {
        RouteList::new()
            .add(Route::new("about").unwrap().with_default("presenter", "About"))
            .add(
                Route::new("<presenter>[/<action>]")
                    .unwrap()
                    .with_default("action", "default"),
            )
    }

    #[test]
    fn test_matched_report() {
        let registry = PresenterRegistry::new()
            .register(PresenterClass::ui("HomePresenter", ["renderDefault"]));
        let req = HttpRequest::get("http://example.com/home").unwrap();
        let result = analyze(&tree(), &req, &registry);

        assert_eq!(tab_title(&result), "Home:default");
        let text = render_text(&result, &req);
        assert!(text.contains("Request: GET http://example.com/home"));
        assert!(text.contains("Source: HomePresenter::renderDefault()"));
        assert!(text.contains(
            "✓ Route <presenter>[/<action>] defaults(action=default) => action=default, presenter=Home"
        ));
        // No module column when nothing sits under a module.
        assert!(!text.contains(" ["));
    }

    #[test]
    fn test_unmatched_report() {
        let req = HttpRequest::get("http://example.com/a/b/c").unwrap();
        let result = analyze(&tree(), &req, &PresenterRegistry::new());
        assert_eq!(tab_title(&result), "no route");
        let text = render_text(&result, &req);
        assert!(!text.contains("Source:"));
        assert!(text.contains("  Route about defaults(presenter=About)"));
    }

    #[test]
    fn test_module_column() {
        let tree = RouteList::new().add(RouteList::with_module("Admin:").add(
            Route::new("admin/<presenter>").unwrap(),
        ));
        let req = HttpRequest::get("http://example.com/admin/users").unwrap();
        let result = analyze(&tree, &req, &PresenterRegistry::new());
        let text = render_text(&result, &req);
        assert!(text.contains("✓ ─ Route [Admin] admin/<presenter> => presenter=Admin:Users"));
    }

    #[test]
    fn test_list_boundaries_are_drawn() {
        let tree = RouteList::new()
            .add(
                RouteList::with_module("Admin:")
                    .add(Route::new("admin/<presenter>").unwrap())
                    .add(Route::new("admin/<presenter>/<action>").unwrap())
                    .add(Route::new("admin").unwrap().with_default("presenter", "Dashboard")),
            )
            .add(Route::new("about").unwrap().with_default("presenter", "About"));
        let req = HttpRequest::get("http://example.com/about").unwrap();
        let result = analyze(&tree, &req, &PresenterRegistry::new());

        let text = render_text(&result, &req);
        let rows: Vec<_> = text.lines().skip_while(|l| !l.is_empty()).skip(1).collect();
        assert_eq!(
            rows,
            [
                "  ┌ Route [Admin] admin/<presenter>",
                "  │ Route [Admin] admin/<presenter>/<action>",
                "  └ Route [Admin] admin defaults(presenter=Dashboard)",
                "✓ Route [] about defaults(presenter=About) => presenter=About",
            ]
        );
    }
}
