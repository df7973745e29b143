use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// Upload form and report page. All rendering happens client-side from the
/// JSON report.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
