//! Document shell.

use crate::widget::markup::escape_html;

/// htmx build loaded by the page.
pub const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";

/// Render the full HTML document around `body`.
///
/// `body` must already be safe markup.
pub fn render_page(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <script src="{HTMX_SRC}"></script>
    <link rel="stylesheet" href="/static/widget.css">
</head>
<body>
    <main class="page">
        <h1>{title}</h1>
    </main>
{body}
</body>
</html>
"#
    )
}
