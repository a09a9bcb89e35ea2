/// Shown in place of the recognized text when the provider found nothing.
pub const FALLBACK_TEXT: &str = "no text recognized";

/// Escape text for safe interpolation into an HTML element body.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the recognized text as a minimal HTML page. Whitespace-only results
/// collapse to the fallback message so the page is never blank.
pub fn render_page(text: &str) -> String {
    let content = if text.trim().is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        escape_html(text)
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Recognized Text</title>
    <style>
        body {{ font-family: sans-serif; line-height: 1.6; padding: 15px; }}
        pre {{ white-space: pre-wrap; word-wrap: break-word; font-size: 16px; }}
    </style>
</head>
<body>
    <pre>{content}</pre>
</body>
</html>"#
    )
}
