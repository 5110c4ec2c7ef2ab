//! Server-rendered form page.

use clipstrip_scraper::Resolution;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// What the form page shows below the input.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PageView {
    pub error: Option<String>,
    pub video_url: Option<String>,
    /// Diagnostic trace; the panel is omitted when `None`.
    pub trace: Option<String>,
}

impl PageView {
    pub(crate) fn from_resolution(resolution: &Resolution) -> Self {
        let (error, video_url) = match &resolution.outcome {
            Ok(video) => (None, Some(video.video_url.clone())),
            Err(e) => (Some(e.to_string()), None),
        };

        Self {
            error,
            video_url,
            trace: Some(resolution.trace.to_string()),
        }
    }
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Watermark-free Shopee video link</title>
<style>
body { font-family: Arial, sans-serif; background: #f5f5f5; margin: 0; padding: 0; }
.container { max-width: 600px; margin: auto; padding: 20px; }
.card { background: white; padding: 20px; border-radius: 14px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h2 { margin-top: 0; }
form { display: flex; flex-direction: column; gap: 10px; }
input, button { width: 100%; font-size: 16px; padding: 14px; border-radius: 10px; border: 1px solid #ccc; box-sizing: border-box; }
button { background: #ff5b00; color: white; font-weight: bold; border: none; }
button:hover { background: #e24e00; }
.result { padding: 14px; margin-top: 20px; background: #ffe6e6; border-left: 4px solid #cc0000; white-space: pre-wrap; border-radius: 10px; }
.result.success { background: #e6ffe6; border-left: 4px solid #009900; word-break: break-all; white-space: normal; }
.result video { width: 100%; margin-top: 12px; border-radius: 8px; }
.debug-toggle { margin-top: 15px; font-size: 14px; cursor: pointer; color: #555; }
.debug { margin-top: 5px; font-family: monospace; font-size: 13px; white-space: pre-wrap; background: #222; color: #0f0; padding: 10px; border-radius: 10px; display: none; }
</style>
<script>
function toggleDebug() {
    var box = document.getElementById('debug-box');
    if (!box) return;
    box.style.display = (box.style.display === 'none' || box.style.display === '') ? 'block' : 'none';
}
</script>
</head>
<body>
<div class="container">
<div class="card">
<h2>Watermark-free Shopee video link</h2>
<form method="POST">
<label for="url">Shopee link:</label>
<input id="url" name="url" placeholder="Paste the link here..." required />
<button type="submit">Generate</button>
</form>
"#;

const UNSAFE_LINK_MESSAGE: &str = "video link is not an http(s) URL";

const FOOT: &str = "</div>\n</div>\n</body>\n</html>\n";

/// Renders the full page. Every interpolated value is HTML-escaped.
pub(crate) fn render_page(view: &PageView) -> String {
    let mut html = String::from(HEAD);

    let video_url = view.video_url.as_deref().filter(|u| !u.is_empty());
    let unsafe_link = video_url.is_some_and(|u| !has_web_scheme(u));
    let error = if unsafe_link {
        Some(UNSAFE_LINK_MESSAGE)
    } else {
        view.error.as_deref().filter(|e| !e.is_empty())
    };

    if let Some(error) = error {
        html.push_str(&format!(
            "<div class=\"result\">{}</div>\n",
            encode_text(error)
        ));
    }

    if let Some(url) = video_url.filter(|_| !unsafe_link) {
        let attr = encode_double_quoted_attribute(url);
        html.push_str(&format!(
            concat!(
                "<div class=\"result success\">\n",
                "<b>Video without watermark:</b><br><br>\n",
                "<a href=\"{attr}\" target=\"_blank\" rel=\"noopener noreferrer\">{text}</a>\n",
                "<video controls preload=\"metadata\" src=\"{attr}\"></video>\n",
                "<p><a href=\"{attr}\" download>Download video</a></p>\n",
                "</div>\n",
            ),
            attr = attr,
            text = encode_text(url),
        ));
    }

    if let Some(trace) = view.trace.as_deref().filter(|t| !t.is_empty()) {
        html.push_str(&format!(
            concat!(
                "<div class=\"debug-toggle\" onclick=\"toggleDebug()\">&#9654; DEBUG (optional)</div>\n",
                "<div id=\"debug-box\" class=\"debug\">{}</div>\n",
            ),
            encode_text(trace)
        ));
    }

    html.push_str(FOOT);
    html
}

fn has_web_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_renders_only_the_form() {
        let html = render_page(&PageView::default());
        assert!(html.contains("<form method=\"POST\">"));
        assert!(html.contains("name=\"url\""));
        assert!(!html.contains("class=\"result"));
        assert!(!html.contains("id=\"debug-box\""));
    }

    #[test]
    fn error_view_shows_message_and_trace() {
        let html = render_page(&PageView {
            error: Some("failed to load page: 404".to_string()),
            video_url: None,
            trace: Some("received: x\nhttp status: 404".to_string()),
        });
        assert!(html.contains("<div class=\"result\">failed to load page: 404</div>"));
        assert!(html.contains("received: x\nhttp status: 404"));
        assert!(!html.contains("result success"));
    }

    #[test]
    fn success_view_links_previews_and_offers_download() {
        let html = render_page(&PageView {
            error: None,
            video_url: Some("https://cf.example.com/mms/v.mp4".to_string()),
            trace: Some("clean url: https://cf.example.com/mms/v.mp4".to_string()),
        });
        assert!(html.contains("<a href=\"https://cf.example.com/mms/v.mp4\" target=\"_blank\""));
        assert!(html.contains(
            "<video controls preload=\"metadata\" src=\"https://cf.example.com/mms/v.mp4\">"
        ));
        assert!(html.contains("download>Download video</a>"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let html = render_page(&PageView {
            error: Some("<script>alert(1)</script>".to_string()),
            video_url: Some("https://x/\"onmouseover=\"alert(1).mp4".to_string()),
            trace: Some("received: <b>".to_string()),
        });
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("href=\"https://x/&quot;onmouseover=&quot;alert(1).mp4\""));
        assert!(html.contains("received: &lt;b&gt;"));
    }

    #[test]
    fn non_web_video_links_are_not_rendered() {
        for url in [
            "javascript:alert(document.cookie)",
            " JAVASCRIPT:alert(1)",
            "data:text/html,x",
        ] {
            let html = render_page(&PageView {
                error: None,
                video_url: Some(url.to_string()),
                trace: Some("clean url: x".to_string()),
            });
            assert!(!html.contains("result success"), "rendered link for {url}");
            assert!(!html.contains("alert("), "leaked {url}");
            assert!(html.contains("<div class=\"result\">video link is not an http(s) URL</div>"));
        }
    }

    #[test]
    fn web_scheme_check_is_case_insensitive() {
        assert!(has_web_scheme("HTTPS://cf.example.com/v.mp4"));
        assert!(has_web_scheme("http://cf.example.com/v.mp4"));
        assert!(!has_web_scheme("https:/cf.example.com"));
        assert!(!has_web_scheme("ftp://cf.example.com/v.mp4"));
    }
}
