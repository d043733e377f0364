use pulldown_cmark::{html, Options, Parser};

/// Render a markdown bot reply to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    add_code_highlighting_classes(&html_output)
}

/// Add hljs classes to code blocks so a host page running highlight.js
/// picks them up
fn add_code_highlighting_classes(html: &str) -> String {
    html.replace("<pre><code", "<pre><code class=\"hljs\"")
        .replace("<code>", "<code class=\"hljs\">")
}

/// Render message content: bot replies pass through markdown, user text
/// is escaped verbatim
pub fn render_message_content(content: &str, use_markdown: bool) -> String {
    if use_markdown {
        render_markdown(content)
    } else {
        crate::utils::escape_html(content).replace('\n', "<br>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        let md = "# Hello\n\nThis is **bold** text.";
        let html = render_markdown(md);
        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>"));
    }

    #[test]
    fn test_render_code_block() {
        let md = "```rust\nfn main() {}\n```";
        let html = render_markdown(md);
        assert!(html.contains("<pre>"));
        assert!(html.contains("hljs"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let rendered = render_message_content("<script>alert(1)</script>", false);
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }
}
