//! Markdown rendering and word truncation for templates and the feed.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown source to HTML.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Truncate `text` to at most `max_words` whitespace-separated words,
/// appending an ellipsis when anything was cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let mut words = text.split_whitespace();
    let truncated: Vec<&str> = words.by_ref().take(max_words).collect();
    if words.next().is_none() {
        truncated.join(" ")
    } else {
        format!("{} …", truncated.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_words("one two three", 30), "one two three");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_words("a b c d e", 3), "a b c …");
    }

    #[test]
    fn exact_length_gets_no_ellipsis() {
        assert_eq!(truncate_words("a b c", 3), "a b c");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(truncate_words("  a \n b\tc  ", 2), "a b …");
    }
}
