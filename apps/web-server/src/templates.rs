//! Process-wide Tera template engine.
//!
//! Templates are loaded once from the directory named by `TEMPLATE_DIR`
//! (default `./templates`) and shared by every handler. Custom filters:
//! `markdown` renders markdown source to HTML, `truncatewords` cuts a
//! string to a word count.

use std::collections::HashMap;
use std::sync::LazyLock;

use tera::{Context, Tera, Value};

use crate::markdown::{render_markdown, truncate_words};

static ENGINE: LazyLock<Tera> = LazyLock::new(|| {
    let dir = std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string());
    let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));

    let mut tera = match Tera::new(&glob) {
        Ok(tera) => tera,
        Err(e) => panic!("failed to load templates from {glob}: {e}"),
    };
    tera.register_filter("markdown", markdown_filter);
    tera.register_filter("truncatewords", truncatewords_filter);
    tera
});

/// The shared engine. First use loads the templates and panics if the
/// template directory is unreadable, so call this during startup.
pub fn engine() -> &'static Tera {
    &ENGINE
}

/// Render a template into an HTML string.
pub fn render(template: &str, context: &Context) -> tera::Result<String> {
    engine().render(template, context)
}

fn markdown_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let source = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("markdown filter expects a string"))?;
    Ok(Value::String(render_markdown(source)))
}

fn truncatewords_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("truncatewords filter expects a string"))?;
    let words = args
        .get("words")
        .and_then(Value::as_u64)
        .unwrap_or(30) as usize;
    Ok(Value::String(truncate_words(text, words)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_filter_renders_html() {
        let out = markdown_filter(&Value::String("**bold**".into()), &HashMap::new()).unwrap();
        assert!(out.as_str().unwrap().contains("<strong>bold</strong>"));
    }

    #[test]
    fn truncatewords_filter_honors_word_count() {
        let mut args = HashMap::new();
        args.insert("words".to_string(), Value::from(2u64));
        let out = truncatewords_filter(&Value::String("one two three".into()), &args).unwrap();
        assert_eq!(out.as_str().unwrap(), "one two …");
    }

    #[test]
    fn filters_reject_non_strings() {
        assert!(markdown_filter(&Value::from(3u64), &HashMap::new()).is_err());
    }

    #[test]
    fn engine_loads_the_blog_templates() {
        let names: Vec<&str> = engine().get_template_names().collect();
        assert!(names.contains(&"blog/post/list.html"));
        assert!(names.contains(&"blog/errors/404.html"));
    }
}
