//! HTML rendering of display records.
//!
//! Pages are plain server-rendered HTML built with `format!`. Every value
//! that came from upstream or from a form goes through [`escape`].

mod forms;
mod pages;

use axum::response::Html;

pub use forms::{login_page, signup_page};
pub use pages::{home_page, music_page, profile_page, search_page};

/// Escapes text for use in HTML bodies and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page chrome: navigation, flash messages and the page body.
pub fn layout(title: &str, user: Option<&str>, flashes: &[String], body: &str) -> Html<String> {
    let account = match user {
        Some(name) => format!(
            r#"<span class="user">{}</span> <a href="/logout">Log out</a>"#,
            escape(name)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/signup">Sign up</a>"#.to_string(),
    };

    let messages: String = flashes
        .iter()
        .map(|m| format!(r#"<li class="message">{}</li>"#, escape(m)))
        .collect();
    let messages = if messages.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="messages">{}</ul>"#, messages)
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · tunefeed</title>
</head>
<body>
<nav><a href="/">Home</a> <a href="/search">Search</a> {account}</nav>
{messages}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        account = account,
        messages = messages,
        body = body,
    ))
}

/// `<img>` for a resolved URL; sentinel text and empty values render as text.
fn image_tag(src: &str, alt: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt))
    } else if src.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="no-image">{}</span>"#, escape(src))
    }
}
