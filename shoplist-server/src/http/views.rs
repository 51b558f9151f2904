//! HTML rendering for the list page and item fragments
//!
//! The page is driven by htmx: the add form appends the returned fragment to
//! the list, and each item swaps itself out when completed or removed.

use crate::models::{ItemView, ListView};

/// Event name sent in `HX-Trigger` after an item is added
pub const REFRESH_FORM_EVENT: &str = "refresh-form";

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 36rem; margin: 2rem auto; padding: 0 1rem; }
ul#items { list-style: none; padding: 0; }
li.item { display: flex; gap: 0.5rem; align-items: center; padding: 0.4rem 0; border-bottom: 1px solid #ddd; }
li.item .name { flex: 1; }
li.item.completed .name { text-decoration: line-through; color: #888; }
form { display: flex; gap: 0.5rem; margin-top: 1rem; }
form input { flex: 1; }
.share { font-size: 0.85rem; color: #555; word-break: break-all; }
"#;

/// Escape text for use in HTML content and double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a single `<li>` for one item.
pub fn item_fragment(item: &ItemView) -> String {
    let list = escape_html(&item.list_uuid);
    let id = item.id;
    let class = if item.completed { "item completed" } else { "item" };

    let complete_button = if item.completed {
        String::new()
    } else {
        format!(
            r##"<button hx-get="/{list}/complete-item/{id}" hx-target="#item-{id}" hx-swap="outerHTML">Done</button>"##
        )
    };

    format!(
        r##"<li id="item-{id}" class="{class}" data-completed="{completed}"><span class="name">{name}</span>{complete_button}<button hx-delete="/{list}/complete-item/{id}" hx-target="#item-{id}" hx-swap="outerHTML">Remove</button></li>"##,
        completed = item.completed,
        name = escape_html(&item.name),
    )
}

/// Render the full page for a list.
pub fn list_page(list: &ListView) -> String {
    let uuid = escape_html(&list.uuid);
    let items: String = list.items.iter().map(item_fragment).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Shopping list</title>
<script src="{HTMX_SRC}"></script>
<style>{STYLE}</style>
</head>
<body>
<main>
<h1>Shopping list</h1>
<p class="share">Share this list: <a href="/{uuid}">/{uuid}</a></p>
<ul id="items">{items}</ul>
<form hx-post="/{uuid}/add-item/" hx-target="#items" hx-swap="beforeend" hx-on:{REFRESH_FORM_EVENT}="this.reset()">
<input name="name" placeholder="Add an item" maxlength="200" required autofocus>
<button type="submit">Add</button>
</form>
</main>
</body>
</html>
"##
    )
}
