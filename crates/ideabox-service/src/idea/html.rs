//! Minimal HTML scanning for Open Graph metadata.
//!
//! This is a tolerant substring scanner, not a parser. It only needs to
//! find `<meta>` tags and the `<title>` element in the document head.

use ideabox_entity::preview::LinkPreview;

const MAX_TEXT_CHARS: usize = 300;

/// Extract preview metadata from an HTML document.
pub fn extract_preview(html: &str) -> LinkPreview {
    LinkPreview {
        title: meta_content(html, &["og:title", "twitter:title"])
            .or_else(|| tag_content(html, "title")),
        description: meta_content(
            html,
            &["og:description", "twitter:description", "description"],
        ),
        image: meta_content(html, &["og:image", "og:image:url", "twitter:image"]),
        site_name: meta_content(html, &["og:site_name", "application-name"]),
        url: meta_content(html, &["og:url"]),
        kind: meta_content(html, &["og:type"]),
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Collapse whitespace and cap the length. Empty results become `None`.
fn clean_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(MAX_TEXT_CHARS).collect())
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{name}=");
    let mut search_from = 0;

    // Skip matches that are the tail of a longer attribute name.
    let pos = loop {
        let rel = lower[search_from..].find(&needle)?;
        let pos = search_from + rel;
        let boundary = lower[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_ascii_whitespace());
        if boundary {
            break pos;
        }
        search_from = pos + needle.len();
    };

    let value = tag[pos + needle.len()..].trim_start();
    let extracted = if let Some(rest) = value.strip_prefix('"') {
        &rest[..rest.find('"')?]
    } else if let Some(rest) = value.strip_prefix('\'') {
        &rest[..rest.find('\'')?]
    } else {
        let end = value
            .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .unwrap_or(value.len());
        &value[..end]
    };
    clean_text(&decode_entities(extracted))
}

fn meta_content(html: &str, keys: &[&str]) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    // Keys in priority order: the first key found anywhere wins.
    keys.iter().find_map(|key| {
        let mut cursor = 0;
        while let Some(rel) = lower[cursor..].find("<meta") {
            let start = cursor + rel;
            let end = start + lower[start..].find('>')? + 1;
            let tag_lower: String = lower[start..end]
                .chars()
                .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
                .collect();

            let named = ["property", "name", "itemprop"].iter().any(|attr| {
                tag_lower.contains(&format!(" {attr}=\"{key}\""))
                    || tag_lower.contains(&format!(" {attr}='{key}'"))
            });
            if named && let Some(content) = attribute(&html[start..end], "content") {
                return Some(content);
            }
            cursor = end;
        }
        None
    })
}

fn tag_content(html: &str, tag: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let start_tag = lower.find(&format!("<{tag}"))?;
    let start = start_tag + lower[start_tag..].find('>')? + 1;
    let end = start + lower[start..].find(&format!("</{tag}>"))?;
    clean_text(&decode_entities(&html[start..end]))
}
