use crate::models::ImageReference;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Attributes checked on `<img>`, first non-empty wins.
const IMG_SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];

/// Finds image URLs in `<img>` tags, `<style>` blocks and inline `style` attributes.
pub struct ImageExtractor {
    img: Selector,
    style_block: Selector,
    inline_style: Selector,
    css_url: Regex,
}

impl ImageExtractor {
    pub fn new() -> Self {
        Self {
            img: Selector::parse("img").expect("static selector"),
            style_block: Selector::parse("style").expect("static selector"),
            inline_style: Selector::parse("[style]").expect("static selector"),
            css_url: Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^"')\s]+))\s*\)"#).expect("static pattern"),
        }
    }

    /// Returns unique absolute image URLs in extraction order.
    pub fn extract(&self, html: &[u8], base_url: &Url) -> Vec<ImageReference> {
        let html = String::from_utf8_lossy(html);
        let document = Html::parse_document(&html);

        let mut candidates: Vec<String> = Vec::new();

        for element in document.select(&self.img) {
            let source = IMG_SOURCE_ATTRS
                .iter()
                .filter_map(|attr| element.value().attr(attr))
                .find(|value| !value.trim().is_empty());

            if let Some(source) = source {
                candidates.push(source.to_string());
            }
        }

        for element in document.select(&self.style_block) {
            let css = element.text().collect::<String>();
            candidates.extend(self.css_urls(&css));
        }

        for element in document.select(&self.inline_style) {
            if let Some(style) = element.value().attr("style") {
                candidates.extend(self.css_urls(style));
            }
        }

        debug!("[EXTRACTOR] {} raw candidates before resolution", candidates.len());

        let mut seen = HashSet::new();
        let mut images = Vec::new();
        for candidate in candidates {
            let Some(url) = resolve(base_url, &candidate) else {
                continue;
            };
            if seen.insert(url.as_str().to_string()) {
                images.push(ImageReference::new(url));
            }
        }

        debug!("[EXTRACTOR] {} unique image URLs", images.len());
        images
    }

    /// Bodies of every `url(...)` in a CSS fragment. Quoted bodies may contain `)` and spaces.
    pub fn css_urls(&self, css: &str) -> Vec<String> {
        self.css_url
            .captures_iter(css)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| m.as_str().trim().to_string())
            .filter(|body| !body.is_empty())
            .collect()
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(base_url: &Url, reference: &str) -> Option<Url> {
    match base_url.join(reference.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!("[EXTRACTOR] Skipping unresolvable reference {:?}: {}", reference, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post.html").unwrap()
    }

    fn extract(html: &str) -> Vec<String> {
        ImageExtractor::new()
            .extract(html.as_bytes(), &base())
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn relative_forms_of_one_image_dedupe() {
        let urls = extract(
            r#"<img src="./a.png"><img src="a.png"><img src="/blog/a.png">
               <img src="https://example.com/blog/a.png">"#,
        );
        assert_eq!(urls, vec!["https://example.com/blog/a.png"]);
    }

    #[test]
    fn query_strings_keep_urls_distinct() {
        let urls = extract(r#"<img src="a.png?v=1"><img src="a.png?v=2"><img src="a.png?v=1">"#);
        assert_eq!(
            urls,
            vec!["https://example.com/blog/a.png?v=1", "https://example.com/blog/a.png?v=2"]
        );
    }

    #[test]
    fn src_wins_over_lazy_attributes() {
        let urls = extract(r#"<img src="a.png" data-src="b.png" data-lazy-src="c.png">"#);
        assert_eq!(urls, vec!["https://example.com/blog/a.png"]);
    }

    #[test]
    fn empty_src_falls_through_to_lazy_attributes() {
        let urls = extract(
            r#"<img src="" data-src="b.png"><img data-lazy-src="c.png"><img alt="nothing">"#,
        );
        assert_eq!(
            urls,
            vec!["https://example.com/blog/b.png", "https://example.com/blog/c.png"]
        );
    }

    #[test]
    fn style_block_and_inline_style_each_contribute() {
        let urls = extract(
            r#"<html><head><style>body{background:url('bg.jpg')}</style></head>
               <body><div style="background-image:url(icon.png)"></div></body></html>"#,
        );
        assert_eq!(
            urls,
            vec!["https://example.com/blog/bg.jpg", "https://example.com/blog/icon.png"]
        );
    }

    #[test]
    fn images_come_before_css_references() {
        let urls = extract(
            r#"<div style="background:url(&quot;/hero.webp&quot;)"></div>
               <style>.x{background:url("/x.png")}</style>
               <img src="//cdn.example.org/logo.svg">"#,
        );
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.org/logo.svg",
                "https://example.com/x.png",
                "https://example.com/hero.webp",
            ]
        );
    }

    #[test]
    fn several_urls_in_one_declaration() {
        let extractor = ImageExtractor::new();
        let found = extractor.css_urls("background: url(a.png), url( 'b.png' ), url(\"c.png\"); mask: url()");
        assert_eq!(found, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn quoted_bodies_keep_parentheses_and_spaces() {
        let urls = extract(
            r#"<style>.a{background:url("/img/banner(1).png")}</style>
               <div style="background:url('/hero (2x).webp'), url( /plain.png )"></div>"#,
        );
        assert_eq!(
            urls,
            vec![
                "https://example.com/img/banner(1).png",
                "https://example.com/hero%20(2x).webp",
                "https://example.com/plain.png",
            ]
        );
    }

    #[test]
    fn empty_quoted_body_is_skipped() {
        let extractor = ImageExtractor::new();
        assert!(extractor.css_urls(r#"background:url(""); mask:url('')"#).is_empty());
    }

    #[test]
    fn malformed_markup_yields_what_it_can() {
        let urls = extract(r#"<img src="ok.png"<div style="background:url(broken"><img src="http://[bad">"#);
        assert!(urls.iter().all(|u| !u.contains("[bad")));
    }

    #[test]
    fn page_without_images_is_empty() {
        assert!(extract("<html><body><p>hello</p></body></html>").is_empty());
    }
}
