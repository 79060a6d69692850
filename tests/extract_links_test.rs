use rs_linkrel::{extract_links, LinkRecord, Scheme, SiteConfig};

fn site() -> SiteConfig {
    SiteConfig::new("https://example.com").expect("valid home url")
}

fn find<'a>(records: &'a [LinkRecord], url: &str, text: &str) -> &'a LinkRecord {
    records
        .iter()
        .find(|r| r.url == url && r.anchor_text == text)
        .unwrap_or_else(|| panic!("no record for ({url}, {text}) in {records:?}"))
}

#[test]
fn identical_pairs_are_aggregated() {
    let html = r#"<a href="/x">Click</a><p><a href="/x">Click</a></p><a href="/x">Other</a>"#;
    let records = extract_links(html, &site());

    assert_eq!(records.len(), 2);
    assert_eq!(find(&records, "https://example.com/x", "Click").link_count, 2);
    assert_eq!(find(&records, "https://example.com/x", "Other").link_count, 1);
}

#[test]
fn different_urls_with_same_text_are_separate() {
    let records = extract_links(
        r#"<a href="https://a.com">Docs</a><a href="https://b.com">Docs</a>"#,
        &site(),
    );
    assert_eq!(records.len(), 2);
}

#[test]
fn non_web_and_relative_hrefs_are_not_recorded() {
    let html = concat!(
        r#"<a href="mailto:a@b.com">mail</a>"#,
        r#"<a href="tel:+1">tel</a>"#,
        r#"<a href="javascript:alert(1)">js</a>"#,
        r#"<a href="file:///x">file</a>"#,
        r#"<a href="ftp://files.other.com/x">ftp</a>"#,
        r##"<a href="#section">frag</a>"##,
        r#"<a href="page.html">doc-relative</a>"#,
        r#"<a href="">empty</a>"#,
        r#"<a>no href</a>"#,
    );
    assert!(extract_links(html, &site()).is_empty());
}

#[test]
fn classification_and_domain_normalization() {
    let records = extract_links(
        r#"<a href="https://WWW.Other.COM/path?q=1">Out</a><a href="https://www.example.com/in">In</a>"#,
        &site(),
    );

    let out = find(&records, "https://WWW.Other.COM/path?q=1", "Out");
    assert_eq!(out.domain, "other.com");
    assert!(out.is_external);

    let inside = find(&records, "https://www.example.com/in", "In");
    assert_eq!(inside.domain, "example.com");
    assert!(!inside.is_external);
}

#[test]
fn href_entities_are_decoded() {
    let records = extract_links(r#"<a href="/search?a=1&amp;b=2">S</a>"#, &site());
    assert_eq!(records[0].url, "https://example.com/search?a=1&b=2");
}

#[test]
fn protocol_relative_links_use_the_request_scheme() {
    let html = r#"<a href="//cdn.other.com/file">CDN</a>"#;

    let https = extract_links(html, &site());
    assert_eq!(https[0].url, "https://cdn.other.com/file");

    let http = extract_links(html, &site().with_scheme(Scheme::Http));
    assert_eq!(http[0].url, "http://cdn.other.com/file");
    assert_eq!(http[0].domain, "cdn.other.com");
    assert!(http[0].is_external);
}

#[test]
fn root_relative_links_resolve_against_the_site() {
    let site = SiteConfig::new("https://www.example.com/blog/").expect("valid home url");
    let records = extract_links(r#"<a href="/about">About</a>"#, &site);
    assert_eq!(records[0].url, "https://www.example.com/about");
    assert!(!records[0].is_external);
}

#[test]
fn anchor_text_covers_nested_markup() {
    let records = extract_links(
        "<a href=\"/x\">\n   <img src=\"i.png\"> <span>Read <b>the</b> post</span>\n</a>",
        &site(),
    );
    assert_eq!(records[0].anchor_text, "Read the post");
}

#[test]
fn image_only_links_have_empty_text() {
    let records = extract_links(r#"<a href="/x"><img src="i.png" alt="pic"></a>"#, &site());
    assert_eq!(records[0].anchor_text, "");
}

#[test]
fn records_follow_first_occurrence_order() {
    let records = extract_links(
        r#"<a href="/b">B</a><a href="/a">A</a><a href="/b">B</a>"#,
        &site(),
    );
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["https://example.com/b", "https://example.com/a"]);
}

#[test]
fn records_serialize_with_expected_field_names() {
    let records = extract_links(r#"<a href="https://other.com/">Out</a>"#, &site());
    let json = serde_json::to_value(&records).expect("serializable");
    assert_eq!(json[0]["url"], "https://other.com/");
    assert_eq!(json[0]["domain"], "other.com");
    assert_eq!(json[0]["anchor_text"], "Out");
    assert_eq!(json[0]["is_external"], true);
    assert_eq!(json[0]["link_count"], 1);
}

#[test]
fn backslash_hrefs_agree_with_the_rewriter() {
    let html = r#"<a href="/\evil.com/x">x</a>"#;
    let links = extract_links(html, &site());
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://evil.com/x");
    assert_eq!(links[0].domain, "evil.com");
    assert!(links[0].is_external);
    assert!(rs_linkrel::is_external("/\\evil.com/x", "example.com"));
}
