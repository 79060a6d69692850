use rs_linkrel::classifier::{is_external as is_external_with, LinkKind};
use rs_linkrel::{is_external, HomeHost, Scheme};

#[test]
fn home_host_matches_with_and_without_www() {
    assert!(!is_external("https://example.com/x", "example.com"));
    assert!(!is_external("https://example.com/x", "www.example.com"));
    assert!(!is_external("https://www.example.com/x", "example.com"));
}

#[test]
fn foreign_hosts_are_external() {
    assert!(is_external("https://other.com/x", "example.com"));
    assert!(is_external("http://sub.example.com/", "example.com"));
}

#[test]
fn comparison_ignores_case() {
    assert!(!is_external("HTTPS://EXAMPLE.COM/Path", "Example.Com"));
}

#[test]
fn links_without_a_host_are_internal() {
    for url in ["#top", "", "   ", "/path", "?q=1", "relative/page", "mailto:x@other.com"] {
        assert!(!is_external(url, "example.com"), "{url:?} should be internal");
    }
}

#[test]
fn unresolvable_home_host_never_flags_external() {
    assert!(!is_external("https://other.com/x", ""));
    assert!(!is_external("//other.com/x", "  "));
}

#[test]
fn protocol_relative_urls_classify_under_either_scheme() {
    let home = HomeHost::new("example.com");
    for scheme in [Scheme::Http, Scheme::Https] {
        assert!(is_external_with("//other.com/x", &home, scheme));
        assert!(!is_external_with("//example.com/x", &home, scheme));
    }
}

#[test]
fn home_host_accepts_urls_and_ports() {
    let home = HomeHost::new("https://www.Example.com:8443/blog");
    assert_eq!(home.as_str(), "example.com");
    assert_eq!(
        LinkKind::of("https://example.com/x", &home, Scheme::Https),
        LinkKind::Internal
    );
}
