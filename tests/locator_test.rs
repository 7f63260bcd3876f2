use swagger_resolver::resolution::{HostKind, Locator};
use swagger_resolver::types::RefParameter;

#[test]
fn test_parse_splits_host_and_fragment() {
    let locator = Locator::parse("http://host/spec#Pet").unwrap();
    assert_eq!(locator.host, "http://host/spec");
    assert_eq!(locator.fragment, "Pet");
    assert_eq!(locator.host_kind("self"), HostKind::Http);
}

#[test]
fn test_parse_rejects_malformed_locators() {
    assert!(Locator::parse("not-a-ref").is_none());
    assert!(Locator::parse("http://host/spec").is_none());
    assert!(Locator::parse("http://host/spec#a#b").is_none());
    assert!(Locator::parse("#/definitions/Pet").is_none());
    assert!(Locator::parse("http://host/spec#").is_none());
    assert!(Locator::parse("").is_none());
}

#[test]
fn test_host_kinds() {
    let kind = |s: &str| Locator::parse(s).unwrap().host_kind("self");
    assert_eq!(kind("https://host/spec.yaml#/Pet"), HostKind::Http);
    assert_eq!(kind("self#/definitions/Pet"), HostKind::SelfDocument);
    assert_eq!(kind("pets.json#/definitions/Pet"), HostKind::Other);
    assert_eq!(
        Locator::parse("local#/Pet").unwrap().host_kind("local"),
        HostKind::SelfDocument
    );
}

#[test]
fn test_segments_skip_empty_parts() {
    let locator = Locator::parse("http://host/spec#/definitions//Pet/").unwrap();
    let segments: Vec<&str> = locator.segments().collect();
    assert_eq!(segments, vec!["definitions", "Pet"]);
}

#[test]
fn test_simple_ref_is_last_fragment_segment() {
    let simple = |s: &str| {
        RefParameter {
            reference: s.to_string(),
            extra: Default::default(),
        }
        .simple_ref()
        .to_string()
    };
    assert_eq!(simple("http://host/params.json#/parameters/limitParam"), "limitParam");
    assert_eq!(simple("http://host/params.json#limitParam"), "limitParam");
    assert_eq!(simple("#/parameters/offsetParam"), "offsetParam");
    assert_eq!(simple("limitParam"), "limitParam");
}
