use pretty_assertions::assert_eq;
use rollcall_engine::{decode_page, DomScraper, PageSnapshot, ParticipantScraper, ScrapeSettings};

#[test]
fn declared_charset_wins_over_detection() {
    let bytes = b"caf\xe9";
    let decoded = decode_page(bytes, Some("ISO-8859-1")).unwrap();
    assert_eq!(decoded.html, "café");
    assert!(decoded.encoding_label.eq_ignore_ascii_case("windows-1252"));
}

#[test]
fn utf8_bom_is_honoured() {
    let decoded = decode_page(b"\xEF\xBB\xBFhello", None).unwrap();
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn meta_charset_decodes_korean_page() {
    let (body, _, _) = encoding_rs::EUC_KR.encode(
        r#"<html><head><meta charset="euc-kr"></head><body><div role="listitem"><span>참석함</span></div><div role="listitem"><span>홍길동</span></div></body></html>"#,
    );
    let decoded = decode_page(&body, None).unwrap();
    assert_eq!(decoded.encoding_label, "EUC-KR");

    let scraper = DomScraper::new(&ScrapeSettings::default()).unwrap();
    let found = scraper.scrape(&PageSnapshot::new(decoded.html));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text.as_deref(), Some("홍길동"));
}

#[test]
fn plain_utf8_without_hints_is_detected() {
    let decoded = decode_page("<span>김민지</span>".as_bytes(), None).unwrap();
    assert_eq!(decoded.html, "<span>김민지</span>");
}

#[test]
fn malformed_bytes_for_declared_charset_fail() {
    let result = decode_page(b"abc \xc3\x28", Some("utf-8"));
    assert!(result.is_err());
}
