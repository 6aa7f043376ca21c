use super::*;

#[test]
fn test_plain_styling_has_no_escape_codes() {
    let styling = StyleManager::new(false);
    assert_eq!(styling.format_success("done"), "✓ done");
    assert_eq!(styling.format_error("failed"), "✗ failed");
    assert_eq!(styling.format_warning("careful"), "! careful");
    assert_eq!(styling.style_emphasis("title"), "title");
}

#[test]
fn test_forced_styling_emits_escape_codes() {
    let styling = StyleManager::new(true);
    assert!(styling.format_success("done").contains('\u{1b}'));
    assert!(styling.style_subtle("quiet").contains('\u{1b}'));
}
