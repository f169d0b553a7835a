use super::*;

#[test]
fn labels_scale_with_elapsed_time() {
    assert_eq!(fmt_since(Duration::from_secs(5)), "just now");
    assert_eq!(fmt_since(Duration::from_secs(60)), "1m ago");
    assert_eq!(fmt_since(Duration::from_secs(59 * 60 + 59)), "59m ago");
    assert_eq!(fmt_since(Duration::from_secs(3 * 3600)), "3h ago");
}
