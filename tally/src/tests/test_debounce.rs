use crate::debounce::Debouncer;

#[test]
fn test_fires_once_the_window_has_passed() {
    let mut debounce = Debouncer::new(50);
    debounce.request("a", 100);

    assert_eq!(debounce.deadline(), Some(150));
    assert_eq!(debounce.poll(149), None);
    assert_eq!(debounce.poll(150), Some("a"));
    assert!(!debounce.is_pending());
}

#[test]
fn test_burst_yields_only_the_latest_value() {
    let mut debounce = Debouncer::new(50);

    debounce.request(1, 0);
    debounce.request(2, 30);
    debounce.request(3, 60);

    assert_eq!(debounce.poll(100), None);
    assert_eq!(debounce.poll(110), Some(3));
    assert_eq!(debounce.poll(500), None);
}

#[test]
fn test_take_ignores_the_deadline() {
    let mut debounce = Debouncer::new(50);
    debounce.request('x', 0);

    assert_eq!(debounce.take(), Some('x'));
    assert_eq!(debounce.take(), None);
}

#[test]
fn test_zero_window_fires_immediately() {
    let mut debounce = Debouncer::new(0);
    debounce.request((), 7);

    assert_eq!(debounce.poll(7), Some(()));
}
