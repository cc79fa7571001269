use super::*;
use pretty_assertions::assert_eq;

#[test]
fn complete_lines_are_delivered_immediately() {
    let _serial = CAPTURE_TEST_LOCK.lock();
    let sink = BufferSink::shared();
    let _guard = begin(sink.clone());

    out().print("hel");
    assert!(sink.lines(Stream::Out).is_empty());
    out().println("lo");
    assert_eq!(sink.lines(Stream::Out), vec!["hello".to_string()]);
}

#[test]
fn partial_line_is_flushed_on_drop() {
    let _serial = CAPTURE_TEST_LOCK.lock();
    let sink = BufferSink::shared();
    {
        let _guard = begin(sink.clone());
        out().print("a\nb");
        err().print("oops");
    }
    assert_eq!(sink.lines(Stream::Out), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(sink.lines(Stream::Err), vec!["oops".to_string()]);
    assert!(!is_active());
}

#[test]
fn nested_capture_restores_previous_sink() {
    let _serial = CAPTURE_TEST_LOCK.lock();
    let outer = BufferSink::shared();
    let inner = BufferSink::shared();

    let _outer_guard = begin(outer.clone());
    {
        let _inner_guard = begin(inner.clone());
        out().println("inner");
    }
    out().println("outer");

    assert_eq!(inner.lines(Stream::Out), vec!["inner".to_string()]);
    assert_eq!(outer.lines(Stream::Out), vec!["outer".to_string()]);
}

#[test]
fn capture_is_restored_after_panic() {
    let _serial = CAPTURE_TEST_LOCK.lock();
    let sink = BufferSink::shared();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = begin(sink.clone());
        out().print("before panic");
        panic!("host failure");
    }));
    assert!(result.is_err());
    assert!(!is_active());
    assert_eq!(sink.lines(Stream::Out), vec!["before panic".to_string()]);
}

#[test]
fn carriage_returns_are_stripped() {
    let _serial = CAPTURE_TEST_LOCK.lock();
    let sink = BufferSink::shared();
    let _guard = begin(sink.clone());
    out().print("x\r\ny\n");
    assert_eq!(sink.lines(Stream::Out), vec!["x".to_string(), "y".to_string()]);
}
