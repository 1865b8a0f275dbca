//! Line buffer tests

use laureline_cli::console::line_buffer::{LineBuffer, LINE_SIZE};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::new();

    for c in b"help" {
        assert!(buf.push(*c));
    }

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf = LineBuffer::new();

    for c in b"help" {
        buf.push(*c);
    }
    assert!(buf.backspace());
    assert!(buf.backspace());

    assert_eq!(buf.as_str(), "he");
}

#[test]
fn test_line_buffer_backspace_empty() {
    let mut buf = LineBuffer::new();

    assert!(!buf.backspace()); // should not underflow
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.as_str(), "");
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::new();

    for c in b"set ip_addr=1.2.3.4" {
        buf.push(*c);
    }
    buf.clear();

    assert_eq!(buf.as_str(), "");
    assert!(buf.is_empty());
}

#[test]
fn test_line_buffer_overflow_refused() {
    let mut buf = LineBuffer::new();

    for i in 0..(LINE_SIZE as u8 + 6) {
        buf.push(b'a' + (i % 26));
    }

    assert_eq!(buf.len(), LINE_SIZE);
    assert!(buf.is_full());
    assert!(!buf.push(b'z'));
    // Existing text is left alone
    assert!(buf.as_str().starts_with("abcdef"));
    assert!(!buf.as_str().ends_with('z'));
}

#[test]
fn test_line_buffer_bytes_independent_of_utf8() {
    let mut buf = LineBuffer::new();
    buf.push(b'a');
    buf.push(0xFF);

    assert_eq!(buf.as_bytes(), &[b'a', 0xFF]);
    assert_eq!(buf.len(), buf.as_bytes().len());
}
