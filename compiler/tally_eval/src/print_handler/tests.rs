use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_collects_lines() {
    let handler = buffer_handler();
    handler.println("10");
    handler.println("15");
    assert_eq!(handler.output(), "10\n15\n");
    assert_eq!(handler.lines(), vec!["10", "15"]);
}

#[test]
fn clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println("x");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    silent.clear();

    assert_eq!(stdout_handler().output(), "");
}

#[test]
fn clones_share_one_buffer() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    other.println("shared");
    assert_eq!(handler.lines(), vec!["shared"]);
}
