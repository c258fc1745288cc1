use super::*;

#[test]
fn line_lookup() {
    let source = "a\nbb\nccc";
    let table = LineOffsetTable::build(source);

    assert_eq!(table.line_count(), 3);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(2), 2);
    assert_eq!(table.line_from_offset(4), 2);
    assert_eq!(table.line_from_offset(5), 3);
}

#[test]
fn columns_count_characters() {
    let source = "LET é = 1";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes; '=' sits at byte 7 and character 7
    assert_eq!(table.offset_to_line_col(source, 7), (1, 7));
}

#[test]
fn line_text_strips_break() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
}

#[test]
fn line_number_matches_table() {
    let source = "x\ny\nz";
    let table = LineOffsetTable::build(source);
    for offset in 0..5u32 {
        assert_eq!(
            line_number(source, Span::point(offset)),
            table.line_from_offset(offset)
        );
    }
}
