//! Cursor-based editing on a `String`, with the cursor counted in chars.

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn insert_char(value: &mut String, cursor: &mut usize, ch: char) {
    let pos = clamp_cursor(*cursor, value);
    let byte_pos = byte_index_at_char(value, pos);
    value.insert(byte_pos, ch);
    *cursor = pos + 1;
}

pub fn backspace_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos - 1);
    value.remove(byte_pos);
    *cursor = pos - 1;
    true
}

pub fn delete_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos);
    value.remove(byte_pos);
    *cursor = pos;
    true
}

pub fn move_left(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    *cursor = pos - 1;
    true
}

pub fn move_right(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    *cursor = pos + 1;
    true
}

pub fn move_word_left(cursor: &mut usize, value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    let start = word_start(&chars, pos);
    *cursor = start;
    start != pos
}

pub fn move_word_right(cursor: &mut usize, value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    let end = word_end(&chars, pos);
    *cursor = end;
    end != pos
}

pub fn delete_word_left(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    let start = word_start(&chars, pos);
    *cursor = start;
    if start == pos {
        return false;
    }
    chars.drain(start..pos);
    *value = chars.into_iter().collect();
    true
}

pub fn delete_word_right(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    let end = word_end(&chars, pos);
    *cursor = pos;
    if end == pos {
        return false;
    }
    chars.drain(pos..end);
    *value = chars.into_iter().collect();
    true
}

fn word_start(chars: &[char], pos: usize) -> usize {
    let mut start = pos;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }
    start
}

fn word_end(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    while end < chars.len() && is_separator(chars[end]) {
        end += 1;
    }
    while end < chars.len() && !is_separator(chars[end]) {
        end += 1;
    }
    end
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_handle_multibyte() {
        let mut value = String::from("Zo");
        let mut cursor = 2;
        insert_char(&mut value, &mut cursor, 'ë');
        assert_eq!(value, "Zoë");
        assert_eq!(cursor, 3);

        cursor = 1;
        insert_char(&mut value, &mut cursor, '→');
        assert_eq!(value, "Z→oë");
        assert!(backspace_char(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("Zoë", 1));
    }

    #[test]
    fn delete_word_left_stops_at_separators() {
        let mut value = String::from("dana@acme.io");
        let mut cursor = char_count(&value);
        assert!(delete_word_left(&mut value, &mut cursor));
        assert_eq!(value, "dana@acme.");
        assert!(delete_word_left(&mut value, &mut cursor));
        assert_eq!(value, "dana@");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn delete_word_right_keeps_cursor() {
        let mut value = String::from("Platform engineer");
        let mut cursor = 8;
        assert!(delete_word_right(&mut value, &mut cursor));
        assert_eq!(value, "Platform");
        assert_eq!(cursor, 8);
        assert!(!delete_word_right(&mut value, &mut cursor));
    }

    #[test]
    fn word_motion() {
        let value = "On call rota";
        let mut cursor = char_count(value);
        assert!(move_word_left(&mut cursor, value));
        assert_eq!(cursor, 8);
        assert!(move_word_right(&mut cursor, value));
        assert_eq!(cursor, 12);
        assert!(!move_word_right(&mut cursor, value));
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut value = String::from("abc");
        let mut cursor = 3;
        assert!(!delete_char(&mut value, &mut cursor));
        cursor = 0;
        assert!(delete_char(&mut value, &mut cursor));
        assert_eq!(value, "bc");
    }
}
