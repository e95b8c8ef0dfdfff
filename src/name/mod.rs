//! XML name encoding.
//!
//! Element names computed by the builder come from arbitrary strings
//! (declared member identifiers, naming hints, caller-supplied names), so
//! every name is passed through [`encode_name`] before use. Characters that
//! are not valid in an XML 1.0 name are replaced with `_xHHHH_` escape
//! sequences (uppercase hex, four digits, or eight for code points above
//! U+FFFF), so the result is always a valid name.
//!
//! See <https://www.w3.org/TR/xml/#NT-Name>

use std::fmt::Write;

/// Encodes an arbitrary string into a valid XML name.
///
/// Invalid characters become `_xHHHH_` escapes; a leading character that may
/// only appear in name tails (digits, `-`, `.`, combining marks) is escaped
/// as well. A literal `_` that would collide with an escape sequence (an
/// `_x` followed by a well-formed hex tail) is itself escaped as `_x005F_`,
/// so distinct inputs never encode to the same name.
///
/// The empty string is returned unchanged.
///
/// # Examples
///
/// ```
/// use treedump::name::encode_name;
///
/// assert_eq!(encode_name("Order"), "Order");
/// assert_eq!(encode_name("Order Total"), "Order_x0020_Total");
/// assert_eq!(encode_name("1st"), "_x0031_st");
/// ```
#[must_use]
pub fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut first = true;

    for (pos, ch) in name.char_indices() {
        let valid = if first {
            is_name_start_char(ch)
        } else {
            is_name_char(ch)
        };
        first = false;

        if valid && !(ch == '_' && looks_like_escape(&name[pos + 1..])) {
            out.push(ch);
        } else {
            write_escape(&mut out, ch);
        }
    }
    out
}

/// Writes the `_xHHHH_` escape for one character.
fn write_escape(out: &mut String, ch: char) {
    let code = ch as u32;
    if code > 0xFFFF {
        let _ = write!(out, "_x{code:08X}_");
    } else {
        let _ = write!(out, "_x{code:04X}_");
    }
}

/// Returns `true` if `rest` begins with the tail of an escape sequence
/// (`x` + 4 or 8 hex digits + `_`), meaning a preceding literal `_` must
/// itself be escaped to keep the encoding injective.
fn looks_like_escape(rest: &str) -> bool {
    let Some(hex) = rest.strip_prefix('x') else {
        return false;
    };
    let bytes = hex.as_bytes();
    for len in [4usize, 8] {
        if bytes.len() > len
            && bytes[..len].iter().all(u8::is_ascii_hexdigit)
            && bytes[len] == b'_'
        {
            return true;
        }
    }
    false
}

// XML 1.0 (Fifth Edition) name character classes.

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}
