use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ESCAPE_RE: Regex = Regex::new(r#"[\x07\x08\t\n\x0B\x0C\r\\"]"#).unwrap();
}

/// Escapes a string for a `.string` directive using octal escapes.
pub fn escape(s: &str) -> String {
    ESCAPE_RE
        .replace_all(s, |caps: &Captures| {
            caps[0]
                .chars()
                .map(|ch| format!("\\{:03o}", ch as u32))
                .collect::<String>()
        })
        .into_owned()
}
