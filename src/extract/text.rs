//! Plain text and Markdown readers.
//!
//! Both decode UTF-8 with a lossy fallback for stray bytes; Markdown is a
//! passthrough, markup included.

pub fn extract(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(data).into_owned(),
    }
}
