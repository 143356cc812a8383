//! UTF-8 encoding functions. Used on operating systems other than Windows.
//!
//! The single-byte ("OEM") text fields of the Challenge message are defined in terms of the ANSI
//! character set, a concept only Windows has. On every other operating system the overwhelmingly
//! common single-byte encoding is UTF-8, so that is what these fall back to.


/// Converts the given ANSI string into a Rust string.
pub fn ansi_string_to_rust(ansi_string: &[u8]) -> Option<String> {
    std::str::from_utf8(ansi_string)
        .ok()
        .map(|s| s.to_owned())
}


/// Converts the given Rust string into an ANSI string.
pub fn rust_string_to_ansi(rust_str: &str) -> Option<Vec<u8>> {
    // Rust strings are UTF-8 already
    Some(Vec::from(rust_str.as_bytes()))
}
