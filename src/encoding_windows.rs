//! Windows-specific encoding functions.
//!
//! The single-byte ("OEM") text fields of the Challenge message use the configured ANSI character
//! set. Windows provides conversion functions between this character set and Unicode; we use them
//! to convert between ANSI strings (represented as `Vec<u8>`) and Rust strings (via UTF-16).


use windows::Win32::Globalization::{
    CP_ACP, MB_ERR_INVALID_CHARS, MB_PRECOMPOSED, MultiByteToWideChar, WC_COMPOSITECHECK,
    WideCharToMultiByte,
};


/// Converts the given ANSI string into a Rust string.
pub fn ansi_string_to_rust(ansi_string: &[u8]) -> Option<String> {
    if ansi_string.is_empty() {
        return Some(String::new());
    }

    // size the UTF-16 buffer first, then convert for real
    let wide_char_count = unsafe {
        MultiByteToWideChar(
            CP_ACP,
            MB_ERR_INVALID_CHARS | MB_PRECOMPOSED,
            ansi_string,
            None,
        )
    };
    let wide_char_usize: usize = wide_char_count.try_into().ok()?;
    if wide_char_usize == 0 {
        return None;
    }

    let mut utf16_buf = vec![0u16; wide_char_usize];
    let chars_written = unsafe {
        MultiByteToWideChar(
            CP_ACP,
            MB_ERR_INVALID_CHARS | MB_PRECOMPOSED,
            ansi_string,
            Some(utf16_buf.as_mut_slice()),
        )
    };
    let chars_written_usize: usize = chars_written.try_into().ok()?;
    if chars_written_usize == 0 {
        return None;
    }
    utf16_buf.truncate(chars_written_usize);

    String::from_utf16(&utf16_buf).ok()
}


/// Converts the given Rust string into an ANSI string.
pub fn rust_string_to_ansi(rust_str: &str) -> Option<Vec<u8>> {
    if rust_str.is_empty() {
        return Some(Vec::new());
    }

    let utf16: Vec<u16> = rust_str.encode_utf16().collect();

    // size the ANSI buffer first, then convert for real
    let byte_count = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_COMPOSITECHECK,
            &utf16,
            None,
            None,
            None,
        )
    };
    let byte_count_usize: usize = byte_count.try_into().ok()?;
    if byte_count_usize == 0 {
        return None;
    }

    let mut ansi_buf = vec![0u8; byte_count_usize];
    let bytes_written = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_COMPOSITECHECK,
            &utf16,
            Some(ansi_buf.as_mut_slice()),
            None,
            None,
        )
    };
    let bytes_written_usize: usize = bytes_written.try_into().ok()?;
    if bytes_written_usize == 0 {
        return None;
    }
    ansi_buf.truncate(bytes_written_usize);

    Some(ansi_buf)
}
