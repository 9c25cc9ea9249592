//! Debug text overlay helpers.

use std::ffi::CString;
use std::fmt;

use super::BridgeError;

/// VGA text-mode palette indices understood by the bgfx debug font.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TextColor {
    Black = 0x0,
    Blue = 0x1,
    Green = 0x2,
    Cyan = 0x3,
    Red = 0x4,
    Magenta = 0x5,
    Brown = 0x6,
    LightGray = 0x7,
    DarkGray = 0x8,
    LightBlue = 0x9,
    LightGreen = 0xa,
    LightCyan = 0xb,
    LightRed = 0xc,
    LightMagenta = 0xd,
    Yellow = 0xe,
    White = 0xf,
}

/// Packs a text attribute byte: background in the high nibble, foreground low.
#[inline]
pub const fn text_attr(fg: TextColor, bg: TextColor) -> u8 {
    ((bg as u8) << 4) | fg as u8
}

/// Turns formatted text into the NUL-terminated buffer the native side reads.
///
/// The result is never empty: an empty string still carries its terminator.
pub(crate) fn to_native_text(args: fmt::Arguments<'_>) -> Result<CString, BridgeError> {
    let text = match args.as_str() {
        Some(s) => s.to_owned(),
        None => fmt::format(args),
    };

    CString::new(text).map_err(|e| BridgeError::InteriorNul {
        position: e.nul_position(),
    })
}

/// Formats and prints one line of debug text through a bridge.
///
/// ```ignore
/// debug_text!(bridge, 0, 1, 0x0f, "hp={}", hp)?;
/// ```
#[macro_export]
macro_rules! debug_text {
    ($bridge:expr, $x:expr, $y:expr, $attr:expr, $($arg:tt)+) => {
        $bridge.debug_text_fmt($x, $y, $attr, ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_packs_background_high() {
        assert_eq!(text_attr(TextColor::White, TextColor::Blue), 0x1f);
        assert_eq!(text_attr(TextColor::Yellow, TextColor::Black), 0x0e);
    }

    #[test]
    fn formatted_text_is_terminated() {
        let text = to_native_text(format_args!("hp={}", 42)).unwrap();
        assert_eq!(text.as_bytes_with_nul(), b"hp=42\0");
    }

    #[test]
    fn empty_text_still_has_a_terminator() {
        let text = to_native_text(format_args!("")).unwrap();
        assert_eq!(text.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn interior_nul_reports_position() {
        let err = to_native_text(format_args!("ab{}c", '\0')).unwrap_err();
        assert!(matches!(err, BridgeError::InteriorNul { position: 2 }));
    }
}
