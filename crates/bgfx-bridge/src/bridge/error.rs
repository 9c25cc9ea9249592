use std::fmt;

/// Failures owned by the bridge itself.
///
/// Native library failures never show up here; the native side reports misuse
/// its own way (usually by aborting).
#[derive(Debug)]
pub enum BridgeError {
    /// Debug text contained a NUL byte at `position`; nothing was forwarded.
    InteriorNul { position: usize },
    /// The window belongs to a platform the shim has no binding for.
    UnsupportedWindow(&'static str),
    /// The windowing toolkit could not hand out a raw handle.
    WindowHandle(raw_window_handle::HandleError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteriorNul { position } => {
                write!(f, "debug text contains a NUL byte at offset {position}")
            }
            Self::UnsupportedWindow(platform) => {
                write!(f, "no native window binding for platform `{platform}`")
            }
            Self::WindowHandle(err) => write!(f, "window handle unavailable: {err}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WindowHandle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<raw_window_handle::HandleError> for BridgeError {
    fn from(err: raw_window_handle::HandleError) -> Self {
        Self::WindowHandle(err)
    }
}
