use std::cell::RefCell;
use std::ffi::CStr;
use std::rc::Rc;

use super::NativeApi;
use crate::window::NativeWindow;

/// A single call observed at the native boundary, with ABI-width arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    Init,
    Shutdown,
    Reset {
        width: u32,
        height: u32,
    },
    Frame,
    Submit {
        view: u8,
    },
    SetDebug {
        debug: u32,
    },
    DbgTextClear,
    /// `text` includes the trailing NUL.
    DbgTextPrint {
        x: u32,
        y: u32,
        attr: u8,
        text: Vec<u8>,
    },
    SetViewRect {
        view: u8,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
    SetViewClear {
        view: u8,
        flags: u8,
        rgba: u32,
        depth: f32,
        stencil: u8,
    },
    SetWindow(NativeWindow),
}

/// In-memory stand-in for the native library.
///
/// Clones share one call log, so a test can keep a clone while the bridge owns
/// the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingApi {
    log: Rc<RefCell<Vec<NativeCall>>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every call so far, oldest first.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.log.borrow().clone()
    }

    /// Number of `frame()` calls observed.
    pub fn frames(&self) -> u64 {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, NativeCall::Frame))
            .count() as u64
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn push(&self, call: NativeCall) {
        log::trace!("native call: {call:?}");
        self.log.borrow_mut().push(call);
    }
}

impl NativeApi for RecordingApi {
    fn init(&mut self) {
        self.push(NativeCall::Init);
    }

    fn shutdown(&mut self) {
        self.push(NativeCall::Shutdown);
    }

    fn reset(&mut self, width: u32, height: u32) {
        self.push(NativeCall::Reset { width, height });
    }

    fn frame(&mut self) {
        self.push(NativeCall::Frame);
    }

    fn submit(&mut self, view: u8) {
        self.push(NativeCall::Submit { view });
    }

    fn set_debug(&mut self, debug: u32) {
        self.push(NativeCall::SetDebug { debug });
    }

    fn dbg_text_clear(&mut self) {
        self.push(NativeCall::DbgTextClear);
    }

    fn dbg_text_print(&mut self, x: u32, y: u32, attr: u8, text: &CStr) {
        self.push(NativeCall::DbgTextPrint {
            x,
            y,
            attr,
            text: text.to_bytes_with_nul().to_vec(),
        });
    }

    fn set_view_rect(&mut self, view: u8, x: u16, y: u16, width: u16, height: u16) {
        self.push(NativeCall::SetViewRect {
            view,
            x,
            y,
            width,
            height,
        });
    }

    fn set_view_clear(&mut self, view: u8, flags: u8, rgba: u32, depth: f32, stencil: u8) {
        self.push(NativeCall::SetViewClear {
            view,
            flags,
            rgba,
            depth,
            stencil,
        });
    }

    fn set_window(&mut self, window: NativeWindow) {
        self.push(NativeCall::SetWindow(window));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let probe = RecordingApi::new();
        let mut api = probe.clone();

        api.init();
        api.frame();
        api.frame();

        assert_eq!(probe.calls().first(), Some(&NativeCall::Init));
        assert_eq!(probe.frames(), 2);
    }

    #[test]
    fn text_is_stored_with_terminator() {
        let mut api = RecordingApi::new();
        api.dbg_text_print(1, 2, 0x0f, c"ok");

        assert_eq!(
            api.calls(),
            vec![NativeCall::DbgTextPrint {
                x: 1,
                y: 2,
                attr: 0x0f,
                text: b"ok\0".to_vec(),
            }]
        );
    }

    #[test]
    fn clear_empties_the_log() {
        let mut api = RecordingApi::new();
        api.submit(0);
        api.clear();
        assert!(api.calls().is_empty());
    }
}
