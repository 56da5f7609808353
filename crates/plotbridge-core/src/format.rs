// File: crates/plotbridge-core/src/format.rs
// Summary: Tick formatter handle table, bounded label writer and the adapter for C callbacks.
// Notes:
// - Tokens are plain integers so they survive a trip through the engine's `void*` user data.
// - A token unknown at render time means the caller unregistered a formatter still in use; that is fatal.

use std::collections::HashMap;
use std::ffi::{c_char, c_int, c_void};
use std::fmt;
use std::num::NonZeroUsize;

use crate::error::fatal;

/// Buffer size the engine hands to tick formatters.
pub const TICK_LABEL_CAPACITY: usize = 32;

/// Handle of a registered tick formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatterToken(NonZeroUsize);

impl FormatterToken {
    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub fn from_raw(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }
}

/// Write target for one tick label.
///
/// Output past `buf.len() - 1` bytes is dropped at a UTF-8 boundary and the
/// buffer is always NUL-terminated (when it has room for the terminator).
pub struct TickLabel<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> TickLabel<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        Self { buf, len: 0, truncated: false }
    }

    /// Bytes available for text, excluding the terminator.
    pub fn capacity(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Let foreign code write the buffer directly, then re-derive the length from the first NUL.
    pub fn fill_raw(&mut self, write: impl FnOnce(*mut c_char, c_int)) {
        let size = c_int::try_from(self.buf.len()).unwrap_or(c_int::MAX);
        write(self.buf.as_mut_ptr() as *mut c_char, size);
        if let Some(last) = self.buf.last_mut() {
            *last = 0;
        }
        self.len = self.buf.iter().position(|&b| b == 0).unwrap_or(0);
        self.truncated = false;
    }
}

impl fmt::Write for TickLabel<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.capacity() - self.len.min(self.capacity());
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        if take < s.len() {
            self.truncated = true;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        if self.len < self.buf.len() {
            self.buf[self.len] = 0;
        }
        Ok(())
    }
}

impl fmt::Debug for TickLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TickLabel").field(&self.as_str()).finish()
    }
}

/// Text before the first NUL of an engine label buffer.
pub fn label_from_buffer(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap_or_default()
}

pub type Handler = Box<dyn FnMut(f64, &mut TickLabel<'_>) + Send>;

/// C signature of a tick formatter. `buf` holds `size` bytes; `user_data` is passed back unchanged.
pub type AxisFormatCallback = extern "C" fn(value: f64, buf: *mut c_char, size: c_int, user_data: *mut c_void);

/// Wrap a C callback and its user data as a handler.
pub fn c_handler(callback: AxisFormatCallback, user_data: *mut c_void) -> Handler {
    let user_data = user_data as usize;
    Box::new(move |value, label: &mut TickLabel<'_>| {
        label.fill_raw(|buf, size| callback(value, buf, size, user_data as *mut c_void));
    })
}

/// Fixed-shape path the engine calls while rendering ticks.
pub trait TickFormat {
    /// Format `value` into `buf` with the formatter named by `token`.
    fn format_tick(&mut self, token: FormatterToken, value: f64, buf: &mut [u8]);
}

#[derive(Default)]
pub struct FormatterTable {
    handlers: HashMap<FormatterToken, Handler>,
    issued: usize,
}

impl FormatterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl FnMut(f64, &mut TickLabel<'_>) + Send + 'static) -> FormatterToken {
        self.issued += 1;
        let token = FormatterToken(NonZeroUsize::MIN.saturating_add(self.issued - 1));
        self.handlers.insert(token, Box::new(handler));
        tracing::debug!(target: "plotbridge", token = token.get(), "tick formatter registered");
        token
    }

    /// Returns false if the token was not registered.
    pub fn unregister(&mut self, token: FormatterToken) -> bool {
        let removed = self.handlers.remove(&token).is_some();
        tracing::debug!(target: "plotbridge", token = token.get(), removed, "tick formatter unregistered");
        removed
    }

    pub fn contains(&self, token: FormatterToken) -> bool {
        self.handlers.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl TickFormat for FormatterTable {
    fn format_tick(&mut self, token: FormatterToken, value: f64, buf: &mut [u8]) {
        let Some(handler) = self.handlers.get_mut(&token) else {
            fatal(&format!("unknown tick formatter token {}", token.get()));
        };
        let mut label = TickLabel::new(buf);
        handler(value, &mut label);
    }
}

impl fmt::Debug for FormatterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterTable")
            .field("registered", &self.handlers.len())
            .field("issued", &self.issued)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn truncates_on_char_boundary() {
        let mut buf = [0xffu8; 6];
        let mut label = TickLabel::new(&mut buf);
        write!(label, "ab\u{00e9}\u{00e9}").unwrap();
        // 'a' 'b' + one 2-byte char fit in 5 bytes; the second does not
        assert_eq!(label.as_str(), "ab\u{00e9}");
        assert!(label.is_truncated());
        assert_eq!(buf[4], 0);
    }

    #[test]
    fn empty_buffer_takes_nothing() {
        let mut buf: [u8; 0] = [];
        let mut label = TickLabel::new(&mut buf);
        write!(label, "x").unwrap();
        assert_eq!(label.as_str(), "");
    }

    #[test]
    fn label_from_buffer_stops_at_nul() {
        assert_eq!(label_from_buffer(b"12\0junk"), "12");
        assert_eq!(label_from_buffer(b"full"), "full");
    }
}
