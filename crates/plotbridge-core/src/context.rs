// File: crates/plotbridge-core/src/context.rs
// Summary: Plot context registry: creation, destruction, the current selection and the UI context binding.
// Notes:
// - Ids are never reused, so a stale handle can never alias a newer context.
// - Each context owns its style through one heap pointer, so a handed-out style handle stays valid.

use std::collections::BTreeMap;
use std::num::NonZeroU64;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::style::{PlotStyle, StyleStack};

/// Opaque handle of one plot context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(NonZeroU64);

impl ContextId {
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Rebuild an id from its raw value; zero is "no context".
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

/// Address of the host UI framework's context; never dereferenced here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UiContext(usize);

impl UiContext {
    pub fn from_ptr<T>(ptr: *mut T) -> Self {
        Self(ptr as usize)
    }

    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Per-context state: style record plus the override stacks.
///
/// The style lives in its own heap allocation owned through a raw pointer, so a
/// style handle given to a host stays valid while the registry takes `&mut` paths
/// to the context. Every accessor derives from that one pointer.
pub struct PlotContext {
    style: NonNull<PlotStyle>,
    stack: StyleStack,
}

// SAFETY: the style allocation is uniquely owned by this context, like a Box.
unsafe impl Send for PlotContext {}

impl PlotContext {
    pub fn new(style: PlotStyle) -> Self {
        let style = NonNull::from(Box::leak(Box::new(style)));
        Self { style, stack: StyleStack::new() }
    }

    pub fn style(&self) -> &PlotStyle {
        // SAFETY: allocated in `new`, freed only in `drop`.
        unsafe { self.style.as_ref() }
    }

    pub fn style_mut(&mut self) -> &mut PlotStyle {
        // SAFETY: as in `style`; `&mut self` excludes other borrows made through the context.
        unsafe { self.style.as_mut() }
    }

    /// Stable address of the style record, valid until the context is destroyed.
    pub fn style_ptr(&self) -> *mut PlotStyle {
        self.style.as_ptr()
    }

    /// Style and stack borrowed together for push/pop.
    pub fn parts_mut(&mut self) -> (&mut PlotStyle, &mut StyleStack) {
        // SAFETY: as in `style_mut`; the stack is a separate field.
        (unsafe { self.style.as_mut() }, &mut self.stack)
    }
}

impl Drop for PlotContext {
    fn drop(&mut self) {
        // SAFETY: the pointer came from `Box::leak` in `new` and is released once.
        drop(unsafe { Box::from_raw(self.style.as_ptr()) });
    }
}

impl std::fmt::Debug for PlotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotContext").field("style", self.style()).field("stack", &self.stack).finish()
    }
}

#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: BTreeMap<ContextId, PlotContext>,
    current: Option<ContextId>,
    next_id: u64,
    ui: Option<UiContext>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context holding `style`. It becomes current if none is.
    pub fn create(&mut self, style: PlotStyle) -> ContextId {
        self.next_id += 1;
        let id = ContextId(NonZeroU64::MIN.saturating_add(self.next_id - 1));
        self.contexts.insert(id, PlotContext::new(style));
        if self.current.is_none() {
            self.current = Some(id);
        }
        tracing::debug!(target: "plotbridge", id = id.get(), current = ?self.current.map(ContextId::get), "context created");
        id
    }

    pub fn destroy(&mut self, id: ContextId) -> Result<()> {
        self.contexts.remove(&id).ok_or(Error::UnknownContext(id))?;
        if self.current == Some(id) {
            self.current = None;
        }
        tracing::debug!(target: "plotbridge", id = id.get(), "context destroyed");
        Ok(())
    }

    pub fn current(&self) -> Option<ContextId> {
        self.current
    }

    pub fn set_current(&mut self, id: Option<ContextId>) -> Result<()> {
        if let Some(id) = id {
            if !self.contexts.contains_key(&id) {
                return Err(Error::UnknownContext(id));
            }
        }
        self.current = id;
        tracing::debug!(target: "plotbridge", id = ?id.map(ContextId::get), "context selected");
        Ok(())
    }

    pub fn get(&self, id: ContextId) -> Option<&PlotContext> {
        self.contexts.get(&id)
    }

    pub fn get_mut(&mut self, id: ContextId) -> Option<&mut PlotContext> {
        self.contexts.get_mut(&id)
    }

    pub fn current_context(&self) -> Result<&PlotContext> {
        let id = self.current.ok_or(Error::NoContext)?;
        self.contexts.get(&id).ok_or(Error::UnknownContext(id))
    }

    pub fn current_context_mut(&mut self) -> Result<&mut PlotContext> {
        let id = self.current.ok_or(Error::NoContext)?;
        self.contexts.get_mut(&id).ok_or(Error::UnknownContext(id))
    }

    pub fn bind_ui_context(&mut self, ui: UiContext) {
        self.ui = if ui.is_null() { None } else { Some(ui) };
    }

    pub fn ui_context(&self) -> Option<UiContext> {
        self.ui
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut reg = ContextRegistry::new();
        let a = reg.create(PlotStyle::default());
        reg.destroy(a).unwrap();
        let b = reg.create(PlotStyle::default());
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn style_address_survives_registry_growth() {
        let mut reg = ContextRegistry::new();
        let a = reg.create(PlotStyle::default());
        let p = reg.get_mut(a).unwrap().style_ptr();
        for _ in 0..64 {
            reg.create(PlotStyle::default());
        }
        assert_eq!(reg.get_mut(a).unwrap().style_ptr(), p);
    }
}
