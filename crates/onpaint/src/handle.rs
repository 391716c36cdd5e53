use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Opaque identifier returned by registration.
///
/// Identity comes from a per-scheduler counter, never from the callback
/// itself: registering the same closure twice yields two distinct handles.
/// The optional label only feeds diagnostics and takes no part in equality.
#[derive(Clone)]
pub struct CallbackHandle {
    id:    u64,
    label: Option<Rc<str>>,
}

impl CallbackHandle {
    pub(crate) fn new(id: u64, label: Option<Rc<str>>) -> Self {
        Self { id, label }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Label supplied at registration, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label used for timing records. Always distinct per handle.
    pub fn timing_label(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for CallbackHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CallbackHandle {}

impl Hash for CallbackHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}#{}", self.id),
            None        => write!(f, "anonymous#{}", self.id),
        }
    }
}

impl fmt::Debug for CallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackHandle({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_label() {
        let a = CallbackHandle::new(7, Some("spin".into()));
        let b = CallbackHandle::new(7, None);
        assert_eq!(a, b);
        assert_ne!(a, CallbackHandle::new(8, Some("spin".into())));
    }

    #[test]
    fn display_falls_back_to_anonymous() {
        assert_eq!(CallbackHandle::new(3, None).to_string(), "anonymous#3");
        assert_eq!(CallbackHandle::new(3, Some("tether".into())).to_string(), "tether#3");
    }

    #[test]
    fn timing_labels_are_distinct_for_shared_labels() {
        let a = CallbackHandle::new(1, Some("fx".into()));
        let b = CallbackHandle::new(2, Some("fx".into()));
        assert_ne!(a.timing_label(), b.timing_label());
    }
}
