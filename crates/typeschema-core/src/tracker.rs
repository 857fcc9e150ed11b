//! Cycle bookkeeping for one traversal.
//!
//! The tracker holds the types that are *currently being expanded* on the
//! active path, each with the identifier (anchor) its expansion lives under.
//! It is not a visited set: a type is released as soon as its expansion
//! returns, so the same type reached again through a sibling branch is
//! expanded again.
//!
//! Use [`ReferenceTracker::enter`] rather than pairing
//! [`acquire`](ReferenceTracker::acquire)/[`release`](ReferenceTracker::release)
//! by hand. The returned guard releases the reference when dropped, which
//! covers `?` returns and unwinding alike. On a cycle it hands back the
//! reference that is already active, so the caller can point at its anchor:
//!
//! ```rust
//! use typeschema_core::tracker::{ManagedReference, ReferenceTracker};
//!
//! let mut tracker = ReferenceTracker::new();
//! {
//!     let mut guard = tracker.enter(ManagedReference::new("Node", "#")).unwrap();
//!     // Re-entering `Node` while the guard is alive is refused.
//!     let active = guard
//!         .enter(ManagedReference::new("Node", "#/properties/child"))
//!         .unwrap_err();
//!     assert_eq!(active.anchor(), "#");
//! }
//! assert!(tracker.is_empty());
//! ```
use std::{
    borrow::Borrow,
    collections::HashSet,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

use crate::descriptor::TypeName;

/// "`ty` is being expanded under `anchor`." Equality and hashing consider
/// the type only.
///
/// The reference also remembers whether `ty` is required by default, so a
/// `$ref` emitted in its place keeps the property in `required`.
#[derive(Debug, Clone)]
pub struct ManagedReference {
    ty: TypeName,
    anchor: String,
    required: bool,
}

impl ManagedReference {
    pub fn new(ty: impl Into<TypeName>, anchor: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            anchor: anchor.into(),
            required: false,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn ty(&self) -> &TypeName {
        &self.ty
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl PartialEq for ManagedReference {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for ManagedReference {}

impl Hash for ManagedReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}

impl Borrow<TypeName> for ManagedReference {
    fn borrow(&self) -> &TypeName {
        &self.ty
    }
}

#[derive(Debug, Default)]
pub struct ReferenceTracker {
    active: HashSet<ManagedReference>,
}

impl ReferenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `reference`. Returns `false` and changes nothing if its type is
    /// already tracked.
    pub fn acquire(&mut self, reference: ManagedReference) -> bool {
        if self.active.contains(&reference) {
            tracing::trace!(ty = %reference.ty, "reference already active");
            return false;
        }
        tracing::trace!(ty = %reference.ty, anchor = %reference.anchor, "acquire reference");
        self.active.insert(reference)
    }

    /// Forget `reference`. Returns whether it was tracked.
    pub fn release(&mut self, reference: &ManagedReference) -> bool {
        self.release_type(&reference.ty)
    }

    fn release_type(&mut self, ty: &TypeName) -> bool {
        let removed = self.active.remove(ty);
        tracing::trace!(%ty, removed, "release reference");
        removed
    }

    /// Scoped [`acquire`](Self::acquire). Returns a guard that releases the
    /// reference on drop, or, on a cycle, a copy of the reference that is
    /// already active for the same type.
    pub fn enter(
        &mut self,
        reference: ManagedReference,
    ) -> Result<TrackedReference<'_>, ManagedReference> {
        if let Some(active) = self.active.get(&reference) {
            tracing::trace!(ty = %active.ty, anchor = %active.anchor, "reference already active");
            return Err(active.clone());
        }
        let ty = reference.ty.clone();
        self.acquire(reference);
        Ok(TrackedReference { tracker: self, ty })
    }

    /// Identifier under which `ty` is being expanded, if it is active.
    pub fn anchor_of(&self, ty: &TypeName) -> Option<&str> {
        self.active.get(ty).map(|reference| reference.anchor.as_str())
    }

    pub fn contains(&self, ty: &TypeName) -> bool {
        self.active.contains(ty)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Guard returned by [`ReferenceTracker::enter`]. Dereferences to the
/// tracker so the recursive step keeps using it.
#[derive(Debug)]
pub struct TrackedReference<'t> {
    tracker: &'t mut ReferenceTracker,
    ty: TypeName,
}

impl TrackedReference<'_> {
    pub fn ty(&self) -> &TypeName {
        &self.ty
    }
}

impl Deref for TrackedReference<'_> {
    type Target = ReferenceTracker;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl DerefMut for TrackedReference<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl Drop for TrackedReference<'_> {
    fn drop(&mut self) {
        self.tracker.release_type(&self.ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_refuses_active_type() {
        let mut tracker = ReferenceTracker::new();
        assert!(tracker.acquire(ManagedReference::new("A", "#")));
        assert!(!tracker.acquire(ManagedReference::new("A", "#/properties/a")));
        assert_eq!(tracker.anchor_of(&"A".into()), Some("#"));
    }

    #[test]
    fn equality_ignores_anchor() {
        assert_eq!(
            ManagedReference::new("A", "#"),
            ManagedReference::new("A", "#/elsewhere")
        );
    }

    #[test]
    fn cycle_returns_the_active_reference() {
        let mut tracker = ReferenceTracker::new();
        let mut guard = tracker
            .enter(ManagedReference::new("A", "#/definitions/A").with_required(true))
            .unwrap();

        let active = guard
            .enter(ManagedReference::new("A", "#/properties/a"))
            .unwrap_err();
        assert_eq!(active.anchor(), "#/definitions/A");
        assert!(active.is_required());
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn release_reports_presence() {
        let mut tracker = ReferenceTracker::new();
        let reference = ManagedReference::new("A", "#");
        assert!(!tracker.release(&reference));
        tracker.acquire(reference.clone());
        assert!(tracker.release(&reference));
        assert!(tracker.is_empty());
    }

    #[test]
    fn guard_releases_on_early_return() {
        fn failing(tracker: &mut ReferenceTracker) -> Result<(), &'static str> {
            let _guard = tracker.enter(ManagedReference::new("A", "#")).map_err(|_| "cycle")?;
            Err("boom")
        }

        let mut tracker = ReferenceTracker::new();
        assert_eq!(failing(&mut tracker), Err("boom"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut tracker = ReferenceTracker::new();
        {
            let mut outer = tracker.enter(ManagedReference::new("A", "#")).unwrap();
            {
                let inner = outer
                    .enter(ManagedReference::new("B", "#/properties/b"))
                    .unwrap();
                assert_eq!(inner.len(), 2);
            }
            assert!(!outer.contains(&"B".into()));
            assert!(outer.contains(&"A".into()));
        }
        assert!(tracker.is_empty());
    }
}
