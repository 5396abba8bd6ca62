//! Layout-governed collections of elements.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::element::AnimatedElement;
use crate::layout::LayoutStrategy;
use crate::state::Millis;

/// Unique handle for a registered group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Generate a new unique group ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// An ordered set of elements arranged by one layout strategy.
///
/// Only a prefix of the members is displayed: the first `max_displayed`
/// elements, or all of them when no cap is set. The prefix length is
/// recomputed on every membership or cap change.
///
/// Member ids are not deduplicated. Inside an engine, members sharing an id
/// share one snapshot slot: each is diffed against whichever of them was
/// stored last, so members with differing values are re-emitted on every
/// tick.
///
/// Once registered, membership changes go through the engine
/// (`add_group_member`, `remove_group_member`) so the snapshot store stays
/// in step.
pub struct AnimatedElementGroup {
    id: GroupId,
    elements: Vec<AnimatedElement>,
    max_displayed: Option<usize>,
    displayed_len: usize,
    layout: Option<Box<dyn LayoutStrategy>>,
}

impl fmt::Debug for AnimatedElementGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedElementGroup")
            .field("id", &self.id)
            .field("elements", &self.elements.len())
            .field("max_displayed", &self.max_displayed)
            .field("displayed_len", &self.displayed_len)
            .field("has_layout", &self.layout.is_some())
            .finish()
    }
}

impl Default for AnimatedElementGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedElementGroup {
    pub fn new() -> Self {
        Self {
            id: GroupId::new(),
            elements: Vec::new(),
            max_displayed: None,
            displayed_len: 0,
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: impl LayoutStrategy + 'static) -> Self {
        self.layout = Some(Box::new(layout));
        self
    }

    pub fn with_max_displayed(mut self, max: usize) -> Self {
        self.set_max_displayed(Some(max));
        self
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = AnimatedElement>) -> Self {
        self.elements.extend(elements);
        self.refresh_displayed();
        self
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[AnimatedElement] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&AnimatedElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// The displayed prefix of the members.
    pub fn displayed(&self) -> &[AnimatedElement] {
        &self.elements[..self.displayed_len]
    }

    pub fn max_displayed(&self) -> Option<usize> {
        self.max_displayed
    }

    pub fn set_max_displayed(&mut self, max: Option<usize>) {
        self.max_displayed = max;
        self.refresh_displayed();
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    pub fn set_layout(&mut self, layout: Option<Box<dyn LayoutStrategy>>) {
        self.layout = layout;
    }

    pub fn layout_mut(&mut self) -> Option<&mut (dyn LayoutStrategy + 'static)> {
        self.layout.as_deref_mut()
    }

    pub(crate) fn push(&mut self, element: AnimatedElement) {
        self.elements.push(element);
        self.refresh_displayed();
    }

    /// Remove every member with this id, returning how many were removed.
    pub(crate) fn remove(&mut self, id: &str) -> usize {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        self.refresh_displayed();
        before - self.elements.len()
    }

    /// Lay out the displayed prefix and hand it back for evaluation.
    ///
    /// The group's own layout wins over `fallback`. Nothing is laid out when
    /// the prefix is empty or neither layout exists.
    pub(crate) fn prepare_tick(
        &mut self,
        fallback: Option<&mut (dyn LayoutStrategy + 'static)>,
        now: Millis,
    ) -> &mut [AnimatedElement] {
        let displayed = &mut self.elements[..self.displayed_len];
        if !displayed.is_empty() {
            match self.layout.as_deref_mut() {
                Some(own) => run_layout(own, displayed, now),
                None => {
                    if let Some(fallback) = fallback {
                        run_layout(fallback, displayed, now);
                    }
                }
            }
        }
        displayed
    }

    fn refresh_displayed(&mut self) {
        self.displayed_len = match self.max_displayed {
            Some(max) => max.min(self.elements.len()),
            None => self.elements.len(),
        };
    }
}

/// Anchor newly entering elements at `now`, then assign their targets.
pub(crate) fn run_layout(
    layout: &mut dyn LayoutStrategy,
    elements: &mut [AnimatedElement],
    now: Millis,
) {
    layout.apply_start_time(now);
    layout.apply_layout(elements);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(n: usize) -> Vec<AnimatedElement> {
        (0..n).map(|i| AnimatedElement::new(format!("m{i}"))).collect()
    }

    #[test]
    fn test_group_ids_are_unique() {
        let a = AnimatedElementGroup::new();
        let b = AnimatedElementGroup::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_displayed_is_prefix() {
        let group = AnimatedElementGroup::new()
            .with_max_displayed(2)
            .with_elements(members(5));
        let ids: Vec<&str> = group.displayed().iter().map(|e| e.id()).collect();
        assert_eq!(ids, ["m0", "m1"]);
    }

    #[test]
    fn test_displayed_follows_membership() {
        let mut group = AnimatedElementGroup::new().with_max_displayed(3);
        assert!(group.displayed().is_empty());

        group.push(AnimatedElement::new("a"));
        group.push(AnimatedElement::new("b"));
        assert_eq!(group.displayed().len(), 2);

        group.push(AnimatedElement::new("c"));
        group.push(AnimatedElement::new("d"));
        assert_eq!(group.displayed().len(), 3);

        assert_eq!(group.remove("a"), 1);
        let ids: Vec<&str> = group.displayed().iter().map(|e| e.id()).collect();
        assert_eq!(ids, ["b", "c", "d"]);
    }

    #[test]
    fn test_displayed_follows_cap() {
        let mut group = AnimatedElementGroup::new().with_elements(members(4));
        assert_eq!(group.displayed().len(), 4);

        group.set_max_displayed(Some(1));
        assert_eq!(group.displayed().len(), 1);

        group.set_max_displayed(Some(10));
        assert_eq!(group.displayed().len(), 4);

        group.set_max_displayed(None);
        assert_eq!(group.displayed().len(), 4);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut group = AnimatedElementGroup::new();
        group.push(AnimatedElement::new("same"));
        group.push(AnimatedElement::new("same"));
        assert_eq!(group.len(), 2);
        assert_eq!(group.remove("same"), 2);
        assert!(group.is_empty());
    }
}
