//! Animation engine for advancing tracked elements and emitting diffs.
//!
//! The `AnimationEngine` owns every tracked element and is driven by a single
//! caller that invokes [`AnimationEngine::update`] once per tick. It handles:
//! - Registering ungrouped elements and layout-governed groups
//! - Running the layout over each displayed set before evaluation
//! - Advancing displayed elements to the supplied time
//! - Diffing against the last emitted snapshot and emitting partial records
//! - A coarse lifecycle with synchronous state-change notifications
//!
//! # Usage
//!
//! ```ignore
//! use rune_anim::{AnimatedElement, AnimationEngine, StackLayout};
//!
//! let mut engine = AnimationEngine::new();
//! engine.set_layout(Some(Box::new(StackLayout::new(40.0, 8.0))));
//! engine.register(AnimatedElement::new("card-1"))?;
//! engine.start();
//!
//! // Each frame, send only what changed
//! let batch = engine.update(now_ms);
//! transport.send(&rune_anim::encode_batch(&batch)?);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::element::AnimatedElement;
use crate::error::{AnimError, Result};
use crate::events::{EngineState, EventQueue, ListenerId, Listeners, StateChange};
use crate::group::{AnimatedElementGroup, GroupId, run_layout};
use crate::layout::LayoutStrategy;
use crate::state::Millis;
use crate::wire::JsonAnimatedElement;

/// Tunables for an [`AnimationEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many ungrouped elements are displayed.
    pub max_displayed_items: usize,
    /// Evaluate elements on the rayon pool.
    pub parallel: bool,
    /// Smallest tick worth fanning out.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_displayed_items: 10,
            parallel: true,
            parallel_threshold: 32,
        }
    }
}

/// Registry of tracked elements plus the snapshots last sent for them.
///
/// Every registered id has exactly one entry in the snapshot store, holding
/// the value-only copy taken when a change for it was last emitted (or at
/// registration).
pub struct AnimationEngine {
    config: EngineConfig,

    /// Elements outside any group, in registration order.
    elements: Vec<AnimatedElement>,

    groups: Vec<AnimatedElementGroup>,

    /// Last emitted state per element id.
    snapshots: HashMap<String, AnimatedElement>,

    /// Layout for ungrouped elements and for groups without their own.
    layout: Option<Box<dyn LayoutStrategy>>,

    state: EngineState,
    listeners: Listeners,
    event_queue: EventQueue,
}

impl fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("config", &self.config)
            .field("elements", &self.elements.len())
            .field("groups", &self.groups.len())
            .field("snapshots", &self.snapshots.len())
            .field("has_layout", &self.layout.is_some())
            .field("state", &self.state)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            groups: Vec::new(),
            snapshots: HashMap::new(),
            layout: None,
            state: EngineState::NotStarted,
            listeners: Listeners::default(),
            event_queue: EventQueue::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Track an ungrouped element.
    ///
    /// Returns `Ok(false)` without touching anything when the id is already
    /// tracked, ungrouped or in a group.
    pub fn register(&mut self, element: AnimatedElement) -> Result<bool> {
        validate_id(element.id())?;
        if self.snapshots.contains_key(element.id()) {
            debug!("skipping duplicate registration of '{}'", element.id());
            return Ok(false);
        }
        debug!("registered element '{}'", element.id());
        self.snapshots
            .insert(element.id().to_string(), element.snapshot());
        self.elements.push(element);
        Ok(true)
    }

    /// Stop tracking an ungrouped element and drop its snapshot.
    pub fn unregister(&mut self, id: &str) -> Result<Option<AnimatedElement>> {
        validate_id(id)?;
        let Some(index) = self.elements.iter().position(|e| e.id() == id) else {
            return Ok(None);
        };
        let element = self.elements.remove(index);
        self.forget_if_untracked(id);
        debug!("unregistered element '{id}'");
        Ok(Some(element))
    }

    /// Track a group. Member snapshots are taken now.
    pub fn register_group(&mut self, group: AnimatedElementGroup) -> Result<GroupId> {
        for member in group.elements() {
            validate_id(member.id())?;
        }
        for member in group.elements() {
            self.snapshots
                .entry(member.id().to_string())
                .or_insert_with(|| member.snapshot());
        }
        let id = group.id();
        debug!("registered {id} with {} members", group.len());
        self.groups.push(group);
        Ok(id)
    }

    /// Stop tracking a group, dropping the snapshots of its members.
    pub fn unregister_group(&mut self, id: GroupId) -> Result<AnimatedElementGroup> {
        let index = self.group_index(id)?;
        let group = self.groups.remove(index);
        for member in group.elements() {
            self.forget_if_untracked(member.id());
        }
        debug!("unregistered {id}");
        Ok(group)
    }

    pub fn add_group_member(&mut self, id: GroupId, element: AnimatedElement) -> Result<()> {
        validate_id(element.id())?;
        let index = self.group_index(id)?;
        self.snapshots
            .entry(element.id().to_string())
            .or_insert_with(|| element.snapshot());
        self.groups[index].push(element);
        Ok(())
    }

    /// Remove every member of group `id` named `element_id`.
    pub fn remove_group_member(&mut self, id: GroupId, element_id: &str) -> Result<usize> {
        validate_id(element_id)?;
        let index = self.group_index(id)?;
        let removed = self.groups[index].remove(element_id);
        if removed > 0 {
            self.forget_if_untracked(element_id);
        }
        Ok(removed)
    }

    pub fn set_group_max_displayed(&mut self, id: GroupId, max: Option<usize>) -> Result<()> {
        let index = self.group_index(id)?;
        self.groups[index].set_max_displayed(max);
        Ok(())
    }

    pub fn group(&self, id: GroupId) -> Option<&AnimatedElementGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Mutable access to a group's cap and layout.
    ///
    /// Membership cannot change through this handle:
    ///
    /// ```compile_fail
    /// use rune_anim::{AnimatedElement, AnimatedElementGroup, AnimationEngine};
    ///
    /// let mut engine = AnimationEngine::new();
    /// let id = engine.register_group(AnimatedElementGroup::new()).unwrap();
    /// engine.group_mut(id).unwrap().push(AnimatedElement::new("late"));
    /// ```
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut AnimatedElementGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    pub fn groups(&self) -> &[AnimatedElementGroup] {
        &self.groups
    }

    /// Ungrouped elements in registration order.
    pub fn elements(&self) -> &[AnimatedElement] {
        &self.elements
    }

    /// Look up a tracked element, ungrouped first.
    pub fn element(&self, id: &str) -> Option<&AnimatedElement> {
        self.elements
            .iter()
            .find(|e| e.id() == id)
            .or_else(|| self.groups.iter().find_map(|g| g.element(id)))
    }

    /// The last emitted state for `id`.
    pub fn snapshot(&self, id: &str) -> Option<&AnimatedElement> {
        self.snapshots.get(id)
    }

    /// Distinct ids of every tracked element.
    pub fn get_all(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tracked()
            .filter(|e| seen.insert(e.id()))
            .map(|e| e.id().to_string())
            .collect()
    }

    /// True while any tracked element still has an unfinished tween.
    pub fn has_active_animations(&self, now: Millis) -> bool {
        self.tracked().any(|e| !e.is_settled(now))
    }

    fn tracked(&self) -> impl Iterator<Item = &AnimatedElement> {
        self.elements
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.elements()))
    }

    fn group_index(&self, id: GroupId) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.id() == id)
            .ok_or(AnimError::UnknownGroup(id))
    }

    /// Drop the snapshot for `id` unless something still tracks that id.
    fn forget_if_untracked(&mut self, id: &str) {
        if self.tracked().all(|e| e.id() != id) {
            self.snapshots.remove(id);
        }
    }

    // ------------------------------------------------------------------
    // Layout and display cap
    // ------------------------------------------------------------------

    pub fn set_layout(&mut self, layout: Option<Box<dyn LayoutStrategy>>) {
        self.layout = layout;
    }

    pub fn layout_mut(&mut self) -> Option<&mut (dyn LayoutStrategy + 'static)> {
        self.layout.as_deref_mut()
    }

    pub fn max_displayed_items(&self) -> usize {
        self.config.max_displayed_items
    }

    pub fn set_max_displayed_items(&mut self, max: usize) {
        self.config.max_displayed_items = max;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn start(&mut self) {
        self.transition(EngineState::Running);
    }

    pub fn pause(&mut self) {
        self.transition(EngineState::Paused);
    }

    pub fn resume(&mut self) {
        self.transition(EngineState::Running);
    }

    pub fn stop(&mut self) {
        self.transition(EngineState::Stopped);
    }

    pub fn reset(&mut self) {
        self.transition(EngineState::NotStarted);
    }

    pub fn on_completed(&mut self) {
        self.transition(EngineState::Completed);
    }

    /// Call `listener` synchronously on every state change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StateChange) + Send + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Drain state changes queued since the last call.
    pub fn drain_events(&mut self) -> Vec<StateChange> {
        self.event_queue.drain().collect()
    }

    fn transition(&mut self, next: EngineState) {
        let change = StateChange {
            previous: self.state,
            current: next,
        };
        self.state = next;
        debug!("engine state {} -> {}", change.previous, change.current);
        self.listeners.notify(&change);
        self.event_queue.push(change);
    }

    // ------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------

    /// Advance every displayed element to `now` and return what changed.
    ///
    /// Ungrouped elements are capped at `max_displayed_items`; each group
    /// contributes its own displayed prefix. Only elements with a non-empty
    /// diff produce a record, and only their snapshots are replaced. Works
    /// the same in every lifecycle state.
    pub fn update(&mut self, now: Millis) -> Vec<JsonAnimatedElement> {
        let Self {
            config,
            elements,
            groups,
            snapshots,
            layout,
            ..
        } = self;

        let shown = config.max_displayed_items.min(elements.len());
        let ungrouped = &mut elements[..shown];
        if let Some(layout) = layout.as_deref_mut() {
            if !ungrouped.is_empty() {
                run_layout(layout, ungrouped, now);
            }
        }

        let mut batch: Vec<&mut AnimatedElement> = ungrouped.iter_mut().collect();
        for group in groups.iter_mut() {
            batch.extend(group.prepare_tick(layout.as_deref_mut(), now));
        }

        // Tasks only read the snapshot store; replacements happen after the join.
        let previous: &HashMap<String, AnimatedElement> = snapshots;
        let evaluate = |element: &mut AnimatedElement| -> Option<(AnimatedElement, JsonAnimatedElement)> {
            element.update(now);
            let snapshot = previous.get(element.id());
            debug_assert!(snapshot.is_some(), "no snapshot for '{}'", element.id());
            let diff = match snapshot {
                Some(snapshot) => element.diff(snapshot),
                None => element.full_diff(),
            };
            if diff.is_empty() {
                return None;
            }
            Some((
                element.snapshot(),
                JsonAnimatedElement::from_diff(element.id(), &diff),
            ))
        };

        let evaluated = batch.len();
        let changed: Vec<(AnimatedElement, JsonAnimatedElement)> =
            if config.parallel && evaluated >= config.parallel_threshold {
                batch.into_par_iter().filter_map(&evaluate).collect()
            } else {
                batch.into_iter().filter_map(&evaluate).collect()
            };

        let mut records = Vec::with_capacity(changed.len());
        for (snapshot, record) in changed {
            snapshots.insert(snapshot.id().to_string(), snapshot);
            records.push(record);
        }

        trace!(
            "tick at {now}: evaluated {evaluated} elements, {} changed",
            records.len()
        );
        records
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(AnimError::InvalidArgument(
            "element id must not be empty".to_string(),
        ));
    }
    Ok(())
}

static_assertions::assert_impl_all!(AnimationEngine: Send);
