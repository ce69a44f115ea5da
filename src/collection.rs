use crossterm::event::KeyCode;
use regex::Regex;
use std::fmt;

/// Pattern used when no explicit invalid-tag pattern is configured.
/// Rejects any candidate containing a non-word character.
pub const DEFAULT_INVALID_PATTERN: &str = r"\W";

/// Immutable policy snapshot for a tag collection.
///
/// `None` for the caps means unbounded. `invalid_pattern` is a reject-list:
/// a candidate that matches the pattern is refused. The key fields are not
/// read by the collection itself; the input widget consumes them.
#[derive(Debug, Clone)]
pub struct TagOptions {
    pub max_tags: Option<usize>,
    pub max_tag_length: Option<usize>,
    pub invalid_pattern: Option<Regex>,
    pub boundary_keys: Vec<KeyCode>,
    pub delete_key: KeyCode,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            max_tags: None,
            max_tag_length: None,
            invalid_pattern: Some(
                Regex::new(DEFAULT_INVALID_PATTERN)
                    .expect("default pattern is a valid regex"),
            ),
            boundary_keys: vec![
                KeyCode::Tab,
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Char(','),
            ],
            delete_key: KeyCode::Backspace,
        }
    }
}

/// Why a candidate tag was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    CollectionFull,
    TooLong,
    InvalidPattern,
    Duplicate,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "tag is empty"),
            RejectReason::CollectionFull => write!(f, "collection is full"),
            RejectReason::TooLong => write!(f, "tag is too long"),
            RejectReason::InvalidPattern => write!(f, "tag contains an invalid character"),
            RejectReason::Duplicate => write!(f, "tag already exists"),
        }
    }
}

/// Event categories a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagEventKind {
    Add,
    Reject,
    Remove,
    RemoveAll,
    Change,
}

/// Notification emitted by a [`TagCollection`].
///
/// `Changed` always carries the full current snapshot and always fires last
/// among a compound operation's events. `Rejected` stands alone: a refused
/// add mutates nothing and therefore emits no `Changed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Added(String),
    Rejected(String),
    Removed(String),
    Cleared(Vec<String>),
    Changed(Vec<String>),
}

impl TagEvent {
    pub fn kind(&self) -> TagEventKind {
        match self {
            TagEvent::Added(_) => TagEventKind::Add,
            TagEvent::Rejected(_) => TagEventKind::Reject,
            TagEvent::Removed(_) => TagEventKind::Remove,
            TagEvent::Cleared(_) => TagEventKind::RemoveAll,
            TagEvent::Changed(_) => TagEventKind::Change,
        }
    }
}

/// Handle identifying a listener registration, used to unregister it later.
/// Closures have no usable equality in Rust, so removal goes through the
/// handle returned by [`TagCollection::on`] instead of the callback itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    kind: TagEventKind,
    callback: Box<dyn FnMut(&TagEvent)>,
}

/// Ordered, duplicate-free collection of tag strings with an acceptance
/// policy and synchronous event notification.
///
/// Every operation is a plain function of the current tags plus its
/// arguments: there is no internal mode and no deferred work. Mutation
/// strictly precedes notification, so the snapshot a `Change` listener
/// receives is always the fully-updated state of the triggering call.
pub struct TagCollection {
    tags: Vec<String>,
    options: TagOptions,
    listeners: Vec<Listener>,
    next_listener_id: u64,
}

impl TagCollection {
    pub fn new(options: TagOptions) -> Self {
        Self {
            tags: Vec::new(),
            options,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// The policy this collection was constructed with.
    pub fn options(&self) -> &TagOptions {
        &self.options
    }

    /// Independent copy of the current tags, oldest first.
    pub fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check a candidate against the acceptance policy without mutating.
    /// Checks run in the same order the policy is stated: emptiness, count
    /// cap, length cap, pattern, duplication.
    pub fn vet(&self, candidate: &str) -> Result<(), RejectReason> {
        if candidate.is_empty() {
            return Err(RejectReason::Empty);
        }
        if let Some(max) = self.options.max_tags {
            if self.tags.len() >= max {
                return Err(RejectReason::CollectionFull);
            }
        }
        if let Some(max) = self.options.max_tag_length {
            if candidate.chars().count() > max {
                return Err(RejectReason::TooLong);
            }
        }
        if let Some(ref pattern) = self.options.invalid_pattern {
            if pattern.is_match(candidate) {
                return Err(RejectReason::InvalidPattern);
            }
        }
        if self.contains(candidate) {
            return Err(RejectReason::Duplicate);
        }
        Ok(())
    }

    /// Try to append a candidate tag.
    ///
    /// On acceptance the candidate becomes the newest (last) element and
    /// `Added` then `Changed` fire. On rejection nothing mutates, a single
    /// `Rejected` fires, and the return value is false.
    pub fn add(&mut self, candidate: &str) -> bool {
        if self.vet(candidate).is_err() {
            self.emit(TagEvent::Rejected(candidate.to_string()));
            return false;
        }
        self.tags.push(candidate.to_string());
        self.emit(TagEvent::Added(candidate.to_string()));
        self.emit(TagEvent::Changed(self.tags.clone()));
        true
    }

    /// Remove a tag by exact string value.
    ///
    /// Returns the removed value, or None (with no event) when the tag is
    /// not present. Removal always compacts the sequence.
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        let index = self.tags.iter().position(|t| t == tag)?;
        let removed = self.tags.remove(index);
        self.emit(TagEvent::Removed(removed.clone()));
        self.emit(TagEvent::Changed(self.tags.clone()));
        Some(removed)
    }

    /// Remove the most recently added tag. None (no event) when empty.
    pub fn remove_last(&mut self) -> Option<String> {
        let last = self.tags.last()?.clone();
        self.remove(&last)
    }

    /// Clear the collection, returning the tags it held.
    ///
    /// `Cleared` and `Changed` fire even when the collection was already
    /// empty; clearing an empty collection is idempotent, not an error.
    pub fn remove_all(&mut self) -> Vec<String> {
        let snapshot = std::mem::take(&mut self.tags);
        self.emit(TagEvent::Cleared(snapshot.clone()));
        self.emit(TagEvent::Changed(Vec::new()));
        snapshot
    }

    /// Replace the collection's contents: clear, then add each value in
    /// order. Values that fail the policy (including duplicates within the
    /// batch) are silently skipped; the event stream is the only per-item
    /// feedback.
    pub fn set_tags<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_all();
        for value in values {
            self.add(value.as_ref());
        }
    }

    /// Register a callback for one event kind. Callbacks for the same kind
    /// run in registration order. The same closure logic may be registered
    /// more than once; each registration gets its own handle.
    pub fn on<F>(&mut self, kind: TagEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&TagEvent) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove the registration identified by `id`. A no-op when the handle
    /// was never registered or was already removed.
    pub fn off(&mut self, kind: TagEventKind, id: ListenerId) {
        if let Some(index) = self
            .listeners
            .iter()
            .position(|l| l.kind == kind && l.id == id)
        {
            self.listeners.remove(index);
        }
    }

    fn emit(&mut self, event: TagEvent) {
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(&event);
        }
    }
}

impl fmt::Debug for TagCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagCollection")
            .field("tags", &self.tags)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn unbounded() -> TagOptions {
        TagOptions {
            invalid_pattern: None,
            ..TagOptions::default()
        }
    }

    fn recorded() -> (TagCollection, Rc<RefCell<Vec<TagEvent>>>) {
        let mut collection = TagCollection::new(unbounded());
        let log: Rc<RefCell<Vec<TagEvent>>> = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            TagEventKind::Add,
            TagEventKind::Reject,
            TagEventKind::Remove,
            TagEventKind::RemoveAll,
            TagEventKind::Change,
        ] {
            let log = Rc::clone(&log);
            collection.on(kind, move |event| log.borrow_mut().push(event.clone()));
        }
        (collection, log)
    }

    #[test]
    fn test_add_preserves_call_order() {
        let mut collection = TagCollection::new(unbounded());
        assert!(collection.add("rust"));
        assert!(collection.add("tui"));
        assert!(collection.add("tags"));
        assert_eq!(collection.tags(), vec!["rust", "tui", "tags"]);
    }

    #[test]
    fn test_add_empty_always_rejected() {
        let (mut collection, log) = recorded();
        assert!(!collection.add(""));
        assert!(collection.is_empty());
        assert_eq!(log.borrow().as_slice(), [TagEvent::Rejected(String::new())]);
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let (mut collection, log) = recorded();
        assert!(collection.add("x"));
        assert!(!collection.add("x"));
        assert_eq!(collection.tags(), vec!["x"]);

        let events = log.borrow();
        let rejects = events
            .iter()
            .filter(|e| e.kind() == TagEventKind::Reject)
            .count();
        let changes = events
            .iter()
            .filter(|e| e.kind() == TagEventKind::Change)
            .count();
        assert_eq!(rejects, 1);
        // Only the accepted add produced a change
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_duplicate_match_is_case_sensitive() {
        let mut collection = TagCollection::new(unbounded());
        assert!(collection.add("Rust"));
        assert!(collection.add("rust"));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_max_tags_cap() {
        let options = TagOptions {
            max_tags: Some(2),
            invalid_pattern: None,
            ..TagOptions::default()
        };
        let mut collection = TagCollection::new(options);
        assert!(collection.add("a"));
        assert!(collection.add("b"));
        assert!(!collection.add("c"));
        assert_eq!(collection.tags(), vec!["a", "b"]);
    }

    #[test]
    fn test_max_tag_length_counts_chars() {
        let options = TagOptions {
            max_tag_length: Some(4),
            invalid_pattern: None,
            ..TagOptions::default()
        };
        let mut collection = TagCollection::new(options);
        assert!(collection.add("réel"));
        assert!(!collection.add("trops"));
        assert_eq!(collection.vet("trops"), Err(RejectReason::TooLong));
    }

    #[test]
    fn test_default_pattern_rejects_non_word() {
        let mut collection = TagCollection::new(TagOptions::default());
        assert!(!collection.add("foo bar"));
        assert!(collection.add("foobar"));
        assert_eq!(collection.tags(), vec!["foobar"]);
    }

    #[test]
    fn test_vet_reports_first_failing_check() {
        let options = TagOptions {
            max_tags: Some(1),
            max_tag_length: Some(3),
            ..TagOptions::default()
        };
        let mut collection = TagCollection::new(options);
        assert_eq!(collection.vet(""), Err(RejectReason::Empty));
        assert_eq!(collection.vet("a b"), Err(RejectReason::InvalidPattern));
        assert_eq!(collection.vet("long"), Err(RejectReason::TooLong));
        assert!(collection.add("ok"));
        assert_eq!(collection.vet("new"), Err(RejectReason::CollectionFull));
    }

    #[test]
    fn test_remove_by_value() {
        let (mut collection, log) = recorded();
        collection.add("x");
        collection.add("y");
        log.borrow_mut().clear();

        assert_eq!(collection.remove("x"), Some("x".to_string()));
        assert_eq!(collection.tags(), vec!["y"]);
        assert_eq!(
            log.borrow().as_slice(),
            [
                TagEvent::Removed("x".to_string()),
                TagEvent::Changed(vec!["y".to_string()]),
            ]
        );
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let (mut collection, log) = recorded();
        collection.add("x");
        log.borrow_mut().clear();

        assert_eq!(collection.remove("missing"), None);
        assert_eq!(collection.tags(), vec!["x"]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_last_takes_newest() {
        let mut collection = TagCollection::new(unbounded());
        collection.add("a");
        collection.add("b");
        assert_eq!(collection.remove_last(), Some("b".to_string()));
        assert_eq!(collection.tags(), vec!["a"]);
    }

    #[test]
    fn test_remove_last_on_empty_is_silent() {
        let (mut collection, log) = recorded();
        assert_eq!(collection.remove_last(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_all_returns_snapshot() {
        let (mut collection, log) = recorded();
        collection.add("a");
        collection.add("b");
        log.borrow_mut().clear();

        let snapshot = collection.remove_all();
        assert_eq!(snapshot, vec!["a", "b"]);
        assert!(collection.is_empty());
        assert_eq!(
            log.borrow().as_slice(),
            [
                TagEvent::Cleared(vec!["a".to_string(), "b".to_string()]),
                TagEvent::Changed(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_remove_all_when_empty_still_fires() {
        let (mut collection, log) = recorded();
        let snapshot = collection.remove_all();
        assert!(snapshot.is_empty());
        assert_eq!(
            log.borrow().as_slice(),
            [TagEvent::Cleared(Vec::new()), TagEvent::Changed(Vec::new())]
        );
    }

    #[test]
    fn test_set_tags_round_trip() {
        let mut collection = TagCollection::new(unbounded());
        collection.add("a");
        collection.add("b");
        collection.add("c");

        let snapshot = collection.remove_all();
        collection.set_tags(snapshot);
        assert_eq!(collection.tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_tags_skips_failing_values() {
        let options = TagOptions {
            max_tags: Some(3),
            ..TagOptions::default()
        };
        let mut collection = TagCollection::new(options);
        collection.add("kept");
        collection.set_tags(["one", "one", "bad tag", "two", "three", "four"]);
        // "kept" was cleared first; duplicate, invalid, and over-cap values
        // are dropped without feedback beyond the event stream
        assert_eq!(collection.tags(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_added_fires_before_changed() {
        let mut collection = TagCollection::new(unbounded());
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&order);
        collection.on(TagEventKind::Change, move |event| {
            // Mutation precedes notification: the snapshot already holds
            // the tag announced by the preceding Added
            if let TagEvent::Changed(tags) = event {
                assert_eq!(tags, &["z"]);
            }
            seen.borrow_mut().push("change");
        });
        let seen = Rc::clone(&order);
        collection.on(TagEventKind::Add, move |_| {
            seen.borrow_mut().push("add");
        });

        collection.add("z");
        assert_eq!(order.borrow().as_slice(), ["add", "change"]);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut collection = TagCollection::new(unbounded());
        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        for n in 1..=3 {
            let order = Rc::clone(&order);
            collection.on(TagEventKind::Add, move |_| order.borrow_mut().push(n));
        }
        collection.add("x");
        assert_eq!(order.borrow().as_slice(), [1, 2, 3]);
    }

    #[test]
    fn test_off_removes_single_registration() {
        let mut collection = TagCollection::new(unbounded());
        let count = Rc::new(RefCell::new(0u32));

        let c = Rc::clone(&count);
        let first = collection.on(TagEventKind::Add, move |_| *c.borrow_mut() += 1);
        let c = Rc::clone(&count);
        collection.on(TagEventKind::Add, move |_| *c.borrow_mut() += 1);

        collection.off(TagEventKind::Add, first);
        collection.add("x");
        assert_eq!(*count.borrow(), 1);

        // Unregistering twice, or under the wrong kind, is a safe no-op
        collection.off(TagEventKind::Add, first);
        collection.off(TagEventKind::Change, first);
        collection.add("y");
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_rejected_carries_candidate_verbatim() {
        let mut collection = TagCollection::new(TagOptions::default());
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        collection.on(TagEventKind::Reject, move |event| {
            if let TagEvent::Rejected(value) = event {
                log.borrow_mut().push(value.clone());
            }
        });
        collection.add("no good");
        assert_eq!(seen.borrow().as_slice(), ["no good"]);
    }
}
