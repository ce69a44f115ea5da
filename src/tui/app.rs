use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use crate::collection::{TagCollection, TagEvent, TagEventKind};
use crate::config::Config;
use crate::tui::error::TuiError;
use crate::tui::widgets::chips::ChipRect;
use crate::tui::widgets::input::TagInput;

/// Most recent events kept in the feed pane
const EVENT_FEED_CAPACITY: usize = 100;

/// Shared human-readable event feed, filled by listeners registered on the
/// tag collection and drained by the render layer.
pub type EventFeed = Rc<RefCell<VecDeque<String>>>;

pub struct App {
    pub config: Config,
    pub input: TagInput,
    pub event_feed: EventFeed,
    /// Chip footprints from the last render, used to hit test mouse clicks.
    /// Always derived from the latest snapshot, never from stale positions.
    pub chip_layout: Vec<ChipRect>,
    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, seed: Vec<String>) -> Result<Self, TuiError> {
        let mut collection = TagCollection::new(config.tag_options()?);

        // Subscribe to every event kind before seeding, so the feed shows
        // the seed flowing through the normal notification protocol
        let event_feed: EventFeed = Rc::new(RefCell::new(VecDeque::new()));
        for kind in [
            TagEventKind::Add,
            TagEventKind::Reject,
            TagEventKind::Remove,
            TagEventKind::RemoveAll,
            TagEventKind::Change,
        ] {
            let feed = Rc::clone(&event_feed);
            collection.on(kind, move |event| {
                let mut feed = feed.borrow_mut();
                feed.push_back(describe_event(event));
                while feed.len() > EVENT_FEED_CAPACITY {
                    feed.pop_front();
                }
            });
        }

        if !seed.is_empty() {
            collection.set_tags(seed);
        }

        Ok(Self {
            config,
            input: TagInput::new(collection),
            event_feed,
            chip_layout: Vec::new(),
            status_message: None,
            status_message_time: None,
        })
    }

    /// Remove the tag whose remove affordance was clicked
    pub fn remove_clicked_tag(&mut self, value: &str) {
        if let Some(removed) = self.input.collection.remove(value) {
            self.set_status_message(format!("Removed '{}'", removed));
        }
    }

    /// Clear the whole collection, reporting how many tags were dropped
    pub fn clear_all_tags(&mut self) {
        let removed = self.input.collection.remove_all();
        self.set_status_message(format!("Removed {} tag(s)", removed.len()));
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.status_message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }
}

/// One feed line per event, newest appended last
fn describe_event(event: &TagEvent) -> String {
    match event {
        TagEvent::Added(value) => format!("added '{}'", value),
        TagEvent::Rejected(value) => format!("rejected '{}'", value),
        TagEvent::Removed(value) => format!("removed '{}'", value),
        TagEvent::Cleared(values) => format!("cleared {} tag(s)", values.len()),
        TagEvent::Changed(values) => format!("changed -> [{}]", values.join(", ")),
    }
}
