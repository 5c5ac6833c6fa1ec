//! De-duplicated, time-staggered announcement queue.
//!
//! Each new entry becomes visible `depth × stagger` after it was pushed, so a
//! burst of announcements is spread out instead of stacking at once. Nothing in
//! the rules depends on visibility; the runtime paces itself separately.

use super::{Millis, NotificationId};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Purchase,
    Bid,
    BidOff,
    Pass,
    PriceReduced,
    Floated,
    PresidencyChanged,
    Sale,
    RoundChanged,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Millis,
    pub visible_at: Millis,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
    stagger_ms: u64,
}

impl NotificationQueue {
    pub fn new(stagger_ms: u64) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            stagger_ms,
        }
    }

    /// Queues a message unless an identical one is still queued.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Millis,
    ) -> Option<NotificationId> {
        let message = message.into();
        if self
            .entries
            .iter()
            .any(|entry| entry.kind == kind && entry.message == message)
        {
            return None;
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let delay = self.entries.len() as u64 * self.stagger_ms;
        self.entries.push(Notification {
            id,
            kind,
            message,
            created_at: now,
            visible_at: now.saturating_add(delay),
        });
        Some(id)
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn visible(&self, now: Millis) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |entry| entry.visible_at <= now)
    }

    /// Entries pushed at or after `id`.
    pub fn since(&self, id: NotificationId) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |entry| entry.id >= id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Id the next pushed entry will receive.
    pub fn next_id(&self) -> NotificationId {
        NotificationId(self.next_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(crate::config::GameConfig::DEFAULT_NOTIFICATION_STAGGER_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_staggered_by_depth() {
        let mut queue = NotificationQueue::new(400);
        let first = queue.push(NotificationKind::Bid, "a", 1_000).unwrap();
        let second = queue.push(NotificationKind::Bid, "b", 1_000).unwrap();
        let third = queue.push(NotificationKind::Pass, "c", 1_100).unwrap();

        let times: Vec<_> = queue.iter().map(|entry| (entry.id, entry.visible_at)).collect();
        assert_eq!(times, vec![(first, 1_000), (second, 1_400), (third, 1_900)]);
        assert_eq!(queue.visible(1_400).count(), 2);
    }

    #[test]
    fn duplicates_are_skipped_while_queued() {
        let mut queue = NotificationQueue::new(0);
        let id = queue.push(NotificationKind::Warning, "Insufficient funds", 0).unwrap();
        assert!(queue.push(NotificationKind::Warning, "Insufficient funds", 5).is_none());
        assert!(queue.push(NotificationKind::Sale, "Insufficient funds", 5).is_some());

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.push(NotificationKind::Warning, "Insufficient funds", 9).is_some());
    }

    #[test]
    fn ids_keep_increasing_after_dismissal() {
        let mut queue = NotificationQueue::new(10);
        let a = queue.push(NotificationKind::Purchase, "a", 0).unwrap();
        queue.dismiss(a);
        let b = queue.push(NotificationKind::Purchase, "b", 0).unwrap();
        assert!(b > a);
        assert_eq!(queue.since(b).count(), 1);
        assert_eq!(queue.next_id(), NotificationId(b.0 + 1));
    }
}
