//! Collaborators notified by the stack controller

use super::{CardId, SwipeDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which completion path committed the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSignal {
    /// The drag library's "swiped" event
    Swiped,
    /// The drag library's "card left the visible area" event
    LeftVisibleArea,
}

/// Final decision for one card, sent to the recorder exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub card_id: CardId,
    pub direction: SwipeDirection,
    pub resolved_by: CompletionSignal,
    pub used_fallback: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Receives committed swipes for downstream bookkeeping
pub trait SwipeRecorder {
    fn record(&mut self, outcome: &SwipeOutcome);
}

impl<F> SwipeRecorder for F
where
    F: FnMut(&SwipeOutcome),
{
    fn record(&mut self, outcome: &SwipeOutcome) {
        self(outcome)
    }
}

/// Receives classified taps
pub trait DetailOpener {
    fn open_detail(&mut self, card_id: &CardId);
}

impl<F> DetailOpener for F
where
    F: FnMut(&CardId),
{
    fn open_detail(&mut self, card_id: &CardId) {
        self(card_id)
    }
}

/// Opener for hosts without a detail view
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDetailView;

impl DetailOpener for NoDetailView {
    fn open_detail(&mut self, _card_id: &CardId) {}
}

/// Statistics about the swipes recorded during the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeStatistics {
    pub total: usize,
    pub picks: usize,
    pub passes: usize,
}

/// In-memory recorder keeping outcomes in commit order
#[derive(Debug, Clone, Default)]
pub struct SwipeLog {
    outcomes: Vec<SwipeOutcome>,
}

impl SwipeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[SwipeOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes recorded for `card_id`
    pub fn count_for(&self, card_id: &CardId) -> usize {
        self.outcomes
            .iter()
            .filter(|o| &o.card_id == card_id)
            .count()
    }

    pub fn picks(&self) -> impl Iterator<Item = &CardId> {
        self.outcomes
            .iter()
            .filter(|o| o.direction.is_pick())
            .map(|o| &o.card_id)
    }

    pub fn statistics(&self) -> SwipeStatistics {
        let mut picks = 0;
        let mut passes = 0;

        for outcome in &self.outcomes {
            match outcome.direction {
                SwipeDirection::Right => picks += 1,
                SwipeDirection::Left => passes += 1,
            }
        }

        SwipeStatistics {
            total: self.outcomes.len(),
            picks,
            passes,
        }
    }
}

impl SwipeRecorder for SwipeLog {
    fn record(&mut self, outcome: &SwipeOutcome) {
        self.outcomes.push(outcome.clone());
    }
}
