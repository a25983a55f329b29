//! Two-card stack with exactly-once swipe commits
//!
//! The controller owns which card is interactive (the front of the stack),
//! the per-card [`GestureSession`] arena, and the single pending removal.
//! Both completion signals of the drag library funnel into one commit
//! transition guarded by the session's `handled` latch, so a card is recorded
//! once no matter which signal arrives first or how often.

use super::{
    resolve, BadgeConfig, BadgeOverlay, CardId, Classification, CompletionSignal, DetailOpener,
    ExitAnimation, ExitConfig, GestureClassifier, GestureSession, GestureThresholds, Point,
    SwipeOutcome, SwipeRecorder, SwipeToken,
};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Tunables consumed by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackConfig {
    pub gesture: GestureThresholds,
    pub badge: BadgeConfig,
    pub exit: ExitConfig,
    /// Time between commit and the card leaving the stack
    pub removal_delay: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            gesture: GestureThresholds::default(),
            badge: BadgeConfig::default(),
            exit: ExitConfig::default(),
            removal_delay: Duration::from_millis(600),
        }
    }
}

/// Identifies one scheduled removal
///
/// `epoch` is the stack generation the ticket was issued in; every feed reset
/// bumps it so a late ticket can never touch the new feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovalTicket {
    pub card_id: CardId,
    pub epoch: u64,
}

/// Cancelable delayed delivery of removal tickets
pub trait RemovalScheduler {
    /// Arranges for `ticket` to be handed back to
    /// [`CardStackController::on_removal_due`] after `delay`
    fn schedule(&mut self, ticket: RemovalTicket, delay: Duration);

    /// Drops every ticket not yet delivered
    fn cancel_all(&mut self);
}

/// Result of feeding a pointer event to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Not the top card, stack inert, card already committed, or no press in progress
    Ignored,
    SessionStarted,
    Tracking { dragging: bool },
    /// Detail view was opened; the stack is unchanged
    Tap,
    /// Released drag, waiting for the drag library's completion signal
    DragReleased { last_delta_x: f32 },
}

/// Result of a completion signal
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed(SwipeOutcome),
    /// The card was already committed by an earlier signal
    AlreadyHandled,
    /// The signal targeted a card that is not the top card
    NotTop,
    NoTopCard,
    /// A feed switch is in progress
    Inert,
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// Observable lifecycle phase of a card still in the stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardPhase {
    Idle,
    Tracking { dragging: bool },
    Released { last_delta_x: f32 },
    Committed,
}

pub struct CardStackController<R, S, D> {
    config: StackConfig,
    classifier: GestureClassifier,
    cards: VecDeque<CardId>,
    sessions: HashMap<CardId, GestureSession>,
    /// A pointer is currently pressed on the top card
    tracking: bool,
    badge: BadgeOverlay,
    exit: Option<ExitAnimation>,
    pending_removal: Option<RemovalTicket>,
    epoch: u64,
    inert: bool,
    recorder: R,
    scheduler: S,
    detail: D,
}

impl<R, S, D> CardStackController<R, S, D>
where
    R: SwipeRecorder,
    S: RemovalScheduler,
    D: DetailOpener,
{
    pub fn new(config: StackConfig, recorder: R, scheduler: S, detail: D) -> Self {
        Self {
            config,
            classifier: GestureClassifier::new(config.gesture),
            cards: VecDeque::new(),
            sessions: HashMap::new(),
            tracking: false,
            badge: BadgeOverlay::idle(),
            exit: None,
            pending_removal: None,
            epoch: 0,
            inert: false,
            recorder,
            scheduler,
            detail,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Replaces the stack with a new feed and makes it interactive
    pub fn load_feed<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = CardId>,
    {
        self.reset_state();
        self.cards = ids.into_iter().collect();
        self.inert = false;
        info!(epoch = self.epoch, cards = self.cards.len(), "feed loaded");
    }

    /// Cancels pending removals, forgets every session and makes the stack
    /// inert until the next [`load_feed`](Self::load_feed)
    pub fn begin_feed_switch(&mut self) {
        self.reset_state();
        self.inert = true;
        info!(epoch = self.epoch, "feed switch started");
    }

    pub fn switch_feed<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = CardId>,
    {
        self.begin_feed_switch();
        self.load_feed(ids);
    }

    fn reset_state(&mut self) {
        self.scheduler.cancel_all();
        if let Some(ticket) = self.pending_removal.take() {
            debug!(card = %ticket.card_id, epoch = ticket.epoch, "pending removal cancelled");
        }
        self.epoch += 1;
        self.cards.clear();
        self.sessions.clear();
        self.tracking = false;
        self.badge = BadgeOverlay::idle();
        self.exit = None;
    }

    /// Pointer-down on `card_id`
    pub fn pointer_down(&mut self, card_id: &CardId, point: Point, now: Instant) -> PointerOutcome {
        if !self.accepts_pointer(card_id) {
            debug!(card = %card_id, "pointer-down ignored");
            return PointerOutcome::Ignored;
        }

        let session = self.classifier.begin(card_id.clone(), point, now);
        self.sessions.insert(card_id.clone(), session);
        self.tracking = true;
        self.badge = BadgeOverlay::idle();
        PointerOutcome::SessionStarted
    }

    /// Pointer-move on `card_id`; updates the live badge overlay
    pub fn pointer_move(&mut self, card_id: &CardId, point: Point) -> PointerOutcome {
        if !self.tracking || !self.accepts_pointer(card_id) {
            return PointerOutcome::Ignored;
        }
        let Some(session) = self.sessions.get_mut(card_id) else {
            return PointerOutcome::Ignored;
        };

        self.classifier.track(session, point);
        self.badge = BadgeOverlay::from_delta(session.last_delta_x, &self.config.badge);
        PointerOutcome::Tracking {
            dragging: session.is_dragging(),
        }
    }

    /// Pointer-up on `card_id`.
    ///
    /// A tap opens the detail view and destroys the session. A drag release
    /// keeps the session so its last delta can break a direction tie when the
    /// completion signal arrives.
    pub fn pointer_up(&mut self, card_id: &CardId, point: Point, now: Instant) -> PointerOutcome {
        if !self.tracking || !self.accepts_pointer(card_id) {
            return PointerOutcome::Ignored;
        }
        let Some(session) = self.sessions.get_mut(card_id) else {
            return PointerOutcome::Ignored;
        };

        self.classifier.track(session, point);
        let classification = self.classifier.classify_release(session, point, now);
        self.tracking = false;
        self.badge = BadgeOverlay::idle();

        match classification {
            Classification::Tap => {
                self.sessions.remove(card_id);
                debug!(card = %card_id, "tap");
                self.detail.open_detail(card_id);
                PointerOutcome::Tap
            }
            Classification::DragRelease { last_delta_x } => {
                PointerOutcome::DragReleased { last_delta_x }
            }
        }
    }

    /// The drag library reported a swipe with `token` as its direction
    pub fn on_swipe_signal(&mut self, card_id: &CardId, token: Option<SwipeToken>) -> CommitOutcome {
        self.commit(card_id, CompletionSignal::Swiped, token)
    }

    /// The drag library reported that the card left the visible area
    pub fn on_card_left_visible_area(&mut self, card_id: &CardId) -> CommitOutcome {
        self.commit(card_id, CompletionSignal::LeftVisibleArea, None)
    }

    fn commit(
        &mut self,
        card_id: &CardId,
        signal: CompletionSignal,
        token: Option<SwipeToken>,
    ) -> CommitOutcome {
        if self.inert {
            debug!(card = %card_id, ?signal, "signal ignored, stack inert");
            return CommitOutcome::Inert;
        }
        let Some(top) = self.cards.front() else {
            debug!(card = %card_id, ?signal, "signal ignored, no top card");
            return CommitOutcome::NoTopCard;
        };
        if top != card_id {
            debug!(card = %card_id, top = %top, ?signal, "signal ignored, not top");
            return CommitOutcome::NotTop;
        }

        // Check-and-set of `handled` happens here with no suspension point
        // between the two; the second signal for a card always lands in
        // `AlreadyHandled`.
        let session = self
            .sessions
            .entry(card_id.clone())
            .or_insert_with(|| GestureSession::detached(card_id.clone(), Instant::now()));
        if !session.try_mark_handled() {
            debug!(card = %card_id, ?signal, "duplicate completion signal");
            return CommitOutcome::AlreadyHandled;
        }

        let resolution = resolve(token, session.last_delta_x);
        let from_x = session.last_delta_x;
        self.tracking = false;
        self.badge = BadgeOverlay::idle();

        let outcome = SwipeOutcome {
            card_id: card_id.clone(),
            direction: resolution.direction,
            resolved_by: signal,
            used_fallback: resolution.used_fallback,
            recorded_at: Utc::now(),
        };
        self.recorder.record(&outcome);
        self.exit = Some(ExitAnimation::start(
            resolution.direction,
            from_x,
            self.config.exit,
        ));

        let ticket = RemovalTicket {
            card_id: card_id.clone(),
            epoch: self.epoch,
        };
        self.pending_removal = Some(ticket.clone());
        self.scheduler.schedule(ticket, self.config.removal_delay);

        info!(
            card = %card_id,
            direction = %resolution.direction,
            ?signal,
            fallback = resolution.used_fallback,
            "swipe committed"
        );
        CommitOutcome::Committed(outcome)
    }

    /// Delivery of a scheduled removal.
    ///
    /// Drops the head only if `ticket` is the pending one for this epoch and
    /// still names the head; anything else is a stale timer and a no-op.
    pub fn on_removal_due(&mut self, ticket: &RemovalTicket) -> bool {
        let is_pending = self.pending_removal.as_ref() == Some(ticket);
        let is_head = self.cards.front() == Some(&ticket.card_id);
        if !is_pending || ticket.epoch != self.epoch || !is_head {
            debug!(
                card = %ticket.card_id,
                epoch = ticket.epoch,
                current_epoch = self.epoch,
                "stale removal ignored"
            );
            return false;
        }

        self.pending_removal = None;
        self.cards.pop_front();
        self.sessions.remove(&ticket.card_id);
        self.tracking = false;
        self.badge = BadgeOverlay::idle();
        self.exit = None;
        debug!(card = %ticket.card_id, remaining = self.cards.len(), "card removed");
        true
    }

    /// Steps the exit animation; purely visual
    pub fn advance_animation(&mut self, delta: Duration) {
        if let Some(exit) = self.exit.as_mut() {
            exit.advance(delta);
        }
    }

    fn accepts_pointer(&self, card_id: &CardId) -> bool {
        if self.inert || self.cards.front() != Some(card_id) {
            return false;
        }
        !self
            .sessions
            .get(card_id)
            .is_some_and(GestureSession::is_handled)
    }

    pub fn top(&self) -> Option<&CardId> {
        self.cards.front()
    }

    /// The inert preview card behind the top card
    pub fn under(&self) -> Option<&CardId> {
        self.cards.get(1)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_removal(&self) -> Option<&RemovalTicket> {
        self.pending_removal.as_ref()
    }

    pub fn session(&self, card_id: &CardId) -> Option<&GestureSession> {
        self.sessions.get(card_id)
    }

    pub fn phase(&self, card_id: &CardId) -> Option<CardPhase> {
        if !self.cards.contains(card_id) {
            return None;
        }
        let phase = match self.sessions.get(card_id) {
            None => CardPhase::Idle,
            Some(s) if s.is_handled() => CardPhase::Committed,
            Some(s) if self.tracking && self.cards.front() == Some(card_id) => {
                CardPhase::Tracking {
                    dragging: s.is_dragging(),
                }
            }
            Some(s) => CardPhase::Released {
                last_delta_x: s.last_delta_x,
            },
        };
        Some(phase)
    }

    pub fn badge(&self) -> &BadgeOverlay {
        &self.badge
    }

    pub fn exit_animation(&self) -> Option<&ExitAnimation> {
        self.exit.as_ref()
    }

    /// Horizontal offset at which the top card should be drawn
    pub fn top_offset_x(&self) -> f32 {
        if let Some(exit) = &self.exit {
            return exit.offset_x();
        }
        match self.top() {
            Some(top) if self.tracking => self
                .sessions
                .get(top)
                .map(|s| s.last_delta_x)
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut R {
        &mut self.recorder
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn detail_opener(&self) -> &D {
        &self.detail
    }

    pub fn detail_opener_mut(&mut self) -> &mut D {
        &mut self.detail
    }
}
