//! Application state tying terminal input, timers and the card stack together

use crate::config::EngineConfig;
use crate::domain::{Feed, FeedMode, Profile};
use crate::engine::{
    CardId, CardPhase, CardStackController, CommitOutcome, DetailOpener, PointerOutcome,
    RemovalTicket, SwipeLog, SwipeStatistics, SwipeToken,
};
use crate::error::Result;
use crate::removal_timer::TokioRemovalTimers;
use crate::tui::{
    deck_layout, handle_key_event, DragSignal, DragSignalSource, KeyAction, PointerInput,
    PointerKind, ViewState,
};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Collects tap-to-open requests until the UI picks them up
#[derive(Debug, Default)]
pub struct DetailRequests {
    requested: Option<CardId>,
}

impl DetailRequests {
    pub fn take(&mut self) -> Option<CardId> {
        self.requested.take()
    }
}

impl DetailOpener for DetailRequests {
    fn open_detail(&mut self, card_id: &CardId) {
        self.requested = Some(card_id.clone());
    }
}

pub type Deck = CardStackController<SwipeLog, TokioRemovalTimers, DetailRequests>;

pub struct App {
    pool: Vec<Profile>,
    feed: Feed,
    deck: Deck,
    signals: DragSignalSource,
    engine: EngineConfig,
    view: ViewState,
    /// Card that received the current pointer-down
    pressed: Option<CardId>,
    /// Commit whose exit animation already reported "left visible area"
    reported_exit: Option<RemovalTicket>,
    screen: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(
        pool: Vec<Profile>,
        mode: FeedMode,
        engine: EngineConfig,
        show_welcome: bool,
    ) -> Result<Self> {
        let timers = TokioRemovalTimers::new()?;
        let mut deck = CardStackController::new(
            engine.stack_config(),
            SwipeLog::new(),
            timers,
            DetailRequests::default(),
        );
        let feed = Feed::for_mode(&pool, mode);
        deck.load_feed(feed.ids());

        Ok(Self {
            pool,
            feed,
            deck,
            signals: DragSignalSource::new(engine.commit_threshold_px),
            engine,
            view: if show_welcome {
                ViewState::Welcome
            } else {
                ViewState::Browsing
            },
            pressed: None,
            reported_exit: None,
            screen: Rect::new(0, 0, 80, 24),
            should_quit: false,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn profile(&self, card_id: &CardId) -> Option<&Profile> {
        self.feed.get(card_id)
    }

    pub fn statistics(&self) -> SwipeStatistics {
        self.deck.recorder().statistics()
    }

    pub fn swipe_log(&self) -> &SwipeLog {
        self.deck.recorder()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Terminal area used for hit-testing mouse events
    pub fn set_screen(&mut self, area: Rect) {
        self.screen = area;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = handle_key_event(key);

        match self.view {
            ViewState::Welcome => {
                // Any key dismisses welcome
                self.view = ViewState::Browsing;
                return;
            }
            ViewState::Help => {
                if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                    self.view = ViewState::Browsing;
                }
                return;
            }
            ViewState::Detail(_) => {
                self.view = ViewState::Browsing;
                return;
            }
            ViewState::Summary => {
                self.should_quit = true;
                return;
            }
            ViewState::Browsing => {}
        }

        match action {
            KeyAction::Quit => {
                // Show summary before quitting if anything was swiped
                if self.statistics().total > 0 {
                    self.view = ViewState::Summary;
                } else {
                    self.should_quit = true;
                }
            }
            KeyAction::Pick => self.swipe_top(SwipeToken::Right),
            KeyAction::Pass => self.swipe_top(SwipeToken::Left),
            KeyAction::OpenDetail => {
                if let Some(top) = self.deck.top().cloned() {
                    if self.deck.phase(&top) == Some(CardPhase::Idle)
                        && !self.deck.is_inert()
                    {
                        self.deck.detail_opener_mut().open_detail(&top);
                        if let Some(opened) = self.deck.detail_opener_mut().take() {
                            self.view = ViewState::Detail(opened);
                        }
                    }
                }
            }
            KeyAction::SwitchMode => self.switch_mode(),
            KeyAction::Help => self.view = ViewState::Help,
            KeyAction::None => {}
        }
    }

    pub fn handle_pointer(&mut self, input: PointerInput, now: Instant) {
        match self.view {
            ViewState::Browsing => {}
            ViewState::Detail(_) if input.kind == PointerKind::Down => {
                self.view = ViewState::Browsing;
                return;
            }
            _ => return,
        }

        match input.kind {
            PointerKind::Down => {
                let Some(card_id) = self.hit_test(input.column, input.row) else {
                    return;
                };
                let outcome = self.deck.pointer_down(&card_id, input.point, now);
                if outcome == PointerOutcome::SessionStarted {
                    self.pressed = Some(card_id);
                }
            }
            PointerKind::Move => {
                if let Some(card_id) = self.pressed.clone() {
                    self.deck.pointer_move(&card_id, input.point);
                }
            }
            PointerKind::Up => {
                let Some(card_id) = self.pressed.take() else {
                    return;
                };
                match self.deck.pointer_up(&card_id, input.point, now) {
                    PointerOutcome::Tap => {
                        if let Some(opened) = self.deck.detail_opener_mut().take() {
                            self.view = ViewState::Detail(opened);
                        }
                    }
                    PointerOutcome::DragReleased { .. } => {
                        let (dx, dy) = self
                            .deck
                            .session(&card_id)
                            .map(|s| (s.last_delta_x, s.last_delta_y))
                            .unwrap_or((0.0, 0.0));
                        for signal in self.signals.on_release(dx, dy) {
                            self.deliver(&card_id, signal);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Per-frame housekeeping: animation, due removals, end of feed
    pub fn tick(&mut self, delta: Duration) {
        self.deck.advance_animation(delta);

        // The drag library reports "left visible area" once the card is off screen
        let exit_done = self
            .deck
            .exit_animation()
            .is_some_and(|exit| exit.is_finished());
        if exit_done && self.reported_exit.as_ref() != self.deck.pending_removal() {
            self.reported_exit = self.deck.pending_removal().cloned();
            if let Some(top) = self.deck.top().cloned() {
                self.deliver(&top, DragSignal::LeftVisibleArea);
            }
        }

        for ticket in self.deck.scheduler_mut().drain_due() {
            self.deck.on_removal_due(&ticket);
        }

        if self.view == ViewState::Browsing
            && self.deck.is_empty()
            && self.statistics().total > 0
        {
            info!("feed exhausted");
            self.view = ViewState::Summary;
        }
    }

    /// Swaps to the other feed mode, leaving out profiles already swiped
    pub fn switch_mode(&mut self) {
        let mode = self.feed.mode.toggled();
        self.deck.begin_feed_switch();
        self.pressed = None;
        self.reported_exit = None;

        let log = self.deck.recorder();
        let unseen: Vec<Profile> = self
            .pool
            .iter()
            .filter(|p| log.count_for(&p.id) == 0)
            .cloned()
            .collect();
        self.feed = Feed::for_mode(&unseen, mode);
        self.deck.load_feed(self.feed.ids());
        info!(mode = mode.label(), cards = self.feed.len(), "mode switched");
    }

    fn swipe_top(&mut self, token: SwipeToken) {
        if let Some(top) = self.deck.top().cloned() {
            self.deliver(&top, DragSignal::Swiped(token));
        }
    }

    fn deliver(&mut self, card_id: &CardId, signal: DragSignal) -> CommitOutcome {
        let outcome = match signal {
            DragSignal::Swiped(token) => self.deck.on_swipe_signal(card_id, Some(token)),
            DragSignal::LeftVisibleArea => self.deck.on_card_left_visible_area(card_id),
        };
        debug!(card = %card_id, ?signal, committed = outcome.is_committed(), "drag signal");
        outcome
    }

    fn hit_test(&self, column: u16, row: u16) -> Option<CardId> {
        let layout = deck_layout(self.screen);
        if contains(layout.top_card, column, row) {
            return self.deck.top().cloned();
        }
        if contains(layout.under_card, column, row) {
            return self.deck.under().cloned();
        }
        None
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo_profiles;
    use crate::engine::SwipeDirection;
    use crate::tui::cell_to_point;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::thread;

    fn fast_engine() -> EngineConfig {
        EngineConfig {
            removal_delay_ms: 20,
            exit_duration_ms: 10,
            ..EngineConfig::default()
        }
    }

    fn app() -> App {
        App::new(demo_profiles(), FeedMode::Discover, fast_engine(), false).unwrap()
    }

    fn pointer(app: &App, kind: PointerKind, column: u16, row: u16) -> PointerInput {
        PointerInput {
            kind,
            column,
            row,
            point: cell_to_point(column, row, app.engine()),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn card_center(app: &App) -> (u16, u16) {
        let top = deck_layout(app.screen).top_card;
        (top.x + top.width / 2, top.y + top.height / 2)
    }

    /// Press on the top card, drag by `(cols, rows)` and release
    fn drag(app: &mut App, cols: i32, rows: i32) {
        let (x, y) = card_center(app);
        let to_x = (i32::from(x) + cols) as u16;
        let to_y = (i32::from(y) + rows) as u16;
        let start = Instant::now();

        app.handle_pointer(pointer(app, PointerKind::Down, x, y), start);
        app.handle_pointer(pointer(app, PointerKind::Move, to_x, to_y), start);
        app.handle_pointer(
            pointer(app, PointerKind::Up, to_x, to_y),
            start + Duration::from_millis(120),
        );
    }

    fn settle(app: &mut App) {
        thread::sleep(Duration::from_millis(80));
        app.tick(Duration::from_millis(16));
    }

    mod pointer_tests {
        use super::*;

        #[test]
        fn test_click_opens_detail_without_swiping() {
            let mut app = app();
            let (x, y) = card_center(&app);
            let now = Instant::now();

            app.handle_pointer(pointer(&app, PointerKind::Down, x, y), now);
            app.handle_pointer(pointer(&app, PointerKind::Up, x, y), now);

            assert_eq!(app.view(), &ViewState::Detail(CardId::from("p01")));
            assert_eq!(app.statistics().total, 0);
            assert_eq!(app.deck().len(), 8);
        }

        #[test]
        fn test_drag_right_commits_pick() {
            let mut app = app();
            drag(&mut app, 16, 0);

            let stats = app.statistics();
            assert_eq!(stats.picks, 1);
            assert_eq!(app.swipe_log().outcomes()[0].card_id, CardId::from("p01"));
            assert_eq!(
                app.deck().phase(&CardId::from("p01")),
                Some(CardPhase::Committed)
            );

            settle(&mut app);
            assert_eq!(app.deck().top(), Some(&CardId::from("p02")));
            assert_eq!(app.statistics().total, 1);
        }

        #[test]
        fn test_short_drag_springs_back() {
            let mut app = app();
            drag(&mut app, -6, 0);

            assert_eq!(app.statistics().total, 0);
            settle(&mut app);
            assert_eq!(app.deck().top(), Some(&CardId::from("p01")));
        }

        #[test]
        fn test_vertical_flick_uses_horizontal_fallback() {
            let mut app = app();
            drag(&mut app, -2, 8);

            let outcome = &app.swipe_log().outcomes()[0];
            assert_eq!(outcome.direction, SwipeDirection::Left);
            assert!(outcome.used_fallback);

            // Exit finishing reports the other signal; still one record
            settle(&mut app);
            settle(&mut app);
            assert_eq!(app.statistics().total, 1);
        }

        #[test]
        fn test_press_on_under_card_is_ignored() {
            let mut app = app();
            let layout = deck_layout(app.screen);
            let under = layout.under_card;
            let (x, y) = (under.x + 1, under.bottom() - 1);
            assert!(!contains(layout.top_card, x, y));

            let now = Instant::now();
            app.handle_pointer(pointer(&app, PointerKind::Down, x, y), now);
            app.handle_pointer(pointer(&app, PointerKind::Up, x, y), now);

            assert_eq!(app.view(), &ViewState::Browsing);
            assert!(app.deck().session(&CardId::from("p02")).is_none());
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn test_repeated_pick_records_once() {
            let mut app = app();
            app.handle_key(key(KeyCode::Right));
            app.handle_key(key(KeyCode::Right));

            assert_eq!(app.statistics().picks, 1);

            settle(&mut app);
            assert_eq!(app.deck().top(), Some(&CardId::from("p02")));
        }

        #[test]
        fn test_pass_key() {
            let mut app = app();
            app.handle_key(key(KeyCode::Left));
            assert_eq!(app.statistics().passes, 1);
        }

        #[test]
        fn test_quit_without_swipes_exits() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn test_quit_after_swipes_shows_summary() {
            let mut app = app();
            app.handle_key(key(KeyCode::Left));
            app.handle_key(key(KeyCode::Char('q')));
            assert_eq!(app.view(), &ViewState::Summary);
            assert!(!app.should_quit());

            app.handle_key(key(KeyCode::Char('x')));
            assert!(app.should_quit());
        }

        #[test]
        fn test_welcome_and_help_dismissal() {
            let mut app =
                App::new(demo_profiles(), FeedMode::Discover, fast_engine(), true).unwrap();
            assert_eq!(app.view(), &ViewState::Welcome);

            app.handle_key(key(KeyCode::Char('x')));
            assert_eq!(app.view(), &ViewState::Browsing);

            app.handle_key(key(KeyCode::Char('?')));
            assert_eq!(app.view(), &ViewState::Help);
            app.handle_key(key(KeyCode::Char('?')));
            assert_eq!(app.view(), &ViewState::Browsing);
        }

        #[test]
        fn test_enter_opens_detail_of_top() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.view(), &ViewState::Detail(CardId::from("p01")));

            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.view(), &ViewState::Browsing);
        }

        #[test]
        fn test_enter_goes_through_detail_opener() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(app.view(), &ViewState::Detail(CardId::from("p01")));
            assert_eq!(app.deck.detail_opener_mut().take(), None);
        }

        #[test]
        fn test_enter_ignored_while_top_is_exiting() {
            let mut app = app();
            app.handle_key(key(KeyCode::Right));
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(app.view(), &ViewState::Browsing);
            assert_eq!(app.deck.detail_opener_mut().take(), None);
        }
    }

    mod feed_tests {
        use super::*;

        #[test]
        fn test_mode_switch_cancels_pending_removal() {
            let mut app = app();
            app.handle_key(key(KeyCode::Right));
            app.handle_key(key(KeyCode::Char('m')));

            assert_eq!(app.feed().mode, FeedMode::Nearby);
            assert_eq!(app.deck().top(), Some(&CardId::from("p06")));
            assert_eq!(app.deck().len(), 4);

            settle(&mut app);
            assert_eq!(app.deck().top(), Some(&CardId::from("p06")));
            assert_eq!(app.deck().len(), 4);
        }

        #[test]
        fn test_exhausted_feed_shows_summary() {
            let pool = demo_profiles().into_iter().take(1).collect();
            let mut app = App::new(pool, FeedMode::Discover, fast_engine(), false).unwrap();

            app.handle_key(key(KeyCode::Left));
            settle(&mut app);

            assert!(app.deck().is_empty());
            assert_eq!(app.view(), &ViewState::Summary);
        }
    }
}
