// TUI module for rendering the card deck
pub mod colors;
pub mod drag_signals;
pub mod input;

// Re-exports
pub use colors::*;
pub use drag_signals::{DragSignal, DragSignalSource};
pub use input::{
    cell_to_point, handle_key_event, pointer_from_mouse, KeyAction, PointerInput, PointerKind,
};

use crate::app::App;
use crate::domain::Profile;
use crate::engine::{CardId, GlowSide, SwipeStatistics};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main card deck
    Browsing,
    /// Help overlay visible
    Help,
    /// Full profile of a tapped card
    Detail(CardId),
    /// Summary screen at end
    Summary,
    /// Welcome screen shown on first launch
    Welcome,
}

const CARD_MAX_WIDTH: u16 = 46;

/// Screen regions shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckLayout {
    pub header: Rect,
    pub deck: Rect,
    /// Rest position of the top card
    pub top_card: Rect,
    /// Under card, peeking out one row below and inset on both sides
    pub under_card: Rect,
    pub footer: Rect,
}

pub fn deck_layout(area: Rect) -> DeckLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Deck
            Constraint::Length(3), // Footer
        ])
        .split(area);
    let deck = chunks[1];

    let width = CARD_MAX_WIDTH.min(deck.width.saturating_sub(4));
    let top_card = Rect {
        x: deck.x + (deck.width - width) / 2,
        y: deck.y + deck.height.min(1),
        width,
        height: deck.height.saturating_sub(3),
    };
    let under_card = Rect {
        x: top_card.x + 2u16.min(top_card.width / 2),
        y: top_card.y + 1,
        width: top_card.width.saturating_sub(4),
        height: top_card.height,
    }
    .intersection(deck);

    DeckLayout {
        header: chunks[0],
        deck,
        top_card,
        under_card,
        footer: chunks[2],
    }
}

/// Renders the deck screen and the overlay for the current view
pub fn render(frame: &mut Frame, app: &App) {
    let layout = deck_layout(frame.area());

    render_header(frame, layout.header, app);
    render_deck(frame, &layout, app);
    render_footer(frame, layout.footer);

    match app.view() {
        ViewState::Help => render_help_overlay(frame),
        ViewState::Summary => render_summary(frame, &app.statistics()),
        ViewState::Welcome => render_welcome_overlay(frame),
        ViewState::Detail(card_id) => {
            if let Some(profile) = app.profile(card_id) {
                render_detail_overlay(frame, profile);
            }
        }
        ViewState::Browsing => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let stats = app.statistics();
    let title_line = Line::from(vec![Span::styled(
        format!(" Swipedeck · {} ", app.feed().mode.label()),
        Style::default()
            .fg(ACCENT_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    )]);
    let info_line = Line::from(vec![
        Span::styled(" ✓ ", Style::default().fg(ACCENT_SECONDARY)),
        Span::styled(
            format!("{} picked", stats.picks),
            Style::default().fg(TEXT_PRIMARY),
        ),
        Span::raw("   "),
        Span::styled("✗ ", Style::default().fg(ACCENT_PRIMARY)),
        Span::styled(
            format!("{} passed", stats.passes),
            Style::default().fg(TEXT_PRIMARY),
        ),
    ]);

    let header = Paragraph::new(vec![title_line, info_line])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    // Progress through the current feed
    let total = app.feed().len();
    let processed = total.saturating_sub(app.deck().len());
    let progress = if total > 0 {
        processed as f64 / total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{}/{}", processed, total));

    frame.render_widget(gauge, chunks[1]);
}

fn render_deck(frame: &mut Frame, layout: &DeckLayout, app: &App) {
    let deck = app.deck();
    let Some(top_id) = deck.top() else {
        frame.render_widget(render_empty_state_widget(), layout.deck);
        return;
    };

    if let Some(profile) = deck.under().and_then(|id| app.profile(id)) {
        let card = card_widget(profile, BORDER_DIM, Style::default().fg(TEXT_SECONDARY));
        frame.render_widget(card, layout.under_card);
    }

    let Some(profile) = app.profile(top_id) else {
        return;
    };
    let offset_cols = (deck.top_offset_x() / app.engine().cell_width_px).round() as i32;
    let Some(area) = shift_rect(layout.top_card, offset_cols, layout.deck) else {
        // Fully off screen
        return;
    };

    let badge = deck.badge();
    let border = match badge.glow {
        Some(glow) => blend(BORDER_COLOR, tint_color(glow.tint), glow.intensity),
        None => BORDER_COLOR,
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        card_widget(profile, border, Style::default().fg(TEXT_PRIMARY)),
        area,
    );

    if badge.pick > 0.0 {
        let color = blend(BG_DARK, ACCENT_SECONDARY, badge.pick);
        render_badge(frame, area, "PICK", GlowSide::Left, color);
    }
    if badge.pass > 0.0 {
        let color = blend(BG_DARK, ACCENT_PRIMARY, badge.pass);
        render_badge(frame, area, "PASS", GlowSide::Right, color);
    }
}

/// Moves `rect` horizontally by `offset` columns, clipped to `bounds`
fn shift_rect(rect: Rect, offset: i32, bounds: Rect) -> Option<Rect> {
    let left = (i32::from(rect.x) + offset).max(i32::from(bounds.x));
    let right = (i32::from(rect.right()) + offset).min(i32::from(bounds.right()));
    if right <= left || rect.height == 0 {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: rect.y,
        width: (right - left) as u16,
        height: rect.height,
    })
}

fn render_badge(frame: &mut Frame, card: Rect, label: &str, side: GlowSide, color: Color) {
    let width = label.len() as u16 + 2;
    if card.width < width + 2 || card.height < 3 {
        return;
    }
    let x = match side {
        GlowSide::Left => card.x + 1,
        GlowSide::Right => card.right() - width - 1,
    };
    let area = Rect {
        x,
        y: card.y + 1,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Span::styled(
        format!(" {} ", label),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(badge, area);
}

fn card_widget(profile: &Profile, border: Color, text: Style) -> Paragraph<'_> {
    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}, {}", profile.name, profile.age),
            text.add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(km) = profile.distance_km {
        lines.push(Line::from(Span::styled(
            format!("{:.1} km away", km),
            Style::default().fg(TEXT_SECONDARY),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(profile.bio.as_str(), text)));
    if !profile.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format_tags(&profile.tags),
            Style::default().fg(ACCENT_HIGHLIGHT),
        )));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Shown when the current feed has no cards left
fn render_empty_state_widget() -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No More Profiles",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press m to switch mode or q to quit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center)
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Pick", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("click ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Details", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("m ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Mode", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the summary screen at the end
pub fn render_summary(frame: &mut Frame, stats: &SwipeStatistics) {
    let summary_area = centered_rect(60, 50, frame.area());

    // Clear the background
    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Swiped:  "),
            Span::styled(
                format!("{}", stats.total),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Picked:  "),
            Span::styled(
                format!("{}", stats.picks),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Passed:  "),
            Span::styled(
                format!("{}", stats.passes),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(50, 70, frame.area());

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let key_line = |key: &'static str, color: Color, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<7}", key), Style::default().fg(color)),
            Span::raw(label),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Mouse",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Drag the card right to pick, left to pass"),
        Line::from("Click a card to see the full profile"),
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key_line("→ / l", ACCENT_SECONDARY, "Pick"),
        key_line("← / h", ACCENT_PRIMARY, "Pass"),
        key_line("Enter", TEXT_SECONDARY, "Profile details"),
        key_line("m", ACCENT_HIGHLIGHT, "Switch discover / nearby"),
        key_line("q / Esc", TEXT_SECONDARY, "Quit"),
        key_line("?", TEXT_SECONDARY, "Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Swipedeck",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("One profile at a time. Drag it away to decide."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Right ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("picks, "),
            Span::styled("left ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("passes, a click opens the profile."),
        ]),
        Line::from("Arrow keys work too."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let welcome_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(welcome_text, area);
}

/// Renders the full profile of a tapped card
pub fn render_detail_overlay(frame: &mut Frame, profile: &Profile) {
    let area = centered_rect(60, 60, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", profile.name))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let distance = profile
        .distance_km
        .map(|km| format!("{:.1} km away", km))
        .unwrap_or_else(|| "distance unknown".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}, {}", profile.name, profile.age),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(distance, Style::default().fg(TEXT_SECONDARY))),
        Line::from(""),
        Line::from(profile.bio.as_str()),
        Line::from(""),
    ];
    if !profile.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format_tags(&profile.tags),
            Style::default().fg(ACCENT_HIGHLIGHT),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press any key to go back",
        Style::default().fg(TEXT_SECONDARY),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
