use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::shared::{DisplayState, NUM_STEPS, TrackView};

use super::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &DisplayState,
    selected_track: usize,
    theme: &Theme,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // transport / status bar
            Constraint::Min(7),    // step grid
            Constraint::Length(1), // key help
        ])
        .split(area);

    draw_status(frame, sections[0], state, theme);
    draw_grid(frame, sections[1], state, selected_track, theme);
    draw_help(frame, sections[2], theme);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &DisplayState, theme: &Theme) {
    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text);
    let dim = Style::default().fg(theme.grid_dim);

    let mut spans = vec![
        if state.playing {
            Span::styled("▶ PLAYING", accent)
        } else {
            Span::styled("■ STOPPED", text)
        },
        Span::styled(format!("   BPM {:>3}", state.bpm), text),
        Span::styled(
            format!("   MASTER {:>3}%", (state.master_volume * 100.0).round() as u32),
            text,
        ),
        Span::styled(
            format!("   {}", state.preset_name.unwrap_or("—")),
            Style::default().fg(theme.accent),
        ),
        Span::raw("   "),
    ];
    for (label, on) in [
        ("[REV]", state.reverb_on),
        ("[DST]", state.distortion_on),
        ("[DLY]", state.delay_on),
    ] {
        spans.push(Span::styled(label, if on { accent } else { dim }));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" BEATBOX ", accent));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    state: &DisplayState,
    selected_track: usize,
    theme: &Theme,
) {
    let mut lines = Vec::with_capacity(state.tracks.len() + 1);
    lines.push(step_ruler(state, theme));
    for (i, track) in state.tracks.iter().enumerate() {
        lines.push(track_line(track, i == selected_track, state, theme));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// Column header marking beats, with the playhead column lit.
fn step_ruler(state: &DisplayState, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(14))];
    for step in 0..NUM_STEPS {
        let marker = if step % 4 == 0 { "▾  " } else { "·  " };
        let style = if state.current_step == Some(step) {
            Style::default().fg(theme.playhead).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grid_dim)
        };
        spans.push(Span::styled(marker, style));
        if step % 4 == 3 {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}

fn track_line(
    track: &TrackView,
    selected: bool,
    state: &DisplayState,
    theme: &Theme,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(NUM_STEPS + 4);

    let cursor = if selected { "▶ " } else { "  " };
    spans.push(Span::styled(
        format!("{cursor}{:<12}", track.label),
        if selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        },
    ));

    for (step, &on) in track.steps.iter().enumerate() {
        let at_playhead = state.current_step == Some(step);
        let cell = if on != 0 { "██ " } else { "·· " };
        let mut style = if on != 0 {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grid_dim)
        };
        if at_playhead {
            style = style.bg(theme.playhead);
        }
        spans.push(Span::styled(cell, style));
        if step % 4 == 3 {
            spans.push(Span::raw(" "));
        }
    }

    spans.push(Span::styled(
        format!(" vol {:>3}  pit {:>3}", track.volume, track.pitch),
        Style::default().fg(theme.text),
    ));
    Line::from(spans)
}

fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let help = "space play  ↑↓ track  1-4/qwer/asdf/zxcv steps  [ ] vol  - = pitch  , . bpm  \
                u i master  0 clear  y random  p preset  t theme  7/8/9 fx  esc quit";
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(theme.grid_dim),
        ))),
        area,
    );
}
