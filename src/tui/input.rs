use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::shared::{EffectKind, InputEvent, NUM_TRACKS};

// State local to the TUI: just the track cursor. The 16 step keys always
// edit the selected track, so the machine never has to know about selection.
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    pub selected_track: usize,
}

// Key plan:
//
//   1 2 3 4  q w e r  a s d f  z x c v   toggle steps 0..15 of the selected track
//   Up / Down                            select track
//   Space                                play / stop
//   [ / ]                                track volume down / up
//   - / =                                track pitch down / up
//   , / .                                tempo down / up
//   u / i                                master volume down / up
//   0                                    clear all steps
//   y                                    randomize
//   p                                    next preset
//   t                                    next theme
//   7 / 8 / 9                            toggle reverb / distortion / delay
//   Esc                                  quit
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::TogglePlay],

        KeyCode::Up => {
            ts.selected_track = ts.selected_track.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            ts.selected_track = (ts.selected_track + 1).min(NUM_TRACKS - 1);
            vec![]
        }

        KeyCode::Char(c @ ('1' | '2' | '3' | '4'
            | 'q' | 'w' | 'e' | 'r'
            | 'a' | 's' | 'd' | 'f'
            | 'z' | 'x' | 'c' | 'v')) => match char_to_step(c) {
            Some(step) => vec![InputEvent::ToggleStep { track: ts.selected_track, step }],
            None => vec![],
        },

        KeyCode::Char('[') => vec![InputEvent::AdjustVolume { track: ts.selected_track, delta: -5 }],
        KeyCode::Char(']') => vec![InputEvent::AdjustVolume { track: ts.selected_track, delta: 5 }],
        KeyCode::Char('-') => vec![InputEvent::AdjustPitch { track: ts.selected_track, delta: -5 }],
        KeyCode::Char('=') => vec![InputEvent::AdjustPitch { track: ts.selected_track, delta: 5 }],

        KeyCode::Char(',') => vec![InputEvent::AdjustBpm(-2)],
        KeyCode::Char('.') => vec![InputEvent::AdjustBpm(2)],
        KeyCode::Char('u') => vec![InputEvent::AdjustMasterVolume(-0.05)],
        KeyCode::Char('i') => vec![InputEvent::AdjustMasterVolume(0.05)],

        KeyCode::Char('0') => vec![InputEvent::Clear],
        KeyCode::Char('y') => vec![InputEvent::Randomize],
        KeyCode::Char('p') => vec![InputEvent::CyclePreset],
        KeyCode::Char('t') => vec![InputEvent::CycleTheme],

        KeyCode::Char('7') => vec![InputEvent::ToggleEffect(EffectKind::Reverb)],
        KeyCode::Char('8') => vec![InputEvent::ToggleEffect(EffectKind::Distortion)],
        KeyCode::Char('9') => vec![InputEvent::ToggleEffect(EffectKind::Delay)],

        _ => vec![],
    }
}

fn char_to_step(c: char) -> Option<usize> {
    let idx = match c {
        '1' => 0, '2' => 1, '3' => 2, '4' => 3,
        'q' => 4, 'w' => 5, 'e' => 6, 'r' => 7,
        'a' => 8, 's' => 9, 'd' => 10, 'f' => 11,
        'z' => 12, 'x' => 13, 'c' => 14, 'v' => 15,
        _ => return None,
    };
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keys_edit_the_selected_track() {
        let mut ts = TuiState { selected_track: 2 };
        assert_eq!(
            handle_key(KeyCode::Char('w'), &mut ts),
            vec![InputEvent::ToggleStep { track: 2, step: 5 }]
        );
    }

    #[test]
    fn track_cursor_clamps_at_both_ends() {
        let mut ts = TuiState::default();
        handle_key(KeyCode::Up, &mut ts);
        assert_eq!(ts.selected_track, 0);
        for _ in 0..10 {
            handle_key(KeyCode::Down, &mut ts);
        }
        assert_eq!(ts.selected_track, NUM_TRACKS - 1);
    }

    #[test]
    fn transport_and_global_keys() {
        let mut ts = TuiState::default();
        assert_eq!(handle_key(KeyCode::Char(' '), &mut ts), vec![InputEvent::TogglePlay]);
        assert_eq!(handle_key(KeyCode::Char('.'), &mut ts), vec![InputEvent::AdjustBpm(2)]);
        assert_eq!(handle_key(KeyCode::Char('0'), &mut ts), vec![InputEvent::Clear]);
        assert_eq!(
            handle_key(KeyCode::Char('8'), &mut ts),
            vec![InputEvent::ToggleEffect(EffectKind::Distortion)]
        );
        assert_eq!(handle_key(KeyCode::Esc, &mut ts), vec![InputEvent::Quit]);
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        let mut ts = TuiState::default();
        assert!(handle_key(KeyCode::Char('j'), &mut ts).is_empty());
    }
}
