// The pattern store: a fixed set of tracks, each a 16-step row plus
// volume/pitch scalars. Tracks are created once at startup; steps and
// scalars mutate, or the whole set is overwritten (clear/randomize/preset).

use crate::shared::NUM_STEPS;

/// One sequencer row. `id` is the stable identity used for sound lookup,
/// `label` is what the UI shows. Volume and pitch live in 0–100; the audio
/// engine clamps again on its side.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub label: String,
    pub steps: [u8; NUM_STEPS],
    pub volume: u8,
    pub pitch: u8,
}

impl Track {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            steps: [0; NUM_STEPS],
            volume: 75,
            pitch: 50,
        }
    }

    pub fn clear_steps(&mut self) {
        self.steps = [0; NUM_STEPS];
    }
}

/// The five fixed track identities, in display order.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("kick", "Kick"),
        Track::new("snare", "Snare"),
        Track::new("openhat", "Open Hat"),
        Track::new("closedhat", "Closed Hat"),
        Track::new("cowbell", "Cowbell"),
    ]
}

/// Track id → sample name. Fixed table, with a lowercase/hyphenate fallback
/// for ids outside it ("Open hat" → "open-hat").
pub fn sound_name(id: &str) -> String {
    match id {
        "kick" => "kick".to_string(),
        "snare" => "snare".to_string(),
        "openhat" => "open-hat".to_string(),
        "closedhat" => "closed-hat".to_string(),
        "cowbell" => "cowbell".to_string(),
        other => other.to_lowercase().replace(' ', "-"),
    }
}

/// UI pitch (0–100) → playback-rate multiplier, 0.5..2.0. Not centered at
/// 1.0 for pitch=50 (that maps to 1.25); existing patterns depend on it.
pub fn pitch_rate(pitch: u8) -> f32 {
    0.5 + (pitch.min(100) as f32 / 100.0) * 1.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_rate_endpoints() {
        assert_eq!(pitch_rate(0), 0.5);
        assert_eq!(pitch_rate(50), 1.25);
        assert_eq!(pitch_rate(100), 2.0);
    }

    #[test]
    fn pitch_rate_clamps_above_range() {
        assert_eq!(pitch_rate(200), 2.0);
    }

    #[test]
    fn sound_name_fixed_table() {
        assert_eq!(sound_name("kick"), "kick");
        assert_eq!(sound_name("snare"), "snare");
        assert_eq!(sound_name("openhat"), "open-hat");
        assert_eq!(sound_name("closedhat"), "closed-hat");
        assert_eq!(sound_name("cowbell"), "cowbell");
    }

    #[test]
    fn sound_name_fallback_hyphenates() {
        assert_eq!(sound_name("Open hat"), "open-hat");
        assert_eq!(sound_name("Hand Clap"), "hand-clap");
    }

    #[test]
    fn default_tracks_shape() {
        let tracks = default_tracks();
        assert_eq!(tracks.len(), crate::shared::NUM_TRACKS);
        for t in &tracks {
            assert_eq!(t.steps, [0; NUM_STEPS]);
            assert_eq!(t.volume, 75);
            assert_eq!(t.pitch, 50);
        }
        assert_eq!(tracks[0].id, "kick");
    }
}
