// Demo patterns. The table is immutable; applying one always copies rows by
// value, so editing the live pattern afterward never touches these.

use crate::shared::{NUM_STEPS, NUM_TRACKS};

/// A named pattern snapshot. Rows are positional — row i lands on track i
/// (kick, snare, open hat, closed hat, cowbell). `bpm` is an optional tempo
/// override; presets without one leave the current tempo alone.
#[derive(Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub bpm: Option<u32>,
    pub rows: [[u8; NUM_STEPS]; NUM_TRACKS],
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "Four on the Floor",
        bpm: None,
        rows: [
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
            [0; NUM_STEPS],
        ],
    },
    Preset {
        name: "Lo-Fi Chill",
        bpm: Some(75),
        rows: [
            [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
            [1, 0, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0],
            [0; NUM_STEPS],
        ],
    },
    Preset {
        name: "House Party",
        bpm: Some(128),
        rows: [
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        ],
    },
    Preset {
        name: "Boom Bap",
        bpm: Some(92),
        rows: [
            [1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
            [0; NUM_STEPS],
            [1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0],
            [0; NUM_STEPS],
        ],
    },
    Preset {
        name: "Cowbell Fever",
        bpm: Some(110),
        rows: [
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
            [0; NUM_STEPS],
            [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
            [1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 1, 0],
        ],
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Uniform pick for the randomizer.
pub fn random_preset() -> &'static Preset {
    &PRESETS[fastrand::usize(..PRESETS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_on_the_floor_kick_row() {
        let p = find_preset("Four on the Floor").unwrap();
        assert_eq!(p.rows[0], [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(p.bpm, None);
    }

    #[test]
    fn lofi_chill_has_tempo_override() {
        assert_eq!(find_preset("Lo-Fi Chill").unwrap().bpm, Some(75));
    }

    #[test]
    fn unknown_name_is_absent() {
        assert!(find_preset("Polka Storm").is_none());
    }

    #[test]
    fn random_preset_comes_from_table() {
        fastrand::seed(7);
        for _ in 0..20 {
            let p = random_preset();
            assert!(PRESETS.iter().any(|q| std::ptr::eq(p, q)));
        }
    }
}
