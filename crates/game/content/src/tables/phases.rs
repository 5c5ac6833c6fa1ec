//! Phase table.

use rail_core::{PhaseConfig, PhaseOracle, TileColor};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTable {
    pub phases: Vec<PhaseConfig>,
}

impl PhaseTable {
    pub fn new(phases: Vec<PhaseConfig>) -> Self {
        Self { phases }
    }

    pub fn standard() -> Self {
        use TileColor::*;

        let phase = |name: &str,
                     train_count: u8,
                     train_cost: u32,
                     tile_colors: &[TileColor],
                     operating_rounds: u8,
                     obsoletes: Option<&str>| PhaseConfig {
            name: name.to_string(),
            train: name.to_string(),
            train_count,
            train_cost,
            tile_colors: tile_colors.to_vec(),
            operating_rounds,
            obsoletes: obsoletes.map(str::to_string),
        };

        Self::new(vec![
            phase("2", 6, 80, &[Yellow], 1, None),
            phase("3", 5, 180, &[Yellow, Green], 2, None),
            phase("4", 4, 300, &[Yellow, Green], 2, Some("2")),
            phase("5", 3, 450, &[Yellow, Green, Brown], 3, None),
            phase("6", 2, 630, &[Yellow, Green, Brown], 3, Some("3")),
            phase("D", 20, 1100, &[Yellow, Green, Brown, Gray], 3, Some("4")),
        ])
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PhaseOracle for PhaseTable {
    fn phases(&self) -> &[PhaseConfig] {
        &self.phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_opens_in_phase_two_with_one_operating_round() {
        let table = PhaseTable::standard();
        let first = table.first().unwrap();
        assert_eq!(first.name, "2");
        assert_eq!(first.operating_rounds, 1);
        assert_eq!(table.phase("4").and_then(|phase| phase.obsoletes.as_deref()), Some("2"));
        assert!(table.phase("D").unwrap().tile_colors.contains(&TileColor::Gray));
    }
}
