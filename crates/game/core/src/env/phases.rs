/// Oracle providing the per-phase configuration table.
///
/// Phases are pure data here: train purchases are not modelled, so the engine
/// only reads the current phase to decide how many operating rounds follow a
/// stock round.
pub trait PhaseOracle: Send + Sync {
    /// Phases in the order they are entered.
    fn phases(&self) -> &[PhaseConfig];

    fn phase(&self, name: &str) -> Option<&PhaseConfig> {
        self.phases().iter().find(|phase| phase.name == name)
    }

    fn first(&self) -> Option<&PhaseConfig> {
        self.phases().first()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseConfig {
    pub name: String,
    /// Train type whose first purchase starts this phase.
    pub train: String,
    pub train_count: u8,
    pub train_cost: u32,
    pub tile_colors: Vec<TileColor>,
    /// Operating rounds between consecutive stock rounds.
    pub operating_rounds: u8,
    /// Train type that rusts when this phase begins.
    pub obsoletes: Option<String>,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileColor {
    Yellow,
    Green,
    Brown,
    Gray,
}
