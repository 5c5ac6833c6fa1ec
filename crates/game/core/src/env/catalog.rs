use crate::state::{CorporationId, PrivateId};

/// Oracle providing the fixed corporation and private-company lists plus the
/// per-player-count tables.
pub trait CatalogOracle: Send + Sync {
    /// Corporation templates in display order.
    fn corporations(&self) -> &[CorporationTemplate];

    /// Private-company templates ordered by face value.
    fn private_companies(&self) -> &[PrivateTemplate];

    /// Maximum certificates one player may hold, or `None` for an unsupported count.
    fn certificate_limit(&self, player_count: usize) -> Option<usize>;

    /// Cash handed to each player at game start.
    fn starting_cash(&self, player_count: usize) -> Option<u32>;

    /// Total money in the game (bank plus all players) at game start.
    fn bank_total(&self) -> u32;

    fn corporation(&self, id: CorporationId) -> Option<&CorporationTemplate> {
        self.corporations().iter().find(|template| template.id == id)
    }

    fn private_company(&self, id: PrivateId) -> Option<&PrivateTemplate> {
        self.private_companies()
            .iter()
            .find(|template| template.id == id)
    }
}

/// Static description of a corporation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorporationTemplate {
    pub id: CorporationId,
    pub name: String,
    pub abbreviation: String,
    pub color: String,
}

impl CorporationTemplate {
    pub fn new(
        id: CorporationId,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            color: color.into(),
        }
    }
}

/// Static description of a private company.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrivateTemplate {
    pub id: PrivateId,
    pub name: String,
    /// Face value; also the opening price in the auction.
    pub cost: u32,
    pub revenue: u32,
    pub effect: String,
}

impl PrivateTemplate {
    pub fn new(
        id: PrivateId,
        name: impl Into<String>,
        cost: u32,
        revenue: u32,
        effect: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            revenue,
            effect: effect.into(),
        }
    }
}
