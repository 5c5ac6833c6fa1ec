/// Game rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Spacing between consecutive notifications in the queue, in milliseconds.
    #[cfg_attr(feature = "serde", serde(default = "GameConfig::default_stagger"))]
    pub notification_stagger_ms: u64,
}

impl GameConfig {
    // ===== auction rules =====
    /// Minimum raise over the standing bid (or face value) on a private company.
    pub const BID_INCREMENT: u32 = 5;
    /// Discount applied to the cheapest private after a full round of passes.
    pub const PRICE_REDUCTION: u32 = 5;
    /// At or below this price a fully passed cheapest private is force-assigned.
    pub const FORCED_SALE_THRESHOLD: u32 = 5;

    // ===== certificate market rules =====
    /// Percentage of issuance that must leave the IPO pool for a corporation to float.
    pub const FLOAT_PERCENT: u32 = 60;
    /// Largest share of one corporation a single player may hold.
    pub const MAX_HOLDING_PERCENT: u32 = 60;
    /// Largest share of one corporation the bank pool may hold.
    pub const MAX_BANK_POOL_PERCENT: u32 = 50;
    /// Market column where every corporation's token is placed at founding.
    pub const FOUNDING_COLUMN: u8 = 6;
    /// Founding cost multiplier: the president's certificate is two shares.
    pub const PRESIDENT_SHARE_UNITS: u32 = 2;

    // ===== table sizes =====
    pub const MIN_PLAYERS: usize = 3;
    pub const MAX_PLAYERS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NOTIFICATION_STAGGER_MS: u64 = 400;

    pub fn new() -> Self {
        Self {
            notification_stagger_ms: Self::DEFAULT_NOTIFICATION_STAGGER_MS,
        }
    }

    pub fn with_notification_stagger(notification_stagger_ms: u64) -> Self {
        Self {
            notification_stagger_ms,
        }
    }

    #[cfg(feature = "serde")]
    fn default_stagger() -> u64 {
        Self::DEFAULT_NOTIFICATION_STAGGER_MS
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
