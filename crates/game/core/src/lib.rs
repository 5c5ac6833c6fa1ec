//! Deterministic rules engine for the railroad stock game.
//!
//! `rail-core` defines the canonical rules (actions, engine, state aggregate)
//! and exposes pure APIs that the runtime and offline tools share. All state
//! mutation flows through [`engine::GameEngine`]; the static tables it reads
//! are supplied through the oracle traits in [`env`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionKind, ActionTransition, AuctionError, BeginStockRoundAction, BidOffBidAction,
    BidOffError, BidOffPassAction, BidOnPrivateAction, BuyCertificateAction,
    BuyCheapestPrivateAction, BuyPoolCertificateAction, EndOperatingRoundAction,
    EndStockTurnAction, PassPrivateAuctionAction, PassStockTurnAction, PlayerAction,
    ResumeAuctionAction, RoundError, SellCertificateAction, StockError, SystemAction, TurnError,
    UndoStockAction, available_actions, get_available_actions,
};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, PriceMoveError, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    CatalogOracle, CorporationTemplate, Env, GameEnv, MarketCell, MarketOracle, MarketZone,
    OracleError, PhaseConfig, PhaseOracle, PrivateTemplate, TileColor,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AuctionLot, AuctionState, AuctionSummary, Bid, BidOffState, Certificate, Corporation,
    CorporationId, GameState, GridPosition, InitializationError, InvariantError, LedgerSnapshot,
    LotOutcome, Millis, Notification, NotificationId, NotificationKind, NotificationQueue,
    OperatingRoundState, OwnedPrivate, Player, PlayerId, PriceDirection, PrivateId, RoundKind,
    StockActionKind, StockActionRecord, StockMarket, StockRoundState, SummaryEntry, UndoEntry,
};
