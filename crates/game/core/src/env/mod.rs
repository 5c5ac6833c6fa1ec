//! Traits describing read-only game data.
//!
//! Oracles expose the corporation and private-company catalog, the stock
//! market grid, and the phase table. The [`Env`] aggregate bundles them so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations.
mod catalog;
mod error;
mod market;
mod phases;

pub use catalog::{CatalogOracle, CorporationTemplate, PrivateTemplate};
pub use error::OracleError;
pub use market::{MarketCell, MarketOracle, MarketZone};
pub use phases::{PhaseConfig, PhaseOracle, TileColor};

/// Aggregates read-only oracles required by the engine and action pipeline.
pub struct Env<'a, C, M, P>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
    P: PhaseOracle + ?Sized,
{
    catalog: Option<&'a C>,
    market: Option<&'a M>,
    phases: Option<&'a P>,
}

impl<C, M, P> Clone for Env<'_, C, M, P>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
    P: PhaseOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, M, P> Copy for Env<'_, C, M, P>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
    P: PhaseOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn CatalogOracle + 'a, dyn MarketOracle + 'a, dyn PhaseOracle + 'a>;

impl<'a, C, M, P> Env<'a, C, M, P>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
    P: PhaseOracle + ?Sized,
{
    pub fn new(catalog: Option<&'a C>, market: Option<&'a M>, phases: Option<&'a P>) -> Self {
        Self {
            catalog,
            market,
            phases,
        }
    }

    pub fn with_all(catalog: &'a C, market: &'a M, phases: &'a P) -> Self {
        Self::new(Some(catalog), Some(market), Some(phases))
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            market: None,
            phases: None,
        }
    }

    /// Returns the CatalogOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog oracle was provided.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the MarketOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MarketNotAvailable` if no market oracle was provided.
    pub fn market(&self) -> Result<&'a M, OracleError> {
        self.market.ok_or(OracleError::MarketNotAvailable)
    }

    /// Returns the PhaseOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PhasesNotAvailable` if no phase oracle was provided.
    pub fn phases(&self) -> Result<&'a P, OracleError> {
        self.phases.ok_or(OracleError::PhasesNotAvailable)
    }
}

impl<'a, C, M, P> Env<'a, C, M, P>
where
    C: CatalogOracle + 'a,
    M: MarketOracle + 'a,
    P: PhaseOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        let market: Option<&'a dyn MarketOracle> = self.market.map(|market| market as _);
        let phases: Option<&'a dyn PhaseOracle> = self.phases.map(|phases| phases as _);
        Env::new(catalog, market, phases)
    }
}
