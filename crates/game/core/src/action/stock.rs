//! Certificate market actions: founding, buying and selling shares.

use crate::action::{ActionTransition, StockError};
use crate::config::GameConfig;
use crate::engine::{ledger, market};
use crate::env::GameEnv;
use crate::state::{
    Certificate, Corporation, CorporationId, GameState, LedgerSnapshot, NotificationKind, Player,
    PlayerId, RoundKind, StockActionKind, StockActionRecord, StockRoundState, UndoEntry,
};

/// Round and turn checks shared by every stock action.
fn stock_turn(
    state: &GameState,
    player: PlayerId,
) -> Result<(&StockRoundState, &Player), StockError> {
    let round = match (&state.round, &state.stock_round) {
        (RoundKind::StockRound, Some(round)) => round,
        _ => return Err(StockError::NotStockRound),
    };
    let holder = state
        .player(player)
        .ok_or(StockError::UnknownPlayer(player))?;
    if round.current_player() != Some(player) {
        return Err(StockError::NotYourTurn {
            player,
            current: round.current_player(),
        });
    }
    Ok((round, holder))
}

fn corporation(state: &GameState, id: CorporationId) -> Result<&Corporation, StockError> {
    state
        .corporation(id)
        .ok_or(StockError::UnknownCorporation(id))
}

/// Checks common to every purchase that adds one certificate to a player.
fn purchase_limits(
    state: &GameState,
    round: &StockRoundState,
    buyer: &Player,
    corporation: CorporationId,
    percent: u32,
) -> Result<(), StockError> {
    if round.purchased_this_turn {
        return Err(StockError::AlreadyPurchased);
    }
    if round.sold_this_round(buyer.id, corporation) {
        return Err(StockError::SoldThisRound(corporation));
    }
    if buyer.certificate_count() >= state.certificate_limit {
        return Err(StockError::CertificateLimit {
            limit: state.certificate_limit,
        });
    }
    let after = buyer.percent_of(corporation) + percent;
    if after > GameConfig::MAX_HOLDING_PERCENT {
        return Err(StockError::HoldingLimit {
            corporation,
            percent: after,
        });
    }
    Ok(())
}

fn record_action(
    state: &mut GameState,
    record: StockActionRecord,
    snapshot: LedgerSnapshot,
) {
    if let Some(round) = state.stock_round.as_mut() {
        round.round_actions.push(record.clone());
        round.turn_actions.push(UndoEntry { record, snapshot });
    }
}

/// Where an ordinary purchase draws its certificate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Ipo,
    BankPool,
}

/// Buys one regular certificate at the current share price, transferring the
/// presidency when the buyer now strictly exceeds the president.
fn buy_share(
    state: &mut GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    id: CorporationId,
    source: Source,
) -> Result<u32, StockError> {
    let record = corporation_mut(state, id)?;
    let price = record.share_price;
    let certificate = match source {
        Source::Ipo => record.ipo_shares.pop().ok_or(StockError::IpoEmpty(id))?,
        Source::BankPool => record
            .bank_shares
            .pop()
            .ok_or(StockError::BankPoolEmpty(id))?,
    };
    let president = record.president;

    ledger::pay_bank(state, player, price)?;

    let buyer_total = state
        .player(player)
        .map(|buyer| buyer.percent_of(id))
        .unwrap_or(0)
        + certificate.percent as u32;
    if let Some(president) = president.filter(|president| *president != player) {
        let president_total = corporation(state, id)?.player_percent(president);
        if buyer_total > president_total {
            ledger::exchange_presidency(state, id, president, player)?;
        }
    }
    ledger::grant(state, player, certificate)?;

    let message = format!(
        "{} bought {}% of {} for ${}",
        state.player_name(player),
        certificate.percent,
        corporation(state, id)?.display_name(),
        price
    );
    state.notify(NotificationKind::Purchase, message);

    ledger::check_float(state, id);
    market::process_pending(state, env.market()?)?;
    Ok(price)
}

fn corporation_mut(state: &mut GameState, id: CorporationId) -> Result<&mut Corporation, StockError> {
    state
        .corporation_mut(id)
        .ok_or(StockError::UnknownCorporation(id))
}

/// Buy a certificate from the IPO pool, founding the corporation first if it
/// has not been started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyCertificateAction {
    pub player: PlayerId,
    pub corporation: CorporationId,
    /// Required when founding; ignored once the corporation is started.
    pub par_value: Option<u32>,
}

impl BuyCertificateAction {
    pub fn new(player: PlayerId, corporation: CorporationId, par_value: Option<u32>) -> Self {
        Self {
            player,
            corporation,
            par_value,
        }
    }

    fn found(&self, state: &mut GameState, env: &GameEnv<'_>, par_value: u32) -> Result<(), StockError> {
        let position = market::par_position(env.market()?, par_value)
            .ok_or(StockError::InvalidParValue(par_value))?;
        let cost = par_value * GameConfig::PRESIDENT_SHARE_UNITS;
        ledger::pay_bank(state, self.player, cost)?;

        let record = corporation_mut(state, self.corporation)?;
        let index = record
            .ipo_shares
            .iter()
            .position(|certificate| certificate.president)
            .ok_or(StockError::IpoEmpty(self.corporation))?;
        let certificate = record.ipo_shares.remove(index);
        record.president = Some(self.player);
        record.par_value = Some(par_value);
        record.share_price = par_value;
        record.started = true;
        state.market.place(self.corporation, position);
        ledger::grant(state, self.player, certificate)?;

        let message = format!(
            "{} started {} at ${}",
            state.player_name(self.player),
            corporation(state, self.corporation)?.display_name(),
            par_value
        );
        state.notify(NotificationKind::Purchase, message);
        market::process_pending(state, env.market()?)?;
        Ok(())
    }
}

impl ActionTransition for BuyCertificateAction {
    type Error = StockError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let (round, buyer) = stock_turn(state, self.player)?;
        let target = corporation(state, self.corporation)?;

        if !target.started {
            let par_value = self
                .par_value
                .ok_or(StockError::ParValueRequired(self.corporation))?;
            market::par_position(env.market()?, par_value)
                .ok_or(StockError::InvalidParValue(par_value))?;
            purchase_limits(
                state,
                round,
                buyer,
                self.corporation,
                Certificate::PRESIDENT_PERCENT as u32,
            )?;
            let cost = par_value * GameConfig::PRESIDENT_SHARE_UNITS;
            if buyer.cash < cost {
                return Err(StockError::InsufficientFunds {
                    needed: cost,
                    available: buyer.cash,
                });
            }
            return Ok(());
        }

        if target.ipo_shares.is_empty() {
            return Err(StockError::IpoEmpty(self.corporation));
        }
        purchase_limits(
            state,
            round,
            buyer,
            self.corporation,
            Certificate::REGULAR_PERCENT as u32,
        )?;
        if buyer.cash < target.share_price {
            return Err(StockError::InsufficientFunds {
                needed: target.share_price,
                available: buyer.cash,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let snapshot = state.snapshot_ledger();
        let started = corporation(state, self.corporation)?.started;

        let (kind, shares, price) = if started {
            let price = buy_share(state, env, self.player, self.corporation, Source::Ipo)?;
            (StockActionKind::BuyCertificate, 1, price)
        } else {
            let par_value = self
                .par_value
                .ok_or(StockError::ParValueRequired(self.corporation))?;
            self.found(state, env, par_value)?;
            (
                StockActionKind::StartCorporation,
                GameConfig::PRESIDENT_SHARE_UNITS,
                par_value,
            )
        };

        if let Some(round) = state.stock_round.as_mut() {
            round.purchased_this_turn = true;
        }
        let record = StockActionRecord {
            player: self.player,
            kind,
            corporation: Some(self.corporation),
            shares,
            price,
            at: state.clock,
        };
        record_action(state, record, snapshot);
        Ok(())
    }
}

/// Buy a certificate that an earlier sale put in the bank pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyPoolCertificateAction {
    pub player: PlayerId,
    pub corporation: CorporationId,
}

impl BuyPoolCertificateAction {
    pub fn new(player: PlayerId, corporation: CorporationId) -> Self {
        Self {
            player,
            corporation,
        }
    }
}

impl ActionTransition for BuyPoolCertificateAction {
    type Error = StockError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let (round, buyer) = stock_turn(state, self.player)?;
        let target = corporation(state, self.corporation)?;
        if target.bank_shares.is_empty() {
            return Err(StockError::BankPoolEmpty(self.corporation));
        }
        purchase_limits(
            state,
            round,
            buyer,
            self.corporation,
            Certificate::REGULAR_PERCENT as u32,
        )?;
        if buyer.cash < target.share_price {
            return Err(StockError::InsufficientFunds {
                needed: target.share_price,
                available: buyer.cash,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let snapshot = state.snapshot_ledger();
        let price = buy_share(state, env, self.player, self.corporation, Source::BankPool)?;
        if let Some(round) = state.stock_round.as_mut() {
            round.purchased_this_turn = true;
        }
        let record = StockActionRecord {
            player: self.player,
            kind: StockActionKind::BuyPoolCertificate,
            corporation: Some(self.corporation),
            shares: 1,
            price,
            at: state.clock,
        };
        record_action(state, record, snapshot);
        Ok(())
    }
}

/// Sell share units (10% each) of a corporation into the bank pool.
///
/// The president's certificate cannot be sold directly. Selling into it hands
/// the presidency to the largest other holder, who must hold at least 20%, in
/// exchange for two regular certificates that are then sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SellCertificateAction {
    pub player: PlayerId,
    pub corporation: CorporationId,
    pub shares: u32,
}

impl SellCertificateAction {
    pub fn new(player: PlayerId, corporation: CorporationId, shares: u32) -> Self {
        Self {
            player,
            corporation,
            shares,
        }
    }

    fn needs_exchange(&self, seller: &Player) -> bool {
        self.shares as usize > seller.regular_count(self.corporation)
    }
}

impl ActionTransition for SellCertificateAction {
    type Error = StockError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let (_, seller) = stock_turn(state, self.player)?;
        if self.shares == 0 {
            return Err(StockError::ZeroShares);
        }
        let target = corporation(state, self.corporation)?;
        if !target.started {
            return Err(StockError::NotStarted(self.corporation));
        }

        let held = seller.percent_of(self.corporation) / Certificate::REGULAR_PERCENT as u32;
        if held < self.shares {
            return Err(StockError::InsufficientShares {
                corporation: self.corporation,
                requested: self.shares,
                held,
            });
        }

        let pool_after = target.bank_percent() + self.shares * Certificate::REGULAR_PERCENT as u32;
        if pool_after > GameConfig::MAX_BANK_POOL_PERCENT {
            return Err(StockError::BankPoolLimit {
                corporation: self.corporation,
                percent: pool_after,
            });
        }

        if self.needs_exchange(seller) {
            let eligible = ledger::successor(state, self.corporation, self.player)
                .is_some_and(|(_, percent)| percent >= Certificate::PRESIDENT_PERCENT as u32);
            if !eligible {
                return Err(StockError::PresidentCertificateBlocked(self.corporation));
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let snapshot = state.snapshot_ledger();
        let price = corporation(state, self.corporation)?.share_price;

        let seller = state
            .player(self.player)
            .ok_or(StockError::UnknownPlayer(self.player))?;
        if self.needs_exchange(seller) {
            let (successor, _) = ledger::successor(state, self.corporation, self.player)
                .ok_or(StockError::PresidentCertificateBlocked(self.corporation))?;
            ledger::exchange_presidency(state, self.corporation, self.player, successor)?;
        }

        // Regular certificates leave from the end of the seller's holdings.
        let sold: Vec<Certificate> = state
            .player(self.player)
            .ok_or(StockError::UnknownPlayer(self.player))?
            .holdings(self.corporation)
            .filter(|certificate| !certificate.president)
            .rev()
            .take(self.shares as usize)
            .copied()
            .collect();
        if sold.len() != self.shares as usize {
            return Err(StockError::InsufficientShares {
                corporation: self.corporation,
                requested: self.shares,
                held: sold.len() as u32,
            });
        }
        for certificate in &sold {
            ledger::revoke(state, self.player, *certificate)?;
        }
        corporation_mut(state, self.corporation)?
            .bank_shares
            .extend(sold.iter().copied());

        let proceeds = price * self.shares;
        ledger::pay_player(state, self.player, proceeds)?;
        if let Some(round) = state.stock_round.as_mut() {
            round
                .pending_drops
                .extend(std::iter::repeat_n(self.corporation, self.shares as usize));
        }

        let message = format!(
            "{} sold {}% of {} for ${}",
            state.player_name(self.player),
            self.shares * Certificate::REGULAR_PERCENT as u32,
            corporation(state, self.corporation)?.display_name(),
            proceeds
        );
        state.notify(NotificationKind::Sale, message);

        // A president who sold down to a tie or below hands over control.
        let seller_percent = state
            .player(self.player)
            .filter(|seller| seller.holds_president(self.corporation))
            .map(|seller| seller.percent_of(self.corporation));
        if let Some(seller_percent) = seller_percent
            && let Some((successor, percent)) =
                ledger::successor(state, self.corporation, self.player)
            && percent >= seller_percent
            && percent >= Certificate::PRESIDENT_PERCENT as u32
        {
            ledger::exchange_presidency(state, self.corporation, self.player, successor)?;
        }

        let record = StockActionRecord {
            player: self.player,
            kind: StockActionKind::SellCertificate,
            corporation: Some(self.corporation),
            shares: self.shares,
            price,
            at: state.clock,
        };
        record_action(state, record, snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rounds;
    use crate::engine::test_support::{Fixture, p};
    use crate::state::GridPosition;

    const PRR: CorporationId = CorporationId(0);

    fn stock_state(fixture: &Fixture, players: usize) -> GameState {
        let mut state = fixture.state(players);
        state.auction = None;
        state.round = RoundKind::AuctionSummary;
        rounds::begin_stock_round(&mut state);
        state
    }

    fn run<T: ActionTransition>(action: T, state: &mut GameState, fixture: &Fixture) -> Result<(), T::Error> {
        let env = fixture.env();
        action.pre_validate(state, &env)?;
        action.apply(state, &env)?;
        action.post_validate(state, &env)
    }

    /// Ends the current turn without the turn-control actions.
    fn next_turn(state: &mut GameState, fixture: &Fixture) {
        rounds::end_stock_turn(state, fixture.env().market().unwrap()).unwrap();
    }

    #[test]
    fn founding_at_67_places_token_in_row_five() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 4);

        run(BuyCertificateAction::new(p(0), PRR, Some(67)), &mut state, &fixture).unwrap();

        let prr = state.corporation(PRR).unwrap();
        assert_eq!(state.players[0].cash, 600 - 134);
        assert_eq!(prr.share_price, 67);
        assert_eq!(prr.par_value, Some(67));
        assert!(prr.started);
        assert!(!prr.floated);
        assert_eq!(prr.president, Some(p(0)));
        assert_eq!(state.market.position(PRR), Some(GridPosition::new(6, 5)));
    }

    #[test]
    fn founding_rejects_unlisted_par_value() {
        let fixture = Fixture::new();
        let state = stock_state(&fixture, 4);
        let action = BuyCertificateAction::new(p(0), PRR, Some(80));
        assert_eq!(
            action.pre_validate(&state, &fixture.env()),
            Err(StockError::InvalidParValue(80))
        );
        let action = BuyCertificateAction::new(p(0), PRR, None);
        assert_eq!(
            action.pre_validate(&state, &fixture.env()),
            Err(StockError::ParValueRequired(PRR))
        );
    }

    #[test]
    fn one_purchase_per_turn() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        run(BuyCertificateAction::new(p(0), PRR, Some(100)), &mut state, &fixture).unwrap();
        assert_eq!(
            run(BuyCertificateAction::new(p(0), PRR, None), &mut state, &fixture),
            Err(StockError::AlreadyPurchased)
        );
    }

    #[test]
    fn buying_past_the_president_takes_the_presidency() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        run(BuyCertificateAction::new(p(0), PRR, Some(100)), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        for _ in 0..2 {
            run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
            next_turn(&mut state, &fixture);
            next_turn(&mut state, &fixture);
            next_turn(&mut state, &fixture);
        }
        // p1 holds 20%, tied with the president: no transfer on a tie.
        assert_eq!(state.corporation(PRR).unwrap().president, Some(p(0)));

        run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
        let prr = state.corporation(PRR).unwrap();
        assert_eq!(prr.president, Some(p(1)));
        assert!(state.players[1].holds_president(PRR));
        assert_eq!(state.players[1].percent_of(PRR), 30);
        assert_eq!(state.players[0].percent_of(PRR), 20);
        assert_eq!(state.players[0].regular_count(PRR), 2);
    }

    #[test]
    fn sale_pays_pre_sale_price_and_defers_the_drop() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        run(BuyCertificateAction::new(p(0), PRR, Some(90)), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);

        let cash_before = state.players[1].cash;
        run(SellCertificateAction::new(p(1), PRR, 1), &mut state, &fixture).unwrap();
        assert_eq!(state.players[1].cash, cash_before + 90);
        assert_eq!(state.corporation(PRR).unwrap().share_price, 90);
        assert_eq!(state.corporation(PRR).unwrap().bank_percent(), 10);

        next_turn(&mut state, &fixture);
        assert_eq!(state.corporation(PRR).unwrap().share_price, 82);
        assert_eq!(state.market.position(PRR), Some(GridPosition::new(6, 2)));
    }

    #[test]
    fn cannot_rebuy_after_selling_this_round() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        run(BuyCertificateAction::new(p(0), PRR, Some(90)), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);
        run(SellCertificateAction::new(p(1), PRR, 1), &mut state, &fixture).unwrap();
        assert_eq!(
            run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture),
            Err(StockError::SoldThisRound(PRR))
        );
    }

    #[test]
    fn president_certificate_sale_needs_a_twenty_percent_holder() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        run(BuyCertificateAction::new(p(0), PRR, Some(76)), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);

        let action = SellCertificateAction::new(p(0), PRR, 2);
        assert_eq!(
            action.pre_validate(&state, &fixture.env()),
            Err(StockError::PresidentCertificateBlocked(PRR))
        );
        assert!(StockError::PresidentCertificateBlocked(PRR).to_string().contains("20%"));
    }

    #[test]
    fn selling_into_a_tie_hands_over_the_presidency() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        // p0 founds and buys one more (30%), p1 buys two (20%).
        run(BuyCertificateAction::new(p(0), PRR, Some(100)), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);
        run(BuyCertificateAction::new(p(0), PRR, None), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        run(BuyCertificateAction::new(p(1), PRR, None), &mut state, &fixture).unwrap();
        next_turn(&mut state, &fixture);
        next_turn(&mut state, &fixture);

        run(SellCertificateAction::new(p(0), PRR, 1), &mut state, &fixture).unwrap();

        let prr = state.corporation(PRR).unwrap();
        assert_eq!(prr.president, Some(p(1)));
        assert_eq!(state.players[0].percent_of(PRR), 20);
        assert_eq!(state.players[1].percent_of(PRR), 20);
        assert!(state.players[1].holds_president(PRR));
    }

    #[test]
    fn bank_pool_cannot_exceed_half() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture, 3);
        state.corporations[0].started = true;
        state.corporations[0].president = Some(p(0));
        state.corporations[0].share_price = 100;
        state.market.place(PRR, GridPosition::new(6, 0));
        let president = state.corporations[0].ipo_shares.remove(0);
        ledger::grant(&mut state, p(0), president).unwrap();
        for _ in 0..5 {
            let certificate = state.corporations[0].ipo_shares.pop().unwrap();
            state.corporations[0].bank_shares.push(certificate);
        }
        let certificate = state.corporations[0].ipo_shares.pop().unwrap();
        ledger::grant(&mut state, p(0), certificate).unwrap();

        let action = SellCertificateAction::new(p(0), PRR, 1);
        assert_eq!(
            action.pre_validate(&state, &fixture.env()),
            Err(StockError::BankPoolLimit { corporation: PRR, percent: 60 })
        );
    }
}
