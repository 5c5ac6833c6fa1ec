//! Certificate transfers between players, pools and the bank.
//!
//! Every holding is recorded twice, on the player and in the corporation's
//! share map. These helpers are the only place either side changes so the two
//! views stay in step.

use crate::action::StockError;
use crate::config::GameConfig;
use crate::state::{Certificate, CorporationId, GameState, NotificationKind, PlayerId};

use super::turns;

pub(crate) fn grant(
    state: &mut GameState,
    player: PlayerId,
    certificate: Certificate,
) -> Result<(), StockError> {
    let corporation = certificate.corporation;
    if state.corporation(corporation).is_none() {
        return Err(StockError::UnknownCorporation(corporation));
    }
    state
        .player_mut(player)
        .ok_or(StockError::UnknownPlayer(player))?
        .certificates
        .push(certificate);
    if let Some(record) = state.corporation_mut(corporation) {
        record
            .player_shares
            .entry(player)
            .or_default()
            .push(certificate);
    }
    Ok(())
}

pub(crate) fn revoke(
    state: &mut GameState,
    player: PlayerId,
    certificate: Certificate,
) -> Result<(), StockError> {
    let corporation = certificate.corporation;
    let holder = state
        .player_mut(player)
        .ok_or(StockError::UnknownPlayer(player))?;
    let index = holder
        .certificates
        .iter()
        .position(|held| *held == certificate)
        .ok_or(StockError::CertificateNotHeld { player })?;
    holder.certificates.remove(index);

    let record = state
        .corporation_mut(corporation)
        .ok_or(StockError::UnknownCorporation(corporation))?;
    let shares = record
        .player_shares
        .get_mut(&player)
        .ok_or(StockError::CertificateNotHeld { player })?;
    let index = shares
        .iter()
        .position(|held| *held == certificate)
        .ok_or(StockError::CertificateNotHeld { player })?;
    shares.remove(index);
    if shares.is_empty() {
        record.player_shares.remove(&player);
    }
    Ok(())
}

pub(crate) fn pay_bank(state: &mut GameState, player: PlayerId, amount: u32) -> Result<(), StockError> {
    let payer = state
        .player_mut(player)
        .ok_or(StockError::UnknownPlayer(player))?;
    payer.cash = payer
        .cash
        .checked_sub(amount)
        .ok_or(StockError::InsufficientFunds {
            needed: amount,
            available: payer.cash,
        })?;
    state.bank_cash += amount;
    Ok(())
}

pub(crate) fn pay_player(
    state: &mut GameState,
    player: PlayerId,
    amount: u32,
) -> Result<(), StockError> {
    let bank_cash = state
        .bank_cash
        .checked_sub(amount)
        .ok_or(StockError::BankBroken { needed: amount })?;
    state
        .player_mut(player)
        .ok_or(StockError::UnknownPlayer(player))?
        .cash += amount;
    state.bank_cash = bank_cash;
    Ok(())
}

/// Hands the president's certificate from `from` to `to` in exchange for up
/// to two of `to`'s regular certificates, taken from the front of their
/// holdings.
pub(crate) fn exchange_presidency(
    state: &mut GameState,
    corporation: CorporationId,
    from: PlayerId,
    to: PlayerId,
) -> Result<(), StockError> {
    let swap: Vec<Certificate> = state
        .player(to)
        .ok_or(StockError::UnknownPlayer(to))?
        .holdings(corporation)
        .filter(|certificate| !certificate.president)
        .take(GameConfig::PRESIDENT_SHARE_UNITS as usize)
        .copied()
        .collect();

    let president = Certificate::president(corporation);
    revoke(state, from, president)?;
    grant(state, to, president)?;
    for certificate in swap {
        revoke(state, to, certificate)?;
        grant(state, from, certificate)?;
    }

    let record = state
        .corporation_mut(corporation)
        .ok_or(StockError::UnknownCorporation(corporation))?;
    record.president = Some(to);
    let message = format!(
        "{} is now president of {}",
        state.player_name(to),
        state
            .corporation(corporation)
            .map(|record| record.display_name())
            .unwrap_or("?")
    );
    state.notify(NotificationKind::PresidencyChanged, message);
    Ok(())
}

/// Largest holder of `corporation` other than `seller`, with their percentage.
/// Ties go to whoever sits first after the seller.
pub(crate) fn successor(
    state: &GameState,
    corporation: CorporationId,
    seller: PlayerId,
) -> Option<(PlayerId, u32)> {
    let seats: Vec<PlayerId> = state.players.iter().map(|player| player.id).collect();
    let mut best: Option<(PlayerId, u32)> = None;
    for candidate in turns::others_after(&seats, seller) {
        let percent = state
            .player(candidate)
            .map(|player| player.percent_of(corporation))
            .unwrap_or(0);
        if percent > 0 && best.is_none_or(|(_, top)| percent > top) {
            best = Some((candidate, percent));
        }
    }
    best
}

/// Flags the corporation as floated once enough of it has left the IPO pool.
pub(crate) fn check_float(state: &mut GameState, corporation: CorporationId) {
    let Some(record) = state.corporation_mut(corporation) else {
        return;
    };
    if !record.started || record.floated || record.sold_percent() < GameConfig::FLOAT_PERCENT {
        return;
    }
    record.floated = true;
    let message = format!("{} has floated", record.display_name());
    state.notify(NotificationKind::Floated, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::fixture_state;

    #[test]
    fn grant_and_revoke_keep_both_views_in_step() {
        let mut state = fixture_state(3);
        let corporation = CorporationId(0);
        let certificate = state.corporations[0].ipo_shares.pop().unwrap();

        grant(&mut state, PlayerId(1), certificate).unwrap();
        assert_eq!(state.players[1].percent_of(corporation), 10);
        assert_eq!(state.corporations[0].player_percent(PlayerId(1)), 10);

        revoke(&mut state, PlayerId(1), certificate).unwrap();
        assert!(state.players[1].certificates.is_empty());
        assert!(state.corporations[0].player_shares.is_empty());

        assert_eq!(
            revoke(&mut state, PlayerId(1), certificate),
            Err(StockError::CertificateNotHeld { player: PlayerId(1) })
        );
    }

    #[test]
    fn successor_breaks_ties_by_seat_after_seller() {
        let mut state = fixture_state(4);
        let corporation = CorporationId(0);
        for player in [PlayerId(0), PlayerId(3)] {
            for _ in 0..2 {
                let certificate = state.corporations[0].ipo_shares.pop().unwrap();
                grant(&mut state, player, certificate).unwrap();
            }
        }

        assert_eq!(successor(&state, corporation, PlayerId(1)), Some((PlayerId(3), 20)));
        assert_eq!(successor(&state, corporation, PlayerId(3)), Some((PlayerId(0), 20)));
        assert_eq!(successor(&state, CorporationId(1), PlayerId(0)), None);
    }
}
