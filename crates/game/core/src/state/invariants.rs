//! Whole-ledger consistency checks run after every mutating action.

use super::{Certificate, Corporation, GameState, InvariantError, Player};

/// Verifies certificate conservation, cash conservation and presidency rules.
pub fn check_all(state: &GameState) -> Result<(), InvariantError> {
    check_cash(state)?;
    for corporation in &state.corporations {
        check_certificates(corporation)?;
        check_holdings(corporation, &state.players)?;
        check_presidency(corporation)?;
    }
    Ok(())
}

pub fn check_cash(state: &GameState) -> Result<(), InvariantError> {
    let actual = state
        .players
        .iter()
        .fold(state.bank_cash, |total, player| total.saturating_add(player.cash));
    if actual != state.total_cash {
        return Err(InvariantError::CashTotal {
            expected: state.total_cash,
            actual,
        });
    }
    Ok(())
}

pub fn check_certificates(corporation: &Corporation) -> Result<(), InvariantError> {
    let total = corporation.total_percent();
    if total != 100 {
        return Err(InvariantError::CertificateTotal {
            corporation: corporation.id,
            total,
        });
    }
    Ok(())
}

/// The player-side and corporation-side views of each holding must agree.
pub fn check_holdings(corporation: &Corporation, players: &[Player]) -> Result<(), InvariantError> {
    for player in players {
        let mut held: Vec<Certificate> = player.holdings(corporation.id).copied().collect();
        let mut recorded = corporation
            .player_shares
            .get(&player.id)
            .cloned()
            .unwrap_or_default();
        held.sort_unstable();
        recorded.sort_unstable();
        if held != recorded {
            return Err(InvariantError::HoldingMismatch {
                player: player.id,
                corporation: corporation.id,
            });
        }
    }

    let seated = corporation
        .player_shares
        .keys()
        .all(|id| players.iter().any(|player| player.id == *id));
    if !seated {
        return Err(InvariantError::UnstartedHoldings {
            corporation: corporation.id,
        });
    }
    Ok(())
}

pub fn check_presidency(corporation: &Corporation) -> Result<(), InvariantError> {
    let holders: Vec<_> = corporation
        .player_shares
        .iter()
        .filter(|(_, certificates)| certificates.iter().any(|c| c.president))
        .map(|(player, _)| *player)
        .collect();

    if !corporation.started {
        let untouched = corporation.ipo_percent() == 100
            && corporation.player_shares.values().all(Vec::is_empty);
        if !untouched || corporation.president.is_some() {
            return Err(InvariantError::UnstartedHoldings {
                corporation: corporation.id,
            });
        }
        return Ok(());
    }

    if holders.len() != 1 {
        return Err(InvariantError::PresidentCount {
            corporation: corporation.id,
            count: holders.len(),
        });
    }
    let holder = holders[0];
    if corporation.president != Some(holder) {
        return Err(InvariantError::PresidentMismatch {
            corporation: corporation.id,
            recorded: corporation.president,
            holder: Some(holder),
        });
    }

    let president_percent = corporation.player_percent(holder);
    for other in corporation.player_shares.keys().filter(|id| **id != holder) {
        let other_percent = corporation.player_percent(*other);
        if other_percent > president_percent {
            return Err(InvariantError::PresidentOutweighed {
                corporation: corporation.id,
                president: holder,
                president_percent,
                other: *other,
                other_percent,
            });
        }
    }
    Ok(())
}
