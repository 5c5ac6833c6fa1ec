//! Property tests over random stock-round play.

mod common;

use common::Table;
use proptest::prelude::*;
use rail_core::state::invariants;
use rail_core::{Action, CorporationId, RoundKind};

const PAR_VALUES: [u32; 6] = [100, 90, 82, 76, 71, 67];

#[derive(Clone, Debug)]
enum Trade {
    Buy { corporation: u8, par: usize },
    Pool { corporation: u8 },
    Sell { corporation: u8, shares: u32 },
    End,
    Pass,
    Undo,
}

fn trades() -> impl Strategy<Value = Vec<Trade>> {
    // A few corporations keep collisions (presidency fights, pool sales) frequent.
    let corporation = 0u8..3;
    prop::collection::vec(
        prop_oneof![
            5 => (corporation.clone(), 0usize..6)
                .prop_map(|(corporation, par)| Trade::Buy { corporation, par }),
            1 => corporation.clone().prop_map(|corporation| Trade::Pool { corporation }),
            3 => (corporation, 1u32..4)
                .prop_map(|(corporation, shares)| Trade::Sell { corporation, shares }),
            4 => Just(Trade::End),
            1 => Just(Trade::Pass),
            1 => Just(Trade::Undo),
        ],
        0..120,
    )
}

fn action_for(table: &Table, trade: &Trade) -> Option<Action> {
    if table.state.round == RoundKind::OperatingRound {
        return Some(Action::end_operating_round());
    }
    let player = table.state.current_player()?;
    Some(match *trade {
        Trade::Buy { corporation, par } => {
            Action::buy_certificate(player, CorporationId(corporation), Some(PAR_VALUES[par]))
        }
        Trade::Pool { corporation } => Action::buy_pool_certificate(player, CorporationId(corporation)),
        Trade::Sell { corporation, shares } => {
            Action::sell_certificate(player, CorporationId(corporation), shares)
        }
        Trade::End => Action::end_stock_turn(player),
        Trade::Pass => Action::pass_stock_turn(player),
        Trade::Undo => Action::undo_stock(player),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_trading_keeps_the_ledger_consistent(
        players in 3usize..=6,
        trades in trades(),
    ) {
        let mut table = Table::seat(players).into_stock_round();

        for trade in &trades {
            let Some(action) = action_for(&table, trade) else {
                break;
            };
            let before = table.state.clone();
            let accepted = table.act(action).is_ok();

            if !accepted {
                // Rejections leave everything but the warning queue untouched.
                let mut after = table.state.clone();
                after.notifications = before.notifications.clone();
                prop_assert_eq!(&after, &before);
            }

            prop_assert!(invariants::check_all(&table.state).is_ok());
            prop_assert_eq!(table.cash_in_play(), 12_000);

            for corporation in table.state.corporations.iter().filter(|c| c.started) {
                let president = corporation.president;
                prop_assert!(president.is_some());
                if let Some(president) = president {
                    let leader = corporation.player_percent(president);
                    for player in &table.state.players {
                        prop_assert!(corporation.player_percent(player.id) <= leader);
                    }
                }
                prop_assert!(corporation.bank_percent() <= 50);
            }
        }
    }
}
