//! Snapshot encoding of a game in progress.
#![cfg(feature = "serde")]

mod common;

use common::Table;
use rail_core::{Action, CorporationId, GameState};

#[test]
fn restored_snapshot_plays_on_identically() {
    let mut table = Table::seat(3).into_stock_round();
    table.buy_and_end_turn(CorporationId(0), Some(82));

    let json = serde_json::to_string(&table.state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, table.state);

    let mut replay = Table {
        tables: rail_content::Tables::standard(),
        state: restored,
    };
    for game in [&mut table, &mut replay] {
        let player = game.current();
        game.act(Action::buy_certificate(player, CorporationId(0), None)).unwrap();
        game.act(Action::end_stock_turn(player)).unwrap();
    }
    assert_eq!(replay.state, table.state);
}
