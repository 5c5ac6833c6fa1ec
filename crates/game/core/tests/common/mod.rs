//! Shared table setup for engine integration tests.
#![allow(dead_code)]

use rail_content::Tables;
use rail_core::{
    Action, CorporationId, ExecuteError, ExecutionOutcome, GameConfig, GameEngine, GameState,
    PlayerId, RoundKind,
};

/// A seated game on the standard tables.
pub struct Table {
    pub tables: Tables,
    pub state: GameState,
}

impl Table {
    pub fn seat(players: usize) -> Self {
        let tables = Tables::standard();
        let names: Vec<String> = (1..=players).map(|seat| format!("Player {seat}")).collect();
        let state = GameState::new_game(
            &names,
            &tables.env(),
            &GameConfig::with_notification_stagger(0),
        )
        .expect("standard tables seat 3 to 6 players");
        Self { tables, state }
    }

    /// Executes one action and settles any deferred auction check.
    pub fn act(&mut self, action: Action) -> Result<ExecutionOutcome, ExecuteError> {
        let env = self.tables.env();
        let mut engine = GameEngine::new(&mut self.state);
        let outcome = engine.execute(env, &action)?;
        engine.settle_auction(env)?;
        Ok(outcome)
    }

    pub fn current(&self) -> PlayerId {
        self.state.current_player().expect("a player is on turn")
    }

    /// Each seat in turn buys the cheapest private until the auction ends,
    /// then the first stock round opens.
    pub fn into_stock_round(mut self) -> Self {
        while self.state.round == RoundKind::PrivateAuction {
            let player = self.current();
            self.act(Action::buy_cheapest_private(player))
                .expect("every seat can afford the cheapest private");
        }
        self.act(Action::begin_stock_round())
            .expect("stock round opens after the summary");
        self
    }

    /// Buys one certificate for whoever is on turn and ends their turn.
    pub fn buy_and_end_turn(&mut self, corporation: CorporationId, par_value: Option<u32>) -> PlayerId {
        let player = self.current();
        self.act(Action::buy_certificate(player, corporation, par_value))
            .expect("purchase is legal");
        self.act(Action::end_stock_turn(player)).expect("turn ends");
        player
    }

    pub fn cash_in_play(&self) -> u32 {
        self.state.bank_cash + self.state.players.iter().map(|player| player.cash).sum::<u32>()
    }
}
