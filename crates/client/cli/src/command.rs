//! Line-oriented command parsing.
//!
//! Moves are parsed without the game at hand and resolved against the
//! current state afterwards, so `pass` and `bid` mean whatever the round on
//! the table allows.

use anyhow::{Context, Result, anyhow, bail};
use rail_core::{Action, CorporationId, GameState, NotificationId, PrivateId, RoundKind};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Play(Move),
    Show,
    Notifications,
    Dismiss(NotificationId),
    Save,
    NewGame(Vec<String>),
    Help,
    Quit,
}

/// A game move before the acting seat is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    BuyCheapest,
    /// `bid <private> <amount>` in the auction, `bid <amount>` in a bid-off.
    Bid {
        private: Option<PrivateId>,
        amount: u32,
    },
    Pass,
    Buy {
        corporation: String,
        par_value: Option<u32>,
    },
    BuyPool {
        corporation: String,
    },
    Sell {
        corporation: String,
        shares: u32,
    },
    EndTurn,
    Undo,
    BeginStockRound,
    EndOperatingRound,
}

pub const HELP: &str = "\
Auction:    cheapest | bid <private> <amount> | bid <amount> (bid-off) | pass
Stock:      buy <corp> [par] | pool <corp> | sell <corp> <shares> | end | undo | pass
Rounds:     stock (after the auction summary) | next (end operating round)
Session:    show | notes | dismiss <id> | save | new <name,name,...> | help | quit";

pub fn parse(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = words.collect();

    let input = match (command.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("show" | "s", []) => Input::Show,
        ("notes" | "n", []) => Input::Notifications,
        ("dismiss", [id]) => Input::Dismiss(NotificationId(number(id)?)),
        ("save", []) => Input::Save,
        ("new", _) if !args.is_empty() => Input::NewGame(crate::config::split_names(&args.join(" "))),
        ("help" | "?", []) => Input::Help,
        ("quit" | "exit" | "q", []) => Input::Quit,

        ("cheapest" | "c", []) => Input::Play(Move::BuyCheapest),
        ("bid" | "b", [amount]) => Input::Play(Move::Bid {
            private: None,
            amount: number(amount)?,
        }),
        ("bid" | "b", [private, amount]) => Input::Play(Move::Bid {
            private: Some(PrivateId(number(private)?)),
            amount: number(amount)?,
        }),
        ("pass" | "p", []) => Input::Play(Move::Pass),
        ("buy", [corporation]) => Input::Play(Move::Buy {
            corporation: corporation.to_string(),
            par_value: None,
        }),
        ("buy", [corporation, par]) => Input::Play(Move::Buy {
            corporation: corporation.to_string(),
            par_value: Some(number(par)?),
        }),
        ("pool", [corporation]) => Input::Play(Move::BuyPool {
            corporation: corporation.to_string(),
        }),
        ("sell", [corporation, shares]) => Input::Play(Move::Sell {
            corporation: corporation.to_string(),
            shares: number(shares)?,
        }),
        ("end" | "done", []) => Input::Play(Move::EndTurn),
        ("undo" | "u", []) => Input::Play(Move::Undo),
        ("stock", []) => Input::Play(Move::BeginStockRound),
        ("next", []) => Input::Play(Move::EndOperatingRound),

        _ => bail!("unrecognised command `{}`; type `help`", line.trim()),
    };
    Ok(input)
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T> {
    word.parse()
        .map_err(|_| anyhow!("`{word}` is not a valid number"))
}

impl Move {
    /// Builds the action for whoever is on turn.
    pub fn resolve(&self, state: &GameState) -> Result<Action> {
        let player = || {
            state
                .current_player()
                .with_context(|| format!("no player acts during the {}", state.round))
        };
        let in_bid_off = state
            .auction
            .as_ref()
            .is_some_and(|auction| auction.bid_off.is_some());

        let action = match self {
            Move::BeginStockRound => Action::begin_stock_round(),
            Move::EndOperatingRound => Action::end_operating_round(),
            Move::BuyCheapest => Action::buy_cheapest_private(player()?),
            Move::Bid {
                private: None,
                amount,
            } if in_bid_off => Action::bid_off_bid(player()?, *amount),
            Move::Bid { private: None, .. } => {
                bail!("name the private company: bid <private> <amount>")
            }
            Move::Bid {
                private: Some(private),
                amount,
            } => Action::bid_on_private(player()?, *private, *amount),
            Move::Pass if in_bid_off => Action::bid_off_pass(player()?),
            Move::Pass if state.round == RoundKind::StockRound => {
                Action::pass_stock_turn(player()?)
            }
            Move::Pass => Action::pass_private_auction(player()?),
            Move::Buy {
                corporation,
                par_value,
            } => Action::buy_certificate(player()?, lookup(state, corporation)?, *par_value),
            Move::BuyPool { corporation } => {
                Action::buy_pool_certificate(player()?, lookup(state, corporation)?)
            }
            Move::Sell {
                corporation,
                shares,
            } => Action::sell_certificate(player()?, lookup(state, corporation)?, *shares),
            Move::EndTurn => Action::end_stock_turn(player()?),
            Move::Undo => Action::undo_stock(player()?),
        };
        Ok(action)
    }
}

fn lookup(state: &GameState, abbreviation: &str) -> Result<CorporationId> {
    state
        .corporation_by_abbreviation(abbreviation)
        .map(|corporation| corporation.id)
        .with_context(|| format!("no corporation is abbreviated `{abbreviation}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_content::Tables;
    use rail_core::{GameConfig, PlayerId};

    fn state() -> GameState {
        let tables = Tables::standard();
        let names = vec!["Ada", "Grace", "Linus"];
        GameState::new_game(&names, &tables.env(), &GameConfig::default())
            .expect("three seats")
    }

    #[test]
    fn parses_auction_and_stock_moves() {
        assert_eq!(parse("cheapest").unwrap(), Input::Play(Move::BuyCheapest));
        assert_eq!(
            parse("bid 3 115").unwrap(),
            Input::Play(Move::Bid {
                private: Some(PrivateId(3)),
                amount: 115
            })
        );
        assert_eq!(
            parse("BUY prr 67").unwrap(),
            Input::Play(Move::Buy {
                corporation: "prr".to_string(),
                par_value: Some(67)
            })
        );
        assert_eq!(
            parse("new Ada, Grace,Linus").unwrap(),
            Input::NewGame(vec!["Ada".into(), "Grace".into(), "Linus".into()])
        );
        assert!(parse("sell PRR many").is_err());
        assert!(parse("teleport").is_err());
    }

    #[test]
    fn pass_follows_the_round() {
        let mut state = state();
        assert_eq!(
            Move::Pass.resolve(&state).unwrap(),
            Action::pass_private_auction(PlayerId(0))
        );

        state.round = RoundKind::AuctionSummary;
        assert!(Move::Pass.resolve(&state).is_err());
        assert_eq!(
            Move::BeginStockRound.resolve(&state).unwrap(),
            Action::begin_stock_round()
        );
    }

    #[test]
    fn corporations_resolve_by_abbreviation() {
        let state = state();
        let error = Move::BuyPool {
            corporation: "XYZ".to_string(),
        }
        .resolve(&state)
        .unwrap_err();
        assert!(error.to_string().contains("XYZ"));

        let action = Move::Sell {
            corporation: "b&o".to_string(),
            shares: 1,
        }
        .resolve(&state)
        .unwrap();
        assert_eq!(action, Action::sell_certificate(PlayerId(0), CorporationId(3), 1));
    }
}
