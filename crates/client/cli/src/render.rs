//! Plain-text views of the game state.

use std::fmt::Write;

use rail_core::{
    Corporation, GameState, LotOutcome, Notification, NotificationKind, PlayerId, RoundKind,
    get_available_actions,
};

pub fn state(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} | phase {} | bank ${} | priority {} ==",
        round_title(state),
        state.phase,
        state.bank_cash,
        state.player_name(state.priority_deal)
    );

    for player in &state.players {
        let marker = if state.current_player() == Some(player.id) { ">" } else { " " };
        let locked = state
            .auction
            .as_ref()
            .and_then(|auction| auction.locked.get(&player.id).copied())
            .unwrap_or_default();
        let _ = write!(out, "{marker} {:<12} ${:>5}", player.name, player.cash);
        if locked > 0 {
            let _ = write!(out, " (${locked} bid)");
        }
        let holdings = holdings(state, player.id);
        if !holdings.is_empty() {
            let _ = write!(out, "  {holdings}");
        }
        let _ = writeln!(out);
    }

    match state.round {
        RoundKind::PrivateAuction => auction(state, &mut out),
        RoundKind::AuctionSummary => summary(state, &mut out),
        RoundKind::StockRound | RoundKind::OperatingRound => market(state, &mut out),
    }

    if let Some(player) = state.current_player() {
        let actions: Vec<String> = get_available_actions(player, state)
            .into_iter()
            .map(|kind| kind.to_string())
            .collect();
        let _ = writeln!(
            out,
            "{} may: {}",
            state.player_name(player),
            actions.join(", ")
        );
    }
    out
}

fn round_title(state: &GameState) -> String {
    match (state.round, &state.operating_round) {
        (RoundKind::StockRound, _) => format!("Stock round {}", state.stock_round_number),
        (RoundKind::OperatingRound, Some(or)) => {
            format!("Operating round {}.{} of {}", state.stock_round_number, or.number, or.of)
        }
        (RoundKind::PrivateAuction, _) => "Private auction".to_string(),
        (RoundKind::AuctionSummary, _) => "Auction summary".to_string(),
        (RoundKind::OperatingRound, None) => "Operating round".to_string(),
    }
}

fn holdings(state: &GameState, player: PlayerId) -> String {
    let mut parts: Vec<String> = state
        .corporations
        .iter()
        .filter_map(|corporation| {
            let percent = owned_percent(corporation, player);
            (percent > 0).then(|| {
                let president = if corporation.president == Some(player) { "*" } else { "" };
                format!("{}{president} {percent}%", corporation.abbreviation)
            })
        })
        .collect();
    if let Some(owner) = state.player(player) {
        parts.extend(owner.privates.iter().map(|private| private.name.clone()));
    }
    parts.join(", ")
}

fn owned_percent(corporation: &Corporation, player: PlayerId) -> u32 {
    corporation
        .player_shares
        .get(&player)
        .map(|certificates| certificates.iter().map(|c| u32::from(c.percent)).sum())
        .unwrap_or_default()
}

fn auction(state: &GameState, out: &mut String) {
    let Some(auction) = &state.auction else {
        return;
    };
    for lot in &auction.lots {
        let bids: Vec<String> = auction
            .bids
            .iter()
            .filter(|bid| bid.private == lot.private)
            .map(|bid| format!("{} ${}", state.player_name(bid.player), bid.amount))
            .collect();
        let _ = write!(
            out,
            "  [{}] {:<26} ${:>3}",
            lot.private, lot.name, lot.current_price
        );
        if lot.current_price != lot.face_value {
            let _ = write!(out, " (face ${})", lot.face_value);
        }
        if !bids.is_empty() {
            let _ = write!(out, "  bids: {}", bids.join(", "));
        }
        let _ = writeln!(out);
    }
    if let Some(bid_off) = &auction.bid_off {
        let _ = writeln!(
            out,
            "  Bid-off for [{}]: {} leads at ${}",
            bid_off.private,
            state.player_name(bid_off.current_bidder),
            bid_off.current_bid
        );
    }
}

fn summary(state: &GameState, out: &mut String) {
    let Some(summary) = &state.auction_summary else {
        return;
    };
    for entry in &summary.entries {
        let _ = match entry.outcome {
            LotOutcome::Sold { buyer, price } => writeln!(
                out,
                "  {:<26} sold to {} for ${price}",
                entry.name,
                state.player_name(buyer)
            ),
            LotOutcome::Unsold { face_value } => {
                writeln!(out, "  {:<26} unsold (face ${face_value})", entry.name)
            }
        };
    }
    let _ = writeln!(out, "Type `stock` to open the first stock round.");
}

fn market(state: &GameState, out: &mut String) {
    for corporation in state.corporations.iter().filter(|c| c.started) {
        let position = state
            .market
            .position(corporation.id)
            .map(|position| format!("({}, {})", position.column, position.row))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<5} ${:>3} {position:<8} par ${} | ipo {} pool {}{}",
            corporation.abbreviation,
            corporation.share_price,
            corporation.par_value.unwrap_or_default(),
            corporation.ipo_shares.len(),
            corporation.bank_shares.len(),
            if corporation.floated { " | floated" } else { "" }
        );
    }
    if state.round == RoundKind::OperatingRound {
        let _ = writeln!(out, "Type `next` to end the operating round.");
    }
}

pub fn notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Warning => "!",
        _ => "*",
    };
    format!("{tag} [{}] {}", notification.id, notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_content::Tables;
    use rail_core::{Action, GameConfig, GameEngine};

    #[test]
    fn auction_view_lists_lots_and_bids() {
        let tables = Tables::standard();
        let names = vec!["Ada", "Grace", "Linus"];
        let mut game = GameState::new_game(&names, &tables.env(), &GameConfig::default())
            .expect("three seats");
        GameEngine::new(&mut game)
            .execute(tables.env(), &Action::bid_on_private(PlayerId(0), rail_core::PrivateId(1), 45))
            .expect("bid above face value");

        let view = state(&game);
        assert!(view.starts_with("== Private auction"));
        assert!(view.contains("Champlain & St. Lawrence"));
        assert!(view.contains("bids: Ada $45"));
        assert!(view.contains("Grace may:"));
    }
}
