//! Turn-order arithmetic shared by every round.

use crate::state::PlayerId;

/// Next index in a rotating order of `len` seats. Empty orders stay at 0.
#[inline]
pub fn advance(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

/// The player seated after `player` in `order`, wrapping around.
pub fn next_after(order: &[PlayerId], player: PlayerId) -> Option<PlayerId> {
    let index = order.iter().position(|id| *id == player)?;
    order.get(advance(index, order.len())).copied()
}

/// Everyone after `player` in `order`, wrapping around and excluding `player`.
pub fn others_after(order: &[PlayerId], player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
    let start = order.iter().position(|id| *id == player).unwrap_or(0);
    (1..order.len()).map(move |offset| order[(start + offset) % order.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_around() {
        assert_eq!(advance(0, 4), 1);
        assert_eq!(advance(3, 4), 0);
        assert_eq!(advance(0, 0), 0);
    }

    #[test]
    fn next_after_wraps() {
        let order = [PlayerId(0), PlayerId(1), PlayerId(2)];
        assert_eq!(next_after(&order, PlayerId(2)), Some(PlayerId(0)));
        assert_eq!(next_after(&order, PlayerId(0)), Some(PlayerId(1)));
        assert_eq!(next_after(&order, PlayerId(9)), None);
    }

    #[test]
    fn others_after_excludes_self() {
        let order = [PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)];
        let others: Vec<_> = others_after(&order, PlayerId(2)).collect();
        assert_eq!(others, vec![PlayerId(3), PlayerId(0), PlayerId(1)]);
    }
}
