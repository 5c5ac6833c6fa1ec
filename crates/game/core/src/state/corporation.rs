use std::collections::BTreeMap;

use super::{Certificate, CorporationId, PlayerId, certificate};
use crate::env::CorporationTemplate;

/// Runtime record of one corporation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corporation {
    pub id: CorporationId,
    pub name: String,
    pub abbreviation: String,
    pub color: String,
    /// Holder of the president's certificate; `None` until founded.
    pub president: Option<PlayerId>,
    /// Set once at founding.
    pub par_value: Option<u32>,
    /// Current market price; 0 until founded.
    pub share_price: u32,
    pub started: bool,
    pub floated: bool,
    pub ipo_shares: Vec<Certificate>,
    pub bank_shares: Vec<Certificate>,
    #[cfg_attr(feature = "serde", serde(with = "super::keyed"))]
    pub player_shares: BTreeMap<PlayerId, Vec<Certificate>>,
}

impl Corporation {
    pub fn from_template(template: &CorporationTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            abbreviation: template.abbreviation.clone(),
            color: template.color.clone(),
            president: None,
            par_value: None,
            share_price: 0,
            started: false,
            floated: false,
            ipo_shares: Certificate::full_set(template.id),
            bank_shares: Vec::new(),
            player_shares: BTreeMap::new(),
        }
    }

    /// Returns the corporation to its unfounded state with a regenerated certificate set.
    pub fn reset(&mut self) {
        self.president = None;
        self.par_value = None;
        self.share_price = 0;
        self.started = false;
        self.floated = false;
        self.ipo_shares = Certificate::full_set(self.id);
        self.bank_shares.clear();
        self.player_shares.clear();
    }

    pub fn ipo_percent(&self) -> u32 {
        certificate::total_percent(&self.ipo_shares)
    }

    pub fn bank_percent(&self) -> u32 {
        certificate::total_percent(&self.bank_shares)
    }

    pub fn player_percent(&self, player: PlayerId) -> u32 {
        self.player_shares
            .get(&player)
            .map(certificate::total_percent)
            .unwrap_or(0)
    }

    /// Percentage of the issuance that has left the IPO pool.
    pub fn sold_percent(&self) -> u32 {
        100u32.saturating_sub(self.ipo_percent())
    }

    /// Percentage accounted for across every pool and holder.
    pub fn total_percent(&self) -> u32 {
        self.ipo_percent()
            + self.bank_percent()
            + self
                .player_shares
                .values()
                .map(certificate::total_percent)
                .sum::<u32>()
    }

    /// True once every certificate sits with a player.
    pub fn is_sold_out(&self) -> bool {
        self.started && self.ipo_shares.is_empty() && self.bank_shares.is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.abbreviation.is_empty() {
            &self.name
        } else {
            &self.abbreviation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CorporationTemplate {
        CorporationTemplate::new(CorporationId(2), "Canadian Pacific", "CPR", "red")
    }

    #[test]
    fn new_corporation_holds_full_issuance_in_ipo() {
        let corporation = Corporation::from_template(&template());
        assert_eq!(corporation.ipo_percent(), 100);
        assert_eq!(corporation.sold_percent(), 0);
        assert_eq!(corporation.total_percent(), 100);
        assert!(!corporation.started);
        assert!(!corporation.is_sold_out());
    }

    #[test]
    fn reset_restores_unfounded_state() {
        let mut corporation = Corporation::from_template(&template());
        let president = corporation.ipo_shares.remove(0);
        corporation
            .player_shares
            .insert(PlayerId(0), vec![president]);
        corporation.president = Some(PlayerId(0));
        corporation.par_value = Some(76);
        corporation.share_price = 76;
        corporation.started = true;

        corporation.reset();

        assert_eq!(corporation, Corporation::from_template(&template()));
    }
}
