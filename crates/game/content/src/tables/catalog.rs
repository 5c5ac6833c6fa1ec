//! Corporation and private-company catalog.

use rail_core::{CatalogOracle, CorporationId, CorporationTemplate, PrivateId, PrivateTemplate};

/// Money in the game at the start: bank plus every player's starting cash.
pub const BANK_TOTAL: u32 = 12_000;

/// Per-player-count row of the seating table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingRule {
    pub players: usize,
    pub certificate_limit: usize,
    pub starting_cash: u32,
}

/// Corporations, private companies and seating rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub corporations: Vec<CorporationTemplate>,
    pub private_companies: Vec<PrivateTemplate>,
    pub seating: Vec<SeatingRule>,
    pub bank_total: u32,
}

impl Catalog {
    /// Sorts private companies by face value so auction order follows cost.
    pub fn new(
        corporations: Vec<CorporationTemplate>,
        mut private_companies: Vec<PrivateTemplate>,
        seating: Vec<SeatingRule>,
        bank_total: u32,
    ) -> Self {
        private_companies.sort_by_key(|template| template.cost);
        Self {
            corporations,
            private_companies,
            seating,
            bank_total,
        }
    }

    /// The eight corporations and six private companies of the base game.
    pub fn standard() -> Self {
        let corporations = [
            ("Pennsylvania Railroad", "PRR", "green"),
            ("New York Central Railroad", "NYC", "black"),
            ("Canadian Pacific Railroad", "CPR", "red"),
            ("Baltimore & Ohio Railroad", "B&O", "blue"),
            ("Chesapeake & Ohio Railroad", "C&O", "light_blue"),
            ("Erie Railroad", "ERIE", "yellow"),
            ("New York, New Haven & Hartford Railroad", "NYNH", "orange"),
            ("Boston & Maine Railroad", "B&M", "brown"),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (name, abbreviation, color))| {
            CorporationTemplate::new(CorporationId(index as u8), name, abbreviation, color)
        })
        .collect();

        let private_companies = [
            ("Schuylkill Valley", 20, 5, "No special ability."),
            (
                "Champlain & St. Lawrence",
                40,
                10,
                "Owning corporation may lay an extra tile on its hex.",
            ),
            (
                "Delaware & Hudson",
                70,
                15,
                "Owning corporation may place a free station on its hex.",
            ),
            (
                "Mohawk & Hudson",
                110,
                20,
                "May be exchanged for a 10% certificate of the NYC.",
            ),
            (
                "Camden & Amboy",
                160,
                25,
                "Purchaser receives a 10% certificate of the PRR.",
            ),
            (
                "Baltimore & Ohio",
                220,
                30,
                "Purchaser receives the president's certificate of the B&O.",
            ),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (name, cost, revenue, effect))| {
            PrivateTemplate::new(PrivateId(index as u8), name, cost, revenue, effect)
        })
        .collect();

        let seating = [(3, 20, 800), (4, 16, 600), (5, 13, 480), (6, 11, 400)]
            .into_iter()
            .map(|(players, certificate_limit, starting_cash)| SeatingRule {
                players,
                certificate_limit,
                starting_cash,
            })
            .collect();

        Self::new(corporations, private_companies, seating, BANK_TOTAL)
    }

    fn seating_for(&self, players: usize) -> Option<&SeatingRule> {
        self.seating.iter().find(|rule| rule.players == players)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CatalogOracle for Catalog {
    fn corporations(&self) -> &[CorporationTemplate] {
        &self.corporations
    }

    fn private_companies(&self) -> &[PrivateTemplate] {
        &self.private_companies
    }

    fn certificate_limit(&self, player_count: usize) -> Option<usize> {
        self.seating_for(player_count)
            .map(|rule| rule.certificate_limit)
    }

    fn starting_cash(&self, player_count: usize) -> Option<u32> {
        self.seating_for(player_count).map(|rule| rule.starting_cash)
    }

    fn bank_total(&self) -> u32 {
        self.bank_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_seating_table() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.certificate_limit(3), Some(20));
        assert_eq!(catalog.certificate_limit(6), Some(11));
        assert_eq!(catalog.starting_cash(4), Some(600));
        assert_eq!(catalog.starting_cash(5), Some(480));
        assert_eq!(catalog.certificate_limit(2), None);
        assert_eq!(catalog.bank_total(), 12_000);
    }

    #[test]
    fn privates_are_ordered_by_face_value() {
        let catalog = Catalog::standard();
        let costs: Vec<u32> = catalog
            .private_companies()
            .iter()
            .map(|template| template.cost)
            .collect();
        assert_eq!(costs, vec![20, 40, 70, 110, 160, 220]);
        assert_eq!(catalog.corporations().len(), 8);
        assert_eq!(
            catalog.corporation(CorporationId(3)).map(|c| c.abbreviation.as_str()),
            Some("B&O")
        );
    }
}
