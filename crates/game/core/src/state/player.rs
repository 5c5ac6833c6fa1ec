use super::{Certificate, CorporationId, PlayerId, PrivateId, certificate};

/// A seated player and everything they own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub cash: u32,
    /// Certificates across all corporations; order is kept stable for display.
    pub certificates: Vec<Certificate>,
    pub privates: Vec<OwnedPrivate>,
    /// Seat index fixed at game start.
    pub priority: u8,
}

/// A private company in a player's hands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedPrivate {
    pub id: PrivateId,
    pub name: String,
    pub face_value: u32,
    /// What the player actually paid; below face value after price reductions.
    pub purchase_price: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, cash: u32) -> Self {
        Self {
            id,
            name: name.into(),
            cash,
            certificates: Vec::new(),
            privates: Vec::new(),
            priority: id.0,
        }
    }

    pub fn holdings(
        &self,
        corporation: CorporationId,
    ) -> impl DoubleEndedIterator<Item = &Certificate> {
        self.certificates
            .iter()
            .filter(move |certificate| certificate.corporation == corporation)
    }

    pub fn percent_of(&self, corporation: CorporationId) -> u32 {
        certificate::total_percent(self.holdings(corporation))
    }

    pub fn regular_count(&self, corporation: CorporationId) -> usize {
        self.holdings(corporation)
            .filter(|certificate| !certificate.president)
            .count()
    }

    pub fn holds_president(&self, corporation: CorporationId) -> bool {
        self.holdings(corporation)
            .any(|certificate| certificate.president)
    }

    /// Certificates counted against the certificate limit.
    pub fn certificate_count(&self) -> usize {
        self.certificates.len()
    }

    pub fn owns_private(&self, private: PrivateId) -> bool {
        self.privates.iter().any(|owned| owned.id == private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_counts_only_the_requested_corporation() {
        let mut player = Player::new(PlayerId(1), "Ada", 400);
        let prr = CorporationId(0);
        let nyc = CorporationId(1);
        player.certificates.push(Certificate::president(prr));
        player.certificates.push(Certificate::regular(prr, 4));
        player.certificates.push(Certificate::regular(nyc, 2));

        assert_eq!(player.percent_of(prr), 30);
        assert_eq!(player.percent_of(nyc), 10);
        assert_eq!(player.regular_count(prr), 1);
        assert!(player.holds_president(prr));
        assert!(!player.holds_president(nyc));
        assert_eq!(player.certificate_count(), 3);
        assert_eq!(player.priority, 1);
    }
}
