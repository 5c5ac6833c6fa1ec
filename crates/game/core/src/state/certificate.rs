use super::CorporationId;

/// A single share certificate of a corporation.
///
/// `serial` distinguishes otherwise identical regular certificates so undo and
/// transfers can move one specific certificate. The president's certificate is
/// always serial 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Certificate {
    pub corporation: CorporationId,
    pub serial: u8,
    pub percent: u8,
    pub president: bool,
}

impl Certificate {
    pub const PRESIDENT_PERCENT: u8 = 20;
    pub const REGULAR_PERCENT: u8 = 10;
    pub const REGULAR_COUNT: u8 = 8;

    pub const fn president(corporation: CorporationId) -> Self {
        Self {
            corporation,
            serial: 0,
            percent: Self::PRESIDENT_PERCENT,
            president: true,
        }
    }

    pub const fn regular(corporation: CorporationId, serial: u8) -> Self {
        Self {
            corporation,
            serial,
            percent: Self::REGULAR_PERCENT,
            president: false,
        }
    }

    /// Fresh issuance for one corporation: the president's certificate followed
    /// by eight regular certificates, 100% in total.
    pub fn full_set(corporation: CorporationId) -> Vec<Self> {
        let mut set = Vec::with_capacity(1 + Self::REGULAR_COUNT as usize);
        set.push(Self::president(corporation));
        set.extend((1..=Self::REGULAR_COUNT).map(|serial| Self::regular(corporation, serial)));
        set
    }

    /// Share units represented by this certificate (10% each).
    #[inline]
    pub const fn units(&self) -> u32 {
        self.percent as u32 / Self::REGULAR_PERCENT as u32
    }
}

/// Sums the percentage of a certificate slice.
pub fn total_percent<'a>(certificates: impl IntoIterator<Item = &'a Certificate>) -> u32 {
    certificates
        .into_iter()
        .map(|certificate| certificate.percent as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_set_totals_one_hundred_percent() {
        let set = Certificate::full_set(CorporationId(3));
        assert_eq!(set.len(), 9);
        assert_eq!(total_percent(&set), 100);
        assert_eq!(set.iter().filter(|c| c.president).count(), 1);
        assert!(set[0].president);
        assert_eq!(set[0].units(), 2);
        assert_eq!(set[8].serial, 8);
    }
}
