//! Catalog loader.
//!
//! Reads corporations, private companies and seating rules from TOML.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::tables::Catalog;

/// Loader for the corporation and private-company catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    /// Parses catalog TOML and validates it.
    ///
    /// Rejects empty lists, duplicate ids or abbreviations, and seating rows
    /// whose combined starting cash exceeds the bank total.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let raw: Catalog = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog TOML: {}", e))?;
        let catalog = Catalog::new(
            raw.corporations,
            raw.private_companies,
            raw.seating,
            raw.bank_total,
        );

        anyhow::ensure!(!catalog.corporations.is_empty(), "catalog has no corporations");
        anyhow::ensure!(
            !catalog.private_companies.is_empty(),
            "catalog has no private companies"
        );

        let mut ids = HashSet::new();
        let mut abbreviations = HashSet::new();
        for corporation in &catalog.corporations {
            anyhow::ensure!(
                ids.insert(corporation.id),
                "duplicate corporation id {}",
                corporation.id
            );
            anyhow::ensure!(
                abbreviations.insert(corporation.abbreviation.to_ascii_uppercase()),
                "duplicate abbreviation {}",
                corporation.abbreviation
            );
        }

        let mut private_ids = HashSet::new();
        for private in &catalog.private_companies {
            anyhow::ensure!(
                private_ids.insert(private.id),
                "duplicate private company id {}",
                private.id
            );
        }

        for rule in &catalog.seating {
            let required = u32::try_from(rule.players)
                .ok()
                .and_then(|players| rule.starting_cash.checked_mul(players))
                .with_context(|| {
                    format!(
                        "{} players at ${} each overflows the cash ledger",
                        rule.players, rule.starting_cash
                    )
                })?;
            anyhow::ensure!(
                required <= catalog.bank_total,
                "{} players need ${} but the bank holds ${}",
                rule.players,
                required,
                catalog.bank_total
            );
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_core::CatalogOracle;

    const MINIMAL: &str = r#"
bank_total = 3000

[[corporations]]
id = 0
name = "Reading Railroad"
abbreviation = "RDG"
color = "gray"

[[private_companies]]
id = 1
name = "Big Private"
cost = 90
revenue = 15
effect = ""

[[private_companies]]
id = 0
name = "Small Private"
cost = 30
revenue = 5
effect = ""

[[seating]]
players = 3
certificate_limit = 12
starting_cash = 500
"#;

    #[test]
    fn parses_and_sorts_privates_by_cost() {
        let catalog = CatalogLoader::parse(MINIMAL).unwrap();
        assert_eq!(catalog.private_companies()[0].name, "Small Private");
        assert_eq!(catalog.certificate_limit(3), Some(12));
        assert_eq!(catalog.starting_cash(4), None);
    }

    #[test]
    fn rejects_duplicate_abbreviations() {
        let doubled = MINIMAL.replace(
            "[[private_companies]]\nid = 1",
            "[[corporations]]\nid = 1\nname = \"Other\"\nabbreviation = \"rdg\"\ncolor = \"red\"\n\n[[private_companies]]\nid = 1",
        );
        let error = CatalogLoader::parse(&doubled).unwrap_err();
        assert!(error.to_string().contains("duplicate abbreviation"));
    }

    #[test]
    fn rejects_starting_cash_that_overflows() {
        let huge = MINIMAL.replace("starting_cash = 500", "starting_cash = 4000000000");
        let error = CatalogLoader::parse(&huge).unwrap_err();
        assert!(error.to_string().contains("overflows"));
    }

    #[test]
    fn rejects_a_bank_too_small_for_the_table() {
        let poor = MINIMAL.replace("bank_total = 3000", "bank_total = 1000");
        assert!(CatalogLoader::parse(&poor).is_err());
    }
}
