use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven continents seeded into the reference collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    Asia,
    Europe,
    Africa,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Australia,
    Antarctica,
}

impl Continent {
    /// All continents, in insertion order.
    pub const ALL: [Continent; 7] = [
        Continent::Asia,
        Continent::Europe,
        Continent::Africa,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Australia,
        Continent::Antarctica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Africa => "Africa",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Australia => "Australia",
            Continent::Antarctica => "Antarctica",
        }
    }

    pub fn document(&self) -> ReferenceDocument {
        ReferenceDocument::new(self.name())
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Continent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| format!("Unknown continent: {}", s))
    }
}

/// A document in the `continents` collection.
///
/// Store-assigned identifiers (`_id`) are not part of the model and are
/// ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    pub name: String,
}

impl ReferenceDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The continent this document names, if it is one of the fixed set.
    pub fn continent(&self) -> Option<Continent> {
        self.name.parse().ok()
    }
}

/// The seven reference documents in insertion order.
pub fn continent_documents() -> Vec<ReferenceDocument> {
    Continent::ALL.iter().map(Continent::document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_continents_in_order() {
        let names: Vec<&str> = Continent::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Asia",
                "Europe",
                "Africa",
                "North America",
                "South America",
                "Australia",
                "Antarctica"
            ]
        );
    }

    #[test]
    fn test_continent_from_str() {
        assert_eq!(
            "South America".parse::<Continent>().unwrap(),
            Continent::SouthAmerica
        );
        assert!("Atlantis".parse::<Continent>().is_err());
        assert!("asia".parse::<Continent>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Continent::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");
    }

    #[test]
    fn test_document_ignores_store_id() {
        let doc: ReferenceDocument =
            serde_json::from_str(r#"{"_id": "65a1f0c2", "name": "Europe"}"#).unwrap();
        assert_eq!(doc.name, "Europe");
        assert_eq!(doc.continent(), Some(Continent::Europe));
    }

    #[test]
    fn test_continent_documents() {
        let docs = continent_documents();
        assert_eq!(docs.len(), 7);
        assert_eq!(docs[0], ReferenceDocument::new("Asia"));
        assert_eq!(docs[6], ReferenceDocument::new("Antarctica"));
    }
}
