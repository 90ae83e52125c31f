//! Credits page listing the people who built the festival site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerCard {
    pub name: String,
    pub department: String,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    cards: Vec<MakerCard>,
}

impl Roster {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn cards(&self) -> &[MakerCard] {
        &self.cards
    }

    /// Cards grouped by role. Roles appear in the order they first show up in the roster.
    pub fn by_role(&self) -> IndexMap<&str, Vec<&MakerCard>> {
        let mut groups: IndexMap<&str, Vec<&MakerCard>> = IndexMap::new();
        for card in &self.cards {
            groups.entry(card.role.as_str()).or_default().push(card);
        }
        groups
    }
}
