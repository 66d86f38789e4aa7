//! Domain records and the raw wire payloads they are decoded from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{CatalogError, CatalogResult};

/// Identifier assigned by the remote service. Always positive.
pub type EntityId = u32;

/// Lookup key for a single entity: numeric id or lower-case name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Id(EntityId),
    Name(String),
}

impl EntityKey {
    /// Parses user input into a key.
    ///
    /// All-digit input becomes an `Id`, anything else a lower-cased `Name`.
    pub fn parse(input: &str) -> CatalogResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::decode("entity key", "empty input"));
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return match trimmed.parse::<EntityId>() {
                Ok(0) => Err(CatalogError::decode("entity key", "id must be positive")),
                Ok(id) => Ok(EntityKey::Id(id)),
                Err(e) => Err(CatalogError::decode("entity key", e)),
            };
        }
        Ok(EntityKey::Name(trimmed.to_lowercase()))
    }

    pub fn name(name: &str) -> Self {
        EntityKey::Name(name.to_lowercase())
    }
}

impl From<EntityId> for EntityKey {
    fn from(id: EntityId) -> Self {
        EntityKey::Id(id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "{}", id),
            EntityKey::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Category tags known to the catalog. Each is a key into the category index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 18] = [
        CategoryTag::Normal,
        CategoryTag::Fire,
        CategoryTag::Water,
        CategoryTag::Electric,
        CategoryTag::Grass,
        CategoryTag::Ice,
        CategoryTag::Fighting,
        CategoryTag::Poison,
        CategoryTag::Ground,
        CategoryTag::Flying,
        CategoryTag::Psychic,
        CategoryTag::Bug,
        CategoryTag::Rock,
        CategoryTag::Ghost,
        CategoryTag::Dragon,
        CategoryTag::Dark,
        CategoryTag::Steel,
        CategoryTag::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::Normal => "normal",
            CategoryTag::Fire => "fire",
            CategoryTag::Water => "water",
            CategoryTag::Electric => "electric",
            CategoryTag::Grass => "grass",
            CategoryTag::Ice => "ice",
            CategoryTag::Fighting => "fighting",
            CategoryTag::Poison => "poison",
            CategoryTag::Ground => "ground",
            CategoryTag::Flying => "flying",
            CategoryTag::Psychic => "psychic",
            CategoryTag::Bug => "bug",
            CategoryTag::Rock => "rock",
            CategoryTag::Ghost => "ghost",
            CategoryTag::Dragon => "dragon",
            CategoryTag::Dark => "dark",
            CategoryTag::Steel => "steel",
            CategoryTag::Fairy => "fairy",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CategoryTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| CatalogError::decode("category tag", format!("unknown tag '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurements {
    /// Height in decimetres.
    pub primary: u32,
    /// Weight in hectograms.
    pub secondary: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: u8,
}

/// A fully resolved catalog entry. Immutable once cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
    pub category_tags: Vec<CategoryTag>,
    pub measurements: Measurements,
    pub attributes: Vec<Attribute>,
    pub image_ref: String,
}

impl EntityRecord {
    pub fn has_tag(&self, tag: CategoryTag) -> bool {
        self.category_tags.contains(&tag)
    }
}

/// `{name, url}` pair used throughout the remote service for references.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

/// One page of the paginated index.
#[derive(Debug, Deserialize)]
pub struct RawIndexPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedRef>,
}

/// Category membership listing.
#[derive(Debug, Deserialize)]
pub struct RawCategory {
    #[serde(default, rename = "pokemon")]
    pub members: Vec<RawCategoryMember>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategoryMember {
    #[serde(rename = "pokemon")]
    pub entity: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct RawEntity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<RawStat>,
    #[serde(default)]
    pub sprites: RawSprites,
}

#[derive(Debug, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct RawStat {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: RawOtherSprites,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Deserialize)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

impl TryFrom<RawEntity> for EntityRecord {
    type Error = CatalogError;

    fn try_from(raw: RawEntity) -> Result<Self, Self::Error> {
        let context = format!("entity '{}'", raw.name);

        if raw.id == 0 {
            return Err(CatalogError::decode(context, "id must be positive"));
        }

        let category_tags = raw
            .types
            .iter()
            .map(|slot| slot.kind.name.parse::<CategoryTag>())
            .collect::<CatalogResult<Vec<_>>>()?;

        let attributes = raw
            .stats
            .into_iter()
            .map(|s| {
                u8::try_from(s.base_stat)
                    .map(|value| Attribute {
                        name: s.stat.name.clone(),
                        value,
                    })
                    .map_err(|_| {
                        CatalogError::decode(
                            context.clone(),
                            format!("stat '{}' value {} exceeds 255", s.stat.name, s.base_stat),
                        )
                    })
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        let image_ref = raw
            .sprites
            .other
            .official_artwork
            .and_then(|art| art.front_default)
            .or(raw.sprites.front_default)
            .ok_or_else(|| CatalogError::decode(context.clone(), "no image reference"))?;

        Ok(EntityRecord {
            id: raw.id,
            name: raw.name.to_lowercase(),
            category_tags,
            measurements: Measurements {
                primary: raw.height,
                secondary: raw.weight,
            },
            attributes,
            image_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawEntity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(EntityKey::parse("25").unwrap(), EntityKey::Id(25));
        assert_eq!(
            EntityKey::parse("  Pikachu ").unwrap(),
            EntityKey::Name("pikachu".to_string())
        );
        assert_eq!(
            EntityKey::parse("mr-mime").unwrap(),
            EntityKey::Name("mr-mime".to_string())
        );
        assert!(EntityKey::parse("").is_err());
        assert!(EntityKey::parse("0").is_err());
    }

    #[test]
    fn test_category_tag_round_trip_through_str() {
        assert_eq!("Fire".parse::<CategoryTag>().unwrap(), CategoryTag::Fire);
        assert_eq!(CategoryTag::Fairy.to_string(), "fairy");
        assert!("shadow".parse::<CategoryTag>().is_err());
        assert_eq!(CategoryTag::ALL.len(), 18);
    }

    #[test]
    fn test_strict_decode() {
        let record = EntityRecord::try_from(raw(json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "types": [
                {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}},
                {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}}
            ],
            "stats": [
                {"base_stat": 78, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 109, "effort": 3, "stat": {"name": "special-attack", "url": ""}}
            ],
            "sprites": {
                "front_default": "https://img/front/6.png",
                "other": {"official-artwork": {"front_default": "https://img/art/6.png"}}
            }
        })))
        .unwrap();

        assert_eq!(record.id, 6);
        assert_eq!(record.category_tags, vec![CategoryTag::Fire, CategoryTag::Flying]);
        assert_eq!(record.measurements.primary, 17);
        assert_eq!(record.measurements.secondary, 905);
        assert_eq!(record.attributes[1].name, "special-attack");
        assert_eq!(record.attributes[1].value, 109);
        assert_eq!(record.image_ref, "https://img/art/6.png");
    }

    #[test]
    fn test_image_falls_back_to_front_sprite() {
        let record = EntityRecord::try_from(raw(json!({
            "id": 10, "name": "caterpie", "height": 3, "weight": 29,
            "sprites": {"front_default": "https://img/front/10.png",
                        "other": {"official-artwork": {"front_default": null}}}
        })))
        .unwrap();
        assert_eq!(record.image_ref, "https://img/front/10.png");
    }

    #[test]
    fn test_decode_failures() {
        let no_image = EntityRecord::try_from(raw(json!({
            "id": 1, "name": "a", "height": 1, "weight": 1
        })));
        assert!(matches!(no_image, Err(CatalogError::Decode { .. })));

        let big_stat = EntityRecord::try_from(raw(json!({
            "id": 1, "name": "a", "height": 1, "weight": 1,
            "stats": [{"base_stat": 300, "stat": {"name": "hp", "url": ""}}],
            "sprites": {"front_default": "x"}
        })));
        assert!(matches!(big_stat, Err(CatalogError::Decode { .. })));

        let unknown_tag = EntityRecord::try_from(raw(json!({
            "id": 1, "name": "a", "height": 1, "weight": 1,
            "types": [{"slot": 1, "type": {"name": "stellar", "url": ""}}],
            "sprites": {"front_default": "x"}
        })));
        assert!(matches!(unknown_tag, Err(CatalogError::Decode { .. })));
    }
}
