use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of type names the API can assign to a record. A record
/// carrying a name outside this set fails decoding and is treated as a
/// failed detail fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
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

pub const ALL_TYPE_TAGS: [TypeTag; 18] = [
    TypeTag::Normal,
    TypeTag::Fire,
    TypeTag::Water,
    TypeTag::Electric,
    TypeTag::Grass,
    TypeTag::Ice,
    TypeTag::Fighting,
    TypeTag::Poison,
    TypeTag::Ground,
    TypeTag::Flying,
    TypeTag::Psychic,
    TypeTag::Bug,
    TypeTag::Rock,
    TypeTag::Ghost,
    TypeTag::Dragon,
    TypeTag::Dark,
    TypeTag::Steel,
    TypeTag::Fairy,
];

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Normal => "normal",
            TypeTag::Fire => "fire",
            TypeTag::Water => "water",
            TypeTag::Electric => "electric",
            TypeTag::Grass => "grass",
            TypeTag::Ice => "ice",
            TypeTag::Fighting => "fighting",
            TypeTag::Poison => "poison",
            TypeTag::Ground => "ground",
            TypeTag::Flying => "flying",
            TypeTag::Psychic => "psychic",
            TypeTag::Bug => "bug",
            TypeTag::Rock => "rock",
            TypeTag::Ghost => "ghost",
            TypeTag::Dragon => "dragon",
            TypeTag::Dark => "dark",
            TypeTag::Steel => "steel",
            TypeTag::Fairy => "fairy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        ALL_TYPE_TAGS.iter().copied().find(|t| t.as_str() == value)
    }
}

/// The user-facing type filter. `All` is a filter sentinel only and is never
/// a record's type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TypeTag),
}

impl TypeFilter {
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(TypeFilter::All);
        }
        TypeTag::parse(value).map(TypeFilter::Only)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    IdAsc,
    IdDesc,
    ExpAsc,
    ExpDesc,
}

impl SortKey {
    /// Unrecognized keys are the caller's problem; they fall back to
    /// ascending id via `unwrap_or_default()`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "id-asc" => Some(SortKey::IdAsc),
            "id-desc" => Some(SortKey::IdDesc),
            "base-exp-asc" | "exp-asc" => Some(SortKey::ExpAsc),
            "base-exp-desc" | "exp-desc" => Some(SortKey::ExpDesc),
            _ => None,
        }
    }
}

/// One entry of the initial listing call, used only to schedule detail
/// fetches.
#[derive(Clone, Debug, Deserialize)]
pub struct BaseListEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub results: Vec<BaseListEntry>,
}

// Wire shapes for the detail call. The API nests everything behind named
// resource wrappers; these exist only to be flattened into `Pokemon`.

#[derive(Debug, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
    pub stats: Vec<StatSlot>,
    pub sprites: Sprites,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: TypeRef,
}

#[derive(Debug, Deserialize)]
pub struct TypeRef {
    pub name: TypeTag,
}

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    pub stat: NamedResource,
    pub base_stat: u32,
}

#[derive(Debug, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record '{name}' has no types")]
    NoTypes { name: String },
}

/// One fully detailed catalog record. Immutable once fetched; keyed uniquely
/// by `name` (and `id`) across the collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeTag>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
    pub sprite_url: Option<String>,
    pub artwork_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
}

impl Pokemon {
    /// Missing base experience sorts (and compares) as zero.
    pub fn base_experience_or_zero(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }

    /// The first listed type drives the card accent color.
    pub fn primary_type(&self) -> TypeTag {
        self.types.first().copied().unwrap_or(TypeTag::Normal)
    }

    /// Prefer the official artwork, fall back to the plain sprite.
    pub fn image_url(&self) -> Option<&str> {
        self.artwork_url
            .as_deref()
            .or(self.sprite_url.as_deref())
    }
}

impl TryFrom<PokemonDetail> for Pokemon {
    type Error = DecodeError;

    fn try_from(detail: PokemonDetail) -> Result<Self, Self::Error> {
        if detail.types.is_empty() {
            return Err(DecodeError::NoTypes { name: detail.name });
        }
        let artwork_url = detail
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);
        Ok(Pokemon {
            id: detail.id,
            name: detail.name,
            base_experience: detail.base_experience,
            height: detail.height,
            weight: detail.weight,
            types: detail.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: detail
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
            stats: detail
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base_stat: s.base_stat,
                })
                .collect(),
            sprite_url: detail.sprites.front_default,
            artwork_url,
        })
    }
}
