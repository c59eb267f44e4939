use std::cmp::Ordering;

use crate::model::{Pokemon, SortKey, TypeFilter};

/// The user-controlled filter and sort parameters. Transient UI state; a
/// fresh run starts from the defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    pub search_term: String,
    pub selected_type: TypeFilter,
    pub sort_key: SortKey,
}

/// Case-insensitive prefix match against the record name. An empty search
/// term matches everything.
pub fn filter_by_name(pokemon: &Pokemon, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    pokemon
        .name
        .to_lowercase()
        .starts_with(&search_term.to_lowercase())
}

pub fn filter_by_type(pokemon: &Pokemon, filter: TypeFilter) -> bool {
    match filter {
        TypeFilter::All => true,
        TypeFilter::Only(tag) => pokemon.types.contains(&tag),
    }
}

/// Both filters combined with AND.
pub fn matches(pokemon: &Pokemon, query: &QueryState) -> bool {
    filter_by_name(pokemon, &query.search_term) && filter_by_type(pokemon, query.selected_type)
}

fn compare(a: &Pokemon, b: &Pokemon, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::IdAsc => a.id.cmp(&b.id),
        SortKey::IdDesc => b.id.cmp(&a.id),
        SortKey::ExpAsc => a.base_experience_or_zero().cmp(&b.base_experience_or_zero()),
        SortKey::ExpDesc => b.base_experience_or_zero().cmp(&a.base_experience_or_zero()),
    }
}

/// The full pure pipeline: filter, then stable-sort. Deterministic for a
/// fixed input, so callers may recompute it as often as they like.
pub fn apply(records: &[Pokemon], query: &QueryState) -> Vec<Pokemon> {
    let mut out: Vec<Pokemon> = records
        .iter()
        .filter(|p| matches(p, query))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare(a, b, query.sort_key));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SortKey, TypeFilter, TypeTag};

    fn record(id: u32, name: &str, exp: Option<u32>, types: &[TypeTag]) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            base_experience: exp,
            height: 7,
            weight: 69,
            types: types.to_vec(),
            abilities: Vec::new(),
            stats: Vec::new(),
            sprite_url: None,
            artwork_url: None,
        }
    }

    #[test]
    fn name_filter_is_prefix_not_substring() {
        let pikachu = record(25, "pikachu", Some(112), &[TypeTag::Electric]);
        assert!(filter_by_name(&pikachu, "pik"));
        assert!(filter_by_name(&pikachu, "PIK"));
        assert!(!filter_by_name(&pikachu, "chu"));
        assert!(filter_by_name(&pikachu, ""));
    }

    #[test]
    fn type_filter_matches_any_listed_type() {
        let gyarados = record(130, "gyarados", Some(189), &[TypeTag::Water, TypeTag::Flying]);
        let charmander = record(4, "charmander", Some(62), &[TypeTag::Fire]);
        assert!(filter_by_type(&gyarados, TypeFilter::Only(TypeTag::Water)));
        assert!(filter_by_type(&gyarados, TypeFilter::Only(TypeTag::Flying)));
        assert!(!filter_by_type(&charmander, TypeFilter::Only(TypeTag::Water)));
        assert!(filter_by_type(&charmander, TypeFilter::All));
    }

    #[test]
    fn filters_combine_with_and() {
        let query = QueryState {
            search_term: "pi".to_string(),
            selected_type: TypeFilter::Only(TypeTag::Electric),
            sort_key: SortKey::IdAsc,
        };
        let pikachu = record(25, "pikachu", Some(112), &[TypeTag::Electric]);
        let pidgey = record(16, "pidgey", Some(50), &[TypeTag::Normal, TypeTag::Flying]);
        assert!(matches(&pikachu, &query));
        assert!(!matches(&pidgey, &query));
    }

    #[test]
    fn sort_by_experience_treats_missing_as_zero() {
        let records = vec![
            record(1, "bulbasaur", Some(64), &[TypeTag::Grass]),
            record(2, "ivysaur", None, &[TypeTag::Grass]),
            record(3, "venusaur", Some(236), &[TypeTag::Grass]),
        ];
        let query = QueryState {
            sort_key: SortKey::ExpAsc,
            ..QueryState::default()
        };
        let sorted = apply(&records, &query);
        let ids: Vec<u32> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn apply_is_idempotent() {
        let records = vec![
            record(4, "charmander", Some(62), &[TypeTag::Fire]),
            record(25, "pikachu", Some(112), &[TypeTag::Electric]),
            record(16, "pidgey", Some(50), &[TypeTag::Normal, TypeTag::Flying]),
        ];
        let query = QueryState {
            search_term: "p".to_string(),
            selected_type: TypeFilter::All,
            sort_key: SortKey::IdDesc,
        };
        let once = apply(&records, &query);
        let twice = apply(&once, &query);
        assert_eq!(once, twice);
    }
}
