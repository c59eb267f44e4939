use crate::model::{Pokemon, SortKey, TypeFilter, TypeTag};
use crate::output;
use crate::paginate::Paginator;
use crate::query::{self, QueryState};
use crate::store::Catalog;

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

/// A full first-generation-sized roster with deterministic names and types.
fn roster() -> Vec<Pokemon> {
    (1..=151)
        .map(|id| {
            let tag = match id % 4 {
                0 => TypeTag::Water,
                1 => TypeTag::Grass,
                2 => TypeTag::Fire,
                _ => TypeTag::Electric,
            };
            let exp = if id % 10 == 0 { None } else { Some(id * 2) };
            record(id, &format!("mon-{id:03}"), exp, &[tag])
        })
        .collect()
}

#[test]
fn full_roster_paginates_into_seven_pages() {
    let roster = roster();
    let sorted = query::apply(&roster, &QueryState::default());
    let mut paginator = Paginator::new(sorted.len(), 24);
    assert_eq!(paginator.total_pages(), 7);

    paginator.go_to_page(7);
    let page = paginator.visible_slice(&sorted);
    let ids: Vec<u32> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![145, 146, 147, 148, 149, 150, 151]);

    let window = paginator.page_window();
    assert_eq!(window.pages, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(!window.leading_jump);
    assert!(!window.trailing_jump);
}

#[test]
fn narrowing_a_filter_resets_the_page() {
    let roster = roster();
    let mut paginator = Paginator::new(roster.len(), 24);
    paginator.go_to_page(5);

    let query = QueryState {
        selected_type: TypeFilter::Only(TypeTag::Water),
        ..QueryState::default()
    };
    let filtered = query::apply(&roster, &query);
    assert!(filtered.len() < roster.len());

    paginator.set_items(filtered.len());
    assert_eq!(paginator.current_page(), 1);
    assert!(filtered
        .iter()
        .all(|p| p.types.contains(&TypeTag::Water)));
}

#[test]
fn search_and_sort_compose_over_the_catalog() {
    let mut catalog = Catalog::new(4);
    for p in [
        record(25, "pikachu", Some(112), &[TypeTag::Electric]),
        record(16, "pidgey", Some(50), &[TypeTag::Normal, TypeTag::Flying]),
        record(127, "pinsir", Some(175), &[TypeTag::Bug]),
        record(4, "charmander", Some(62), &[TypeTag::Fire]),
    ] {
        catalog.absorb(p.name.clone(), Ok(p));
    }

    let query = QueryState {
        search_term: "pi".to_string(),
        selected_type: TypeFilter::All,
        sort_key: SortKey::ExpDesc,
    };
    let result = query::apply(&catalog.records(), &query);
    let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["pinsir", "pikachu", "pidgey"]);
}

#[test]
fn a_partial_load_still_renders_the_survivors() {
    let mut catalog = Catalog::new(3);
    catalog.absorb(
        "bulbasaur".to_string(),
        Ok(record(1, "bulbasaur", Some(64), &[TypeTag::Grass])),
    );
    catalog.absorb("ivysaur".to_string(), Err("HTTP 500".to_string()));
    catalog.absorb(
        "venusaur".to_string(),
        Ok(record(3, "venusaur", Some(236), &[TypeTag::Grass])),
    );
    assert!(catalog.has_error());

    let visible = query::apply(&catalog.records(), &QueryState::default());
    let ids: Vec<u32> = visible.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);

    colored::control::set_override(false);
    let notice = output::render_incomplete_notice(catalog.failures());
    assert!(notice.contains("1 record(s) failed"));
    assert!(notice.contains("ivysaur"));
}

#[test]
fn empty_result_renders_a_notice_instead_of_a_grid() {
    let roster = roster();
    let query = QueryState {
        search_term: "zzz".to_string(),
        ..QueryState::default()
    };
    let filtered = query::apply(&roster, &query);
    assert!(filtered.is_empty());

    let paginator = Paginator::new(filtered.len(), 24);
    assert_eq!(paginator.total_pages(), 1);
    assert!(output::render_pagination(&paginator).is_none());

    let notice = output::render_empty_notice("zzz");
    assert!(notice.contains("zzz"));
}

#[test]
fn json_output_round_trips_the_filtered_list() {
    let roster = roster();
    let query = QueryState {
        selected_type: TypeFilter::Only(TypeTag::Fire),
        sort_key: SortKey::IdDesc,
        ..QueryState::default()
    };
    let filtered = query::apply(&roster, &query);
    let rendered = output::render_json(&filtered);
    let parsed: serde_json::Value = serde_json::from_slice(&rendered).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), filtered.len());
    assert_eq!(array[0]["id"], filtered[0].id);
    assert_eq!(array[0]["types"][0], "fire");
}
