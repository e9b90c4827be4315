//! Case-insensitive partial-match search by name

/// Entities that can be searched by name
pub trait Named {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
}

/// Return all entities whose name contains the search term, ignoring case.
///
/// The term is matched as literal text. An empty term matches every entity. The order of the
/// entities is preserved.
pub fn search_by_name<'a, T: Named>(term: &str, entities: &'a [T]) -> Vec<&'a T> {
    let term = term.to_lowercase();
    entities
        .iter()
        .filter(|entity| entity.name().to_lowercase().contains(&term))
        .collect()
}

pub fn to_search_results<T: Named>(entities: &[&T]) -> gigbook_api_types::SearchResults {
    gigbook_api_types::SearchResults {
        count: entities.len(),
        data: entities
            .iter()
            .map(|entity| gigbook_api_types::EntityRef {
                id: entity.id(),
                name: entity.name().to_owned(),
            })
            .collect(),
    }
}
