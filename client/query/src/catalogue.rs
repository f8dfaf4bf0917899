use api::Character;

use crate::{filter::FilterSet, paginator::Paginator, utils::active};

/// Filtered, paginated view over a character collection.
///
/// Replacing the collection or changing a predicate recomputes the view and returns to the first page.
#[derive(Debug, Clone, Default)]
pub struct CatalogueQuery {
    base: Vec<Character>,
    filters: FilterSet,
    filtered: Vec<usize>,
    pages: Paginator,
}

impl CatalogueQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            pages: Paginator::new(page_size),
            ..Self::default()
        }
    }

    pub fn set_collection(&mut self, base: Vec<Character>) {
        self.base = base;
        self.recompute();
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let filters = FilterSet {
            name: Some(name.into()),
            ..self.filters.clone()
        };
        self.set_filters(filters)
    }

    pub fn set_status(&mut self, status: impl Into<String>) -> bool {
        let filters = FilterSet {
            status: Some(status.into()),
            ..self.filters.clone()
        };
        self.set_filters(filters)
    }

    pub fn set_species(&mut self, species: impl Into<String>) -> bool {
        let filters = FilterSet {
            species: Some(species.into()),
            ..self.filters.clone()
        };
        self.set_filters(filters)
    }

    /// Returns whether anything changed. Setting the current value again keeps the page.
    pub fn set_filters(&mut self, filters: FilterSet) -> bool {
        // an empty predicate matches everything, same as an absent one
        let filters = FilterSet {
            name: active(&filters.name).map(str::to_string),
            status: active(&filters.status).map(str::to_string),
            species: active(&filters.species).map(str::to_string),
        };

        if filters == self.filters {
            return false;
        }

        self.filters = filters;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.filtered = self.filters.positions(&self.base);
        self.pages.reset();
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn collection_len(&self) -> usize {
        self.base.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Character> + '_ {
        self.filtered.iter().map(|&position| &self.base[position])
    }

    pub fn page(&self) -> usize {
        self.pages.page()
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count(self.filtered.len())
    }

    pub fn page_items(&self) -> Vec<&Character> {
        self.pages
            .slice(&self.filtered)
            .iter()
            .map(|&position| &self.base[position])
            .collect()
    }

    pub fn has_next(&self) -> bool {
        self.pages.has_next(self.filtered.len())
    }

    pub fn has_previous(&self) -> bool {
        self.pages.has_previous()
    }

    pub fn next_page(&mut self) -> bool {
        self.pages.next(self.filtered.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.pages.previous()
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pages.go_to(page, self.filtered.len())
    }
}
