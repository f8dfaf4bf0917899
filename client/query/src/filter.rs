use api::Character;

use crate::utils::{active, contains_folded, equals_folded};

/// Conjunctive character predicates. `None` or an empty string matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        active(&self.name).is_none()
            && active(&self.status).is_none()
            && active(&self.species).is_none()
    }

    pub fn matches(&self, character: &Character) -> bool {
        active(&self.name).is_none_or(|name| contains_folded(&character.name, name))
            && active(&self.status).is_none_or(|status| equals_folded(&character.status, status))
            && active(&self.species).is_none_or(|species| contains_folded(&character.species, species))
    }

    /// Positions in `base` of the matching records, in base order.
    pub fn positions(&self, base: &[Character]) -> Vec<usize> {
        base.iter()
            .enumerate()
            .filter(|(_, character)| self.matches(character))
            .map(|(position, _)| position)
            .collect()
    }

    pub fn apply<'a>(&'a self, base: &'a [Character]) -> impl Iterator<Item = &'a Character> + 'a {
        base.iter().filter(move |character| self.matches(character))
    }
}

#[cfg(test)]
mod tests {
    use api::mock;

    use super::*;

    fn base() -> Vec<Character> {
        [
            mock::character(1, "Rick Sanchez", "Alive", "Human"),
            mock::character(2, "Morty Smith", "Alive", "Human"),
            mock::character(3, "Birdperson", "Dead", "Bird-Person"),
            mock::character(4, "Evil Rick", "Dead", "Humanoid"),
            mock::character(5, "Squanchy", "unknown", "Alien"),
            mock::character(6, "Rick Prime", "Alive", "Human"),
        ]
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap())
        .collect()
    }

    fn ids(filter: &FilterSet, base: &[Character]) -> Vec<u32> {
        filter.apply(base).map(|c| c.id).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let base = base();

        assert!(FilterSet::new().is_empty());
        assert_eq!(ids(&FilterSet::new(), &base), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            ids(&FilterSet::new().with_name("").with_status(""), &base),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_name_substring_ignores_case() {
        assert_eq!(ids(&FilterSet::new().with_name("RICK"), &base()), vec![1, 4, 6]);
    }

    #[test]
    fn test_status_is_exact() {
        let base = base();

        assert_eq!(ids(&FilterSet::new().with_status("dead"), &base), vec![3, 4]);
        assert_eq!(ids(&FilterSet::new().with_status("Unknown"), &base), vec![5]);
        assert!(ids(&FilterSet::new().with_status("Ali"), &base).is_empty());
    }

    #[test]
    fn test_species_substring() {
        assert_eq!(ids(&FilterSet::new().with_species("human"), &base()), vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_conjunction() {
        let base = base();
        let filter = FilterSet::new()
            .with_name("rick")
            .with_status("alive")
            .with_species("human");

        assert_eq!(ids(&filter, &base), vec![1, 6]);
        assert_eq!(filter.positions(&base), vec![0, 5]);
    }

    #[test]
    fn test_no_false_positives_or_negatives() {
        let base = base();
        let names = [None, Some("rick"), Some("s"), Some("zzz")];
        let statuses = [None, Some("alive"), Some("DEAD")];
        let species = [None, Some("human"), Some("person")];

        for name in names {
            for status in statuses {
                for kind in species {
                    let filter = FilterSet {
                        name: name.map(str::to_string),
                        status: status.map(str::to_string),
                        species: kind.map(str::to_string),
                    };

                    let expected: Vec<u32> = base
                        .iter()
                        .filter(|c| {
                            name.is_none_or(|n| c.name.to_lowercase().contains(n))
                                && status.is_none_or(|s| c.status.to_lowercase() == s.to_lowercase())
                                && kind.is_none_or(|k| c.species.to_lowercase().contains(k))
                        })
                        .map(|c| c.id)
                        .collect();

                    assert_eq!(ids(&filter, &base), expected, "{filter:?}");
                }
            }
        }
    }

    #[test]
    fn test_base_untouched() {
        let base = base();
        let before = base.clone();

        let _ = FilterSet::new().with_name("rick").positions(&base);

        assert_eq!(base, before);
    }
}
