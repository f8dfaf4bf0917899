/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || fold(haystack).contains(&fold(needle))
}

/// Case-insensitive equality.
pub fn equals_folded(left: &str, right: &str) -> bool {
    fold(left) == fold(right)
}

pub fn fold(input: &str) -> String {
    input.to_lowercase()
}

/// `None` for absent or empty predicate values.
pub fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
