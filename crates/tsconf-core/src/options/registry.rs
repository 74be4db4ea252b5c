//! Option name lookup
//!
//! The registry is an explicit value built from the static declaration table
//! and passed to every call that needs it.

use super::declarations::{OPTION_DECLARATIONS, OptionDeclaration};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct OptionRegistry {
    declarations: &'static [OptionDeclaration],
    by_name: HashMap<&'static str, usize>,
    by_lower_name: HashMap<String, usize>,
    by_short_name: HashMap<String, usize>,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::from_declarations(OPTION_DECLARATIONS)
    }

    pub fn from_declarations(declarations: &'static [OptionDeclaration]) -> Self {
        let mut by_name = HashMap::new();
        let mut by_lower_name = HashMap::new();
        let mut by_short_name = HashMap::new();

        for (index, declaration) in declarations.iter().enumerate() {
            by_name.insert(declaration.name(), index);
            by_lower_name.insert(declaration.name().to_lowercase(), index);
            if let Some(short_name) = declaration.descriptor.short_name {
                by_short_name.insert(short_name.to_lowercase(), index);
            }
        }

        Self {
            declarations,
            by_name,
            by_lower_name,
            by_short_name,
        }
    }

    pub fn declarations(&self) -> &'static [OptionDeclaration] {
        self.declarations
    }

    /// Exact-name lookup used for configuration documents
    pub fn get(&self, name: &str) -> Option<&'static OptionDeclaration> {
        let declarations = self.declarations;
        self.by_name.get(name).map(|&index| &declarations[index])
    }

    /// Case-insensitive lookup by name or short name, used on the command line
    pub fn get_ignore_case(&self, name: &str) -> Option<&'static OptionDeclaration> {
        let declarations = self.declarations;
        let name = name.to_lowercase();
        self.by_lower_name
            .get(&name)
            .or_else(|| self.by_short_name.get(&name))
            .map(|&index| &declarations[index])
    }

    /// Closest registered name, if any is close enough to be a likely typo
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        spelling_suggestion(name, self.declarations.iter().map(|d| d.name()))
    }
}

fn spelling_suggestion<'a>(
    name: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let name_len = name.chars().count();
    let max_length_difference = 2.max((name_len as f64 * 0.34).floor() as usize);
    // Only strictly closer candidates replace the current best
    let mut best_distance = (name_len as f64 * 0.4).floor() as usize + 1;
    let mut best = None;
    let lower_name = name.to_lowercase();

    for candidate in candidates {
        let candidate_len = candidate.chars().count();
        if candidate_len.abs_diff(name_len) > max_length_difference {
            continue;
        }
        if candidate.to_lowercase() == lower_name {
            return Some(candidate);
        }
        if candidate_len < 3 {
            continue;
        }
        let distance = levenshtein(&lower_name, &candidate.to_lowercase());
        if distance < best_distance {
            best_distance = distance;
            best = Some(candidate);
        }
    }
    best
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != *b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
