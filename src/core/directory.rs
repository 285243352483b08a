use crate::models::Airport;
use std::collections::HashMap;
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("duplicate airport id: {0}")]
    DuplicateId(i64),

    #[error("airport {0} has an empty name")]
    EmptyName(i64),
}

/// Static, name-ordered list of airports
///
/// Sorted once on construction so every listing returns the same order.
#[derive(Debug, Clone)]
pub struct AirportDirectory {
    airports: Vec<Airport>,
    // airport id -> position in `airports`
    index: HashMap<i64, usize>,
}

impl AirportDirectory {
    pub fn new(mut airports: Vec<Airport>) -> Result<Self, DirectoryError> {
        for airport in &airports {
            if airport.name.trim().is_empty() {
                return Err(DirectoryError::EmptyName(airport.id));
            }
        }

        airports.sort_by_cached_key(sort_key);

        let mut index = HashMap::with_capacity(airports.len());
        for (position, airport) in airports.iter().enumerate() {
            if index.insert(airport.id, position).is_some() {
                return Err(DirectoryError::DuplicateId(airport.id));
            }
        }

        Ok(Self { airports, index })
    }

    /// Built-in airport list used when no data file is configured
    pub fn builtin() -> Self {
        let airports = vec![
            Airport::new(1, "Amsterdam Schiphol"),
            Airport::new(2, "Berlin Brandenburg"),
            Airport::new(3, "Copenhagen Kastrup"),
        ];
        let index = airports.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        Self { airports, index }
    }

    /// All airports, ascending by name
    pub fn list(&self) -> &[Airport] {
        &self.airports
    }

    pub fn get(&self, id: i64) -> Option<&Airport> {
        self.index.get(&id).map(|&position| &self.airports[position])
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

/// Accent- and case-folded form of a name: NFD with combining marks
/// dropped, then lowercased. "Åre" folds to "are".
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folded name first, then the raw name and the id as tiebreakers, so the
/// order is total.
fn sort_key(airport: &Airport) -> (String, String, i64) {
    (fold_name(&airport.name), airport.name.clone(), airport.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_name() {
        let directory = AirportDirectory::new(vec![
            Airport::new(2, "Berlin Brandenburg"),
            Airport::new(1, "Amsterdam Schiphol"),
        ])
        .unwrap();

        let names: Vec<&str> = directory.list().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Amsterdam Schiphol", "Berlin Brandenburg"]);
    }

    #[test]
    fn test_case_insensitive_order() {
        let directory = AirportDirectory::new(vec![
            Airport::new(1, "berlin Tegel"),
            Airport::new(2, "Zurich"),
            Airport::new(3, "Amsterdam Schiphol"),
        ])
        .unwrap();

        let ids: Vec<i64> = directory.list().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_accented_names_sort_with_base_letters() {
        let directory = AirportDirectory::new(vec![
            Airport::new(1, "Zurich"),
            Airport::new(2, "Åre Östersund"),
            Airport::new(3, "Berlin Brandenburg"),
            Airport::new(4, "Ängelholm"),
        ])
        .unwrap();

        let names: Vec<&str> = directory.list().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ängelholm", "Åre Östersund", "Berlin Brandenburg", "Zurich"]
        );
    }

    #[test]
    fn test_folded_names_tie_on_raw_name_then_id() {
        let directory = AirportDirectory::new(vec![
            Airport::new(3, "Zürich"),
            Airport::new(2, "Zurich"),
            Airport::new(1, "zurich"),
        ])
        .unwrap();

        // All three fold to "zurich"; raw byte order puts "Zu" < "Zü" < "zu"
        let ids: Vec<i64> = directory.list().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("Åre Östersund"), "are ostersund");
        assert_eq!(fold_name("Ängelholm"), "angelholm");
        assert_eq!(fold_name("São Paulo"), "sao paulo");
        assert_eq!(fold_name("Berlin"), "berlin");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = AirportDirectory::new(vec![
            Airport::new(1, "Amsterdam Schiphol"),
            Airport::new(1, "Berlin Brandenburg"),
        ])
        .unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateId(1));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = AirportDirectory::new(vec![Airport::new(4, "  ")]).unwrap_err();
        assert_eq!(err, DirectoryError::EmptyName(4));
    }

    #[test]
    fn test_builtin_lookup() {
        let directory = AirportDirectory::builtin();
        assert_eq!(directory.len(), 3);
        assert!(directory.contains(2));
        assert!(!directory.contains(99));
        assert_eq!(directory.get(3).map(|a| a.name.as_str()), Some("Copenhagen Kastrup"));
    }
}
