// 🐾 Animal Records - one adoptable animal per record
//
// Species is fixed by the variant chosen at construction and never reassigned.
// Everything else is freely mutable until the record is handed to the store.

use crate::date::is_valid_date;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// ANIMAL KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Cat,
    Dog,
}

impl AnimalKind {
    /// Value stored in the `type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Cat => "cat",
            AnimalKind::Dog => "dog",
        }
    }

    /// Case-insensitive lookup; anything but cat/dog is `None`
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("cat") {
            Some(AnimalKind::Cat)
        } else if value.eq_ignore_ascii_case("dog") {
            Some(AnimalKind::Dog)
        } else {
            None
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown animal type: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for AnimalKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimalKind::parse(s.trim()).ok_or_else(|| UnknownKind(s.to_string()))
    }
}

// ============================================================================
// ANIMAL RECORD
// ============================================================================

/// One adoptable animal
///
/// `name` is the natural key the store uses for update/delete.
/// `sterilized` is tri-state: `None` means "not answered yet" and fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalRecord {
    #[serde(rename = "type")]
    kind: AnimalKind,
    breed: String,
    name: String,
    sterilized: Option<bool>,
    #[serde(rename = "arrived")]
    date_arrived: String,
}

impl AnimalRecord {
    /// Create a record of the given kind. Never validates.
    pub fn new(
        kind: AnimalKind,
        breed: impl Into<String>,
        name: impl Into<String>,
        sterilized: Option<bool>,
        date_arrived: impl Into<String>,
    ) -> Self {
        AnimalRecord {
            kind,
            breed: breed.into(),
            name: name.into(),
            sterilized,
            date_arrived: date_arrived.into(),
        }
    }

    pub fn cat(
        breed: impl Into<String>,
        name: impl Into<String>,
        sterilized: Option<bool>,
        date_arrived: impl Into<String>,
    ) -> Self {
        Self::new(AnimalKind::Cat, breed, name, sterilized, date_arrived)
    }

    pub fn dog(
        breed: impl Into<String>,
        name: impl Into<String>,
        sterilized: Option<bool>,
        date_arrived: impl Into<String>,
    ) -> Self {
        Self::new(AnimalKind::Dog, breed, name, sterilized, date_arrived)
    }

    /// Blank record for step-by-step form population
    pub fn empty(kind: AnimalKind) -> Self {
        Self::new(kind, String::new(), String::new(), None, String::new())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn kind(&self) -> AnimalKind {
        self.kind
    }

    /// Species as stored, e.g. "cat"
    pub fn species(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sterilized(&self) -> Option<bool> {
        self.sterilized
    }

    pub fn date_arrived(&self) -> &str {
        &self.date_arrived
    }

    pub fn set_breed(&mut self, breed: impl Into<String>) {
        self.breed = breed.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_sterilized(&mut self, sterilized: Option<bool>) {
        self.sterilized = sterilized;
    }

    pub fn set_date_arrived(&mut self, date_arrived: impl Into<String>) {
        self.date_arrived = date_arrived.into();
    }

    /// Copy of this record under a different name (same kind and values)
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.name = name.into();
        next
    }

    /// Is this record fit to persist?
    ///
    /// All text fields non-empty, sterilized answered, and the arrival date a
    /// real calendar day. Recomputed on every call.
    pub fn validate(&self) -> bool {
        if self.breed.is_empty()
            || self.name.is_empty()
            || self.date_arrived.is_empty()
            || self.sterilized.is_none()
        {
            return false;
        }

        is_valid_date(&self.date_arrived)
    }
}

impl fmt::Display for AnimalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sterilized = match self.sterilized {
            Some(true) => "true",
            Some(false) => "false",
            None => "unset",
        };

        write!(
            f,
            "Animal: {} Breed: {} Name: {} Sterilized: {} Date Arrived: {}",
            self.kind, self.breed, self.name, sterilized, self.date_arrived
        )
    }
}

// ============================================================================
// KIND FILTER
// ============================================================================

/// Species view selector: everything, or one kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(AnimalKind),
}

impl KindFilter {
    pub fn matches(&self, record: &AnimalRecord) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => record.kind == *kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        s.parse::<AnimalKind>().map(KindFilter::Only)
    }
}

/// Records matching `filter`, keeping input order
pub fn filter_by_kind(records: &[AnimalRecord], filter: KindFilter) -> Vec<AnimalRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fill a blank record one field at a time; only the last step is valid
    fn check_form_sequence(kind: AnimalKind) {
        let mut a = AnimalRecord::empty(kind);
        let mut results = Vec::new();

        results.push(a.validate());

        a.set_name("Rusty");
        results.push(a.validate());

        a.set_breed("Orange Tabby");
        results.push(a.validate());

        a.set_sterilized(Some(true));
        results.push(a.validate());

        a.set_date_arrived("2025-07-32");
        results.push(a.validate());

        a.set_date_arrived("2025-07-15");
        results.push(a.validate());

        assert_eq!(results, vec![false, false, false, false, false, true]);
    }

    #[test]
    fn test_cat_form_sequence() {
        check_form_sequence(AnimalKind::Cat);
    }

    #[test]
    fn test_dog_form_sequence() {
        check_form_sequence(AnimalKind::Dog);
    }

    #[test]
    fn test_species_fixed_by_variant() {
        let cat = AnimalRecord::cat("Tuxedo", "gCat", Some(false), "2025-09-24");
        let dog = AnimalRecord::dog("Akita", "gDog", Some(true), "2025-09-24");

        assert_eq!(cat.kind(), AnimalKind::Cat);
        assert_eq!(cat.species(), "cat");
        assert_eq!(dog.kind(), AnimalKind::Dog);
        assert_eq!(dog.species(), "dog");

        let renamed = dog.renamed("Hachi");
        assert_eq!(renamed.kind(), AnimalKind::Dog);
        assert_eq!(renamed.breed(), "Akita");
    }

    #[test]
    fn test_unset_sterilized_differs_from_false() {
        let unset = AnimalRecord::cat("Siamese", "Mochi", None, "2024-02-29");
        let no = AnimalRecord::cat("Siamese", "Mochi", Some(false), "2024-02-29");

        assert!(!unset.validate());
        assert!(no.validate());
    }

    #[test]
    fn test_each_empty_field_fails() {
        let ok = AnimalRecord::dog("Beagle", "Scout", Some(true), "2023-11-30");
        assert!(ok.validate());

        let mut a = ok.clone();
        a.set_breed("");
        assert!(!a.validate());

        let mut a = ok.clone();
        a.set_name("");
        assert!(!a.validate());

        let mut a = ok.clone();
        a.set_date_arrived("");
        assert!(!a.validate());

        let mut a = ok.clone();
        a.set_sterilized(None);
        assert!(!a.validate());

        let mut a = ok;
        a.set_date_arrived("2023-11-31");
        assert!(!a.validate());
    }

    #[test]
    fn test_display() {
        let cat = AnimalRecord::cat("Tuxedo", "Felix", Some(true), "2025-01-02");
        assert_eq!(
            cat.to_string(),
            "Animal: cat Breed: Tuxedo Name: Felix Sterilized: true Date Arrived: 2025-01-02"
        );

        let blank = AnimalRecord::empty(AnimalKind::Dog);
        assert!(blank.to_string().contains("Sterilized: unset"));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(AnimalKind::parse("CAT"), Some(AnimalKind::Cat));
        assert_eq!(AnimalKind::parse("Dog"), Some(AnimalKind::Dog));
        assert_eq!(AnimalKind::parse("ferret"), None);
        assert_eq!(" dog ".parse::<AnimalKind>(), Ok(AnimalKind::Dog));
        assert!("bird".parse::<AnimalKind>().is_err());

        assert_eq!("ALL".parse::<KindFilter>(), Ok(KindFilter::All));
        assert_eq!("cat".parse::<KindFilter>(), Ok(KindFilter::Only(AnimalKind::Cat)));
        assert!("fish".parse::<KindFilter>().is_err());
    }

    #[test]
    fn test_filter_by_kind_keeps_order() {
        let records = vec![
            AnimalRecord::dog("Akita", "Ace", Some(true), "2025-01-01"),
            AnimalRecord::cat("Tabby", "Bella", Some(false), "2025-01-02"),
            AnimalRecord::dog("Pug", "Coco", Some(true), "2025-01-03"),
        ];

        let dogs = filter_by_kind(&records, KindFilter::Only(AnimalKind::Dog));
        let names: Vec<&str> = dogs.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Ace", "Coco"]);

        assert_eq!(filter_by_kind(&records, KindFilter::All), records);
    }

    #[test]
    fn test_serde_field_names() {
        let cat = AnimalRecord::cat("Tuxedo", "Felix", Some(true), "2025-01-02");
        let json = serde_json::to_value(&cat).unwrap();

        assert_eq!(json["type"], "cat");
        assert_eq!(json["arrived"], "2025-01-02");
        assert_eq!(json["sterilized"], true);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
