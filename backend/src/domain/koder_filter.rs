//! Exact-match filter over stored Koder records.

use super::koder::{Koder, KoderCastError, KoderId};

/// Equality filter built from client query parameters.
///
/// Every populated field must equal the stored value for a record to match;
/// an empty filter matches every record. `sex` is compared as raw text so a
/// value outside the enum simply matches nothing.
///
/// # Examples
/// ```
/// use koders::domain::KoderFilter;
///
/// let filter = KoderFilter::from_query([("sex".to_owned(), "f".to_owned())]).unwrap();
/// assert_eq!(filter.sex(), Some("f"));
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KoderFilter {
    id: Option<KoderId>,
    name: Option<String>,
    age: Option<i32>,
    generation: Option<String>,
    module: Option<String>,
    sex: Option<String>,
}

impl KoderFilter {
    /// Build a filter from query-string pairs.
    ///
    /// Unrecognised keys are ignored. When a key repeats, the last value
    /// wins.
    ///
    /// # Errors
    /// Returns [`KoderCastError`] when `id`/`_id` is not a UUID or `age` is
    /// not an integer.
    pub fn from_query<I>(pairs: I) -> Result<Self, KoderCastError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" | "_id" => filter.id = Some(KoderId::parse(&value)?),
                "name" => filter.name = Some(value),
                "age" => {
                    let age = value
                        .trim()
                        .parse::<i32>()
                        .map_err(|_| KoderCastError::new("Number", "age", value.as_str()))?;
                    filter.age = Some(age);
                }
                "generation" => filter.generation = Some(value),
                "module" => filter.module = Some(value),
                "sex" => filter.sex = Some(value),
                _ => {}
            }
        }
        Ok(filter)
    }

    /// Restrict to a single identifier.
    pub fn with_id(mut self, id: KoderId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restrict to records with the given `sex` value.
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn id(&self) -> Option<&KoderId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn generation(&self) -> Option<&str> {
        self.generation.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn sex(&self) -> Option<&str> {
        self.sex.as_deref()
    }

    /// True when no field restricts the result.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the filter against a record held in memory.
    pub fn matches(&self, koder: &Koder) -> bool {
        self.id.is_none_or(|id| id == koder.id)
            && self.name.as_deref().is_none_or(|name| name == koder.name)
            && self.age.is_none_or(|age| age == koder.age)
            && optional_eq(self.generation.as_deref(), koder.generation.as_deref())
            && optional_eq(self.module.as_deref(), koder.module.as_deref())
            && optional_eq(self.sex.as_deref(), koder.sex.map(|sex| sex.as_str()))
    }
}

fn optional_eq(wanted: Option<&str>, stored: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| stored == Some(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KoderDraft, Sex};
    use rstest::{fixture, rstest};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[fixture]
    fn ana() -> Koder {
        let new = KoderDraft {
            name: Some("Ana".to_owned()),
            age: Some(25),
            sex: Some("f".to_owned()),
            generation: Some("19G".to_owned()),
            ..KoderDraft::default()
        }
        .into_new_koder()
        .expect("valid draft");
        Koder::from_new(KoderId::random(), new)
    }

    #[rstest]
    fn empty_query_matches_everything(ana: Koder) {
        let filter = KoderFilter::from_query(Vec::new()).expect("empty filter");
        assert!(filter.is_empty());
        assert!(filter.matches(&ana));
    }

    #[rstest]
    #[case(&[("sex", "f")], true)]
    #[case(&[("sex", "m")], false)]
    #[case(&[("sex", "x")], false)]
    #[case(&[("name", "Ana"), ("age", "25")], true)]
    #[case(&[("age", "26")], false)]
    #[case(&[("generation", "19G")], true)]
    #[case(&[("module", "backend")], false)]
    #[case(&[("unknown", "value")], true)]
    fn filters_match_by_exact_equality(
        ana: Koder,
        #[case] query: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let filter = KoderFilter::from_query(pairs(query)).expect("valid filter");
        assert_eq!(filter.matches(&ana), expected);
    }

    #[rstest]
    fn id_and_underscore_id_are_aliases(ana: Koder) {
        let raw = ana.id.to_string();
        for key in ["id", "_id"] {
            let filter = KoderFilter::from_query(pairs(&[(key, raw.as_str())])).expect("id filter");
            assert_eq!(filter.id(), Some(&ana.id));
            assert!(filter.matches(&ana));
        }
    }

    #[rstest]
    #[case("age", "abc", "Cast to Number failed for value \"abc\" (type string) at path \"age\" for model \"Koders\"")]
    #[case("id", "42", "Cast to UUID failed for value \"42\" (type string) at path \"id\" for model \"Koders\"")]
    fn uncastable_values_are_rejected(
        #[case] key: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let err = KoderFilter::from_query(pairs(&[(key, value)])).expect_err("cast failure");
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn later_values_override_earlier_ones() {
        let filter =
            KoderFilter::from_query(pairs(&[("sex", "f"), ("sex", "m")])).expect("valid filter");
        assert_eq!(filter.sex(), Some(Sex::Male.as_str()));
    }
}
