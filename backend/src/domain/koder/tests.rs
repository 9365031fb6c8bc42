//! Schema coverage for Koder drafts.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_draft() -> KoderDraft {
    KoderDraft {
        name: Some("Ana".to_owned()),
        age: Some(25),
        generation: Some("19G".to_owned()),
        module: Some("backend".to_owned()),
        sex: Some("f".to_owned()),
    }
}

#[rstest]
fn valid_draft_becomes_new_koder(valid_draft: KoderDraft) {
    let new = valid_draft.into_new_koder().expect("valid draft");
    assert_eq!(new.name(), "Ana");
    assert_eq!(new.age(), 25);
    assert_eq!(new.generation(), Some("19G"));
    assert_eq!(new.module(), Some("backend"));
    assert_eq!(new.sex(), Some(Sex::Female));
}

#[rstest]
#[case("Ana", 18)]
#[case("Abcdefghij", 100)]
#[case("Łukasz", 40)]
fn bounds_are_inclusive(#[case] name: &str, #[case] age: i64) {
    let draft = KoderDraft {
        name: Some(name.to_owned()),
        age: Some(age),
        ..KoderDraft::default()
    };
    assert!(draft.into_new_koder().is_ok());
}

#[rstest]
#[case(
    Some("Al"),
    Some(25),
    None,
    "Koders validation failed: name: Path `name` (`Al`) is shorter than the minimum allowed length (3)."
)]
#[case(
    Some("Bartholomew"),
    Some(25),
    None,
    "Koders validation failed: name: Path `name` (`Bartholomew`) is longer than the maximum allowed length (10)."
)]
#[case(
    Some("Ana"),
    Some(17),
    None,
    "Koders validation failed: age: Path `age` (17) is less than minimum allowed value (18)."
)]
#[case(
    Some("Ana"),
    Some(101),
    None,
    "Koders validation failed: age: Path `age` (101) is more than maximum allowed value (100)."
)]
#[case(
    Some("Ana"),
    Some(25),
    Some("x"),
    "Koders validation failed: sex: `x` is not a valid enum value for path `sex`."
)]
#[case(
    None,
    None,
    None,
    "Koders validation failed: name: Path `name` is required., age: Path `age` is required."
)]
fn invalid_drafts_report_every_violation(
    #[case] name: Option<&str>,
    #[case] age: Option<i64>,
    #[case] sex: Option<&str>,
    #[case] expected: &str,
) {
    let draft = KoderDraft {
        name: name.map(str::to_owned),
        age,
        sex: sex.map(str::to_owned),
        ..KoderDraft::default()
    };
    let err = draft.into_new_koder().expect_err("invalid draft");
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn violations_follow_schema_field_order() {
    let draft = KoderDraft {
        name: Some("Al".to_owned()),
        age: Some(5),
        sex: Some("q".to_owned()),
        ..KoderDraft::default()
    };
    let err = draft.into_new_koder().expect_err("invalid draft");
    let fields: Vec<_> = err.violations().iter().map(SchemaViolation::field).collect();
    assert_eq!(fields, vec!["name", "age", "sex"]);
}

#[rstest]
fn partial_update_does_not_require_fields() {
    let changes = KoderDraft {
        age: Some(26),
        ..KoderDraft::default()
    }
    .into_changes()
    .expect("partial update");
    assert_eq!(changes.age(), Some(26));
    assert!(changes.name().is_none());
    assert!(!changes.is_empty());
}

#[rstest]
fn partial_update_still_checks_supplied_fields() {
    let err = KoderDraft {
        name: Some("Zo".to_owned()),
        ..KoderDraft::default()
    }
    .into_changes()
    .expect_err("short name");
    assert_eq!(
        err.violations(),
        &[SchemaViolation::TooShort {
            field: "name",
            value: "Zo".to_owned(),
            min: NAME_MIN_LENGTH,
        }]
    );
}

#[rstest]
fn empty_update_yields_empty_changes() {
    let changes = KoderDraft::default().into_changes().expect("empty update");
    assert!(changes.is_empty());
}

#[rstest]
fn apply_replaces_only_supplied_fields(valid_draft: KoderDraft) {
    let new = valid_draft.into_new_koder().expect("valid draft");
    let mut koder = Koder::from_new(KoderId::random(), new);
    let changes = KoderDraft {
        age: Some(26),
        sex: Some("o".to_owned()),
        ..KoderDraft::default()
    }
    .into_changes()
    .expect("valid changes");

    koder.apply(&changes);

    assert_eq!(koder.age, 26);
    assert_eq!(koder.sex, Some(Sex::Other));
    assert_eq!(koder.name, "Ana");
    assert_eq!(koder.module.as_deref(), Some("backend"));
}

#[rstest]
fn koder_serialises_without_absent_optionals() {
    let new = KoderDraft {
        name: Some("Ana".to_owned()),
        age: Some(25),
        ..KoderDraft::default()
    }
    .into_new_koder()
    .expect("valid draft");
    let koder = Koder::from_new(KoderId::random(), new);

    let value = serde_json::to_value(&koder).expect("serialise koder");
    let object = value.as_object().expect("object");
    assert_eq!(object.len(), 3);
    assert_eq!(object.get("id"), Some(&serde_json::json!(koder.id.to_string())));
    assert!(object.get("sex").is_none());
}

#[rstest]
fn sex_round_trips_through_its_short_code() {
    for sex in [Sex::Female, Sex::Male, Sex::Other] {
        assert_eq!(sex.as_str().parse::<Sex>(), Ok(sex));
    }
}

#[rstest]
#[case("Zoë", true)]
#[case("😀😀😀", true)]
#[case("Ñandúñandú", true)]
#[case("😀😀", false)]
fn name_length_counts_characters_not_bytes(#[case] name: &str, #[case] valid: bool) {
    let draft = KoderDraft {
        name: Some(name.to_owned()),
        age: Some(30),
        ..KoderDraft::default()
    };
    assert_eq!(draft.into_new_koder().is_ok(), valid);
}
