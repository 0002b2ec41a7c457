use roster_core::{
    validate_student, Field, FieldErrorKind, RosterConfig, StudentInput, StudentRecord,
};

fn valid_input() -> StudentInput {
    StudentInput {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@x.com".to_string(),
        programme: "CS".to_string(),
        year: Some("2".to_string()),
        interests: "math".to_string(),
        photo_url: String::new(),
    }
}

fn existing(id: i64, email: &str) -> StudentRecord {
    let input = StudentInput {
        email: email.to_string(),
        ..valid_input()
    };
    StudentRecord::new(id, input.normalize())
}

#[test]
fn valid_input_passes_with_no_messages() {
    let report = validate_student(&valid_input(), &[], None, &RosterConfig::default());
    assert!(report.is_valid());
    for field in Field::ALL {
        assert_eq!(report.message_for(field), None);
    }
}

#[test]
fn all_violations_are_reported_together() {
    let input = StudentInput {
        first_name: "  ".to_string(),
        last_name: String::new(),
        email: "not-an-email".to_string(),
        programme: String::new(),
        year: None,
        interests: String::new(),
        photo_url: "ftp://img".to_string(),
    };
    let report = validate_student(&input, &[], None, &RosterConfig::default());

    assert!(!report.is_valid());
    assert_eq!(report.error_count(), 6);
    assert_eq!(report.first_invalid_field(), Some(Field::FirstName));
    assert_eq!(
        report.message_for(Field::FirstName),
        Some("First name is required.")
    );
    assert_eq!(
        report.message_for(Field::LastName),
        Some("Last name is required.")
    );
    assert_eq!(
        report.error(Field::Email).map(|err| err.kind),
        Some(FieldErrorKind::Format)
    );
    assert_eq!(
        report.message_for(Field::Programme),
        Some("Please select a programme.")
    );
    assert_eq!(report.message_for(Field::Year), Some("Please select a year."));
    assert_eq!(
        report.message_for(Field::PhotoUrl),
        Some("Please enter a valid URL starting with http:// or https://")
    );
}

#[test]
fn duplicate_email_is_case_insensitive_and_only_checked_after_format() {
    let roster = vec![existing(1, "ada@x.com")];

    let duplicate = StudentInput {
        email: " ADA@X.COM ".to_string(),
        ..valid_input()
    };
    let report = validate_student(&duplicate, &roster, None, &RosterConfig::default());
    let err = report.error(Field::Email).unwrap();
    assert_eq!(err.kind, FieldErrorKind::Duplicate);
    assert_eq!(err.message, "This email is already registered.");

    let malformed = StudentInput {
        email: "ada@x".to_string(),
        ..valid_input()
    };
    let report = validate_student(&malformed, &roster, None, &RosterConfig::default());
    assert_eq!(
        report.error(Field::Email).map(|err| err.kind),
        Some(FieldErrorKind::Format)
    );
}

#[test]
fn editing_record_may_keep_its_own_email() {
    let roster = vec![existing(1, "ada@x.com"), existing(2, "bob@x.com")];
    let input = StudentInput {
        email: "ADA@X.COM".to_string(),
        ..valid_input()
    };

    let report = validate_student(&input, &roster, Some(1), &RosterConfig::default());
    assert!(report.is_valid());

    let report = validate_student(&input, &roster, Some(2), &RosterConfig::default());
    assert_eq!(
        report.error(Field::Email).map(|err| err.kind),
        Some(FieldErrorKind::Duplicate)
    );
}

#[test]
fn programme_and_year_must_come_from_closed_sets() {
    let config = RosterConfig::from_json_str(r#"{"programmes": ["Biology"], "years": ["1"]}"#)
        .unwrap();

    let report = validate_student(&valid_input(), &[], None, &config);
    assert_eq!(
        report.error(Field::Programme).map(|err| err.kind),
        Some(FieldErrorKind::Required)
    );
    assert_eq!(
        report.error(Field::Year).map(|err| err.kind),
        Some(FieldErrorKind::Required)
    );

    let input = StudentInput {
        programme: "Biology".to_string(),
        year: Some("1".to_string()),
        ..valid_input()
    };
    assert!(validate_student(&input, &[], None, &config).is_valid());
}

#[test]
fn fixing_a_field_clears_its_message_on_the_next_pass() {
    let broken = StudentInput {
        first_name: String::new(),
        photo_url: "www.example.com/a.png".to_string(),
        ..valid_input()
    };
    let first = validate_student(&broken, &[], None, &RosterConfig::default());
    assert!(first.message_for(Field::FirstName).is_some());
    assert!(first.message_for(Field::PhotoUrl).is_some());

    let fixed = StudentInput {
        photo_url: "https://www.example.com/a.png".to_string(),
        ..valid_input()
    };
    let second = validate_student(&fixed, &[], None, &RosterConfig::default());
    assert!(second.is_valid());
    assert_eq!(second.message_for(Field::FirstName), None);
    assert_eq!(second.message_for(Field::PhotoUrl), None);
}

#[test]
fn report_display_lists_fields_in_form_order() {
    let input = StudentInput {
        first_name: String::new(),
        year: None,
        ..valid_input()
    };
    let report = validate_student(&input, &[], None, &RosterConfig::default());
    assert_eq!(
        report.to_string(),
        "validation failed: firstName (required), year (required)"
    );
}
