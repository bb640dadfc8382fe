use super::common::*;
use crate::forms::domain::{
    EmployerFeedback, FormVariant, InterestArea, SkillsRating, ValidatedSubmission,
};
use crate::forms::record::FormRecord;
use crate::forms::schema::FormSchema;

fn employer_schema() -> &'static FormSchema {
    FormSchema::for_variant(FormVariant::Employer)
}

fn educational_schema() -> &'static FormSchema {
    FormSchema::for_variant(FormVariant::Educational)
}

#[test]
fn valid_employer_record_builds_typed_submission() {
    let submission = employer_schema()
        .validate(&employer_record())
        .expect("scenario record is valid");

    assert_eq!(
        submission,
        ValidatedSubmission::Employer(EmployerFeedback {
            company: "Acme".to_string(),
            position: "HR".to_string(),
            email: "x@y.com".to_string(),
            graduate_institution: "MIT".to_string(),
            skills_rating: SkillsRating::Good,
            feedback: "Great performance overall".to_string(),
            suggestions: String::new(),
        })
    );
}

#[test]
fn valid_educational_record_parses_interest_area() {
    match educational_schema().validate(&educational_record()) {
        Ok(ValidatedSubmission::Educational(inquiry)) => {
            assert_eq!(inquiry.interest_area, InterestArea::MarketData);
            assert_eq!(inquiry.contact_person, "Maria Ivanova");
        }
        other => panic!("expected educational inquiry, got {other:?}"),
    }
}

#[test]
fn invalid_email_is_the_only_error() {
    let mut record = employer_record();
    record.set("email", "not-an-email").expect("known field");

    let errors = employer_schema()
        .validate(&record)
        .expect_err("bad email rejected");
    assert_eq!(errors.fields(), vec!["email"]);
    assert_eq!(
        errors.message_for("email"),
        Some("Please enter a valid email")
    );
}

#[test]
fn short_message_is_the_only_error() {
    let mut record = educational_record();
    record.set("message", "Hello").expect("known field");

    let errors = educational_schema()
        .validate(&record)
        .expect_err("short message rejected");
    assert_eq!(errors.fields(), vec!["message"]);
    assert_eq!(
        errors.message_for("message"),
        Some("Message must be at least 10 characters")
    );
}

#[test]
fn each_required_field_fails_on_its_own() {
    for variant in FormVariant::ALL {
        let schema = FormSchema::for_variant(variant);
        let base = match variant {
            FormVariant::Employer => employer_record(),
            FormVariant::Educational => educational_record(),
        };

        for field in schema.fields.iter().filter(|field| field.is_required()) {
            let mut record = base.clone();
            record.set(field.name, "").expect("known field");

            let errors = schema
                .validate(&record)
                .expect_err("blank required field rejected");
            assert_eq!(
                errors.fields(),
                vec![field.name],
                "blanking {} on the {variant} form",
                field.name
            );
            assert_eq!(errors.message_for(field.name), Some(field.message));
        }
    }
}

#[test]
fn every_failing_field_is_reported_in_one_pass() {
    let mut record = employer_record();
    record.set("company", "A").expect("known field");
    record.set("skillsRating", "outstanding").expect("known field");
    record.set("feedback", "meh").expect("known field");

    let errors = employer_schema()
        .validate(&record)
        .expect_err("three violations");
    assert_eq!(errors.fields(), vec!["company", "skillsRating", "feedback"]);
}

#[test]
fn blank_form_reports_all_required_fields() {
    let errors = employer_schema()
        .validate(&FormRecord::empty(FormVariant::Employer))
        .expect_err("blank form rejected");
    assert_eq!(errors.len(), 6);
    assert!(errors.message_for("suggestions").is_none());
}

#[test]
fn enum_values_outside_the_closed_set_are_rejected() {
    let mut record = educational_record();
    record.set("interestArea", "Market_Data").expect("known field");

    let errors = educational_schema()
        .validate(&record)
        .expect_err("case-sensitive choice");
    assert_eq!(errors.fields(), vec!["interestArea"]);
}

#[test]
fn suggestions_may_be_filled_or_left_blank() {
    let mut record = employer_record();
    record
        .set("suggestions", "More hands-on database work")
        .expect("known field");

    match employer_schema().validate(&record) {
        Ok(ValidatedSubmission::Employer(feedback)) => {
            assert_eq!(feedback.suggestions, "More hands-on database work");
        }
        other => panic!("expected employer feedback, got {other:?}"),
    }

    let without = FormRecord::from_pairs(
        FormVariant::Employer,
        employer_values()
            .into_iter()
            .filter(|(name, _)| *name != "suggestions"),
    )
    .expect("known fields");
    assert!(employer_schema().validate(&without).is_ok());
}

#[test]
fn whitespace_only_text_is_not_trimmed() {
    let mut record = employer_record();
    record.set("feedback", "          ").expect("known field");
    assert!(employer_schema().validate(&record).is_ok());
}

#[test]
fn validation_errors_serialize_as_field_map() {
    let mut record = educational_record();
    record.set("phone", "12345").expect("known field");
    record.set("interestArea", "").expect("known field");

    let errors = educational_schema()
        .validate(&record)
        .expect_err("two violations");
    let value = serde_json::to_value(&errors).expect("serializes");
    assert_eq!(value["phone"], "Please enter a valid phone number");
    assert_eq!(value["interestArea"], "Please choose an area of interest");
    assert_eq!(value.as_object().map(|map| map.len()), Some(2));
}
