use crate::infra::{parse_context, parse_field_assignment, parse_variant};
use clap::Args;
use edu_feedback::config::AppConfig;
use edu_feedback::error::AppError;
use edu_feedback::forms::{
    FeedbackService, FeedbackServiceError, FormSchema, FormVariant, LandingContent,
    LoggingSubmissionHandler, PostSubmitTransition, PresentationContext, SubmissionReceipt,
    ValidationErrors,
};
use edu_feedback::telemetry;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SchemaArgs {
    /// Form to describe (employer or educational)
    #[arg(value_parser = parse_variant)]
    pub(crate) variant: FormVariant,
    /// Presentation context the titles are rendered for (dialog or page)
    #[arg(long, value_parser = parse_context, default_value = "page")]
    pub(crate) context: PresentationContext,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Form to submit (employer or educational)
    #[arg(value_parser = parse_variant)]
    pub(crate) variant: FormVariant,
    /// Presentation context deciding the post-submit transition (dialog or page)
    #[arg(long, value_parser = parse_context, default_value = "page")]
    pub(crate) context: PresentationContext,
    /// Field value as NAME=VALUE; repeat for each field
    #[arg(long = "field", value_parser = parse_field_assignment)]
    pub(crate) fields: Vec<(String, String)>,
}

pub(crate) fn run_landing() {
    let landing = LandingContent::standard();

    println!("{}", landing.headline);
    println!("{}", landing.intro);

    for card in &landing.cards {
        println!("\n{} ({})", card.title, card.link);
        println!("{}", card.subtitle);
        for benefit in card.benefits {
            println!("- {benefit}");
        }
        println!("[{}]", card.button_text);
    }

    println!("\n{}", landing.closing_title);
    println!("{}", landing.closing_text);
}

pub(crate) fn run_schema(args: SchemaArgs) {
    let descriptor = FormSchema::for_variant(args.variant).descriptor(args.context);

    println!("{}", descriptor.title);
    println!("{}", descriptor.description);
    println!();

    for field in &descriptor.fields {
        let requirement = if field.required { "required" } else { "optional" };
        println!(
            "- {} ({:?}, {}): {}",
            field.name, field.kind, requirement, field.label
        );
        for option in field.options {
            println!("    {} = {}", option.value, option.label);
        }
    }
}

pub(crate) fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    init_telemetry()?;

    let service = logging_service()?;
    match service.submit_once(args.variant, args.context, args.fields) {
        Ok(receipt) => {
            print_receipt(&receipt);
            Ok(())
        }
        Err(FeedbackServiceError::Validation(errors)) => {
            print_errors(&errors);
            Err(FeedbackServiceError::Validation(errors).into())
        }
        Err(other) => Err(other.into()),
    }
}

/// Submit the reference records for both forms and show how each one is handled.
pub(crate) fn run_demo() -> Result<(), AppError> {
    init_telemetry()?;
    let service = logging_service()?;

    let employer = [
        ("company", "Acme"),
        ("position", "HR"),
        ("email", "x@y.com"),
        ("graduateInstitution", "MIT"),
        ("skillsRating", "good"),
        ("feedback", "Great performance overall"),
        ("suggestions", ""),
    ];
    let educational = [
        ("institution", "State Technical College"),
        ("contactPerson", "Maria Ivanova"),
        ("email", "maria@college.edu"),
        ("phone", "+7 900 123-45-67"),
        ("message", "Hello"),
        ("interestArea", ""),
    ];

    println!("Employer feedback, complete record (dialog)");
    report(service.submit_once(FormVariant::Employer, PresentationContext::Dialog, employer))?;

    println!("\nEmployer feedback, malformed email (dialog)");
    let bad_email = employer.map(|(name, value)| {
        if name == "email" {
            (name, "not-an-email")
        } else {
            (name, value)
        }
    });
    report(service.submit_once(FormVariant::Employer, PresentationContext::Dialog, bad_email))?;

    println!("\nEducational inquiry, short message and no area (page)");
    report(service.submit_once(FormVariant::Educational, PresentationContext::Page, educational))?;

    println!("\nEducational inquiry, corrected (page)");
    let corrected = educational.map(|(name, value)| match name {
        "message" => (name, "Please share the latest in-demand skills data"),
        "interestArea" => (name, "market_data"),
        _ => (name, value),
    });
    report(service.submit_once(FormVariant::Educational, PresentationContext::Page, corrected))?;

    Ok(())
}

fn report(outcome: Result<SubmissionReceipt, FeedbackServiceError>) -> Result<(), AppError> {
    match outcome {
        Ok(receipt) => print_receipt(&receipt),
        Err(FeedbackServiceError::Validation(errors)) => print_errors(&errors),
        Err(other) => return Err(other.into()),
    }
    Ok(())
}

fn init_telemetry() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(())
}

fn logging_service() -> Result<FeedbackService<LoggingSubmissionHandler>, AppError> {
    let config = AppConfig::load()?;
    Ok(FeedbackService::new(
        Arc::new(LoggingSubmissionHandler),
        config.forms.redirect_policy(),
    ))
}

fn print_receipt(receipt: &SubmissionReceipt) {
    println!(
        "{}: {}",
        receipt.acknowledgment.title, receipt.acknowledgment.description
    );
    match &receipt.transition {
        PostSubmitTransition::CloseDialog => println!("Next: close the dialog"),
        PostSubmitTransition::Redirect { route, delay_ms } => {
            println!("Next: go to {route} in {delay_ms} ms")
        }
    }
}

fn print_errors(errors: &ValidationErrors) {
    println!("Not submitted, {} field(s) need attention:", errors.len());
    for error in errors.iter() {
        println!("- {}: {}", error.field, error.message);
    }
}
