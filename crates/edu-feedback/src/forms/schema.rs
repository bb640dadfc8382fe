use email_address::EmailAddress;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::domain::{
    EducationalInquiry, EmployerFeedback, FormVariant, InterestArea, PresentationContext,
    SkillsRating, ValidatedSubmission,
};
use super::record::FormRecord;

/// Input widget a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Choice,
}

/// One selectable value of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Rule a raw field value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// At least this many characters; whitespace counts.
    MinLength(usize),
    Email,
    OneOf(&'static [ChoiceOption]),
    /// Anything, including blank.
    Optional,
}

impl Predicate {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Predicate::MinLength(min) => value.chars().count() >= *min,
            Predicate::Email => is_valid_email(value),
            Predicate::OneOf(options) => options.iter().any(|option| option.value == value),
            Predicate::Optional => true,
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    let Ok(address) = value.parse::<EmailAddress>() else {
        return false;
    };
    // The parser also takes `Name <local@domain>`; only the bare address is accepted.
    if address.email() != value {
        return false;
    }
    if address.local_part().starts_with('"') || address.domain().starts_with('[') {
        return false;
    }

    // Bare hosts such as `a@localhost` parse as RFC 5322 but are not deliverable addresses.
    let labels: Vec<&str> = address.domain().split('.').collect();
    let top_level = labels.last().copied().unwrap_or_default();
    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && top_level.len() >= 2
        && top_level.chars().all(|c| c.is_ascii_alphabetic())
}

/// Declaration of a single form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub predicate: Predicate,
    pub message: &'static str,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        !matches!(self.predicate, Predicate::Optional)
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.predicate {
            Predicate::OneOf(options) => options,
            _ => &[],
        }
    }

    pub fn check(&self, value: &str) -> Result<(), FieldValidationError> {
        if self.predicate.accepts(value) {
            Ok(())
        } else {
            Err(FieldValidationError {
                field: self.name,
                message: self.message,
            })
        }
    }
}

/// Ordered field declarations for one variant.
#[derive(Debug)]
pub struct FormSchema {
    pub variant: FormVariant,
    pub fields: &'static [FieldSpec],
}

const SKILLS_RATING_OPTIONS: &[ChoiceOption] = &[
    rating_option(SkillsRating::Excellent),
    rating_option(SkillsRating::Good),
    rating_option(SkillsRating::Average),
    rating_option(SkillsRating::Poor),
];

const INTEREST_AREA_OPTIONS: &[ChoiceOption] = &[
    interest_option(InterestArea::MarketData),
    interest_option(InterestArea::ProgramsEvaluation),
    interest_option(InterestArea::CurriculumAdjustment),
    interest_option(InterestArea::Other),
];

const fn rating_option(rating: SkillsRating) -> ChoiceOption {
    ChoiceOption {
        value: rating.as_str(),
        label: rating.label(),
    }
}

const fn interest_option(area: InterestArea) -> ChoiceOption {
    ChoiceOption {
        value: area.as_str(),
        label: area.label(),
    }
}

const EMAIL_MESSAGE: &str = "Please enter a valid email";
const INSTITUTION_MESSAGE: &str = "Institution name must be at least 2 characters";

static EMPLOYER_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Employer,
    fields: &[
        FieldSpec {
            name: "company",
            label: "Company",
            placeholder: "Company name",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(2),
            message: "Company name must be at least 2 characters",
        },
        FieldSpec {
            name: "position",
            label: "Position",
            placeholder: "Your position",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(2),
            message: "Position must be at least 2 characters",
        },
        FieldSpec {
            name: "email",
            label: "Email",
            placeholder: "Your email",
            kind: FieldKind::Email,
            predicate: Predicate::Email,
            message: EMAIL_MESSAGE,
        },
        FieldSpec {
            name: "graduateInstitution",
            label: "Graduates' institution",
            placeholder: "Institution name",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(2),
            message: INSTITUTION_MESSAGE,
        },
        FieldSpec {
            name: "skillsRating",
            label: "Graduate skills rating",
            placeholder: "Choose a rating",
            kind: FieldKind::Choice,
            predicate: Predicate::OneOf(SKILLS_RATING_OPTIONS),
            message: "Please rate the graduates' skills",
        },
        FieldSpec {
            name: "feedback",
            label: "Feedback on graduate skills",
            placeholder: "Describe the graduates' strengths and weaknesses",
            kind: FieldKind::LongText,
            predicate: Predicate::MinLength(10),
            message: "Feedback must be at least 10 characters",
        },
        FieldSpec {
            name: "suggestions",
            label: "Suggestions for improving programs",
            placeholder: "Your suggestions for improving educational programs",
            kind: FieldKind::LongText,
            predicate: Predicate::Optional,
            message: "",
        },
    ],
};

static EDUCATIONAL_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Educational,
    fields: &[
        FieldSpec {
            name: "institution",
            label: "Institution",
            placeholder: "Institution name",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(2),
            message: INSTITUTION_MESSAGE,
        },
        FieldSpec {
            name: "contactPerson",
            label: "Contact person",
            placeholder: "Full name",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(2),
            message: "Contact person name must be at least 2 characters",
        },
        FieldSpec {
            name: "email",
            label: "Email",
            placeholder: "Your email",
            kind: FieldKind::Email,
            predicate: Predicate::Email,
            message: EMAIL_MESSAGE,
        },
        FieldSpec {
            name: "phone",
            label: "Phone",
            placeholder: "+7 (___) ___-__-__",
            kind: FieldKind::Text,
            predicate: Predicate::MinLength(10),
            message: "Please enter a valid phone number",
        },
        FieldSpec {
            name: "message",
            label: "Message",
            placeholder: "Describe your request in more detail",
            kind: FieldKind::LongText,
            predicate: Predicate::MinLength(10),
            message: "Message must be at least 10 characters",
        },
        FieldSpec {
            name: "interestArea",
            label: "Area of interest",
            placeholder: "Choose an area",
            kind: FieldKind::Choice,
            predicate: Predicate::OneOf(INTEREST_AREA_OPTIONS),
            message: "Please choose an area of interest",
        },
    ],
};

impl FormSchema {
    pub fn for_variant(variant: FormVariant) -> &'static FormSchema {
        match variant {
            FormVariant::Employer => &EMPLOYER_SCHEMA,
            FormVariant::Educational => &EDUCATIONAL_SCHEMA,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn title(&self, context: PresentationContext) -> &'static str {
        match (self.variant, context) {
            (FormVariant::Employer, PresentationContext::Dialog) => {
                "Leave feedback about graduates"
            }
            (FormVariant::Employer, PresentationContext::Page) => "Feedback for employers",
            (FormVariant::Educational, PresentationContext::Dialog) => {
                "Request additional information"
            }
            (FormVariant::Educational, PresentationContext::Page) => {
                "Information for educational institutions"
            }
        }
    }

    pub fn description(&self, context: PresentationContext) -> &'static str {
        match (self.variant, context) {
            (FormVariant::Employer, PresentationContext::Dialog) => {
                "Your feedback helps improve the quality of educational programs"
            }
            (FormVariant::Employer, PresentationContext::Page) => {
                "Your feedback on graduate skills helps institutions improve their programs \
                 and prepare specialists who better match labor market requirements."
            }
            (FormVariant::Educational, PresentationContext::Dialog) => {
                "Fill in the form to receive additional information"
            }
            (FormVariant::Educational, PresentationContext::Page) => {
                "Get data and analytics for improving educational programs and aligning \
                 specialist training with current labor market requirements."
            }
        }
    }

    /// Check every field and collect all failures in schema order.
    pub fn validate(&self, record: &FormRecord) -> Result<ValidatedSubmission, ValidationErrors> {
        debug_assert_eq!(record.variant(), self.variant);

        let errors: Vec<FieldValidationError> = self
            .fields
            .iter()
            .filter_map(|field| field.check(record.value(field.name)).err())
            .collect();

        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        Ok(self.build(record))
    }

    // Only called once every predicate passed, so the choice lookups cannot miss.
    fn build(&self, record: &FormRecord) -> ValidatedSubmission {
        let text = |name: &str| record.value(name).to_string();
        match self.variant {
            FormVariant::Employer => ValidatedSubmission::Employer(EmployerFeedback {
                company: text("company"),
                position: text("position"),
                email: text("email"),
                graduate_institution: text("graduateInstitution"),
                skills_rating: SkillsRating::parse(record.value("skillsRating"))
                    .unwrap_or(SkillsRating::Average),
                feedback: text("feedback"),
                suggestions: text("suggestions"),
            }),
            FormVariant::Educational => ValidatedSubmission::Educational(EducationalInquiry {
                institution: text("institution"),
                contact_person: text("contactPerson"),
                email: text("email"),
                phone: text("phone"),
                message: text("message"),
                interest_area: InterestArea::parse(record.value("interestArea"))
                    .unwrap_or(InterestArea::Other),
            }),
        }
    }

    pub fn descriptor(&self, context: PresentationContext) -> FormDescriptor {
        FormDescriptor {
            variant: self.variant,
            context,
            title: self.title(context),
            description: self.description(context),
            fields: self
                .fields
                .iter()
                .map(|field| FieldDescriptor {
                    name: field.name,
                    label: field.label,
                    placeholder: field.placeholder,
                    kind: field.kind,
                    required: field.is_required(),
                    options: field.options(),
                })
                .collect(),
        }
    }
}

/// A field that failed its predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every failing field from one validation pass, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldValidationError>,
}

impl ValidationErrors {
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(error.field, error.message)?;
        }
        map.end()
    }
}

/// Renderer-facing description of a form.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub variant: FormVariant,
    pub context: PresentationContext,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [ChoiceOption],
}

fn has_no_options(options: &&'static [ChoiceOption]) -> bool {
    options.is_empty()
}
