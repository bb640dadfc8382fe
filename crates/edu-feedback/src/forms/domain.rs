use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which audience-specific form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    Employer,
    Educational,
}

impl FormVariant {
    pub const ALL: [FormVariant; 2] = [FormVariant::Employer, FormVariant::Educational];

    pub fn slug(&self) -> &'static str {
        match self {
            FormVariant::Employer => "employer",
            FormVariant::Educational => "educational",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormVariant::Employer => "Employer feedback",
            FormVariant::Educational => "Educational inquiry",
        }
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FormVariant {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "employer" => Ok(FormVariant::Employer),
            "educational" => Ok(FormVariant::Educational),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form variant '{0}' (expected 'employer' or 'educational')")]
pub struct UnknownVariant(pub String);

/// How the form is presented; decides the post-submit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationContext {
    Dialog,
    #[default]
    Page,
}

impl FromStr for PresentationContext {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dialog" => Ok(PresentationContext::Dialog),
            "page" => Ok(PresentationContext::Page),
            other => Err(format!(
                "unknown presentation context '{other}' (expected 'dialog' or 'page')"
            )),
        }
    }
}

/// Employer assessment of graduate skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl SkillsRating {
    pub const ALL: [SkillsRating; 4] = [
        SkillsRating::Excellent,
        SkillsRating::Good,
        SkillsRating::Average,
        SkillsRating::Poor,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SkillsRating::Excellent => "excellent",
            SkillsRating::Good => "good",
            SkillsRating::Average => "average",
            SkillsRating::Poor => "poor",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SkillsRating::Excellent => "Excellent",
            SkillsRating::Good => "Good",
            SkillsRating::Average => "Satisfactory",
            SkillsRating::Poor => "Needs improvement",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.as_str() == value)
    }
}

/// Area an educational institution wants more information about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestArea {
    MarketData,
    ProgramsEvaluation,
    CurriculumAdjustment,
    Other,
}

impl InterestArea {
    pub const ALL: [InterestArea; 4] = [
        InterestArea::MarketData,
        InterestArea::ProgramsEvaluation,
        InterestArea::CurriculumAdjustment,
        InterestArea::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            InterestArea::MarketData => "market_data",
            InterestArea::ProgramsEvaluation => "programs_evaluation",
            InterestArea::CurriculumAdjustment => "curriculum_adjustment",
            InterestArea::Other => "other",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            InterestArea::MarketData => "In-demand skills data",
            InterestArea::ProgramsEvaluation => "Program effectiveness evaluation",
            InterestArea::CurriculumAdjustment => "Curriculum adjustment",
            InterestArea::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == value)
    }
}

/// Validated employer feedback about graduates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerFeedback {
    pub company: String,
    pub position: String,
    pub email: String,
    pub graduate_institution: String,
    pub skills_rating: SkillsRating,
    pub feedback: String,
    /// Free-form and optional; an empty string is kept as submitted.
    pub suggestions: String,
}

/// Validated request for information from an educational institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalInquiry {
    pub institution: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub interest_area: InterestArea,
}

/// A record that passed its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "record", rename_all = "snake_case")]
pub enum ValidatedSubmission {
    Employer(EmployerFeedback),
    Educational(EducationalInquiry),
}

impl ValidatedSubmission {
    pub fn variant(&self) -> FormVariant {
        match self {
            ValidatedSubmission::Employer(_) => FormVariant::Employer,
            ValidatedSubmission::Educational(_) => FormVariant::Educational,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            ValidatedSubmission::Employer(record) => &record.email,
            ValidatedSubmission::Educational(record) => &record.email,
        }
    }
}
