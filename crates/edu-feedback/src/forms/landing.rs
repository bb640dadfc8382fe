use serde::Serialize;

use super::domain::FormVariant;

/// Standalone page route for each form.
pub fn form_route(variant: FormVariant) -> &'static str {
    match variant {
        FormVariant::Employer => "/employer-feedback",
        FormVariant::Educational => "/educational-info",
    }
}

/// Home page content: headline, one card per audience, closing pitch.
#[derive(Debug, Clone, Serialize)]
pub struct LandingContent {
    pub headline: &'static str,
    pub intro: &'static str,
    pub cards: Vec<AudienceCard>,
    pub closing_title: &'static str,
    pub closing_text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceCard {
    pub variant: FormVariant,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub benefits: &'static [&'static str],
    pub button_text: &'static str,
    pub link: &'static str,
}

impl AudienceCard {
    pub fn for_variant(variant: FormVariant) -> Self {
        match variant {
            FormVariant::Employer => Self {
                variant,
                title: "For employers",
                subtitle: "Share your experience working with graduates",
                benefits: &[
                    "Assess employees' real skills after the probation period",
                    "Recommend improvements to educational programs",
                    "Influence how future specialists are trained",
                ],
                button_text: "Leave feedback",
                link: form_route(variant),
            },
            FormVariant::Educational => Self {
                variant,
                title: "For educational institutions",
                subtitle: "Get valuable insight for improving your programs",
                benefits: &[
                    "Current data on in-demand skills",
                    "Evaluation of educational program effectiveness",
                    "Grounds for adjusting curricula",
                ],
                button_text: "Learn more",
                link: form_route(variant),
            },
        }
    }
}

impl LandingContent {
    pub fn standard() -> Self {
        Self {
            headline: "Feedback for education",
            intro: "Help improve the quality of IT education by giving institutions \
                    feedback on the competencies of their graduates",
            cards: FormVariant::ALL
                .into_iter()
                .map(AudienceCard::for_variant)
                .collect(),
            closing_title: "Together we build the future of education",
            closing_text: "Our platform connects employers and educational institutions, \
                           providing continuous feedback for steadily improving the quality \
                           of education and specialist training.",
        }
    }
}
