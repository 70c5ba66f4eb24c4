use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::services::onboarding::{OnboardingStep, Route, View};

const LAYOUT: &str = include_str!("../../templates/layout.hbs");

/// Embedded page templates, keyed by the name `View::template_name` returns
const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    (
        "impact_dashboard",
        include_str!("../../templates/impact_dashboard.hbs"),
    ),
    (
        "onboarding_step1",
        include_str!("../../templates/onboarding_step1.hbs"),
    ),
    (
        "onboarding_step2",
        include_str!("../../templates/onboarding_step2.hbs"),
    ),
    (
        "onboarding_step3",
        include_str!("../../templates/onboarding_step3.hbs"),
    ),
    (
        "onboarding_step4",
        include_str!("../../templates/onboarding_step4.hbs"),
    ),
    (
        "onboarding_step5",
        include_str!("../../templates/onboarding_step5.hbs"),
    ),
    (
        "onboarding_complete",
        include_str!("../../templates/onboarding_complete.hbs"),
    ),
];

#[derive(Debug, Serialize)]
struct ViewContext {
    page_title: &'static str,
    step: Option<u8>,
    total_steps: u8,
    previous_path: Option<String>,
    next_path: Option<String>,
    is_last_step: bool,
}

impl ViewContext {
    fn for_view(view: View) -> Self {
        let total_steps = OnboardingStep::LAST;
        match view {
            View::Step(step) => Self {
                page_title: "Onboarding",
                step: Some(step.number()),
                total_steps,
                previous_path: step.previous().map(|s| Route::Step(s).path()),
                next_path: step.next().map(|s| Route::Step(s).path()),
                is_last_step: step.is_last(),
            },
            other => Self {
                page_title: match other {
                    View::Impact => "Impact",
                    View::Complete => "Onboarding complete",
                    _ => "Welcome",
                },
                step: None,
                total_steps,
                previous_path: None,
                next_path: None,
                is_last_step: false,
            },
        }
    }
}

/// Renders the named pages of the site
pub struct ViewRenderer {
    registry: Handlebars<'static>,
}

impl ViewRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        registry
            .register_partial("layout", LAYOUT)
            .map_err(|e| AppError::Internal(format!("Invalid layout template: {}", e)))?;

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| AppError::Internal(format!("Invalid template {}: {}", name, e)))?;
        }

        tracing::debug!("Registered {} view templates", TEMPLATES.len());

        Ok(Self { registry })
    }

    pub fn render(&self, view: View) -> Result<String> {
        let context = ViewContext::for_view(view);
        Ok(self.registry.render(view.template_name(), &context)?)
    }

    pub fn has_view(&self, view: View) -> bool {
        self.registry.has_template(view.template_name())
    }
}
