//! Onboarding wizard state machine.
//!
//! The wizard is stateless on the server: the position is whatever the
//! request URL says. Landing, the five steps and the confirmation page are
//! the states; every transition either renders one of them or redirects.

use crate::models::customer_status::DonationStatus;

/// Form value selecting an active donation
pub const CHOICE_DONATION: &str = "donation";
/// Form value selecting a donation that starts later
pub const CHOICE_DEFERRED_DONATION: &str = "deferred_donation";

/// A valid wizard step, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OnboardingStep(u8);

impl OnboardingStep {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 5;

    pub fn new(number: i64) -> Option<Self> {
        if (Self::FIRST as i64..=Self::LAST as i64).contains(&number) {
            Some(Self(number as u8))
        } else {
            None
        }
    }

    pub fn first() -> Self {
        Self(Self::FIRST)
    }

    pub fn last() -> Self {
        Self(Self::LAST)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn next(&self) -> Option<Self> {
        Self::new(self.0 as i64 + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::new(self.0 as i64 - 1)
    }

    pub fn is_last(&self) -> bool {
        self.0 == Self::LAST
    }
}

/// Pages that can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Impact,
    Step(OnboardingStep),
    Complete,
}

impl View {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Landing => "index",
            View::Impact => "impact_dashboard",
            View::Step(step) => match step.number() {
                1 => "onboarding_step1",
                2 => "onboarding_step2",
                3 => "onboarding_step3",
                4 => "onboarding_step4",
                _ => "onboarding_step5",
            },
            View::Complete => "onboarding_complete",
        }
    }
}

/// Redirect targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    StartOnboarding,
    Step(OnboardingStep),
    Complete,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::StartOnboarding => "/start-onboarding".to_string(),
            Route::Step(step) => format!("/onboarding/{}", step.number()),
            Route::Complete => "/complete".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Render(View),
    Redirect(Route),
}

pub fn landing() -> Transition {
    Transition::Render(View::Landing)
}

pub fn impact() -> Transition {
    Transition::Render(View::Impact)
}

/// Begin the wizard from wherever the client is
pub fn start() -> Transition {
    Transition::Redirect(Route::Step(OnboardingStep::first()))
}

/// Show step `number`, or send the client back to the start when it is not a step
pub fn advance(number: i64) -> Transition {
    match OnboardingStep::new(number) {
        Some(step) => Transition::Render(View::Step(step)),
        None => Transition::Redirect(Route::StartOnboarding),
    }
}

/// `advance` for a raw path segment.
///
/// Integer literals of any magnitude follow `advance`; anything that is not an
/// integer has no matching route and yields `None`. Only a bare run of digits,
/// optionally prefixed with `-`, counts as an integer literal.
pub fn advance_segment(segment: &str) -> Option<Transition> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match segment.parse::<i64>() {
        Ok(number) => Some(advance(number)),
        // Out of i64 range is still out of step range
        Err(_) => Some(Transition::Redirect(Route::StartOnboarding)),
    }
}

/// Confirmation page. Reachable without having submitted anything.
pub fn complete() -> Transition {
    Transition::Render(View::Complete)
}

/// Map the submitted income choice to the status to persist.
///
/// Anything unrecognised, including a missing field, counts as passive.
pub fn map_choice(choice: Option<&str>) -> DonationStatus {
    match choice {
        Some(CHOICE_DONATION) => DonationStatus::Active,
        Some(CHOICE_DEFERRED_DONATION) => DonationStatus::Deferred,
        _ => DonationStatus::Passive,
    }
}
