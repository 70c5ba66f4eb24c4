pub mod clock;
pub mod completion;
pub mod onboarding;
pub mod views;

pub use completion::{CompletionOutcome, CompletionService, CompletionStats};
pub use views::ViewRenderer;
