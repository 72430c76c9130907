mod banner;
mod empty_state;
mod help;
mod password_strength;
mod status;

pub use banner::BannerVariant;
pub use empty_state::{EmptyButton, EmptyState};
pub use password_strength::{PasswordStrength, StrengthLevel, STRENGTH_LEVELS};

/// Namespace for the small bordered paragraphs shared across screens.
pub struct UiComponent;
