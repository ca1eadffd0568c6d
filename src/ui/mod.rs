mod home;
pub mod terminal_guard;
mod toasts;
pub mod wizard;

pub use home::render_home;
pub use terminal_guard::{install_panic_hook, TerminalSession};
pub use toasts::render_toasts;
pub use wizard::{StepOutcome, WizardScreen};
