use crate::validation::fields::{PasswordStrength, ValidationResult};
use crate::view::page::Destination;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Warning,
    Success,
    Guest,
    Info,
}

/// Transient notification; the shell hides it after `duration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub duration: Duration,
}

/// Form fields that receive inline feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    ConfirmPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueButton {
    /// Both boxes checked, label "CONTINUE"
    Enabled,
    /// Label "ACCEPT TERMS"
    Locked,
}

impl ContinueButton {
    pub fn label(&self) -> &'static str {
        match self {
            ContinueButton::Enabled => "CONTINUE",
            ContinueButton::Locked => "ACCEPT TERMS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Error,
}

/// Everything the controller may change on screen
///
/// Implementations only render; they never call back into the controller.
pub trait View: Send + Sync {
    fn show_toast(&self, toast: &Toast);

    fn set_loading(&self, visible: bool);

    fn set_field_feedback(&self, field: Field, result: &ValidationResult);

    /// Strength meter plus the four requirement markers
    fn set_password_strength(&self, strength: &PasswordStrength);

    fn set_continue_button(&self, state: ContinueButton);

    fn set_terms_checked(&self, checked: bool);

    fn set_help_visible(&self, visible: bool);

    fn schedule_navigation(&self, destination: Destination, delay: Duration);

    fn play_sound(&self, cue: SoundCue) {
        debug!(cue = ?cue, "Playing sound");
    }
}
