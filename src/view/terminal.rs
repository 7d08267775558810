use crate::validation::fields::{PasswordStrength, ValidationResult, FieldState};
use crate::view::page::Destination;
use crate::view::surface::{ContinueButton, Field, Toast, ToastKind, View};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Renders the entry flow as plain text lines
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    next_destination: Mutex<Option<(Destination, Duration)>>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            next_destination: Mutex::new(None),
        }
    }

    /// Last navigation the controller asked for
    pub fn next_destination(&self) -> Option<(Destination, Duration)> {
        self.next_destination.lock().ok().and_then(|guard| *guard)
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            // Write errors are ignored
            let _ = writeln!(out, "{}", text);
        }
    }
}

fn toast_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Warning => "[!]",
        ToastKind::Success => "[*]",
        ToastKind::Guest => "[~]",
        ToastKind::Info => "[i]",
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Username => "username",
        Field::ConfirmPassword => "confirm",
    }
}

fn strength_bar(strength: &PasswordStrength) -> String {
    let filled = (strength.score / 25) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(4 - filled))
}

fn requirement(met: bool) -> char {
    if met {
        'x'
    } else {
        ' '
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn show_toast(&self, toast: &Toast) {
        self.line(&format!("{} {}", toast_icon(toast.kind), toast.text));
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            self.line("... LOADING");
        }
    }

    fn set_field_feedback(&self, field: Field, result: &ValidationResult) {
        if result.message.is_empty() {
            return;
        }
        let mark = match result.state {
            FieldState::Valid => "ok",
            FieldState::Invalid => "no",
            FieldState::Neutral => "..",
        };
        self.line(&format!("  {:<8} {} {}", field_name(field), mark, result.message));
    }

    fn set_password_strength(&self, strength: &PasswordStrength) {
        self.line(&format!(
            "  strength {} {} ({}/100)",
            strength_bar(strength),
            strength.label().as_str(),
            strength.score
        ));
        self.line(&format!(
            "    [{}] 8+ chars  [{}] uppercase  [{}] lowercase  [{}] number",
            requirement(strength.has_length),
            requirement(strength.has_uppercase),
            requirement(strength.has_lowercase),
            requirement(strength.has_digit)
        ));
    }

    fn set_continue_button(&self, state: ContinueButton) {
        self.line(&format!("  button: {}", state.label()));
    }

    fn set_terms_checked(&self, checked: bool) {
        if checked {
            self.line("  terms: checked");
        }
    }

    fn set_help_visible(&self, visible: bool) {
        if visible {
            self.line("HELP: login, register <name> <password> [email], guest, terms, status");
        }
    }

    fn schedule_navigation(&self, destination: Destination, delay: Duration) {
        if let Ok(mut next) = self.next_destination.lock() {
            *next = Some((destination, delay));
        }
        self.line(&format!(
            "-> {} in {:.1}s",
            destination.path(),
            delay.as_secs_f64()
        ));
    }
}
