/// Submit event handed to the controller by the UI shell
///
/// The controller calls `prevent_default` before doing anything else, so
/// the shell never performs its own full reload.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// The two consent checkboxes of the terms page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermsChecks {
    pub terms: bool,
    pub data: bool,
}

impl TermsChecks {
    pub fn all_checked(&self) -> bool {
        self.terms && self.data
    }
}

/// Scroll geometry of the terms box, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollPosition {
    /// Fraction of the content that has been seen; 1.0 when nothing scrolls
    pub fn fraction_seen(&self) -> f64 {
        if self.scroll_height <= 0.0 {
            return 1.0;
        }
        (self.scroll_top + self.client_height) / self.scroll_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Ctrl on most platforms, Cmd on macOS
    pub command_modifier: bool,
    /// Focus is inside a text or password input
    pub in_text_field: bool,
}

/// What the shell should do after a key press the controller did not fully handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    HelpClosed,
    GuestLogin,
    SubmitActiveForm,
}
