use crate::core::state::AppContext;
use crate::models::session::{GuestSession, Session};
use crate::session::client::SessionClient;
use crate::stores::session_store::keys;
use crate::utils::time::now_rfc3339;
use crate::validation::availability::AvailabilityChecker;
use crate::validation::fields::{
    validate_confirm_password, validate_password, validate_username, PasswordStrength,
    ValidationResult, USERNAME_MIN_LEN,
};
use crate::view::events::{
    Key, KeyAction, KeyPress, LoginForm, RegisterForm, ScrollPosition, SubmitEvent, TermsChecks,
};
use crate::view::page::{Destination, Page};
use crate::view::surface::{ContinueButton, Field, SoundCue, Toast, ToastKind, View};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Share of the terms text that counts as "read to the bottom"
const TERMS_SCROLL_THRESHOLD: f64 = 0.9;

/// Binds UI events to validation and the session client
///
/// Ordering guarantees for submits: the event is default-prevented first,
/// validation runs before any request, and navigation is only scheduled
/// after a session was obtained.
pub struct ViewController {
    context: Arc<AppContext>,
    sessions: Arc<SessionClient>,
    availability: AvailabilityChecker,
    view: Arc<dyn View>,
}

impl ViewController {
    pub fn new(
        context: Arc<AppContext>,
        sessions: Arc<SessionClient>,
        availability: AvailabilityChecker,
        view: Arc<dyn View>,
    ) -> Self {
        Self {
            context,
            sessions,
            availability,
            view,
        }
    }

    /// Page load: guard the login page and re-check any stored session
    pub async fn on_load(&self, page: Page) -> Option<Session> {
        info!(page = ?page, "Page loaded");

        match page {
            Page::Terms => self.view.set_continue_button(ContinueButton::Locked),
            Page::LoginRegister => self.require_terms_accepted(),
            Page::Splash => {}
        }

        self.check_session(page).await
    }

    /// Re-check the session whenever the page becomes visible again
    pub async fn on_visibility_change(&self, page: Page, visible: bool) -> Option<Session> {
        if !visible {
            return None;
        }
        self.check_session(page).await
    }

    pub async fn check_session(&self, page: Page) -> Option<Session> {
        let session_id = self.sessions.stored_session_id()?;
        let session = self.sessions.verify_session(&session_id).await?;

        if page == Page::LoginRegister {
            self.toast(
                ToastKind::Info,
                format!("ALREADY LOGGED IN AS {}", session.username),
            );
            self.navigate(Destination::Main, self.context.config.ui.already_logged_in_redirect_ms);
        }

        Some(session)
    }

    fn require_terms_accepted(&self) {
        let accepted = self
            .context
            .store
            .get(keys::TERMS_ACCEPTED)
            .is_some_and(|v| !v.is_empty());
        if accepted {
            return;
        }
        debug!("Terms not accepted, sending player back");
        self.toast(ToastKind::Warning, "PLEASE ACCEPT TERMS FIRST!");
        self.navigate(Destination::Terms, self.context.config.ui.terms_missing_redirect_ms);
    }

    // Terms page

    pub fn on_terms_checkbox_change(&self, checks: TermsChecks) -> ContinueButton {
        let state = if checks.all_checked() {
            ContinueButton::Enabled
        } else {
            ContinueButton::Locked
        };
        self.view.set_continue_button(state);
        state
    }

    /// Reading to the bottom ticks the terms box once
    pub fn on_terms_scroll(&self, position: ScrollPosition, checks: TermsChecks) -> TermsChecks {
        if position.fraction_seen() <= TERMS_SCROLL_THRESHOLD || checks.terms {
            return checks;
        }

        let checks = TermsChecks {
            terms: true,
            ..checks
        };
        self.view.set_terms_checked(true);
        self.on_terms_checkbox_change(checks);
        self.toast(ToastKind::Info, "TERMS SCROLLED TO BOTTOM!");
        checks
    }

    /// Record consent and move on; returns false if the choice could not be saved
    pub fn proceed_to_login(&self, checks: TermsChecks) -> bool {
        if !checks.all_checked() {
            self.toast(ToastKind::Warning, "ACCEPT BOTH TERMS TO CONTINUE");
            return false;
        }

        let store = &self.context.store;
        let saved = store
            .set(keys::TERMS_ACCEPTED, "true")
            .and_then(|_| store.set(keys::TERMS_ACCEPTED_DATE, &now_rfc3339()));

        if let Err(e) = saved {
            warn!(error = %e, "Failed to record terms acceptance");
            self.toast(ToastKind::Warning, "COULD NOT SAVE YOUR CHOICE");
            return false;
        }

        info!("Terms accepted");
        self.navigate(Destination::Login, self.context.config.ui.terms_redirect_ms);
        true
    }

    // Live field validation

    pub fn on_username_input(&self, value: &str) -> ValidationResult {
        let result = validate_username(value);
        self.view.set_field_feedback(Field::Username, &result);
        result
    }

    pub async fn on_username_blur(&self, value: &str) -> ValidationResult {
        if value.chars().count() >= USERNAME_MIN_LEN {
            self.view
                .set_field_feedback(Field::Username, &ValidationResult::neutral("CHECKING..."));
        }
        let result = self.availability.check_username_availability(value).await;
        if !result.is_neutral() {
            self.view.set_field_feedback(Field::Username, &result);
        }
        result
    }

    pub fn on_password_input(&self, value: &str) -> PasswordStrength {
        let strength = validate_password(value);
        self.view.set_password_strength(&strength);
        strength
    }

    pub fn on_confirm_input(&self, password: &str, confirm: &str) -> ValidationResult {
        let result = validate_confirm_password(password, confirm);
        self.view.set_field_feedback(Field::ConfirmPassword, &result);
        result
    }

    // Submits

    pub async fn handle_login(&self, event: &mut SubmitEvent, form: &LoginForm) -> Option<Session> {
        event.prevent_default();
        self.view.play_sound(SoundCue::Click);

        if form.username.is_empty() || form.password.is_empty() {
            self.toast(ToastKind::Warning, "FILL ALL FIELDS");
            return None;
        }

        self.view.set_loading(true);
        let result = self.sessions.login(&form.username, &form.password).await;
        self.view.set_loading(false);

        match result {
            Ok(session) => {
                self.toast(ToastKind::Success, format!("WELCOME, {}!", session.username));
                self.navigate(Destination::Main, self.context.config.ui.login_redirect_ms);
                Some(session)
            }
            Err(e) => {
                self.toast(ToastKind::Warning, e.user_message());
                self.view.play_sound(SoundCue::Error);
                None
            }
        }
    }

    pub async fn handle_register(
        &self,
        event: &mut SubmitEvent,
        form: &RegisterForm,
    ) -> Option<Session> {
        event.prevent_default();
        self.view.play_sound(SoundCue::Click);

        let username_ok = self.on_username_input(&form.username).is_valid();
        let password_ok = self.on_password_input(&form.password).valid();
        let confirm_ok = self
            .on_confirm_input(&form.password, &form.confirm_password)
            .is_valid();

        if !(username_ok && password_ok && confirm_ok) {
            self.toast(ToastKind::Warning, "FIX VALIDATION ERRORS");
            return None;
        }

        if form.username.is_empty() || form.password.is_empty() {
            self.toast(ToastKind::Warning, "USERNAME & PASSWORD REQUIRED");
            return None;
        }

        self.view.set_loading(true);
        let result = self
            .sessions
            .register(&form.username, form.email.as_deref(), &form.password)
            .await;
        self.view.set_loading(false);

        match result {
            Ok(session) => {
                self.toast(
                    ToastKind::Success,
                    format!("ACCOUNT CREATED! WELCOME, {}!", session.username),
                );
                self.navigate(Destination::Main, self.context.config.ui.register_redirect_ms);
                Some(session)
            }
            Err(e) => {
                self.toast(ToastKind::Warning, e.user_message());
                self.view.play_sound(SoundCue::Error);
                None
            }
        }
    }

    pub fn handle_guest(&self) -> Option<GuestSession> {
        self.view.play_sound(SoundCue::Click);
        self.view.set_loading(true);

        match self.sessions.login_as_guest() {
            Ok(guest) => {
                self.toast(ToastKind::Guest, "WELCOME, GUEST ADVENTURER!");
                self.navigate(Destination::Main, self.context.config.ui.guest_redirect_ms);
                Some(guest)
            }
            Err(e) => {
                self.view.set_loading(false);
                self.toast(ToastKind::Warning, e.user_message());
                None
            }
        }
    }

    // Chrome

    pub fn show_help(&self) {
        self.view.play_sound(SoundCue::Click);
        self.view.set_help_visible(true);
    }

    pub fn close_help(&self) {
        self.view.set_help_visible(false);
    }

    pub fn show_forgot_password(&self) {
        self.view.play_sound(SoundCue::Click);
        self.toast(ToastKind::Info, "CONTACT SUPPORT TO RESET PASSWORD");
    }

    /// Keyboard shortcuts; guest login runs here, form submits are left to the shell
    pub fn on_key(&self, press: KeyPress) -> KeyAction {
        match press.key {
            Key::Escape => {
                self.close_help();
                KeyAction::HelpClosed
            }
            Key::Enter if press.command_modifier => {
                self.handle_guest();
                KeyAction::GuestLogin
            }
            Key::Enter if !press.in_text_field => KeyAction::SubmitActiveForm,
            _ => KeyAction::None,
        }
    }

    fn toast(&self, kind: ToastKind, text: impl Into<String>) {
        self.view.show_toast(&Toast {
            kind,
            text: text.into(),
            duration: Duration::from_millis(self.context.config.ui.toast_duration_ms),
        });
    }

    fn navigate(&self, destination: Destination, delay_ms: u64) {
        debug!(destination = destination.path(), delay_ms = delay_ms, "Scheduling navigation");
        self.view
            .schedule_navigation(destination, Duration::from_millis(delay_ms));
    }
}
