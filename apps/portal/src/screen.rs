//! Login flow state, independent of any GUI toolkit.
//!
//! `Selection -> Academic | Administrative -> Dashboard -> Selection`.
//! At most one login request is in flight; `submit` refuses to start
//! another until `finish` is called.

use shared::{AuthResponse, LoginMode};

use crate::captcha::Captcha;
use crate::error::PortalError;
use crate::session::AuthenticatedUser;

pub const EMAIL_DOMAIN: &str = "upt.edu.pe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Academic,
    Administrative,
    Dashboard(AuthenticatedUser),
}

#[derive(Debug, Default, Clone)]
pub struct AcademicForm {
    pub codigo: String,
    pub password: String,
    pub captcha_answer: String,
}

#[derive(Debug, Default, Clone)]
pub struct AdminForm {
    pub username: String,
    pub password: String,
}

/// What the caller has to send once `submit` accepts the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: LoginMode,
    pub identifier: String,
    pub email: String,
    pub password: String,
}

/// Student codes and usernames become `<id>@upt.edu.pe`; full addresses
/// pass through.
pub fn identifier_to_email(identifier: &str) -> String {
    let identifier = identifier.trim();
    if identifier.contains('@') {
        identifier.to_string()
    } else {
        format!("{}@{}", identifier, EMAIL_DOMAIN)
    }
}

pub struct LoginState {
    screen: Screen,
    pub academic: AcademicForm,
    pub admin: AdminForm,
    captcha: Captcha,
    error: Option<String>,
    pending: bool,
}

impl LoginState {
    pub fn new(restored: Option<AuthenticatedUser>) -> Self {
        Self {
            screen: restored.map(Screen::Dashboard).unwrap_or(Screen::Selection),
            academic: AcademicForm::default(),
            admin: AdminForm::default(),
            captcha: Captcha::generate(&mut rand::thread_rng()),
            error: None,
            pending: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn captcha(&self) -> &Captcha {
        &self.captcha
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && matches!(self.screen, Screen::Academic | Screen::Administrative)
    }

    pub fn select_mode(&mut self, mode: LoginMode) {
        self.error = None;
        self.screen = match mode {
            LoginMode::Academic => {
                self.refresh_captcha();
                Screen::Academic
            }
            LoginMode::Administrative => Screen::Administrative,
        };
    }

    /// "Volver": drop whatever was typed and go back to mode selection.
    pub fn back(&mut self) {
        if self.pending {
            return;
        }
        self.academic = AcademicForm::default();
        self.admin = AdminForm::default();
        self.error = None;
        self.screen = Screen::Selection;
    }

    pub fn refresh_captcha(&mut self) {
        self.captcha = Captcha::generate(&mut rand::thread_rng());
        self.academic.captcha_answer.clear();
    }

    /// Validates the current form. On success the state turns pending and
    /// the returned submission must be sent and handed back to `finish`.
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }

        match self.validate() {
            Ok(submission) => {
                self.error = None;
                self.pending = true;
                Some(submission)
            }
            Err(e) => {
                if self.screen == Screen::Academic {
                    self.refresh_captcha();
                }
                self.error = Some(e.user_message());
                None
            }
        }
    }

    fn validate(&self) -> Result<Submission, PortalError> {
        let (mode, identifier, password) = match &self.screen {
            Screen::Academic => {
                let form = &self.academic;
                if form.codigo.trim().is_empty() || form.password.is_empty() || form.captcha_answer.trim().is_empty() {
                    return Err(PortalError::MissingFields);
                }
                if !self.captcha.verify(&form.captcha_answer) {
                    return Err(PortalError::Captcha);
                }
                (LoginMode::Academic, form.codigo.trim(), &form.password)
            }
            Screen::Administrative => {
                let form = &self.admin;
                if form.username.trim().is_empty() || form.password.is_empty() {
                    return Err(PortalError::MissingFields);
                }
                (LoginMode::Administrative, form.username.trim(), &form.password)
            }
            _ => return Err(PortalError::MissingFields),
        };

        Ok(Submission {
            mode,
            identifier: identifier.to_string(),
            email: identifier_to_email(identifier),
            password: password.clone(),
        })
    }

    /// Applies the outcome of a submission. Returns the user on success so
    /// the caller can persist the session.
    pub fn finish(
        &mut self,
        submission: &Submission,
        outcome: Result<AuthResponse, PortalError>,
    ) -> Option<AuthenticatedUser> {
        self.pending = false;

        match outcome.and_then(|reply| reply.user_id.ok_or(PortalError::UnexpectedResponse { status: 200 })) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    submission.email.clone(),
                    submission.mode,
                    submission.identifier.clone(),
                );
                self.academic = AcademicForm::default();
                self.admin = AdminForm::default();
                self.error = None;
                self.screen = Screen::Dashboard(user.clone());
                Some(user)
            }
            Err(e) => {
                tracing::info!(mode = %submission.mode, error = %e, "login failed");
                self.error = Some(e.user_message());
                if submission.mode == LoginMode::Academic {
                    self.refresh_captcha();
                }
                None
            }
        }
    }

    pub fn logout(&mut self) {
        self.error = None;
        self.pending = false;
        self.screen = Screen::Selection;
    }
}
