use std::sync::Arc;

use egui::{Color32, RichText};
use shared::{AuthResponse, LoginMode};
use tokio::sync::oneshot;

use crate::client::AuthClient;
use crate::error::PortalError;
use crate::screen::{LoginState, Screen, Submission};
use crate::session::{AuthenticatedUser, SessionStore};

const ACADEMIC_BLUE: Color32 = Color32::from_rgb(0x1e, 0x40, 0xaf);
const ADMIN_GRAY: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);

type Outcome = Result<AuthResponse, PortalError>;

struct InFlight {
    submission: Submission,
    reply: oneshot::Receiver<Outcome>,
}

/// Things a frame asked for; applied after the UI closure releases `self`.
enum Action {
    Select(LoginMode),
    Back,
    RefreshCaptcha,
    Submit,
    Logout,
}

pub struct PortalApp {
    state: LoginState,
    client: Arc<AuthClient>,
    sessions: SessionStore,
    runtime: tokio::runtime::Handle,
    in_flight: Option<InFlight>,
}

impl PortalApp {
    pub fn new(client: AuthClient, sessions: SessionStore, runtime: tokio::runtime::Handle) -> Self {
        let restored = sessions.load();
        if let Some(user) = &restored {
            tracing::info!(user_id = user.id, "restored saved session");
        }
        Self {
            state: LoginState::new(restored),
            client: Arc::new(client),
            sessions,
            runtime,
            in_flight: None,
        }
    }

    fn poll_reply(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };

        let outcome = match in_flight.reply.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(PortalError::UnexpectedResponse { status: 0 }),
        };

        if let Some(in_flight) = self.in_flight.take() {
            if let Some(user) = self.state.finish(&in_flight.submission, outcome) {
                self.persist(&user);
            }
        }
    }

    fn persist(&self, user: &AuthenticatedUser) {
        if let Err(e) = self.sessions.save(user) {
            tracing::warn!(error = %e, "failed to save session");
        }
    }

    fn start_login(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.state.submit() else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        let email = submission.email.clone();
        let password = submission.password.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let outcome = client.login(&email, &password).await;
            // The receiver is gone only if the window closed meanwhile.
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });

        self.in_flight = Some(InFlight {
            submission,
            reply: rx,
        });
    }

    fn apply(&mut self, action: Action, ctx: &egui::Context) {
        match action {
            Action::Select(mode) => self.state.select_mode(mode),
            Action::Back => self.state.back(),
            Action::RefreshCaptcha => self.state.refresh_captcha(),
            Action::Submit => self.start_login(ctx),
            Action::Logout => {
                if let Err(e) = self.sessions.clear() {
                    tracing::warn!(error = %e, "failed to remove session");
                }
                self.state.logout();
            }
        }
    }

    fn header(ui: &mut egui::Ui, color: Color32, subtitle: &str, description: &str) {
        ui.add_space(24.0);
        ui.label(RichText::new("IntegraUPT").size(32.0).strong().color(color));
        ui.label(RichText::new(subtitle).size(14.0).strong());
        ui.label(description);
        ui.add_space(16.0);
    }

    fn footer(ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.label(RichText::new("Universidad Privada de Tacna").small());
        ui.label(RichText::new("Sistema Integrado de Gestión Académica").small().weak());
    }

    fn show_error(&self, ui: &mut egui::Ui) {
        if let Some(error) = self.state.error() {
            ui.colored_label(Color32::from_rgb(0xdc, 0x26, 0x26), error);
            ui.add_space(8.0);
        }
    }

    fn submit_button(&self, ui: &mut egui::Ui, color: Color32, actions: &mut Vec<Action>) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if self.state.is_pending() { "Iniciando sesión..." } else { "Iniciar Sesión" };
            let button = egui::Button::new(RichText::new(label).color(Color32::WHITE)).fill(color);
            if ui.add_enabled(self.state.can_submit(), button).clicked() {
                actions.push(Action::Submit);
            }
            if self.state.is_pending() {
                ui.spinner();
            }
        });
    }

    fn selection(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        Self::header(ui, ACADEMIC_BLUE, "PREGRADO", "Selecciona tu tipo de acceso");
        if ui.button("Acceso Académico  ›").clicked() {
            actions.push(Action::Select(LoginMode::Academic));
        }
        ui.add_space(8.0);
        if ui.button("Acceso Administrativo  ›").clicked() {
            actions.push(Action::Select(LoginMode::Administrative));
        }
        Self::footer(ui);
    }

    fn academic(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        Self::header(ui, ACADEMIC_BLUE, "ACCESO ACADÉMICO", "Estudiantes y docentes");
        if ui.add_enabled(!self.state.is_pending(), egui::Button::new("‹ Volver")).clicked() {
            actions.push(Action::Back);
        }
        ui.add_space(8.0);
        self.show_error(ui);

        let captcha = self.state.captcha().code().to_string();
        let pending = self.state.is_pending();
        let form = &mut self.state.academic;

        ui.label("Código de estudiante");
        ui.add(egui::TextEdit::singleline(&mut form.codigo).hint_text("Ej: 2023077282"));
        ui.label("Contraseña");
        ui.add(egui::TextEdit::singleline(&mut form.password).password(true).hint_text("Ingresa tu contraseña"));

        ui.label("Código de verificación");
        ui.horizontal(|ui| {
            ui.label(RichText::new(captcha).monospace().size(22.0).strong());
            if ui.add_enabled(!pending, egui::Button::new("⟳")).on_hover_text("Nuevo código").clicked() {
                actions.push(Action::RefreshCaptcha);
            }
        });
        let answer = ui.add(
            egui::TextEdit::singleline(&mut form.captcha_answer)
                .char_limit(crate::captcha::CAPTCHA_LEN)
                .hint_text("Ingresa el código de verificación"),
        );
        if answer.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(Action::Submit);
        }

        self.submit_button(ui, ACADEMIC_BLUE, actions);
    }

    fn administrative(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        Self::header(ui, ADMIN_GRAY, "ACCESO ADMINISTRATIVO", "Panel de administración");
        if ui.add_enabled(!self.state.is_pending(), egui::Button::new("‹ Volver")).clicked() {
            actions.push(Action::Back);
        }
        ui.add_space(8.0);
        self.show_error(ui);

        let form = &mut self.state.admin;
        ui.label("Usuario");
        ui.add(egui::TextEdit::singleline(&mut form.username).hint_text("Ingresa tu usuario"));
        ui.label("Contraseña");
        let password = ui.add(
            egui::TextEdit::singleline(&mut form.password)
                .password(true)
                .hint_text("Ingresa tu contraseña"),
        );
        if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(Action::Submit);
        }

        self.submit_button(ui, ADMIN_GRAY, actions);
    }

    fn dashboard(user: &AuthenticatedUser, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.add_space(24.0);
        ui.heading("Bienvenido");
        ui.horizontal(|ui| {
            ui.label("Sesión iniciada como");
            ui.label(RichText::new(&user.email).strong());
        });
        ui.label(format!("Tipo de acceso: {} ({})", user.login_type, user.role));
        ui.add_space(16.0);
        if ui.button("Cerrar sesión").clicked() {
            actions.push(Action::Logout);
        }
    }
}

impl eframe::App for PortalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_reply();

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| match self.state.screen().clone() {
                Screen::Selection => self.selection(ui, &mut actions),
                Screen::Academic => self.academic(ui, &mut actions),
                Screen::Administrative => self.administrative(ui, &mut actions),
                Screen::Dashboard(user) => Self::dashboard(&user, ui, &mut actions),
            });
        });

        for action in actions {
            self.apply(action, ctx);
        }
    }
}
