//! Console application state: the persisted session, the API client, and
//! navigation through the route guard.

use anyhow::Context;
use remindcare_core::patient::{CreatePatient, UpdatePatient};
use remindcare_core::profile::{UpdateNotificationSettings, UpdateProfile};
use remindcare_core::routing::{resolve, GuardDecision, View};
use remindcare_core::session::{CurrentUser, FileStorage, SessionStore};
use remindcare_core::token::TokenCodec;
use remindcare_core::types::DbId;

use crate::client::{ApiClient, ClientError, PatientFilter, ReminderFilter};
use crate::config::ConsoleConfig;
use crate::render;

/// Upper bound on guard redirects followed per navigation.
const MAX_REDIRECTS: usize = 3;

pub struct App {
    session: SessionStore<FileStorage>,
    client: ApiClient,
}

impl App {
    /// Open the session file and recover any stored token.
    ///
    /// The console cannot verify signatures, so tokens are decoded
    /// structurally. The server remains the authority on validity.
    pub fn new(config: &ConsoleConfig) -> Self {
        let storage = FileStorage::new(config.session_path());
        let mut session = SessionStore::new(storage, TokenCodec::Structural);
        session.recover_on_startup();

        let mut client = ApiClient::new(&config.api_url);
        client.set_token(session.raw_token());

        tracing::debug!(
            authenticated = session.is_authenticated(),
            "Session recovered"
        );
        Self { session, client }
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.session.current_user()
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub async fn login(&mut self, email: &str, password: &str) -> anyhow::Result<CurrentUser> {
        let response = self
            .client
            .login(email, password)
            .await
            .context("Login failed")?;

        let user = self
            .session
            .login(&response.access_token)
            .context("Server issued an unusable token")?;
        self.client.set_token(self.session.raw_token());

        tracing::info!(user_id = %user.id, expires_in = response.expires_in, "Signed in");
        Ok(user)
    }

    /// Forget the local session. The server is told first, but its answer
    /// does not block signing out.
    pub async fn logout(&mut self) {
        if self.client.has_token() {
            if let Err(e) = self.client.logout().await {
                tracing::warn!(error = %e, "Server logout failed; clearing local session anyway");
            }
        }
        self.session.logout();
        self.client.set_token(None);
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Run `path` through the guard, following redirects, and return the
    /// view to show plus the redirect trail.
    pub fn navigate(&self, path: &str) -> anyhow::Result<(View, Vec<View>)> {
        let mut trail = Vec::new();
        let mut target = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            match resolve(&target, self.session.snapshot()) {
                GuardDecision::Render(view) => return Ok((view, trail)),
                GuardDecision::Redirect(view) => {
                    tracing::debug!(from = %target, to = %view.path(), "Redirected");
                    trail.push(view);
                    target = view.path();
                }
                GuardDecision::Loading => anyhow::bail!("Session is still loading"),
            }
        }
        anyhow::bail!("Too many redirects for {path}")
    }

    /// Navigate to `path` and render the resulting view.
    pub async fn open(
        &mut self,
        path: &str,
        patients: &PatientFilter,
        reminders: &ReminderFilter,
    ) -> anyhow::Result<String> {
        let (view, trail) = self.navigate(path)?;

        let mut out = String::new();
        if let Some(last) = trail.last() {
            out.push_str(&format!("-> {}\n\n", last.path()));
        }

        let body = match view {
            View::Login => render::login_prompt(),
            View::Dashboard => {
                let result = self.client.dashboard().await;
                let stats = self.call(result)?;
                render::dashboard(&stats)
            }
            View::Patients => {
                let result = self.client.patients(patients).await;
                let list = self.call(result)?;
                render::patient_table(&list)
            }
            View::AddPatient => render::add_patient_form(),
            View::PatientDetail(id) => {
                let result = self.client.patient(id).await;
                let patient = self.call(result)?;
                let result = self.client.patient_reminders(id).await;
                let history = self.call(result)?;
                render::patient_detail(&patient, &history)
            }
            View::Reminders => {
                let result = self.client.reminders(reminders).await;
                let list = self.call(result)?;
                render::reminder_table(&list)
            }
            View::Profile => {
                let result = self.client.profile().await;
                let profile = self.call(result)?;
                let result = self.client.notifications().await;
                let notifications = self.call(result)?;
                render::profile(&profile, &notifications)
            }
        };

        out.push_str(&body);
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub async fn resend_reminder(&mut self, id: DbId) -> anyhow::Result<String> {
        self.require_session()?;
        let result = self.client.resend_reminder(id).await;
        let reminder = self.call(result)?;
        tracing::info!(reminder_id = id, "Reminder resent");
        Ok(render::reminder_resent(&reminder))
    }

    /// Validate locally, then submit. Returns the detail view of the new
    /// patient.
    pub async fn add_patient(&mut self, input: CreatePatient) -> anyhow::Result<String> {
        self.require_session()?;
        input.validate(chrono::Utc::now().date_naive())?;

        let result = self.client.create_patient(&input).await;
        let patient = self.call(result)?;
        tracing::info!(patient_id = patient.id, "Patient added");
        Ok(render::patient_detail(&patient, &[]))
    }

    pub async fn edit_patient(&mut self, id: DbId, input: UpdatePatient) -> anyhow::Result<String> {
        self.require_session()?;
        input.validate()?;

        let result = self.client.update_patient(id, &input).await;
        let patient = self.call(result)?;
        let result = self.client.patient_reminders(id).await;
        let history = self.call(result)?;
        Ok(render::patient_detail(&patient, &history))
    }

    pub async fn delete_patient(&mut self, id: DbId) -> anyhow::Result<String> {
        self.require_session()?;
        let result = self.client.delete_patient(id).await;
        self.call(result)?;
        tracing::info!(patient_id = id, "Patient deleted");
        Ok(format!("Patient #{id} deleted along with their reminders."))
    }

    /// Validate locally, then submit. The session token keeps the old name
    /// and email until the next login.
    pub async fn edit_profile(&mut self, input: UpdateProfile) -> anyhow::Result<String> {
        self.require_session()?;
        input.validate()?;

        let result = self.client.update_profile(&input).await;
        let profile = self.call(result)?;
        let result = self.client.notifications().await;
        let notifications = self.call(result)?;
        tracing::info!(
            password_changed = input.wants_password_change(),
            "Profile updated"
        );

        let mut out = render::profile(&profile, &notifications);
        let stale = self
            .current_user()
            .is_some_and(|u| u.name != profile.name || u.email != profile.email);
        if stale {
            out.push_str("\n\nSign in again to refresh the name shown by `whoami`.");
        }
        Ok(out)
    }

    pub async fn update_notifications(
        &mut self,
        input: UpdateNotificationSettings,
    ) -> anyhow::Result<String> {
        self.require_session()?;
        if input == UpdateNotificationSettings::default() {
            anyhow::bail!("No notification settings given; pass --on or --off");
        }

        let result = self.client.update_notifications(&input).await;
        let notifications = self.call(result)?;
        let result = self.client.profile().await;
        let profile = self.call(result)?;
        tracing::info!("Notification settings updated");
        Ok(render::profile(&profile, &notifications))
    }

    // ---- private helpers ----

    fn require_session(&self) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!(render::login_prompt());
        }
        Ok(())
    }

    /// Surface an API result. A 401 means the stored token is no longer
    /// accepted, so the local session is dropped as well.
    fn call<T>(&mut self, result: Result<T, ClientError>) -> anyhow::Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                tracing::info!(error = %e, "Token rejected by server; signing out");
                self.session.logout();
                self.client.set_token(None);
                Err(anyhow::anyhow!("Session expired. {}", render::login_prompt()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
