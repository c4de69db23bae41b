//! RemindCare console
//!
//! Terminal client for the RemindCare API: sign in, browse the dashboard,
//! roster, and reminder queue, and act on them.

use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use remindcare_core::followup::AppointmentType;
use remindcare_core::patient::{CreatePatient, PatientSortKey, UpdatePatient};
use remindcare_core::profile::{UpdateNotificationSettings, UpdateProfile};
use remindcare_core::query::SortDirection;
use remindcare_core::types::{Date, DbId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remindcare_console::app::App;
use remindcare_console::client::{PatientFilter, ReminderFilter};
use remindcare_console::config::ConsoleConfig;
use remindcare_console::render;

#[derive(Parser, Debug)]
#[command(name = "remindcare")]
#[command(version, about = "RemindCare patient reminder console", long_about = None)]
struct Cli {
    /// API server URL (overrides REMINDCARE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (falls back to REMINDCARE_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in staff member
    Whoami,
    /// Open a view by path, e.g. /dashboard, /patients/3, /reminders
    Open {
        #[arg(default_value = "/dashboard")]
        path: String,

        /// Free-text search over names, phones, emails, and messages
        #[arg(short, long)]
        search: Option<String>,

        /// Appointment type on /patients, reminder status on /reminders
        #[arg(long)]
        status: Option<String>,

        /// Roster sort field (/patients only)
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Resend a reminder
    Resend {
        #[arg(value_name = "REMINDER_ID")]
        id: DbId,
    },
    /// Add a patient to the roster
    AddPatient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Appointment date, YYYY-MM-DD
        #[arg(long)]
        date: Date,
        /// Appointment type, e.g. general-checkup or "Lab test review"
        #[arg(long = "type")]
        appointment_type: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Edit a patient's contact details or notes
    EditPatient {
        #[arg(value_name = "PATIENT_ID")]
        id: DbId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a patient and their reminders
    DeletePatient {
        #[arg(value_name = "PATIENT_ID")]
        id: DbId,
    },
    /// Update your name and email, and optionally your password
    EditProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, requires = "new_password")]
        current_password: Option<String>,
        #[arg(long, requires = "current_password")]
        new_password: Option<String>,
        /// Repeat of the new password (defaults to --new-password)
        #[arg(long, requires = "new_password")]
        confirm_password: Option<String>,
    },
    /// Turn notification settings on or off
    Notifications {
        #[arg(long, value_enum, value_delimiter = ',')]
        on: Vec<NotificationKind>,
        #[arg(long, value_enum, value_delimiter = ',')]
        off: Vec<NotificationKind>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum NotificationKind {
    Email,
    Sms,
    Summary,
    Failed,
}

/// Fold `--on`/`--off` flags into a partial update. A setting named in both
/// lists is an error.
fn notification_update(
    on: &[NotificationKind],
    off: &[NotificationKind],
) -> anyhow::Result<UpdateNotificationSettings> {
    if let Some(kind) = on.iter().find(|k| off.contains(k)) {
        anyhow::bail!("{kind:?} is turned both on and off");
    }

    let mut update = UpdateNotificationSettings::default();
    let flags = on.iter().map(|k| (k, true)).chain(off.iter().map(|k| (k, false)));
    for (kind, value) in flags {
        let slot = match kind {
            NotificationKind::Email => &mut update.email_notifications,
            NotificationKind::Sms => &mut update.sms_notifications,
            NotificationKind::Summary => &mut update.reminder_summary,
            NotificationKind::Failed => &mut update.failed_reminders,
        };
        *slot = Some(value);
    }
    Ok(update)
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortField {
    LastAppointment,
    NextFollowup,
}

impl From<SortField> for PatientSortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::LastAppointment => PatientSortKey::LastAppointment,
            SortField::NextFollowup => PatientSortKey::NextFollowup,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so view output stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "remindcare_console=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    tracing::debug!(api_url = %config.api_url, home = %config.home.display(), "Loaded console configuration");

    let mut app = App::new(&config);

    let output = match cli.command {
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => std::env::var("REMINDCARE_PASSWORD")
                    .context("No password given; pass --password or set REMINDCARE_PASSWORD")?,
            };
            let user = app.login(&email, &password).await?;
            format!("Signed in as {} ({})", user.name, user.role)
        }
        Command::Logout => {
            app.logout().await;
            "Signed out.".to_string()
        }
        Command::Whoami => render::whoami(app.current_user()),
        Command::Open {
            path,
            search,
            status,
            sort,
            desc,
        } => {
            let direction = desc.then_some(SortDirection::Desc);
            let patients = PatientFilter {
                search: search.clone(),
                appointment_type: status.clone(),
                sort: sort.map(PatientSortKey::from),
                direction,
            };
            let reminders = ReminderFilter {
                search,
                status,
                direction,
            };
            app.open(&path, &patients, &reminders).await?
        }
        Command::Resend { id } => app.resend_reminder(id).await?,
        Command::AddPatient {
            name,
            email,
            phone,
            date,
            appointment_type,
            notes,
        } => {
            let appointment_type = AppointmentType::parse(&appointment_type).with_context(|| {
                let known: Vec<&str> = AppointmentType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Unknown appointment type '{appointment_type}'; expected one of {}",
                    known.join(", ")
                )
            })?;
            app.add_patient(CreatePatient {
                name,
                email,
                phone,
                appointment_date: date,
                appointment_type,
                notes,
            })
            .await?
        }
        Command::EditPatient {
            id,
            name,
            email,
            phone,
            notes,
        } => {
            app.edit_patient(
                id,
                UpdatePatient {
                    name,
                    email,
                    phone,
                    notes,
                },
            )
            .await?
        }
        Command::DeletePatient { id } => app.delete_patient(id).await?,
        Command::EditProfile {
            name,
            email,
            current_password,
            new_password,
            confirm_password,
        } => {
            let new_password = new_password.unwrap_or_default();
            let confirm_password = confirm_password.unwrap_or_else(|| new_password.clone());
            app.edit_profile(UpdateProfile {
                name,
                email,
                current_password: current_password.unwrap_or_default(),
                new_password,
                confirm_password,
            })
            .await?
        }
        Command::Notifications { on, off } => {
            app.update_notifications(notification_update(&on, &off)?)
                .await?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_fold_into_partial_update() {
        let update =
            notification_update(&[NotificationKind::Sms], &[NotificationKind::Summary]).unwrap();
        assert_eq!(
            update,
            UpdateNotificationSettings {
                sms_notifications: Some(true),
                reminder_summary: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn same_setting_on_and_off_is_rejected() {
        assert!(notification_update(&[NotificationKind::Email], &[NotificationKind::Email]).is_err());
    }

    #[test]
    fn cli_parses_profile_commands() {
        let cli = Cli::try_parse_from([
            "remindcare",
            "notifications",
            "--on",
            "sms,failed",
            "--off",
            "email",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Notifications { ref on, ref off }
                if on == &[NotificationKind::Sms, NotificationKind::Failed]
                    && off == &[NotificationKind::Email]
        ));

        let missing_current = Cli::try_parse_from([
            "remindcare",
            "edit-profile",
            "--name",
            "Dr. Jane Smith",
            "--email",
            "doctor@example.com",
            "--new-password",
            "new-password",
        ]);
        assert!(missing_current.is_err());
    }
}
