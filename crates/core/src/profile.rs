//! Staff profile and notification preferences.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{validate_email, validate_name, validate_password};

/// Which notifications a staff member receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    /// Daily summary of the reminder queue.
    pub reminder_summary: bool,
    /// Alert whenever a reminder fails to deliver.
    pub failed_reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            reminder_summary: true,
            failed_reminders: true,
        }
    }
}

/// Partial update of [`NotificationSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateNotificationSettings {
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub reminder_summary: Option<bool>,
    pub failed_reminders: Option<bool>,
}

impl UpdateNotificationSettings {
    pub fn apply_to(self, settings: &mut NotificationSettings) {
        if let Some(v) = self.email_notifications {
            settings.email_notifications = v;
        }
        if let Some(v) = self.sms_notifications {
            settings.sms_notifications = v;
        }
        if let Some(v) = self.reminder_summary {
            settings.reminder_summary = v;
        }
        if let Some(v) = self.failed_reminders {
            settings.failed_reminders = v;
        }
    }
}

/// Profile form: name and email are always submitted; the password section
/// is optional and only applies when `new_password` is non-empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl UpdateProfile {
    pub fn wants_password_change(&self) -> bool {
        !self.new_password.is_empty()
    }

    /// Field rules. Checking `current_password` against the stored hash is
    /// the caller's job.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;

        if self.wants_password_change() {
            if self.current_password.is_empty() {
                return Err(CoreError::validation(
                    "Current password is required to change password",
                ));
            }
            validate_password(&self.new_password)?;
            if self.confirm_password != self.new_password {
                return Err(CoreError::validation("Passwords do not match"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form() -> UpdateProfile {
        UpdateProfile {
            name: "Dr. Jane Smith".into(),
            email: "doctor@example.com".into(),
            current_password: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
        }
    }

    #[test]
    fn profile_without_password_change() {
        assert!(form().validate().is_ok());
        assert!(!form().wants_password_change());
    }

    #[test]
    fn password_change_needs_current_password() {
        let mut f = form();
        f.new_password = "new-password".into();
        f.confirm_password = "new-password".into();
        assert_matches!(f.validate(), Err(CoreError::Validation(m)) if m.contains("Current password"));

        f.current_password = "password".into();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn password_change_needs_matching_confirmation() {
        let mut f = form();
        f.current_password = "password".into();
        f.new_password = "new-password".into();
        f.confirm_password = "new-passwort".into();
        assert_matches!(f.validate(), Err(CoreError::Validation(m)) if m == "Passwords do not match");
    }

    #[test]
    fn new_password_has_minimum_length() {
        let mut f = form();
        f.current_password = "password".into();
        f.new_password = "short".into();
        f.confirm_password = "short".into();
        assert!(f.validate().is_err());
    }

    #[test]
    fn notification_update_is_partial() {
        let mut settings = NotificationSettings::default();
        UpdateNotificationSettings {
            sms_notifications: Some(true),
            ..Default::default()
        }
        .apply_to(&mut settings);

        assert!(settings.sms_notifications);
        assert!(settings.email_notifications);
        assert!(settings.failed_reminders);
    }
}
