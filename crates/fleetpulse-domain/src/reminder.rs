//! Maintenance reminders triggered by calendar date or odometer distance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::log::EntryId;
use crate::odometer::OdometerReading;

/// What makes a reminder fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReminderTrigger {
    /// Fires from this day onwards.
    #[serde(rename_all = "camelCase")]
    Date { reminder_date: NaiveDate },
    /// Fires once the odometer reaches this many kilometers.
    #[serde(rename_all = "camelCase")]
    Odometer { reminder_odometer: f64 },
}

/// Fields a caller supplies when creating a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    #[serde(flatten)]
    pub trigger: ReminderTrigger,
    #[serde(default)]
    pub log_type: Option<String>,
    #[serde(default)]
    pub log_id: Option<EntryId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: EntryId,
    #[serde(flatten)]
    pub trigger: ReminderTrigger,
    #[serde(default)]
    pub log_type: Option<String>,
    #[serde(default)]
    pub log_id: Option<EntryId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Outcome of checking one reminder against today's date and the latest odometer reading.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderStatus {
    Inactive,
    DueByDate { days_overdue: i64 },
    UpcomingByDate { days_until: i64 },
    DueByOdometer { km_overdue: f64 },
    UpcomingByOdometer { km_remaining: f64 },
    /// Odometer trigger, but no reading has been recorded yet.
    AwaitingReading,
}

impl ReminderStatus {
    pub fn is_due(&self) -> bool {
        matches!(self, Self::DueByDate { .. } | Self::DueByOdometer { .. })
    }
}

impl Reminder {
    pub fn from_new(id: EntryId, new: NewReminder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            trigger: new.trigger,
            log_type: new.log_type,
            log_id: new.log_id,
            description: new.description,
            category: new.category,
            created_at,
            is_active: true,
        }
    }

    pub fn check(&self, today: NaiveDate, odometer: Option<&OdometerReading>) -> ReminderStatus {
        if !self.is_active {
            return ReminderStatus::Inactive;
        }
        match self.trigger {
            ReminderTrigger::Date { reminder_date } => {
                let days = (today - reminder_date).num_days();
                if days >= 0 {
                    ReminderStatus::DueByDate { days_overdue: days }
                } else {
                    ReminderStatus::UpcomingByDate { days_until: -days }
                }
            }
            ReminderTrigger::Odometer { reminder_odometer } => match odometer {
                Some(current) if current.reading >= reminder_odometer => {
                    ReminderStatus::DueByOdometer {
                        km_overdue: current.reading - reminder_odometer,
                    }
                }
                Some(current) => ReminderStatus::UpcomingByOdometer {
                    km_remaining: reminder_odometer - current.reading,
                },
                None => ReminderStatus::AwaitingReading,
            },
        }
    }

    /// Text shown when the reminder fires.
    pub fn alert_message(&self) -> String {
        fn present(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.is_empty())
        }
        let subject = present(&self.description)
            .or_else(|| present(&self.log_type))
            .unwrap_or("Action");
        format!("Reminder: {subject} is due!")
    }
}

/// A reminder that fired, paired with its status.
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub reminder: Reminder,
    pub status: ReminderStatus,
}

/// Reminders from `reminders` that are due, in their stored order.
pub fn due_reminders(
    reminders: &[Reminder],
    today: NaiveDate,
    odometer: Option<&OdometerReading>,
) -> Vec<DueReminder> {
    reminders
        .iter()
        .filter_map(|reminder| {
            let status = reminder.check(today, odometer);
            status.is_due().then(|| DueReminder {
                reminder: reminder.clone(),
                status,
            })
        })
        .collect()
}
