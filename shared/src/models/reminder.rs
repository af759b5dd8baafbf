//! Reminders derived from the calendar

use serde::{Deserialize, Serialize};

use super::mangsa::{MonthDay, Period};

/// Date label for reminders that apply for the whole period
pub const ONGOING_LABEL: &str = "Berlaku sekarang";

/// What a reminder is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Main activity of the current period
    Mangsa,
    /// Getting ready for the next period
    Preparation,
    /// One farming tip of the current period
    Tip,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ReminderPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    pub id: u32,
    pub kind: ReminderKind,
    pub priority: ReminderPriority,
    pub title: String,
    pub description: String,
    /// None for tips, which hold for the whole period
    pub date: Option<MonthDay>,
    /// "22 Juni" or "Berlaku sekarang"
    pub date_label: String,
}

impl Reminder {
    fn dated(
        id: u32,
        kind: ReminderKind,
        priority: ReminderPriority,
        title: String,
        description: String,
        date: MonthDay,
    ) -> Self {
        Self {
            id,
            kind,
            priority,
            title,
            description,
            date: Some(date),
            date_label: date.to_string(),
        }
    }

    fn tip(id: u32, period: &Period, tip: &str) -> Self {
        Self {
            id,
            kind: ReminderKind::Tip,
            priority: ReminderPriority::Low,
            title: format!("Tips Pertanian {}", period.display_name),
            description: tip.to_string(),
            date: None,
            date_label: ONGOING_LABEL.to_string(),
        }
    }
}

/// Main activity, hand-over and tip reminders for `period`
pub fn auto_reminders(period: &Period, next: &Period) -> Vec<Reminder> {
    let mut reminders = vec![
        Reminder::dated(
            1,
            ReminderKind::Mangsa,
            ReminderPriority::High,
            format!("{} - Aktivitas Utama", period.display_name),
            period.main_activity.to_string(),
            period.window.start,
        ),
        Reminder::dated(
            2,
            ReminderKind::Preparation,
            ReminderPriority::Medium,
            format!("Persiapan {}", next.display_name),
            format!("Siapkan untuk transisi ke {}", next.display_name),
            next.window.start,
        ),
    ];

    reminders.extend(
        period
            .tips
            .iter()
            .zip(3u32..)
            .map(|(tip, id)| Reminder::tip(id, period, tip)),
    );

    reminders
}
