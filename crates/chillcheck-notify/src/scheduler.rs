use crate::content::{generate_content, urgent_item_count, ReminderContent};
use chillcheck_core::models::FridgeItem;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Reminder time {hour}:{minute:02} is not a valid time of day")]
    InvalidFireTime { hour: u32, minute: u32 },

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// The OS notification seam. The app core never talks to platform APIs
/// directly; whatever delivers the alerts implements this. The only
/// cancellation primitive is cancel-everything - matching what the platform
/// actually offers.
#[cfg_attr(test, mockall::automock)]
pub trait ReminderBackend {
    /// Ask the user for permission to deliver reminders. Fires at most one
    /// prompt; the answer comes back synchronously here.
    fn request_permission(&self) -> crate::Result<bool>;

    /// Queue a reminder for the given instant
    fn schedule(
        &self,
        at: DateTime<Utc>,
        content: &ReminderContent,
        badge: usize,
    ) -> crate::Result<()>;

    /// Drop every pending reminder
    fn cancel_all(&self);
}

/// Next instant the daily reminder should fire: today at HH:MM if that is
/// still ahead, otherwise tomorrow. Hour/minute are validated upstream in
/// Settings, but a bad pair still errors rather than panics.
pub fn next_fire_time(hour: u32, minute: u32, now: DateTime<Utc>) -> crate::Result<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(NotifyError::InvalidFireTime { hour, minute })?;

    let today = now.date_naive().and_time(time).and_utc();
    if today > now {
        Ok(today)
    } else {
        Ok(today + Duration::days(1))
    }
}

/// Drives the reminder lifecycle against a backend. Content is regenerated
/// from the live item list on every call - never cached.
pub struct ReminderScheduler<B> {
    backend: B,
}

impl<B: ReminderBackend> ReminderScheduler<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Turn reminders on. Returns false when permission was denied, in which
    /// case nothing gets scheduled and the caller should flip the settings
    /// flag off. No retry loop - the user said no.
    pub fn enable(
        &self,
        items: &[FridgeItem],
        hour: u32,
        minute: u32,
        now: DateTime<Utc>,
    ) -> crate::Result<bool> {
        if !self.backend.request_permission()? {
            warn!("Reminder permission denied, feature stays off");
            return Ok(false);
        }

        self.reschedule(items, hour, minute, now)?;
        Ok(true)
    }

    /// Cancel everything pending
    pub fn disable(&self) {
        self.backend.cancel_all();
        info!("All reminders cancelled");
    }

    /// Cancel-then-schedule: the daily reminder with fresh content for the
    /// next fire time, plus a generic one the day after (future fridge state
    /// is unknowable today). Called whenever items change, the reminder time
    /// changes, or the app comes back to the foreground.
    pub fn reschedule(
        &self,
        items: &[FridgeItem],
        hour: u32,
        minute: u32,
        now: DateTime<Utc>,
    ) -> crate::Result<()> {
        self.backend.cancel_all();

        let fire_at = next_fire_time(hour, minute, now)?;
        let content = generate_content(items, now.date_naive());
        let badge = urgent_item_count(items, now.date_naive());
        self.backend.schedule(fire_at, &content, badge)?;
        info!("Reminder scheduled for {}: {}", fire_at, content.body);

        let next_day = ReminderContent {
            title: crate::APP_NAME.to_string(),
            body: "Time to check your fridge! Tap to see what needs attention today.".to_string(),
        };
        self.backend.schedule(fire_at + Duration::days(1), &next_day, 1)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_next_fire_time_later_today() {
        let now = at(2025, 7, 20, 6, 30);
        let fire = next_fire_time(8, 0, now).unwrap();
        assert_eq!(fire, at(2025, 7, 20, 8, 0));
    }

    #[test]
    fn test_next_fire_time_rolls_to_tomorrow() {
        let now = at(2025, 7, 20, 9, 15);
        let fire = next_fire_time(8, 0, now).unwrap();
        assert_eq!(fire, at(2025, 7, 21, 8, 0));
    }

    #[test]
    fn test_fire_time_exactly_now_rolls_over() {
        let now = at(2025, 7, 20, 8, 0);
        let fire = next_fire_time(8, 0, now).unwrap();
        assert_eq!(fire, at(2025, 7, 21, 8, 0));
    }

    #[test]
    fn test_invalid_fire_time_errors() {
        let now = at(2025, 7, 20, 8, 0);
        assert!(next_fire_time(24, 0, now).is_err());
    }

    #[test]
    fn test_reschedule_cancels_then_schedules_two_reminders() {
        let mut backend = MockReminderBackend::new();
        backend.expect_cancel_all().times(1).return_const(());
        backend.expect_schedule().times(2).returning(|_, _, _| Ok(()));

        let scheduler = ReminderScheduler::new(backend);
        let items = vec![FridgeItem::new("Milk", 1)];
        scheduler
            .reschedule(&items, 8, 0, at(2025, 7, 20, 6, 0))
            .unwrap();
    }

    #[test]
    fn test_enable_stops_when_permission_denied() {
        let mut backend = MockReminderBackend::new();
        backend.expect_request_permission().times(1).returning(|| Ok(false));
        backend.expect_cancel_all().times(0);
        backend.expect_schedule().times(0);

        let scheduler = ReminderScheduler::new(backend);
        let granted = scheduler
            .enable(&[], 8, 0, at(2025, 7, 20, 6, 0))
            .unwrap();
        assert!(!granted);
    }

    #[test]
    fn test_enable_schedules_when_permission_granted() {
        let mut backend = MockReminderBackend::new();
        backend.expect_request_permission().times(1).returning(|| Ok(true));
        backend.expect_cancel_all().times(1).return_const(());
        backend.expect_schedule().times(2).returning(|_, _, _| Ok(()));

        let scheduler = ReminderScheduler::new(backend);
        let granted = scheduler
            .enable(&[], 8, 0, at(2025, 7, 20, 6, 0))
            .unwrap();
        assert!(granted);
    }

    #[test]
    fn test_disable_cancels_everything() {
        let mut backend = MockReminderBackend::new();
        backend.expect_cancel_all().times(1).return_const(());

        let scheduler = ReminderScheduler::new(backend);
        scheduler.disable();
    }
}
