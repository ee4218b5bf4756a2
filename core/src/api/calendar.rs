//! Calendar reminders.

use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::types::{Reminder, ReminderCreate, ReminderUpdate};

pub struct CalendarApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> CalendarApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get_all(&self) -> Result<Vec<Reminder>> {
        self.executor
            .execute("/calendar/reminders", RequestOptions::get())
            .await
    }

    pub async fn create(&self, reminder: &ReminderCreate) -> Result<Reminder> {
        self.executor
            .execute("/calendar/reminders", RequestOptions::post_json(reminder)?)
            .await
    }

    pub async fn update(&self, id: i64, update: &ReminderUpdate) -> Result<Reminder> {
        self.executor
            .execute(
                &format!("/calendar/reminders/{id}"),
                RequestOptions::put_json(update)?,
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.executor
            .execute_discard(&format!("/calendar/reminders/{id}"), RequestOptions::delete())
            .await
    }

    /// The only way to set a reminder's completion flag.
    pub async fn mark_completed(&self, id: i64) -> Result<Reminder> {
        self.executor
            .execute(
                &format!("/calendar/reminders/{id}/complete"),
                RequestOptions::post_empty(),
            )
            .await
    }
}
