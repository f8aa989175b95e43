use crate::PostgresStore;
use crate::error::store_error;
use crate::rows::EventSettingsRow;
use async_trait::async_trait;
use party_rsvp_core::providers::EventSettingsRepository;
use party_rsvp_core::{EventSettings, Result, RsvpError};

#[async_trait]
impl EventSettingsRepository for PostgresStore {
    async fn get_event_settings(&self) -> Result<EventSettings> {
        let row: Option<EventSettingsRow> = sqlx::query_as(
            r"
            SELECT title, event_date, party_time, intro_text, location
            FROM event_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("get_event_settings", &e))?;

        row.map(EventSettings::from)
            .ok_or_else(|| RsvpError::not_found("Event settings", 1))
    }

    async fn replace_event_settings(&self, settings: &EventSettings) -> Result<EventSettings> {
        let row: EventSettingsRow = sqlx::query_as(
            r"
            INSERT INTO event_settings (id, title, event_date, party_time, intro_text, location)
            VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                event_date = EXCLUDED.event_date,
                party_time = EXCLUDED.party_time,
                intro_text = EXCLUDED.intro_text,
                location = EXCLUDED.location,
                updated_at = now()
            RETURNING title, event_date, party_time, intro_text, location
            ",
        )
        .bind(&settings.title)
        .bind(&settings.event_date)
        .bind(&settings.party_time)
        .bind(&settings.intro_text)
        .bind(&settings.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("replace_event_settings", &e))?;

        tracing::info!("Event settings updated");
        Ok(row.into())
    }
}
