use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::backend::domain::commands::event::CreateEventCommand;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::DahiraEvent;
use crate::backend::storage::DahiraEventStorage;

/// Service for recording gathering collections
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn DahiraEventStorage>,
}

impl EventService {
    pub fn new(events: Arc<dyn DahiraEventStorage>) -> Self {
        Self { events }
    }

    pub async fn add_event(&self, command: CreateEventCommand) -> Result<DahiraEvent> {
        info!("Recording event hosted by {} on {}", command.host_name, command.date);

        let host_name = command.host_name.trim().to_string();
        if host_name.is_empty() {
            return Err(DahiraError::validation("Host name cannot be empty").into());
        }
        for (label, value) in [
            ("Men total", command.men_total),
            ("Women total", command.women_total),
            ("Social total", command.social_total),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DahiraError::validation(format!("{} cannot be negative", label)).into());
            }
        }

        let event = DahiraEvent {
            id: DahiraEvent::generate_id(),
            date: command.date,
            host_name,
            men_total: command.men_total,
            women_total: command.women_total,
            social_total: command.social_total,
            recorded_by: command.recorded_by,
        };
        self.events.store_event(&event).await?;

        info!("Recorded event {} (total {})", event.id, event.total());
        Ok(event)
    }

    /// All events, most recent first
    pub async fn list_events(&self) -> Result<Vec<DahiraEvent>> {
        let mut events = self.events.list_events().await?;
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }
}
