//! # Backend Module
//!
//! Contains all non-UI logic for the Dahira dues tracker.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business rules for members, dues, events and the host rotation
//! - **Storage**: The in-process data store behind async storage traits
//! - **IO**: The DTO facade exposed to a presentation layer
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer
//!     ↓
//! IO Layer (DahiraApi, mappers)
//!     ↓
//! Domain Layer (services, planning, aggregation)
//!     ↓
//! Storage Layer (MemoryConnection, repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod seed;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::backend::config::DahiraConfig;
use crate::backend::domain::{
    Argon2Verifier, AuthService, CredentialVerifier, EventService, ExportService, MemberService, StatsService,
    TourService, UserService,
};
use crate::backend::storage::{
    DataSet, EventRepository, MemberRepository, MemoryConnection, TourScheduleRepository, UserRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DahiraConfig>,
    pub connection: MemoryConnection,
    pub member_service: MemberService,
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub stats_service: StatsService,
    pub tour_service: TourService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: DahiraConfig) -> Result<AppState> {
    let config = Arc::new(config);
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(Argon2Verifier::new(&config.password_hashing)?);

    info!("Setting up data store");
    let data = if config.seed_demo_data {
        info!("Seeding demo data");
        seed::demo_data(verifier.as_ref())?
    } else {
        DataSet::default()
    };
    let connection = MemoryConnection::with_data(data);

    let users = Arc::new(UserRepository::new(connection.clone()));
    let members = Arc::new(MemberRepository::new(connection.clone()));
    let events = Arc::new(EventRepository::new(connection.clone()));
    let schedules = Arc::new(TourScheduleRepository::new(connection.clone()));

    info!("Setting up domain services");
    let member_service = MemberService::new(members.clone(), config.clone());
    let user_service = UserService::new(users.clone(), verifier.clone());
    let auth_service = AuthService::new(users, members.clone(), verifier, config.clone());
    let event_service = EventService::new(events.clone());
    let stats_service = StatsService::new(members, events, config.clone());
    let tour_service = TourService::new(schedules);
    let export_service = ExportService::new(stats_service.clone());

    info!("Backend ready for {}", config.association_name);
    Ok(AppState {
        config,
        connection,
        member_service,
        user_service,
        auth_service,
        event_service,
        stats_service,
        tour_service,
        export_service,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_with_demo_data() {
        let state = initialize_backend(DahiraConfig::for_testing()).await.unwrap();
        let data = state.connection.snapshot().await;
        assert_eq!(data.users.len(), 3);
        assert_eq!(data.members.len(), 3);
        assert_eq!(data.events.len(), 1);
        assert!(data.schedules.is_empty());
        assert!(data.users.iter().all(|u| u.password_hash.is_some()));
    }

    #[tokio::test]
    async fn test_initialize_without_seed() {
        let config = DahiraConfig {
            seed_demo_data: false,
            ..DahiraConfig::for_testing()
        };
        let state = initialize_backend(config).await.unwrap();
        assert!(state.member_service.list_members().await.unwrap().is_empty());
        assert!(state.user_service.list_users().await.unwrap().is_empty());
    }
}
