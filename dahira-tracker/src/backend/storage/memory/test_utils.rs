//! Test utilities module for consistent test infrastructure
//!
//! Each `TestEnvironment` owns an isolated store, so tests never observe
//! each other's writes. Password hashing uses the cheapest Argon2 cost.

use anyhow::Result;
use std::sync::Arc;

use super::connection::{DataSet, MemoryConnection};
use super::event_repository::EventRepository;
use super::member_repository::MemberRepository;
use super::tour_schedule_repository::TourScheduleRepository;
use super::user_repository::UserRepository;
use crate::backend::config::DahiraConfig;
use crate::backend::domain::auth_service::AuthService;
use crate::backend::domain::credentials::{Argon2Verifier, CredentialVerifier};
use crate::backend::domain::event_service::EventService;
use crate::backend::domain::export_service::ExportService;
use crate::backend::domain::member_service::MemberService;
use crate::backend::domain::stats_service::StatsService;
use crate::backend::domain::tour_service::TourService;
use crate::backend::domain::user_service::UserService;
use crate::backend::seed::demo_data;

pub struct TestEnvironment {
    pub connection: MemoryConnection,
    pub config: Arc<DahiraConfig>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl TestEnvironment {
    /// Empty store with test configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(DahiraConfig::for_testing(), false).await
    }

    /// Store seeded with the demo records
    pub async fn with_demo_data() -> Result<Self> {
        Self::with_config(DahiraConfig::for_testing(), true).await
    }

    pub async fn with_config(config: DahiraConfig, seed: bool) -> Result<Self> {
        let verifier: Arc<dyn CredentialVerifier> = Arc::new(Argon2Verifier::new(&config.password_hashing)?);
        let data = if seed {
            demo_data(verifier.as_ref())?
        } else {
            DataSet::default()
        };
        Ok(Self {
            connection: MemoryConnection::with_data(data),
            config: Arc::new(config),
            verifier,
        })
    }

    pub fn member_service(&self) -> MemberService {
        MemberService::new(
            Arc::new(MemberRepository::new(self.connection.clone())),
            self.config.clone(),
        )
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            Arc::new(UserRepository::new(self.connection.clone())),
            self.verifier.clone(),
        )
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            Arc::new(UserRepository::new(self.connection.clone())),
            Arc::new(MemberRepository::new(self.connection.clone())),
            self.verifier.clone(),
            self.config.clone(),
        )
    }

    pub fn event_service(&self) -> EventService {
        EventService::new(Arc::new(EventRepository::new(self.connection.clone())))
    }

    pub fn stats_service(&self) -> StatsService {
        StatsService::new(
            Arc::new(MemberRepository::new(self.connection.clone())),
            Arc::new(EventRepository::new(self.connection.clone())),
            self.config.clone(),
        )
    }

    pub fn tour_service(&self) -> TourService {
        TourService::new(Arc::new(TourScheduleRepository::new(self.connection.clone())))
    }

    pub fn export_service(&self) -> ExportService {
        ExportService::new(self.stats_service())
    }
}
