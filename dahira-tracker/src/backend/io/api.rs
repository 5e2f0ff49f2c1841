//! # In-process API
//!
//! `DahiraApi` is what a presentation layer talks to. Every operation takes
//! and returns the DTOs of the `shared` crate, logs the call, and leaves the
//! business rules to the domain services.
//!
//! Failures keep their [`DahiraError`] kind so callers can match on it with
//! [`crate::backend::domain::error_kind`].

use anyhow::Result;
use log::{error, info};
use std::collections::HashMap;

use crate::backend::domain::access::{landing_section, sections_for};
use crate::backend::domain::auth_service::Identity;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{Contribution, TourSchedule as DomainSchedule, YearMonth};
use crate::backend::domain::planning::{PlanningDraft, PlanningDuration};
use crate::backend::domain::reminder::balance_reminder;
use crate::backend::domain::stats_service::member_stats;
use crate::backend::domain::tour_service::PendingDeletion;
use crate::backend::io::mappers::{EventMapper, IdentityMapper, MemberMapper, StatsMapper, TourMapper, UserMapper};
use crate::backend::AppState;
use shared::{
    AddContributionRequest, AddContributionResponse, BalanceReminder, Contribution as SharedContribution,
    ContributionHistoryEntry, CreateDahiraEventRequest, CreateMemberRequest, CreateUserRequest, DahiraEvent,
    DashboardStats, ExportDataResponse, GoogleLoginRequest, LoginRequest, LoginResponse, Member, MemberSearchRequest,
    MemberStats, MonthlyReportResponse, PlanningRequest, PlanningResponse, Role, SaveTourSchedulesRequest,
    SaveTourSchedulesResponse, Section, TourSchedule, UpdateMemberRequest, UpdateUserRoleRequest, User,
};

pub const CONTRIBUTION_SAVED_MESSAGE: &str = "Cotisation enregistrée avec succès !";
pub const PLANNING_SAVED_MESSAGE: &str = "Planning enregistré avec succès !";

#[derive(Clone)]
pub struct DahiraApi {
    state: AppState,
}

impl DahiraApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Email + password or phone + code. No match is `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        info!("login - identifier: {}", request.identifier);
        match self.state.auth_service.login(&request.identifier, &request.password).await? {
            Some(identity) => Ok(IdentityMapper::to_login_response(&identity, None, false)),
            None => Err(DahiraError::InvalidCredentials.into()),
        }
    }

    pub async fn login_with_google(&self, request: GoogleLoginRequest) -> Result<LoginResponse> {
        info!("login_with_google - email: {}", request.email);
        let outcome = self.state.auth_service.login_with_google(&request.email).await?;
        let identity = Identity::SystemAccount(outcome.user);
        Ok(IdentityMapper::to_login_response(
            &identity,
            Some(&outcome.link),
            outcome.created,
        ))
    }

    pub fn sections_for(&self, role: Role) -> Vec<Section> {
        sections_for(role)
    }

    pub fn landing_section(&self, role: Role) -> Section {
        landing_section(role)
    }

    // -----------------------------------------------------------------------
    // Members and contributions
    // -----------------------------------------------------------------------

    pub async fn get_members(&self) -> Result<Vec<Member>> {
        let members = self.state.member_service.list_members().await?;
        Ok(members.into_iter().map(MemberMapper::to_dto).collect())
    }

    pub async fn get_member_by_id(&self, member_id: &str) -> Result<Option<Member>> {
        let member = self.state.member_service.get_member(member_id).await?;
        Ok(member.map(MemberMapper::to_dto))
    }

    pub async fn add_member(&self, request: CreateMemberRequest) -> Result<Member> {
        info!("add_member - request: {:?}", request);
        let member = self
            .state
            .member_service
            .add_member(MemberMapper::to_create_command(request))
            .await
            .map_err(log_failure("add member"))?;
        Ok(MemberMapper::to_dto(member))
    }

    pub async fn update_member(&self, member_id: &str, request: UpdateMemberRequest) -> Result<Member> {
        info!("update_member {} - request: {:?}", member_id, request);
        let member = self
            .state
            .member_service
            .update_member(member_id, MemberMapper::to_update_command(request))
            .await
            .map_err(log_failure("update member"))?;
        Ok(MemberMapper::to_dto(member))
    }

    pub async fn search_members(&self, request: MemberSearchRequest) -> Result<Vec<Member>> {
        let members = self
            .state
            .member_service
            .search_members(MemberMapper::to_search_query(request))
            .await?;
        Ok(members.into_iter().map(MemberMapper::to_dto).collect())
    }

    /// Record a payment and return the member's refreshed progress
    pub async fn add_contribution(&self, request: AddContributionRequest) -> Result<AddContributionResponse> {
        info!("add_contribution - request: {:?}", request);
        let command = MemberMapper::to_contribution_command(request)?;
        let contribution = self
            .state
            .member_service
            .add_contribution(command)
            .await
            .map_err(log_failure("add contribution"))?;
        let stats = self.state.stats_service.member_stats(&contribution.member_id).await?;

        Ok(AddContributionResponse {
            contribution: MemberMapper::contribution_to_dto(contribution),
            stats: StatsMapper::member_stats_to_dto(stats),
            success_message: CONTRIBUTION_SAVED_MESSAGE.to_string(),
        })
    }

    pub async fn get_all_contributions(&self) -> Result<Vec<SharedContribution>> {
        let contributions = self.state.member_service.list_all_contributions().await?;
        Ok(contributions
            .into_iter()
            .map(MemberMapper::contribution_to_dto)
            .collect())
    }

    /// A member's payments, newest first, with display names
    pub async fn member_history(&self, member_id: &str) -> Result<Vec<ContributionHistoryEntry>> {
        let history = self.state.member_service.member_history(member_id).await?;
        self.with_names(history).await
    }

    /// Latest payments across all members, with display names
    pub async fn recent_history(&self) -> Result<Vec<ContributionHistoryEntry>> {
        let recent = self.state.stats_service.recent_history().await?;
        self.with_names(recent).await
    }

    pub async fn balance_reminder(&self, member_id: &str) -> Result<BalanceReminder> {
        info!("balance_reminder - member: {}", member_id);
        let member = self
            .state
            .member_service
            .get_member(member_id)
            .await?
            .ok_or_else(|| DahiraError::not_found("Member", member_id))?;
        let reminder = balance_reminder(&member, &self.state.config);
        Ok(BalanceReminder {
            member_id: reminder.member_id,
            phone: reminder.phone,
            message: reminder.message,
            url: reminder.url,
        })
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let users = self.state.user_service.list_users().await?;
        Ok(users.into_iter().map(UserMapper::to_dto).collect())
    }

    pub async fn add_user(&self, request: CreateUserRequest) -> Result<User> {
        info!("add_user - email: {}, role: {}", request.email, request.role);
        let user = self
            .state
            .user_service
            .add_user(UserMapper::to_create_command(request))
            .await
            .map_err(log_failure("add user"))?;
        Ok(UserMapper::to_dto(user))
    }

    pub async fn toggle_user_status(&self, user_id: &str) -> Result<User> {
        info!("toggle_user_status - user: {}", user_id);
        let user = self
            .state
            .user_service
            .toggle_user_status(user_id)
            .await
            .map_err(log_failure("toggle user status"))?;
        Ok(UserMapper::to_dto(user))
    }

    pub async fn update_user_role(&self, request: UpdateUserRoleRequest) -> Result<User> {
        info!("update_user_role - user: {}, role: {}", request.user_id, request.role);
        let user = self
            .state
            .user_service
            .update_user_role(&request.user_id, request.role)
            .await
            .map_err(log_failure("update user role"))?;
        Ok(UserMapper::to_dto(user))
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub async fn get_dahira_events(&self) -> Result<Vec<DahiraEvent>> {
        let events = self.state.event_service.list_events().await?;
        Ok(events.into_iter().map(EventMapper::to_dto).collect())
    }

    pub async fn add_dahira_event(&self, request: CreateDahiraEventRequest) -> Result<DahiraEvent> {
        info!("add_dahira_event - request: {:?}", request);
        let command = EventMapper::to_create_command(request)?;
        let event = self
            .state
            .event_service
            .add_event(command)
            .await
            .map_err(log_failure("add event"))?;
        Ok(EventMapper::to_dto(event))
    }

    // -----------------------------------------------------------------------
    // Statistics and exports
    // -----------------------------------------------------------------------

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let stats = self.state.stats_service.dashboard().await?;
        Ok(StatsMapper::dashboard_to_dto(stats))
    }

    pub async fn member_stats(&self, member_id: &str) -> Result<MemberStats> {
        let stats = self.state.stats_service.member_stats(member_id).await?;
        Ok(StatsMapper::member_stats_to_dto(stats))
    }

    /// Progress of every member, in member order
    pub async fn all_member_stats(&self) -> Result<Vec<MemberStats>> {
        let members = self.state.member_service.list_members().await?;
        Ok(members
            .iter()
            .map(|m| StatsMapper::member_stats_to_dto(member_stats(m)))
            .collect())
    }

    pub async fn monthly_contributions(&self) -> Result<MonthlyReportResponse> {
        let report = self.state.stats_service.monthly_contributions().await?;
        Ok(StatsMapper::monthly_report_to_dto(&report))
    }

    pub async fn monthly_events(&self) -> Result<MonthlyReportResponse> {
        let report = self.state.stats_service.monthly_events().await?;
        Ok(StatsMapper::monthly_report_to_dto(&report))
    }

    pub async fn export_monthly_report(&self) -> Result<ExportDataResponse> {
        let export = self.state.export_service.export_monthly_report().await?;
        Ok(ExportDataResponse {
            csv_data: export.csv_data,
            filename: export.filename,
        })
    }

    pub async fn export_member_balances(&self) -> Result<ExportDataResponse> {
        let export = self.state.export_service.export_member_balances().await?;
        Ok(ExportDataResponse {
            csv_data: export.csv_data,
            filename: export.filename,
        })
    }

    // -----------------------------------------------------------------------
    // Tour planning
    // -----------------------------------------------------------------------

    pub async fn get_tour_schedules(&self) -> Result<Vec<TourSchedule>> {
        let schedules = self.state.tour_service.list_tour_schedules().await?;
        Ok(schedules.into_iter().map(TourMapper::to_dto).collect())
    }

    /// Build an editable draft for the requested window
    pub async fn generate_planning(&self, request: PlanningRequest) -> Result<PlanningDraft> {
        info!("generate_planning - request: {:?}", request);
        let start: YearMonth = request.start_month.parse()?;
        let duration = PlanningDuration::try_from(request.duration_months)?;
        self.state.tour_service.generate_planning(start, duration).await
    }

    /// Presentation of a draft with host names resolved
    pub async fn planning_view(&self, draft: &PlanningDraft) -> Result<PlanningResponse> {
        let names = self.member_names().await?;
        Ok(TourMapper::draft_to_dto(draft, &names))
    }

    pub async fn save_planning(&self, draft: &PlanningDraft) -> Result<SaveTourSchedulesResponse> {
        let saved = self.state.tour_service.save_planning(draft).await?;
        Ok(saved_response(saved))
    }

    pub async fn save_tour_schedules(&self, request: SaveTourSchedulesRequest) -> Result<SaveTourSchedulesResponse> {
        info!("save_tour_schedules - {} row(s)", request.rows.len());
        let entries = request
            .rows
            .into_iter()
            .map(TourMapper::to_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let saved = self
            .state
            .tour_service
            .save_tour_schedules(entries)
            .await
            .map_err(log_failure("save tour schedules"))?;
        Ok(saved_response(saved))
    }

    /// Unconfirmed deletion; returns whether a schedule was removed
    pub async fn delete_tour_schedule(&self, schedule_id: &str) -> Result<bool> {
        info!("delete_tour_schedule - id: {}", schedule_id);
        self.state.tour_service.delete_tour_schedule(schedule_id).await
    }

    pub async fn request_schedule_deletion(&self, schedule_id: &str) -> Result<PendingDeletion> {
        info!("request_schedule_deletion - id: {}", schedule_id);
        self.state.tour_service.request_schedule_deletion(schedule_id).await
    }

    pub async fn confirm_schedule_deletion(&self, pending: PendingDeletion) -> Result<TourSchedule> {
        info!("confirm_schedule_deletion - id: {}", pending.schedule().id);
        let removed = self.state.tour_service.confirm_schedule_deletion(pending).await?;
        Ok(TourMapper::to_dto(removed))
    }

    async fn member_names(&self) -> Result<HashMap<String, String>> {
        let members = self.state.member_service.list_members().await?;
        Ok(members.into_iter().map(|m| (m.id.clone(), m.full_name())).collect())
    }

    async fn with_names(&self, contributions: Vec<Contribution>) -> Result<Vec<ContributionHistoryEntry>> {
        let mut entries = Vec::with_capacity(contributions.len());
        for contribution in contributions {
            let member_name = self.state.member_service.member_name(&contribution.member_id).await?;
            let recorded_by_name = self.state.user_service.user_name(&contribution.recorded_by).await?;
            entries.push(ContributionHistoryEntry {
                contribution: MemberMapper::contribution_to_dto(contribution),
                member_name,
                recorded_by_name,
            });
        }
        Ok(entries)
    }
}

fn saved_response(saved: Vec<DomainSchedule>) -> SaveTourSchedulesResponse {
    SaveTourSchedulesResponse {
        saved: saved.into_iter().map(TourMapper::to_dto).collect(),
        success_message: PLANNING_SAVED_MESSAGE.to_string(),
    }
}

fn log_failure(operation: &'static str) -> impl Fn(anyhow::Error) -> anyhow::Error {
    move |e| {
        error!("Failed to {}: {}", operation, e);
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::config::DahiraConfig;
    use crate::backend::domain::errors::error_kind;
    use crate::backend::initialize_backend;
    use shared::{Gender, IdentityKind, ScheduleRowInput};

    async fn setup_test() -> DahiraApi {
        DahiraApi::new(initialize_backend(DahiraConfig::for_testing()).await.unwrap())
    }

    #[tokio::test]
    async fn test_email_login_and_invalid_credentials() {
        let api = setup_test().await;

        let response = api
            .login(LoginRequest {
                identifier: "finance@dahira.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.identity.kind, IdentityKind::SystemAccount);
        assert_eq!(response.identity.role, Role::Admin);
        assert_eq!(response.identity.user_id.as_deref(), Some("2"));
        assert!(response.sections.contains(&Section::Planning));
        assert!(!response.sections.contains(&Section::Users));

        let err = api
            .login(LoginRequest {
                identifier: "finance@dahira.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&err), Some(&DahiraError::InvalidCredentials));
        assert_eq!(err.to_string(), "Identifiants invalides ou compte désactivé.");
    }

    #[tokio::test]
    async fn test_phone_login_opens_member_space() {
        let api = setup_test().await;
        let response = api
            .login(LoginRequest {
                identifier: "77 000 00 02".to_string(),
                password: "0000".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.identity.kind, IdentityKind::MemberSession);
        assert_eq!(response.identity.member_id.as_deref(), Some("2"));
        assert_eq!(response.identity.display_name, "Aminata Ba");
        assert_eq!(response.sections, vec![Section::MemberSpace]);
    }

    #[tokio::test]
    async fn test_add_contribution_reports_progress() {
        let api = setup_test().await;
        let response = api
            .add_contribution(AddContributionRequest {
                member_id: "1".to_string(),
                amount: 1000.0,
                date: "2024-01-05".to_string(),
                recorded_by: "2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.contribution.date, "2024-01-05");
        assert_eq!(response.stats.paid, 8000.0);
        assert_eq!(response.stats.remaining, 4000.0);
        assert_eq!(response.success_message, CONTRIBUTION_SAVED_MESSAGE);

        let history = api.member_history("1").await.unwrap();
        assert_eq!(history[0].contribution.id, response.contribution.id);
        assert_eq!(history[0].member_name, "Cheikh Fall");
        assert_eq!(history[0].recorded_by_name, "Fatou Ndiaye");

        let err = api
            .add_contribution(AddContributionRequest {
                member_id: "1".to_string(),
                amount: 1000.0,
                date: "05/01/2024".to_string(),
                recorded_by: "2".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_contribution_to_missing_member_changes_nothing() {
        let api = setup_test().await;
        let before = api.get_members().await.unwrap();

        let err = api
            .add_contribution(AddContributionRequest {
                member_id: "ghost".to_string(),
                amount: 1000.0,
                date: "2024-01-05".to_string(),
                recorded_by: "2".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::NotFound { .. })));
        assert_eq!(api.get_members().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_members_reads_are_isolated_copies() {
        let api = setup_test().await;
        let mut first = api.get_members().await.unwrap();
        let second = api.get_members().await.unwrap();
        assert_eq!(first, second);

        first[0].first_name = "Changed".to_string();
        first[0].contributions.clear();
        assert_eq!(api.get_members().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_member_crud_and_search() {
        let api = setup_test().await;
        let created = api
            .add_member(CreateMemberRequest {
                first_name: "Awa".to_string(),
                last_name: "Diop".to_string(),
                gender: Gender::Girl,
                phone: "770000009".to_string(),
                email: None,
                location: Some("Pikine".to_string()),
                annual_goal: None,
            })
            .await
            .unwrap();
        assert_eq!(created.annual_goal, 12000.0);

        let updated = api
            .update_member(
                &created.id,
                UpdateMemberRequest {
                    annual_goal: Some(6000.0),
                    ..UpdateMemberRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.annual_goal, 6000.0);
        assert_eq!(updated.first_name, "Awa");

        let found = api
            .search_members(MemberSearchRequest {
                term: "DIOP".to_string(),
                gender: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(api.get_member_by_id("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dashboard_and_monthly_report() {
        let api = setup_test().await;
        let dashboard = api.dashboard_stats().await.unwrap();
        assert_eq!(dashboard.total_collected, 19000.0);
        assert_eq!(dashboard.gap, 11000.0);

        let report = api.monthly_contributions().await.unwrap();
        let chart: Vec<&str> = report.chart.iter().map(|m| m.key.as_str()).collect();
        let table: Vec<&str> = report.table.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(chart, vec!["2023-09", "2023-10", "2023-11"]);
        assert_eq!(table, vec!["2023-11", "2023-10", "2023-09"]);
        assert_eq!(report.total, 19000.0);

        let stats = api.all_member_stats().await.unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[2].percent, 0.0);
    }

    #[tokio::test]
    async fn test_planning_round_trip() {
        let api = setup_test().await;
        let request = PlanningRequest {
            start_month: "2024-03".to_string(),
            duration_months: 1,
        };
        let mut draft = api.generate_planning(request.clone()).await.unwrap();
        let key = draft.rows()[0].key;
        draft.set_row_member(key, Some("1".to_string())).unwrap();

        let saved = api.save_planning(&draft).await.unwrap();
        assert_eq!(saved.saved.len(), 1);
        assert_eq!(saved.success_message, PLANNING_SAVED_MESSAGE);

        let draft = api.generate_planning(request).await.unwrap();
        let view = api.planning_view(&draft).await.unwrap();
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].date.as_deref(), Some("2024-03-03"));
        assert_eq!(view.rows[0].member_name.as_deref(), Some("Cheikh Fall"));
        assert!(view.rows[0].schedule_id.is_some());
        assert!(view.rows[1].member_name.is_none());
    }

    #[tokio::test]
    async fn test_planning_rejects_bad_input() {
        let api = setup_test().await;
        let err = api
            .generate_planning(PlanningRequest {
                start_month: "2024-03".to_string(),
                duration_months: 2,
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&err), Some(&DahiraError::InvalidPlanningDuration(2)));

        let err = api
            .generate_planning(PlanningRequest {
                start_month: "mars".to_string(),
                duration_months: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::InvalidMonth(_))));
    }

    #[tokio::test]
    async fn test_save_and_delete_schedules() {
        let api = setup_test().await;
        let row = |date: &str, member: &str| ScheduleRowInput {
            date: date.to_string(),
            member_id: member.to_string(),
            note: None,
        };
        api.save_tour_schedules(SaveTourSchedulesRequest {
            rows: vec![row("2024-03-03", "1")],
        })
        .await
        .unwrap();
        let saved = api
            .save_tour_schedules(SaveTourSchedulesRequest {
                rows: vec![row("2024-03-03", "2")],
            })
            .await
            .unwrap();

        let schedules = api.get_tour_schedules().await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].member_id, "2");

        let pending = api.request_schedule_deletion(&saved.saved[0].id).await.unwrap();
        assert_eq!(api.get_tour_schedules().await.unwrap().len(), 1);
        api.confirm_schedule_deletion(pending).await.unwrap();
        assert!(api.get_tour_schedules().await.unwrap().is_empty());
        assert!(!api.delete_tour_schedule("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_reminder_and_exports() {
        let api = setup_test().await;
        let reminder = api.balance_reminder("1").await.unwrap();
        assert_eq!(reminder.phone, "221770000001");
        assert!(reminder.url.starts_with("https://wa.me/221770000001?text="));
        assert!(api.balance_reminder("ghost").await.is_err());

        let export = api.export_member_balances().await.unwrap();
        assert!(export.csv_data.starts_with("member_id,name,gender,annual_goal,paid,remaining,percent"));
        let export = api.export_monthly_report().await.unwrap();
        assert!(export.csv_data.lines().last().unwrap().starts_with("total,Total,19000.00"));
    }

    #[tokio::test]
    async fn test_user_management() {
        let api = setup_test().await;
        let user = api
            .add_user(CreateUserRequest {
                name: "Ibrahima Sarr".to_string(),
                email: "ibrahima@dahira.com".to_string(),
                password: Some("secret".to_string()),
                role: Role::Viewer,
                member_id: None,
            })
            .await
            .unwrap();

        let user = api.toggle_user_status(&user.id).await.unwrap();
        assert!(!user.active);
        let err = api
            .login(LoginRequest {
                identifier: "ibrahima@dahira.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&err), Some(&DahiraError::InvalidCredentials));

        let user = api
            .update_user_role(UpdateUserRoleRequest {
                user_id: user.id,
                role: Role::Admin,
            })
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(api.get_users().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_google_login_provisions_guest() {
        let api = setup_test().await;
        let response = api
            .login_with_google(GoogleLoginRequest {
                email: "nouveau@gmail.com".to_string(),
            })
            .await
            .unwrap();
        assert!(response.created);
        assert_eq!(response.account_link, Some(shared::AccountLinkKind::Unlinked));
        assert_eq!(response.identity.role, Role::Member);

        let again = api
            .login_with_google(GoogleLoginRequest {
                email: "nouveau@gmail.com".to_string(),
            })
            .await
            .unwrap();
        assert!(!again.created);
        assert_eq!(again.account_link, Some(shared::AccountLinkKind::SystemUser));
        assert_eq!(again.identity.user_id, response.identity.user_id);
    }
}
