use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role of a login account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Viewer,
    Member,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Viewer, Role::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Viewer => "VIEWER",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of a tracked member. Serialized with the French labels used on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Homme")]
    Male,
    #[serde(rename = "Femme")]
    Female,
    #[serde(rename = "Garçon")]
    Boy,
    #[serde(rename = "Fille")]
    Girl,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Homme",
            Gender::Female => "Femme",
            Gender::Boy => "Garçon",
            Gender::Girl => "Fille",
        }
    }

    /// Men and boys are reported together on the dashboard
    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male | Gender::Boy)
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Gender::Female | Gender::Girl)
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Gender::Boy | Gender::Girl)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Login account. The password hash never leaves the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Member record this account is linked to, if any
    pub member_id: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub member_id: String,
    pub amount: f64,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// ID of the user who recorded the payment
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    /// Neighbourhood or address
    pub location: Option<String>,
    pub annual_goal: f64,
    pub contributions: Vec<Contribution>,
}

/// Financial snapshot of one gathering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DahiraEvent {
    pub id: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub host_name: String,
    pub men_total: f64,
    pub women_total: f64,
    pub social_total: f64,
    pub total: f64,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSchedule {
    pub id: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub member_id: String,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address or phone number
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityKind {
    SystemAccount,
    MemberSession,
}

/// Who is using the application after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub kind: IdentityKind,
    /// Persisted account ID, absent for member sessions
    pub user_id: Option<String>,
    pub member_id: Option<String>,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountLinkKind {
    Unlinked,
    MemberLinked,
    SystemUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub identity: SessionIdentity,
    /// Only set for Google sign-in
    pub account_link: Option<AccountLinkKind>,
    /// True when the sign-in provisioned a new account
    pub created: bool,
    pub sections: Vec<Section>,
}

/// Navigable area of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Events,
    Members,
    Contributions,
    Planning,
    Reports,
    Users,
    MemberSpace,
}

// ---------------------------------------------------------------------------
// Members and contributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    pub location: Option<String>,
    /// Falls back to the configured default goal
    pub annual_goal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub annual_goal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberSearchRequest {
    pub term: String,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddContributionRequest {
    pub member_id: String,
    pub amount: f64,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddContributionResponse {
    pub contribution: Contribution,
    pub stats: MemberStats,
    pub success_message: String,
}

/// Contribution row enriched with display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionHistoryEntry {
    pub contribution: Contribution,
    pub member_name: String,
    pub recorded_by_name: String,
}

// ---------------------------------------------------------------------------
// Events and users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDahiraEventRequest {
    pub date: String,
    pub host_name: String,
    pub men_total: f64,
    pub women_total: f64,
    pub social_total: f64,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub member_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub user_id: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    pub member_id: String,
    pub paid: f64,
    pub remaining: f64,
    /// Progress toward the annual goal, 0..=100
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_collected: f64,
    pub total_expected: f64,
    /// Men and boys
    pub male_collected: f64,
    /// Women and girls
    pub female_collected: f64,
    /// Boys and girls
    pub child_collected: f64,
    pub member_count: usize,
    pub gap: f64,
    pub percent_of_goal: f64,
}

/// Sum of amounts for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// YYYY-MM
    pub key: String,
    /// e.g. "Janvier 2024"
    pub label: String,
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReportResponse {
    /// Oldest month first, for charts
    pub chart: Vec<MonthlyTotal>,
    /// Newest month first, for lists
    pub table: Vec<MonthlyTotal>,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    /// YYYY-MM
    pub start_month: String,
    /// One of 1, 3, 6 or 12
    pub duration_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRow {
    /// Local key of the row inside the draft
    pub key: u64,
    /// Set when the row is backed by a persisted schedule
    pub schedule_id: Option<String>,
    pub date: Option<String>,
    pub member_id: Option<String>,
    pub member_name: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResponse {
    pub start_month: String,
    pub duration_months: u32,
    pub rows: Vec<PlanningRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRowInput {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub member_id: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTourSchedulesRequest {
    pub rows: Vec<ScheduleRowInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTourSchedulesResponse {
    pub saved: Vec<TourSchedule>,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Reminders and exports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReminder {
    pub member_id: String,
    /// Normalized phone number including the country code
    pub phone: String,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_data: String,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");

        let role: Role = serde_json::from_str("\"VIEWER\"").unwrap();
        assert_eq!(role, Role::Viewer);
    }

    #[test]
    fn test_gender_uses_french_labels() {
        let json = serde_json::to_string(&Gender::Boy).unwrap();
        assert_eq!(json, "\"Garçon\"");

        let gender: Gender = serde_json::from_str("\"Femme\"").unwrap();
        assert_eq!(gender, Gender::Female);
    }

    #[test]
    fn test_gender_buckets() {
        assert!(Gender::Male.is_male() && Gender::Boy.is_male());
        assert!(Gender::Female.is_female() && Gender::Girl.is_female());
        assert!(Gender::Boy.is_child() && Gender::Girl.is_child());
        assert!(!Gender::Male.is_child());
    }
}
