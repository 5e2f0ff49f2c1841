//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed to the presentation layer. The io layer maps the DTOs defined in
//! the `shared` crate to these internal types.

pub mod member {
    use chrono::NaiveDate;
    use shared::Gender;

    /// Input for registering a new member.
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub first_name: String,
        pub last_name: String,
        pub gender: Gender,
        pub phone: String,
        pub email: Option<String>,
        pub location: Option<String>,
        pub annual_goal: Option<f64>,
    }

    /// Partial profile update. Contributions are never touched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMemberCommand {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub gender: Option<Gender>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub location: Option<String>,
        pub annual_goal: Option<f64>,
    }

    /// Member list filter.
    #[derive(Debug, Clone, Default)]
    pub struct MemberSearchQuery {
        pub term: String,
        pub gender: Option<Gender>,
    }

    /// Input for recording a payment.
    #[derive(Debug, Clone)]
    pub struct RecordContributionCommand {
        pub member_id: String,
        pub amount: f64,
        pub date: NaiveDate,
        pub recorded_by: String,
    }
}

pub mod event {
    use chrono::NaiveDate;

    /// Input for recording a gathering's collections.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        pub date: NaiveDate,
        pub host_name: String,
        pub men_total: f64,
        pub women_total: f64,
        pub social_total: f64,
        pub recorded_by: String,
    }
}

pub mod user {
    use shared::Role;

    /// Input for creating a login account.
    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub name: String,
        pub email: String,
        pub password: Option<String>,
        pub role: Role,
        pub member_id: Option<String>,
    }
}
