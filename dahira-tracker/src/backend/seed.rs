//! Demo records loaded at startup when `seed_demo_data` is enabled.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{Gender, Role};

use crate::backend::domain::credentials::CredentialVerifier;
use crate::backend::domain::models::{Contribution, DahiraEvent, Member, User};
use crate::backend::storage::DataSet;

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid seed date {}-{}-{}", year, month, day))
}

fn user(
    verifier: &dyn CredentialVerifier,
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    password: &str,
) -> Result<User> {
    Ok(User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        member_id: None,
        password_hash: Some(verifier.hash_password(password)?),
        active: true,
    })
}

fn contribution(id: &str, member_id: &str, amount: f64, date: NaiveDate) -> Contribution {
    Contribution {
        id: id.to_string(),
        member_id: member_id.to_string(),
        amount,
        date,
        recorded_by: "2".to_string(),
    }
}

fn member(
    id: &str,
    first_name: &str,
    last_name: &str,
    gender: Gender,
    phone: &str,
    annual_goal: f64,
    contributions: Vec<Contribution>,
) -> Member {
    Member {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender,
        phone: phone.to_string(),
        email: None,
        location: None,
        annual_goal,
        contributions,
    }
}

/// Three accounts, three members and one gathering. Passwords are hashed
/// with the given verifier.
pub fn demo_data(verifier: &dyn CredentialVerifier) -> Result<DataSet> {
    let users = vec![
        user(
            verifier,
            "1",
            "Modou Gningue GUEYE",
            "gueyemodougningue@gmail.com",
            Role::SuperAdmin,
            "Passer123",
        )?,
        user(verifier, "2", "Fatou Ndiaye", "finance@dahira.com", Role::Admin, "password")?,
        user(verifier, "3", "Amadou Sow", "membre@dahira.com", Role::Viewer, "password")?,
    ];

    let members = vec![
        member(
            "1",
            "Cheikh",
            "Fall",
            Gender::Male,
            "770000001",
            12000.0,
            vec![
                contribution("c1", "1", 5000.0, date(2023, 10, 15)?),
                contribution("c2", "1", 2000.0, date(2023, 11, 1)?),
            ],
        ),
        member(
            "2",
            "Aminata",
            "Ba",
            Gender::Female,
            "770000002",
            12000.0,
            vec![contribution("c3", "2", 12000.0, date(2023, 9, 10)?)],
        ),
        member("3", "Modou", "Seck", Gender::Boy, "700000000", 6000.0, Vec::new()),
    ];

    let events = vec![DahiraEvent {
        id: "e1".to_string(),
        date: date(2023, 11, 10)?,
        host_name: "Famille Ndiaye".to_string(),
        men_total: 45000.0,
        women_total: 30000.0,
        social_total: 5000.0,
        recorded_by: "1".to_string(),
    }];

    Ok(DataSet {
        users,
        members,
        events,
        schedules: Vec::new(),
    })
}
