//! Which roles may open which dashboard sections.

use shared::{Role, Section};

/// Sections in navigation order, with the roles allowed to open each
const SECTION_ROLES: [(Section, &[Role]); 8] = [
    (Section::Dashboard, &[Role::SuperAdmin, Role::Admin, Role::Viewer]),
    (Section::Events, &[Role::SuperAdmin, Role::Admin]),
    (Section::Members, &[Role::SuperAdmin, Role::Admin]),
    (Section::Contributions, &[Role::SuperAdmin, Role::Admin]),
    (Section::Planning, &[Role::SuperAdmin, Role::Admin]),
    (Section::Reports, &[Role::SuperAdmin, Role::Admin, Role::Viewer]),
    (Section::Users, &[Role::SuperAdmin]),
    (Section::MemberSpace, &[Role::Member]),
];

pub trait RoleAccess {
    fn can_access(&self, section: Section) -> bool;
}

impl RoleAccess for Role {
    fn can_access(&self, section: Section) -> bool {
        SECTION_ROLES
            .iter()
            .any(|(s, roles)| *s == section && roles.contains(self))
    }
}

pub fn sections_for(role: Role) -> Vec<Section> {
    SECTION_ROLES
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(section, _)| *section)
        .collect()
}

/// First section the role lands on after signing in
pub fn landing_section(role: Role) -> Section {
    sections_for(role)
        .first()
        .copied()
        .unwrap_or(Section::MemberSpace)
}
