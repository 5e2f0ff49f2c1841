//! Mappers for login outcomes.

use crate::backend::domain::access::sections_for;
use crate::backend::domain::auth_service::{AccountLink, Identity};
use shared::{AccountLinkKind, IdentityKind, LoginResponse, SessionIdentity};

pub struct IdentityMapper;

impl IdentityMapper {
    pub fn to_dto(identity: &Identity) -> SessionIdentity {
        SessionIdentity {
            kind: match identity {
                Identity::SystemAccount(_) => IdentityKind::SystemAccount,
                Identity::MemberSession { .. } => IdentityKind::MemberSession,
            },
            user_id: identity.user_id().map(str::to_string),
            member_id: identity.member_id().map(str::to_string),
            display_name: identity.display_name().to_string(),
            role: identity.role(),
        }
    }

    pub fn link_to_dto(link: &AccountLink) -> AccountLinkKind {
        match link {
            AccountLink::Unlinked => AccountLinkKind::Unlinked,
            AccountLink::MemberLinked { .. } => AccountLinkKind::MemberLinked,
            AccountLink::SystemUser { .. } => AccountLinkKind::SystemUser,
        }
    }

    pub fn to_login_response(identity: &Identity, link: Option<&AccountLink>, created: bool) -> LoginResponse {
        LoginResponse {
            identity: Self::to_dto(identity),
            account_link: link.map(Self::link_to_dto),
            created,
            sections: sections_for(identity.role()),
        }
    }
}
