//! Sidebar entries.

use serde::Serialize;

use vertdrop_entity::Role;

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

/// One navigation entry shown to the roles that may open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
    pub roles: &'static [Role],
}

impl MenuItem {
    /// The full sidebar, in display order.
    pub const ALL: [MenuItem; 6] = [
        MenuItem {
            label: "Tableau de bord",
            href: "/admin",
            roles: STAFF,
        },
        MenuItem {
            label: "Mes Livraisons",
            href: "/livreur",
            roles: &[Role::Livreur],
        },
        MenuItem {
            label: "Mes Colis",
            href: "/client",
            roles: &[Role::Client],
        },
        MenuItem {
            label: "Utilisateurs",
            href: "/admin/users",
            roles: STAFF,
        },
        MenuItem {
            label: "Zones",
            href: "/admin/zones",
            roles: STAFF,
        },
        MenuItem {
            label: "Analytiques",
            href: "/admin/stats",
            roles: STAFF,
        },
    ];

    /// Entries visible to `role`. Nothing is visible without a role.
    pub fn for_role(role: Option<Role>) -> Vec<MenuItem> {
        let Some(role) = role else {
            return Vec::new();
        };
        Self::ALL
            .into_iter()
            .filter(|item| item.roles.contains(&role))
            .collect()
    }
}
