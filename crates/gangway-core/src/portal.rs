//! # Portal Composition
//!
//! Role-based portal resolution: given a [`Role`] and a [`UserContext`],
//! produce the ordered feature list the user is entitled to see plus the
//! layout flags to apply.
//!
//! The catalog is built once at startup and is read-only thereafter — no
//! write path exists after construction. Resolution is a pure computation
//! over immutable inputs: safe to call repeatedly and from multiple
//! readers, never mutates the catalog or the user.
//!
//! Feature ids are capability tags. The rendering layer keeps its own
//! registry mapping `id -> renderer`; the CORE never holds a reference to
//! UI code.

use crate::types::{GangwayError, Permission, Role, UserContext};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// FEATURE DESCRIPTOR
// =============================================================================

/// A named capability/tab exposed within a portal configuration.
///
/// Declared statically per role; never mutated at runtime. Declaration
/// order is significant — it is the default navigation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// Capability tag, unique within one config. The rendering layer maps
    /// this to a renderer.
    pub id: String,
    /// Human-readable tab label.
    pub name: String,
    /// Permission gating visibility, if any. `None` means visible to
    /// every user of the role.
    #[serde(default)]
    pub required_permission: Option<Permission>,
    /// Disabled features are declared but never shown.
    pub enabled: bool,
}

impl FeatureDescriptor {
    /// Create an enabled, ungated feature.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required_permission: None,
            enabled: true,
        }
    }

    /// Gate this feature behind a permission, builder-style.
    #[must_use]
    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.required_permission = Some(Permission::new(permission));
        self
    }

    /// Mark this feature as declared-but-disabled, builder-style.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check whether this feature is visible to the given user.
    ///
    /// Visible iff enabled AND (ungated OR the user holds the gate
    /// permission). A gate permission unknown to the whole system simply
    /// never matches — the permission space is open-ended strings, not a
    /// closed enum.
    #[must_use]
    pub fn visible_to(&self, user: &UserContext) -> bool {
        if !self.enabled {
            return false;
        }
        match &self.required_permission {
            None => true,
            Some(permission) => user.has_permission(permission),
        }
    }
}

// =============================================================================
// LAYOUT FLAGS
// =============================================================================

/// Chrome toggles applied to a resolved portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFlags {
    pub sidebar: bool,
    pub topbar: bool,
    pub notifications: bool,
    pub search: bool,
    pub profile_menu: bool,
}

impl LayoutFlags {
    /// Full chrome: everything on. Used by staff-side portals.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            sidebar: true,
            topbar: true,
            notifications: true,
            search: true,
            profile_menu: true,
        }
    }

    /// Client chrome: topbar navigation without the operator sidebar.
    #[must_use]
    pub const fn client() -> Self {
        Self {
            sidebar: false,
            topbar: true,
            notifications: true,
            search: false,
            profile_menu: true,
        }
    }
}

// =============================================================================
// PORTAL CONFIG
// =============================================================================

/// The declared portal for one role.
///
/// One config per role, defined at process start, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Role this portal serves.
    pub role: Role,
    /// Portal title shown in the chrome.
    pub display_name: String,
    /// Features in navigation order.
    pub features: Vec<FeatureDescriptor>,
    /// Chrome toggles.
    pub layout: LayoutFlags,
    /// Permissions granted to every user of this role, in addition to the
    /// user's own grants. BTreeSet for deterministic ordering.
    pub granted_permissions: BTreeSet<Permission>,
}

// =============================================================================
// RESOLVED PORTAL
// =============================================================================

/// The result of resolving a portal for one user.
///
/// `visible_features` is a possibly-empty ordered subsequence of the
/// config's features — never an error when empty; the rendering layer
/// shows an empty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPortal {
    /// The full declared config for the role.
    pub config: PortalConfig,
    /// Features the user is entitled to see, declaration order preserved.
    pub visible_features: Vec<FeatureDescriptor>,
}

/// Get the initially active feature: the first visible one, if any.
#[must_use]
pub fn default_feature(visible_features: &[FeatureDescriptor]) -> Option<&FeatureDescriptor> {
    visible_features.first()
}

// =============================================================================
// PORTAL CATALOG
// =============================================================================

/// The immutable role → config mapping.
///
/// Uses `BTreeMap` for deterministic ordering. Built once (empty +
/// `insert`, or [`PortalCatalog::builtin`]) and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalCatalog {
    configs: BTreeMap<Role, PortalConfig>,
}

impl PortalCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a role's portal. Last declaration for a role wins; used
    /// only during startup assembly.
    pub fn insert(&mut self, config: PortalConfig) {
        self.configs.insert(config.role, config);
    }

    /// Get the declared config for a role.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&PortalConfig> {
        self.configs.get(&role)
    }

    /// Number of declared portals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Check whether no portals are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Resolve the portal for a role and user.
    ///
    /// Fails with `ConfigNotFound` when the role has no declared config.
    /// Otherwise keeps each feature iff it is enabled and its permission
    /// gate (if any) is in `user.permissions`. Declaration order is
    /// preserved — no re-sorting.
    pub fn resolve(&self, role: Role, user: &UserContext) -> Result<ResolvedPortal, GangwayError> {
        let config = self
            .configs
            .get(&role)
            .ok_or(GangwayError::ConfigNotFound(role))?;

        let visible_features = config
            .features
            .iter()
            .filter(|feature| feature.visible_to(user))
            .cloned()
            .collect();

        Ok(ResolvedPortal {
            config: config.clone(),
            visible_features,
        })
    }

    /// The built-in catalog: all eight role portals of the charter
    /// platform.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        catalog.insert(PortalConfig {
            role: Role::VipClient,
            display_name: "VIP Lounge".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("bookings", "My Charters"),
                FeatureDescriptor::new("fleet", "Fleet"),
                FeatureDescriptor::new("concierge", "Concierge").requires("access_concierge"),
                FeatureDescriptor::new("membership", "Membership"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::client(),
            granted_permissions: permissions(&["book_charter", "view_membership"]),
        });

        catalog.insert(PortalConfig {
            role: Role::StandardClient,
            display_name: "Client Portal".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("bookings", "My Charters"),
                FeatureDescriptor::new("fleet", "Fleet"),
                FeatureDescriptor::new("articles", "Guides & Articles"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::client(),
            granted_permissions: permissions(&["book_charter"]),
        });

        catalog.insert(PortalConfig {
            role: Role::BusinessClient,
            display_name: "Corporate Portal".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("corporate-bookings", "Company Charters")
                    .requires("corporate_booking"),
                FeatureDescriptor::new("invoices", "Invoices").requires("view_invoices"),
                FeatureDescriptor::new("fleet", "Fleet"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::client(),
            granted_permissions: permissions(&["book_charter", "corporate_booking"]),
        });

        catalog.insert(PortalConfig {
            role: Role::BrandPartner,
            display_name: "Brand Partner Hub".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("listings", "My Listings"),
                FeatureDescriptor::new("payouts", "Payouts").requires("view_payouts"),
                FeatureDescriptor::new("analytics", "Analytics").requires("view_analytics"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: permissions(&["manage_listings"]),
        });

        catalog.insert(PortalConfig {
            role: Role::AgentPartner,
            display_name: "Agent Hub".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("referrals", "Referrals"),
                FeatureDescriptor::new("commissions", "Commissions").requires("view_commissions"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: permissions(&["create_referral"]),
        });

        catalog.insert(PortalConfig {
            role: Role::Contractor,
            display_name: "Contractor Console".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("work-orders", "Work Orders"),
                FeatureDescriptor::new("schedule", "Schedule"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: permissions(&["view_work_orders"]),
        });

        catalog.insert(PortalConfig {
            role: Role::Staff,
            display_name: "Operations Desk".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("bookings-desk", "Bookings Desk"),
                FeatureDescriptor::new("crm", "CRM Pipeline").requires("crm_access"),
                FeatureDescriptor::new("cms", "Content").requires("cms_access"),
                FeatureDescriptor::new("clients", "Clients"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: permissions(&["manage_bookings"]),
        });

        catalog.insert(PortalConfig {
            role: Role::Admin,
            display_name: "Admin Console".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("crm", "CRM Pipeline"),
                FeatureDescriptor::new("cms", "Content"),
                FeatureDescriptor::new("partners", "Partners"),
                FeatureDescriptor::new("corporate", "Corporate Clients"),
                FeatureDescriptor::new("staff-management", "Staff").requires("manage_staff"),
                FeatureDescriptor::new("settings", "Settings"),
                FeatureDescriptor::new("profile", "Profile"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: permissions(&[
                "manage_bookings",
                "crm_access",
                "cms_access",
                "manage_partners",
            ]),
        });

        catalog
    }
}

fn permissions(names: &[&str]) -> BTreeSet<Permission> {
    names.iter().map(|n| Permission::new(*n)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn vip_user_without_grants() -> UserContext {
        UserContext::new("u-100", "Ilse", "ilse@example.com")
    }

    #[test]
    fn builtin_covers_every_role() {
        let catalog = PortalCatalog::builtin();
        assert_eq!(catalog.len(), Role::ALL.len());
        for role in Role::ALL {
            assert!(catalog.get(role).is_some());
        }
    }

    #[test]
    fn resolve_unknown_role_fails() {
        let mut catalog = PortalCatalog::new();
        catalog.insert(PortalConfig {
            role: Role::Staff,
            display_name: "Desk".to_string(),
            features: vec![],
            layout: LayoutFlags::full(),
            granted_permissions: BTreeSet::new(),
        });

        let err = catalog
            .resolve(Role::Admin, &vip_user_without_grants())
            .expect_err("must fail");
        assert!(matches!(err, GangwayError::ConfigNotFound(Role::Admin)));
    }

    #[test]
    fn ungated_features_visible_without_permissions() {
        let catalog = PortalCatalog::builtin();
        let resolved = catalog
            .resolve(Role::VipClient, &vip_user_without_grants())
            .expect("resolve");

        let ids: Vec<&str> = resolved
            .visible_features
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        // Everything except the concierge gate.
        assert_eq!(
            ids,
            vec!["dashboard", "bookings", "fleet", "membership", "profile"]
        );
    }

    #[test]
    fn gated_feature_appears_with_permission() {
        let catalog = PortalCatalog::builtin();
        let user = vip_user_without_grants().with_permission("access_concierge");

        let resolved = catalog.resolve(Role::VipClient, &user).expect("resolve");
        assert!(resolved.visible_features.iter().any(|f| f.id == "concierge"));
    }

    #[test]
    fn disabled_feature_never_appears() {
        let mut catalog = PortalCatalog::new();
        catalog.insert(PortalConfig {
            role: Role::Contractor,
            display_name: "Console".to_string(),
            features: vec![
                FeatureDescriptor::new("dashboard", "Dashboard"),
                FeatureDescriptor::new("payroll", "Payroll").disabled(),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: BTreeSet::new(),
        });

        let resolved = catalog
            .resolve(Role::Contractor, &vip_user_without_grants())
            .expect("resolve");
        assert_eq!(resolved.visible_features.len(), 1);
        assert_eq!(resolved.visible_features[0].id, "dashboard");
    }

    #[test]
    fn resolve_is_pure_and_reproducible() {
        let catalog = PortalCatalog::builtin();
        let user = vip_user_without_grants().with_permission("crm_access");

        let first = catalog.resolve(Role::Staff, &user).expect("resolve");
        let second = catalog.resolve(Role::Staff, &user).expect("resolve");
        assert_eq!(first, second);

        // Inputs are untouched.
        assert_eq!(catalog, PortalCatalog::builtin());
        assert!(user.has_permission(&Permission::new("crm_access")));
    }

    #[test]
    fn empty_visible_features_is_not_an_error() {
        let mut catalog = PortalCatalog::new();
        catalog.insert(PortalConfig {
            role: Role::AgentPartner,
            display_name: "Hub".to_string(),
            features: vec![FeatureDescriptor::new("vault", "Vault").requires("vault_access")],
            layout: LayoutFlags::full(),
            granted_permissions: BTreeSet::new(),
        });

        let resolved = catalog
            .resolve(Role::AgentPartner, &vip_user_without_grants())
            .expect("resolve");
        assert!(resolved.visible_features.is_empty());
        assert!(default_feature(&resolved.visible_features).is_none());
    }

    #[test]
    fn default_feature_is_first_visible() {
        let catalog = PortalCatalog::builtin();
        let resolved = catalog
            .resolve(Role::StandardClient, &vip_user_without_grants())
            .expect("resolve");

        let first = default_feature(&resolved.visible_features).expect("non-empty");
        assert_eq!(first.id, "dashboard");
    }

    #[test]
    fn unknown_gate_permission_never_matches() {
        let mut catalog = PortalCatalog::new();
        catalog.insert(PortalConfig {
            role: Role::Staff,
            display_name: "Desk".to_string(),
            features: vec![
                FeatureDescriptor::new("ghost", "Ghost").requires("permission_nobody_defines"),
            ],
            layout: LayoutFlags::full(),
            granted_permissions: BTreeSet::new(),
        });

        // Not an error — the feature just stays hidden.
        let resolved = catalog
            .resolve(Role::Staff, &vip_user_without_grants())
            .expect("resolve");
        assert!(resolved.visible_features.is_empty());
    }
}
