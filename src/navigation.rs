//! Role-based route resolution.
//!
//! The whole navigation policy is data: a static table of route definitions plus the
//! pure `RouteTable::resolve`, which maps `(path, guard state)` to what the display
//! should do. Nothing here touches HTTP, storage or the view builders.

use crate::{config::UnmatchedRoute, guard::GuardState, models::Role};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth";
/// Shared landing page and the fallback for every role mismatch.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Target of the unmatched-path redirect.
pub const ANALYTICS_PATH: &str = "/analytics";

/// Every page the portal can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Auth,
    CitizenDashboard,
    AuthorityDashboard,
    Analytics,
    Report,
    Bins,
    Rewards,
    Map,
    Users,
    NotFound,
}

/// Whether a route needs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// What a matched route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// The login page; signed-in users bounce to the dashboard.
    Login,
    /// Unconditional redirect (after the access check).
    Redirect(&'static str),
    /// One view per role. A role without an entry is sent to the dashboard.
    Variants(&'static [(Role, ViewId)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDefinition {
    pub path: &'static str,
    pub access: Access,
    pub target: RouteTarget,
}

impl RouteDefinition {
    /// The view `role` gets on this route, if it has one.
    pub fn variant_for(&self, role: Role) -> Option<ViewId> {
        match self.target {
            RouteTarget::Variants(variants) => variants
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, view)| *view),
            _ => None,
        }
    }
}

/// Page chrome around a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    Bare,
    WithNavbar,
}

/// Outcome of resolving one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Session state is still being resolved.
    Loading,
    /// Navigate elsewhere, replacing the current history entry.
    Redirect { to: &'static str },
    Render { view: ViewId, chrome: Chrome },
}

const CANONICAL_ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        path: LOGIN_PATH,
        access: Access::Public,
        target: RouteTarget::Login,
    },
    RouteDefinition {
        path: "/",
        access: Access::Protected,
        target: RouteTarget::Redirect(DASHBOARD_PATH),
    },
    RouteDefinition {
        path: DASHBOARD_PATH,
        access: Access::Protected,
        target: RouteTarget::Variants(&[
            (Role::Citizen, ViewId::CitizenDashboard),
            (Role::Authority, ViewId::AuthorityDashboard),
        ]),
    },
    RouteDefinition {
        path: ANALYTICS_PATH,
        access: Access::Protected,
        target: RouteTarget::Variants(&[(Role::Authority, ViewId::Analytics)]),
    },
    RouteDefinition {
        path: "/report",
        access: Access::Protected,
        target: RouteTarget::Variants(&[(Role::Citizen, ViewId::Report)]),
    },
    RouteDefinition {
        path: "/bins",
        access: Access::Protected,
        target: RouteTarget::Variants(&[(Role::Citizen, ViewId::Bins)]),
    },
    RouteDefinition {
        path: "/rewards",
        access: Access::Protected,
        target: RouteTarget::Variants(&[(Role::Citizen, ViewId::Rewards)]),
    },
    RouteDefinition {
        path: "/map",
        access: Access::Protected,
        target: RouteTarget::Variants(&[
            (Role::Citizen, ViewId::Map),
            (Role::Authority, ViewId::Map),
        ]),
    },
    RouteDefinition {
        path: "/users",
        access: Access::Protected,
        target: RouteTarget::Variants(&[(Role::Authority, ViewId::Users)]),
    },
];

/// RouteTable
///
/// Immutable after construction. Shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: &'static [RouteDefinition],
    unmatched: UnmatchedRoute,
}

impl RouteTable {
    /// The portal's route set with the given unmatched-path policy.
    pub fn canonical(unmatched: UnmatchedRoute) -> Self {
        Self {
            routes: CANONICAL_ROUTES,
            unmatched,
        }
    }

    pub fn routes(&self) -> &'static [RouteDefinition] {
        self.routes
    }

    pub fn unmatched_policy(&self) -> UnmatchedRoute {
        self.unmatched
    }

    pub fn lookup(&self, path: &str) -> Option<&'static RouteDefinition> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.path == path)
    }

    /// resolve
    ///
    /// 1. No match → the unmatched-path policy.
    /// 2. Protected route while the guard is loading → loading page.
    /// 3. Protected route without a session → login.
    /// 4. Login route with a session → dashboard.
    /// 5. Role variants → the caller's variant, else the dashboard.
    ///
    /// Public routes never wait for restoration: `/auth` renders the login page while
    /// the guard is still loading.
    pub fn resolve(&self, path: &str, guard: GuardState) -> Resolution {
        let Some(route) = self.lookup(path) else {
            tracing::warn!(path = %path, role = ?guard.role(), "no route matches requested path");
            return match self.unmatched {
                UnmatchedRoute::RedirectToAnalytics => Resolution::Redirect { to: ANALYTICS_PATH },
                UnmatchedRoute::NotFoundPage => Resolution::Render {
                    view: ViewId::NotFound,
                    chrome: Chrome::Bare,
                },
            };
        };

        if route.access == Access::Protected && guard == GuardState::Loading {
            return Resolution::Loading;
        }

        let role = guard.role();
        if route.access == Access::Protected && role.is_none() {
            return Resolution::Redirect { to: LOGIN_PATH };
        }

        match (route.target, role) {
            (RouteTarget::Login, Some(_)) => Resolution::Redirect { to: DASHBOARD_PATH },
            (RouteTarget::Login, None) => Resolution::Render {
                view: ViewId::Auth,
                chrome: Chrome::Bare,
            },
            (RouteTarget::Redirect(to), _) => Resolution::Redirect { to },
            (RouteTarget::Variants(_), Some(role)) => match route.variant_for(role) {
                Some(view) => Resolution::Render {
                    view,
                    chrome: Chrome::WithNavbar,
                },
                None => Resolution::Redirect { to: DASHBOARD_PATH },
            },
            // Variant views always need a role to pick from.
            (RouteTarget::Variants(_), None) => Resolution::Redirect { to: LOGIN_PATH },
        }
    }

    /// settle
    ///
    /// Follows redirects until a non-redirect resolution is reached. Returns the final
    /// path together with its resolution, or `None` if the table loops.
    pub fn settle(&self, path: &str, guard: GuardState) -> Option<(String, Resolution)> {
        const MAX_HOPS: usize = 8;

        let mut current = normalize_path(path).to_string();
        for _ in 0..MAX_HOPS {
            match self.resolve(&current, guard) {
                Resolution::Redirect { to } => current = to.to_string(),
                terminal => return Some((current, terminal)),
            }
        }
        None
    }
}

/// Strips the query/fragment and any trailing slash (except for the root).
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
