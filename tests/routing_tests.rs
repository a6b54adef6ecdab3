use ecowaste_portal::{
    config::UnmatchedRoute,
    guard::GuardState,
    models::{Role, Session},
    navigation::{
        ANALYTICS_PATH, Access, Chrome, DASHBOARD_PATH, LOGIN_PATH, Resolution, RouteTable,
        ViewId, normalize_path,
    },
};
use uuid::Uuid;

const CITIZEN: GuardState = GuardState::Authenticated(Role::Citizen);
const AUTHORITY: GuardState = GuardState::Authenticated(Role::Authority);
const ANONYMOUS: GuardState = GuardState::Unauthenticated;

fn table() -> RouteTable {
    RouteTable::canonical(UnmatchedRoute::RedirectToAnalytics)
}

fn render(view: ViewId) -> Resolution {
    Resolution::Render {
        view,
        chrome: Chrome::WithNavbar,
    }
}

fn redirect(to: &'static str) -> Resolution {
    Resolution::Redirect { to }
}

#[cfg(test)]
mod guard_tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "t@t.com".to_string(),
            role,
            points: None,
        }
    }

    #[test]
    fn test_loading_wins_over_session() {
        let s = session(Role::Citizen);
        assert_eq!(GuardState::evaluate(true, Some(&s)), GuardState::Loading);
        assert_eq!(GuardState::evaluate(true, None), GuardState::Loading);
    }

    #[test]
    fn test_evaluate_after_loading() {
        let s = session(Role::Authority);
        assert_eq!(GuardState::evaluate(false, Some(&s)), AUTHORITY);
        assert_eq!(GuardState::evaluate(false, None), ANONYMOUS);
        assert_eq!(AUTHORITY.role(), Some(Role::Authority));
        assert_eq!(GuardState::Loading.role(), None);
    }
}

#[cfg(test)]
mod resolve_tests {
    use super::*;

    #[test]
    fn test_loading_shows_loading_for_protected_paths() {
        let table = table();
        for route in table.routes().iter().filter(|r| r.access == Access::Protected) {
            assert_eq!(
                table.resolve(route.path, GuardState::Loading),
                Resolution::Loading,
                "{}",
                route.path
            );
        }
    }

    #[test]
    fn test_login_page_renders_while_loading() {
        assert_eq!(
            table().resolve(LOGIN_PATH, GuardState::Loading),
            Resolution::Render {
                view: ViewId::Auth,
                chrome: Chrome::Bare
            }
        );
    }

    #[test]
    fn test_unmatched_while_loading_follows_policy() {
        let table = table();
        assert_eq!(
            table.resolve("/nope", GuardState::Loading),
            redirect(ANALYTICS_PATH)
        );
        let (path, res) = table.settle("/nope", GuardState::Loading).expect("settles");
        assert_eq!(path, ANALYTICS_PATH);
        assert_eq!(res, Resolution::Loading);
    }

    #[test]
    fn test_protected_routes_send_anonymous_to_login() {
        let table = table();
        for route in table.routes().iter().filter(|r| r.access == Access::Protected) {
            assert_eq!(
                table.resolve(route.path, ANONYMOUS),
                redirect(LOGIN_PATH),
                "{}",
                route.path
            );
        }
    }

    #[test]
    fn test_login_page() {
        let table = table();
        assert_eq!(
            table.resolve(LOGIN_PATH, ANONYMOUS),
            Resolution::Render {
                view: ViewId::Auth,
                chrome: Chrome::Bare
            }
        );
        assert_eq!(table.resolve(LOGIN_PATH, CITIZEN), redirect(DASHBOARD_PATH));
        assert_eq!(table.resolve(LOGIN_PATH, AUTHORITY), redirect(DASHBOARD_PATH));
    }

    #[test]
    fn test_root_goes_to_dashboard() {
        let table = table();
        assert_eq!(table.resolve("/", CITIZEN), redirect(DASHBOARD_PATH));
        assert_eq!(table.resolve("/", AUTHORITY), redirect(DASHBOARD_PATH));
    }

    #[test]
    fn test_dashboard_variant_per_role() {
        let table = table();
        assert_eq!(
            table.resolve(DASHBOARD_PATH, CITIZEN),
            render(ViewId::CitizenDashboard)
        );
        assert_eq!(
            table.resolve(DASHBOARD_PATH, AUTHORITY),
            render(ViewId::AuthorityDashboard)
        );
    }

    #[test]
    fn test_citizen_only_routes() {
        let table = table();
        for (path, view) in [
            ("/report", ViewId::Report),
            ("/bins", ViewId::Bins),
            ("/rewards", ViewId::Rewards),
        ] {
            assert_eq!(table.resolve(path, CITIZEN), render(view));
            assert_eq!(table.resolve(path, AUTHORITY), redirect(DASHBOARD_PATH));
        }
    }

    #[test]
    fn test_authority_only_routes() {
        let table = table();
        for (path, view) in [("/analytics", ViewId::Analytics), ("/users", ViewId::Users)] {
            assert_eq!(table.resolve(path, AUTHORITY), render(view));
            assert_eq!(table.resolve(path, CITIZEN), redirect(DASHBOARD_PATH));
        }
    }

    #[test]
    fn test_map_is_shared() {
        let table = table();
        assert_eq!(table.resolve("/map", CITIZEN), render(ViewId::Map));
        assert_eq!(table.resolve("/map", AUTHORITY), render(ViewId::Map));
    }

    #[test]
    fn test_unmatched_redirects_to_analytics() {
        let table = table();
        for guard in [ANONYMOUS, CITIZEN, AUTHORITY] {
            assert_eq!(table.resolve("/does-not-exist", guard), redirect(ANALYTICS_PATH));
        }
    }

    #[test]
    fn test_unmatched_not_found_policy() {
        let table = RouteTable::canonical(UnmatchedRoute::NotFoundPage);
        assert_eq!(table.unmatched_policy(), UnmatchedRoute::NotFoundPage);
        assert_eq!(
            table.resolve("/does-not-exist", CITIZEN),
            Resolution::Render {
                view: ViewId::NotFound,
                chrome: Chrome::Bare
            }
        );
    }

    #[test]
    fn test_trailing_slash_matches() {
        let table = table();
        assert_eq!(table.resolve("/bins/", CITIZEN), render(ViewId::Bins));
        assert!(table.lookup("/map?status=full").is_some());
    }
}

#[cfg(test)]
mod settle_tests {
    use super::*;

    #[test]
    fn test_unmatched_settles_per_role() {
        let table = table();
        let (path, res) = table.settle("/nowhere", AUTHORITY).expect("settles");
        assert_eq!(path, ANALYTICS_PATH);
        assert_eq!(res, render(ViewId::Analytics));

        let (path, res) = table.settle("/nowhere", CITIZEN).expect("settles");
        assert_eq!(path, DASHBOARD_PATH);
        assert_eq!(res, render(ViewId::CitizenDashboard));

        let (path, res) = table.settle("/nowhere", ANONYMOUS).expect("settles");
        assert_eq!(path, LOGIN_PATH);
        assert_eq!(
            res,
            Resolution::Render {
                view: ViewId::Auth,
                chrome: Chrome::Bare
            }
        );
    }

    #[test]
    fn test_every_route_settles_for_every_guard() {
        for policy in [UnmatchedRoute::RedirectToAnalytics, UnmatchedRoute::NotFoundPage] {
            let table = RouteTable::canonical(policy);
            for guard in [ANONYMOUS, CITIZEN, AUTHORITY] {
                for route in table.routes() {
                    assert!(
                        table.settle(route.path, guard).is_some(),
                        "{} loops for {guard:?}",
                        route.path
                    );
                }
            }
        }
    }

    #[test]
    fn test_root_settles_on_login_for_anonymous() {
        let (path, _) = table().settle("/", ANONYMOUS).expect("settles");
        assert_eq!(path, LOGIN_PATH);
    }
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/users/"), "/users");
    assert_eq!(normalize_path("/map?status=full"), "/map");
    assert_eq!(normalize_path("/rewards#top"), "/rewards");
}
