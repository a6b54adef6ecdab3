/// Router Module Index
///
/// Action endpoints grouped by who may call them. Navigation itself is not routed
/// here: every application path falls through to `handlers::navigate`.

/// Auth actions. No session required.
pub mod public;

/// Citizen actions. Sit behind the `auth_middleware` layer.
pub mod authenticated;

/// Authority actions. Sit behind the `auth_middleware` layer; the role check is
/// made inside each handler.
pub mod authority;
