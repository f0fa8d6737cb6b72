/// Username reported when no authenticated user is bound.
///
/// Not a valid login name; never carries roles.
pub const ANONYMOUS_USERNAME: &str = "system!";
