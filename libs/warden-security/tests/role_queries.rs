#![allow(clippy::unwrap_used, clippy::expect_used)]

use warden_security::SecurityContext;

fn casings(role: &str) -> Vec<String> {
    let alternating: String = role
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();

    vec![
        role.to_owned(),
        role.to_uppercase(),
        role.to_lowercase(),
        alternating,
    ]
}

#[test]
fn has_role_matches_every_casing_of_every_member() {
    let role_sets: [&[&str]; 4] = [
        &[],
        &["Admin"],
        &["Admin", "User", "report_viewer"],
        &["ops-Lead", "ops-lead"],
    ];

    for roles in role_sets {
        let ctx = SecurityContext::builder("req").roles(roles.iter().copied()).build();

        for member in roles {
            for variant in casings(member) {
                assert!(ctx.has_role(&variant), "{variant} should match {roles:?}");
            }
        }

        for outsider in ["Guest", "Admins", "dmin", "User "] {
            for variant in casings(outsider) {
                assert!(!ctx.has_role(&variant), "{variant} must not match {roles:?}");
            }
        }
    }
}

#[test]
fn admin_user_role_queries() {
    let ctx = SecurityContext::builder("req")
        .roles(["Admin", "User"])
        .build();

    assert!(ctx.has_role("admin"));
    assert!(ctx.has_any_role(["Guest", "user"]));
    assert!(!ctx.has_all_roles(["Admin", "Guest"]));
}

#[test]
fn collection_queries_are_consistent_with_has_role() {
    let ctx = SecurityContext::builder("req")
        .roles(["Admin", "User"])
        .build();
    let candidates: [&[&str]; 5] = [
        &[],
        &["admin"],
        &["guest"],
        &["ADMIN", "user"],
        &["admin", "guest"],
    ];

    for names in candidates {
        let matches = names.iter().filter(|n| ctx.has_role(n)).count();

        assert_eq!(ctx.has_all_roles(names), matches == names.len());
        assert_eq!(ctx.has_any_role(names), matches > 0);
        assert_eq!(ctx.has_no_role(names), matches == 0);
    }
}

#[test]
fn roles_keep_their_bound_order_and_spelling() {
    let ctx = SecurityContext::builder("req")
        .roles(["user", "Admin", "user"])
        .build();

    assert_eq!(ctx.roles(), &["user", "Admin", "user"]);
}
