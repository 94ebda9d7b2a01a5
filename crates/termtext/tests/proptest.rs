//! Property-based tests for status styling and profile selection.

use proptest::prelude::*;
use termtext::{select_profile, status_role, HttpResponse, OutputMode, Profile, Renderer, Role};

proptest! {
    /// Every status code maps to exactly the role its class implies.
    #[test]
    fn status_role_follows_status_class(code in any::<u16>()) {
        let expected = if code < 300 {
            Role::Success
        } else if code < 400 {
            Role::Warn
        } else {
            Role::Fail
        };
        prop_assert_eq!(status_role(code), expected);
    }

    /// Keys that are not built-in profile keys always give no-color.
    #[test]
    fn arbitrary_keys_fall_back_to_no_color(key in "[a-zA-Z]{0,24}") {
        prop_assume!(!key.starts_with("termtext"));
        let profile = select_profile(Some(key.as_str()));
        prop_assert_eq!(profile.key(), "termtextNoColor");
    }

    /// JSON-only output is the body itself whenever it is not JSON.
    #[test]
    fn json_only_passes_non_json_through(body in "[a-z ]{1,40}") {
        prop_assume!(!matches!(body.trim(), "true" | "false" | "null"));
        let renderer = Renderer::new(Profile::no_color()).json_only(true);
        let mut out = Vec::new();
        renderer.render_with_to(&mut out, |_, _| Ok(()), Some(HttpResponse::new(200).body(body.clone())), None);
        prop_assert_eq!(String::from_utf8(out).unwrap(), body);
    }
}

#[test]
fn status_role_boundaries() {
    for (code, role) in [
        (0, Role::Success),
        (299, Role::Success),
        (300, Role::Warn),
        (399, Role::Warn),
        (400, Role::Fail),
        (u16::MAX, Role::Fail),
    ] {
        assert_eq!(status_role(code), role, "{code}");
    }
}

#[test]
fn failure_status_is_styled_as_fail() {
    let profile = Profile::dark().resolve(OutputMode::Term);
    assert_eq!(
        profile.paint(status_role(404), "404 Not Found"),
        profile.fail("404 Not Found")
    );
}
