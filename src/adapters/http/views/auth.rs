//! Landing, login and signup pages.

use handlebars::RenderError;
use serde_json::json;

use crate::domain::account::MIN_PASSWORD_LEN;
use crate::domain::subscription::FREE_TIER_WINE_LIMIT;

use super::{Nav, Views};

impl Views {
    pub fn landing_page(&self) -> Result<String, RenderError> {
        self.page(
            "landing",
            "Welcome",
            Nav::anonymous(),
            "",
            json!({ "free_limit": FREE_TIER_WINE_LIMIT }),
        )
    }

    pub fn login_page(&self, csrf_token: &str, error: Option<&str>) -> Result<String, RenderError> {
        self.page("login", "Log in", Nav::anonymous(), csrf_token, json!({ "error": error }))
    }

    /// `tier` preselects the plan, as linked from the landing page.
    pub fn signup_page(
        &self,
        csrf_token: &str,
        tier: Option<&str>,
        error: Option<&str>,
    ) -> Result<String, RenderError> {
        let pro = matches!(tier, Some(t) if t.eq_ignore_ascii_case("pro"));
        self.page(
            "signup",
            "Sign up",
            Nav::anonymous(),
            csrf_token,
            json!({
                "pro": pro,
                "error": error,
                "min_password_length": MIN_PASSWORD_LEN,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::views;

    #[test]
    fn landing_lists_both_plans() {
        let html = views().landing_page().unwrap();
        assert!(html.contains("Up to 10 wines"));
        assert!(html.contains("href=\"/signup?tier"));
    }

    #[test]
    fn signup_preselects_pro_plan() {
        let html = views().signup_page("tok", Some("pro"), None).unwrap();
        assert!(html.contains("value=\"pro\" checked"));
        assert!(!html.contains("value=\"free\" checked"));
        assert!(html.contains("minlength=\"8\""));
    }

    #[test]
    fn signup_defaults_to_free() {
        let html = views().signup_page("tok", None, None).unwrap();
        assert!(html.contains("value=\"free\" checked"));
    }

    #[test]
    fn login_error_is_escaped() {
        let html = views().login_page("tok", Some("<bad>")).unwrap();
        assert!(html.contains("&lt;bad&gt;"));
        assert!(html.contains("value=\"tok\""));
    }
}
