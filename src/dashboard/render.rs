// Dashboard page rendering
// The template is embedded at compile time and auto-escaped as HTML

use minijinja::{context, Environment};

use super::cards::{self, BACKEND_ONLINE};
use super::client::StatusOutcome;
use crate::error::Result;

const TEMPLATE_NAME: &str = "dashboard.html";

pub struct DashboardRenderer {
    env: Environment<'static>,
}

impl DashboardRenderer {
    pub fn new() -> Result<Self> {
        Self::with_template(include_str!("dashboard.html"))
    }

    /// Renderer for a caller-supplied page template
    pub fn with_template(source: &'static str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Render the full page for one fetch outcome
    pub fn render(
        &self,
        title: &str,
        outcome: &StatusOutcome,
    ) -> std::result::Result<String, minijinja::Error> {
        self.env.get_template(TEMPLATE_NAME)?.render(context! {
            title => title,
            status => outcome.display_text(),
            status_online => outcome.is_online(),
            backend_online => BACKEND_ONLINE,
            system_card => cards::SYSTEM_STATUS,
            cards => cards::static_cards(),
        })
    }
}
