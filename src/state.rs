use crate::{
    api::StudentApi,
    config::RuntimeConfiguration,
    error::RosterResult,
    maud_conveniences::{render_footer, render_nav},
};
use maud::{DOCTYPE, Markup, html};

#[derive(Clone, Debug)]
pub struct RosterState {
    api: StudentApi,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let api = StudentApi::from_config(&config.backend_config())?;
        Ok(Self { api, config })
    }

    pub const fn api(&self) -> &StudentApi {
        &self.api
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// Wraps a page body in the shared layout, highlighting `active_path` in the nav.
    #[allow(clippy::unused_self)]
    pub fn render(&self, active_path: &str, markup: Markup) -> Markup {
        let year = jiff::Zoned::now().year();

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    style { ".htmx-request .idle-label, .htmx-request.idle-label { display: none; }" }
                    title { "Student Management" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col text-white" {
                    (render_nav(active_path))
                    main class="flex-grow container mx-auto px-4 py-8" {
                        (markup)
                    }
                    (render_footer(year))
                }
            }
        }
    }
}
