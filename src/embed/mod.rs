//! Embedded HTML pages.
//!
//! - `build` - demo page written next to the sprite (`index.html`)
//! - `serve` - upload page served on `GET /`
//!
//! # Usage
//!
//! ```ignore
//! use embed::build::{DEMO_HTML, DemoVars};
//!
//! let html = DEMO_HTML.render(&DemoVars { sprite, preview });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod build {
    use super::{Template, TemplateVars};
    use crate::utils::html::escape_attr;

    /// Demo rows, one class list per theme.
    pub const ROWS: &[&str] = &[
        "",
        "accented",
        "heavy accented",
        "pink accented",
        "purple accented",
        "yellow accented",
        "green accented",
    ];

    /// Variables for demo.html.
    pub struct DemoVars {
        /// Complete sprite markup, embedded verbatim.
        pub sprite: String,
        /// Symbol ids referenced in every row.
        pub preview: Vec<String>,
    }

    impl DemoVars {
        fn rows(&self) -> String {
            let uses: String = self
                .preview
                .iter()
                .map(|id| {
                    format!(
                        "      <svg viewBox=\"0 0 100 100\"><use href=\"#{}\"/></svg>\n",
                        escape_attr(id)
                    )
                })
                .collect();

            ROWS.iter()
                .map(|class| {
                    let open = if class.is_empty() {
                        "<div>".to_string()
                    } else {
                        format!("<div class=\"{class}\">")
                    };
                    format!("    {open}\n{uses}    </div>\n")
                })
                .collect()
        }
    }

    impl TemplateVars for DemoVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__ROWS__", &self.rows())
                .replace("__SPRITE__", &self.sprite)
        }
    }

    /// Demo page embedding the sprite and its themed previews.
    pub const DEMO_HTML: Template<DemoVars> =
        Template::new(include_str!("build/demo.html"));
}

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for index.html.
    pub struct IndexVars<'a> {
        pub version: &'a str,
    }

    impl Default for IndexVars<'_> {
        fn default() -> Self {
            Self {
                version: env!("CARGO_PKG_VERSION"),
            }
        }
    }

    impl TemplateVars for IndexVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__VERSION__", self.version)
        }
    }

    /// Upload form posting to `/process`.
    pub const INDEX_HTML: Template<IndexVars<'static>> =
        Template::new(include_str!("serve/index.html"));
}
