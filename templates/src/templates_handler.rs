use crate::{Context, Templates};
use trillium::{async_trait, Conn, Handler};

/**
A trillium handler that provides registered templates and an empty
[`Context`] to downsequence handlers
*/
#[derive(Default, Clone, Debug)]
pub struct TemplatesHandler(Templates);

impl TemplatesHandler {
    /// Builds a new templates handler from a [`Templates`] registry or
    /// anything that converts into one
    ///
    /// ```
    /// use hearth_templates::{Templates, TemplatesConnExt, TemplatesHandler};
    ///
    /// let handler = (
    ///     TemplatesHandler::new(Templates::new().with_template("greet-user", "Hello {{name}}")),
    ///     |conn: trillium::Conn| async move {
    ///         conn.assign("name", "hearth").render("greet-user")
    ///     },
    /// );
    ///
    /// use trillium_testing::prelude::*;
    /// assert_ok!(get("/").on(&handler), "Hello hearth");
    /// ```
    pub fn new(templates: impl Into<Templates>) -> Self {
        Self(templates.into())
    }

    /// the shared registry
    pub fn templates(&self) -> &Templates {
        &self.0
    }
}

impl From<Templates> for TemplatesHandler {
    fn from(templates: Templates) -> Self {
        Self(templates)
    }
}

#[async_trait]
impl Handler for TemplatesHandler {
    async fn run(&self, conn: Conn) -> Conn {
        let conn = conn.with_state(self.0.clone());
        if conn.state::<Context>().is_some() {
            conn
        } else {
            conn.with_state(Context::new())
        }
    }
}
