use crate::{Context, Error, Templates};
use serde::Serialize;
use trillium::{Conn, KnownHeaderName};

const HTML: &str = "text/html; charset=utf-8";

/**
Extension trait that provides template rendering capabilities to
[`trillium::Conn`]s.

[`TemplatesHandler`](crate::TemplatesHandler) must run before any of
these are called.

The render methods end the request. A missing template becomes a 404
and any other failure a 500, and both are logged.
*/
pub trait TemplatesConnExt {
    /**
    binds an html-escaped value on this conn's context. the value can be
    anything serde-serializable
    */
    fn assign(self, name: &str, value: impl Serialize) -> Self;

    /// binds an attribute-escaped value on this conn's context
    fn assign_attribute(self, name: &str, value: impl Serialize) -> Self;

    /**
    binds a trusted html fragment on this conn's context, written
    without escaping. never pass user input here
    */
    fn assign_raw(self, name: &str, html: impl Into<String>) -> Self;

    /// the context accumulated on this conn
    fn context(&self) -> &Context;

    /// a mutable reference to the context accumulated on this conn
    fn context_mut(&mut self) -> &mut Context;

    /// the template registry
    fn templates(&self) -> &Templates;

    /// renders a template with the accumulated context
    fn render(self, name: &str) -> Self;

    /**
    renders a template with the provided context. note that this does
    not use any values accumulated with [`TemplatesConnExt::assign`]
    */
    fn render_with(self, name: &str, context: &Context) -> Self;

    /**
    renders `inner` with the accumulated context, then renders `layout`
    with the same context plus the result bound raw to `content`

    ```
    use hearth_templates::{Templates, TemplatesConnExt, TemplatesHandler};

    let templates = Templates::new()
        .with_template("layout.html", "<title>{{title}}</title><main>{{content}}</main>")
        .with_template("page.html", "<p>{{body}}</p>");

    let handler = (TemplatesHandler::new(templates), |conn: trillium::Conn| async move {
        conn.assign("title", "Home")
            .assign("body", "<script>")
            .render_in_layout("page.html", "layout.html")
    });

    use trillium_testing::prelude::*;
    assert_ok!(
        get("/").on(&handler),
        "<title>Home</title><main><p>&lt;script&gt;</p></main>"
    );
    ```
    */
    fn render_in_layout(self, inner: &str, layout: &str) -> Self;

    /**
    ends the request for a failed render: 404 for a missing template,
    500 for anything else
    */
    fn render_error(self, error: Error) -> Self;
}

fn bind(mut conn: Conn, name: &str, value: impl Serialize, attribute: bool) -> Conn {
    match serde_json::to_value(value) {
        Ok(value) if attribute => conn.context_mut().insert_attribute(name, value),
        Ok(value) => conn.context_mut().insert(name, value),
        Err(e) => log::error!("could not assign {name}: {e}"),
    }
    conn
}

fn respond(mut conn: Conn, rendered: Result<String, Error>) -> Conn {
    match rendered {
        Ok(html) => {
            conn.response_headers_mut()
                .insert(KnownHeaderName::ContentType, HTML);
            conn.ok(html)
        }

        Err(e) => conn.render_error(e),
    }
}

impl TemplatesConnExt for Conn {
    fn assign(self, name: &str, value: impl Serialize) -> Self {
        bind(self, name, value, false)
    }

    fn assign_attribute(self, name: &str, value: impl Serialize) -> Self {
        bind(self, name, value, true)
    }

    fn assign_raw(mut self, name: &str, html: impl Into<String>) -> Self {
        self.context_mut().insert_raw(name, html);
        self
    }

    fn context(&self) -> &Context {
        self.state()
            .expect("TemplatesConnExt::context called without running the handler first")
    }

    fn context_mut(&mut self) -> &mut Context {
        self.state_mut()
            .expect("TemplatesConnExt::context_mut called without running the handler first")
    }

    fn templates(&self) -> &Templates {
        self.state()
            .expect("TemplatesConnExt::templates called without running the handler first")
    }

    fn render(self, name: &str) -> Self {
        let rendered = self.templates().render(name, self.context());
        respond(self, rendered)
    }

    fn render_with(self, name: &str, context: &Context) -> Self {
        let rendered = self.templates().render(name, context);
        respond(self, rendered)
    }

    fn render_in_layout(self, inner: &str, layout: &str) -> Self {
        let templates = self.templates();
        let rendered = templates.render(inner, self.context()).and_then(|content| {
            let mut context = self.context().clone();
            context.insert_raw("content", content);
            templates.render(layout, &context)
        });
        respond(self, rendered)
    }

    fn render_error(self, error: Error) -> Self {
        log::error!("{error}");
        let status = if error.is_not_found() { 404 } else { 500 };
        self.with_status(status).with_body(error.to_string()).halt()
    }
}
