use hearth_templates::{Context, Templates, TemplatesConnExt, TemplatesHandler};
use trillium::Conn;
use trillium_testing::prelude::*;

fn templates() -> Templates {
    Templates::new()
        .with_template("layout.html", "<title>{{title}}</title>{{content}}")
        .with_template("message.html", "<p>{{message}}</p>")
        .with_template("link.html", "<a title=\"{{title}}\">{{title}}</a>")
}

#[test]
fn assigned_values_are_escaped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.assign("message", "<b>hi</b>").render("message.html")
    });

    assert_ok!(get("/").on(&handler), "<p>&lt;b&gt;hi&lt;/b&gt;</p>");
}

#[test]
fn raw_fragments_are_written_verbatim() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.assign("title", "t")
            .assign_raw("content", "<b>hi</b>")
            .render("layout.html")
    });

    assert_ok!(get("/").on(&handler), "<title>t</title><b>hi</b>");
}

#[test]
fn attribute_values_escape_quotes() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.assign_attribute("title", "\"x' <y>").render("link.html")
    });

    assert_ok!(
        get("/").on(&handler),
        "<a title=\"&quot;x&#x27; &lt;y&gt;\">&quot;x&#x27; &lt;y&gt;</a>"
    );
}

#[test]
fn non_string_values() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        let message: Option<&str> = None;
        conn.assign("title", 42)
            .assign("message", message)
            .render_in_layout("message.html", "layout.html")
    });

    assert_ok!(get("/").on(&handler), "<title>42</title><p></p>");
}

#[test]
fn render_with_ignores_assigns() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.assign("message", "assigned")
            .render_with("message.html", &Context::new().with("message", "explicit"))
    });

    assert_ok!(get("/").on(&handler), "<p>explicit</p>");
}

#[test]
fn layout_content_is_not_rescanned() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.assign("message", "{{title}}")
            .assign("title", "T")
            .render_in_layout("message.html", "layout.html")
    });

    assert_ok!(get("/").on(&handler), "<title>T</title><p>{{title}}</p>");
}

#[test]
fn missing_template_is_a_404() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.render("nope.html")
    });

    assert_status!(get("/").on(&handler), 404);

    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        conn.render_in_layout("message.html", "missing-layout.html")
    });

    assert_status!(get("/").on(&handler), 404);
}

#[test]
fn templates_are_available_on_the_conn() {
    let handler = (TemplatesHandler::new(templates()), |conn: Conn| async move {
        let body = format!(
            "{} {}",
            conn.templates().contains("layout.html"),
            conn.context().is_empty()
        );
        conn.ok(body)
    });

    assert_ok!(get("/").on(&handler), "true true");
}
