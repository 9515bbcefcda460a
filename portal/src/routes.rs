use crate::{LoginForm, PortalConfig};
use hearth_sessions::{Attributes, FlashKind, SessionConnExt, USERNAME_KEY};
use hearth_templates::{Context, TemplatesConnExt};
use trillium::Conn;
use trillium_redirect::RedirectConnExt;

const LAYOUT: &str = "layout.html";

/// pops at most one flash and renders it as an alert fragment
fn flash_fragment(conn: &mut Conn) -> hearth_templates::Result<String> {
    let Some(flash) = conn.take_flash() else {
        return Ok(String::new());
    };

    let context = Context::new()
        .with_attribute("kind", flash.kind().as_str())
        .with("message", flash.message());
    conn.templates().render("flash.html", &context)
}

fn with_flash(mut conn: Conn) -> Result<Conn, Conn> {
    match flash_fragment(&mut conn) {
        Ok(fragment) => Ok(conn.assign_raw("flash", fragment)),
        Err(e) => Err(conn.render_error(e)),
    }
}

pub(crate) async fn login_page(conn: Conn) -> Conn {
    if conn.is_authenticated() {
        return conn.redirect("/profile");
    }

    match with_flash(conn) {
        Ok(conn) => conn
            .assign("title", "Login")
            .render_in_layout("login.html", LAYOUT),
        Err(conn) => conn,
    }
}

pub(crate) async fn login(mut conn: Conn) -> Conn {
    let body = match conn.request_body_string().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("could not read login form: {e}");
            return conn.with_status(400).halt();
        }
    };

    let Some(config) = conn.state::<PortalConfig>() else {
        log::error!("PortalConfig state must be set before the login route");
        return conn.with_status(500).halt();
    };

    match LoginForm::parse(&body).authenticate(config) {
        Ok(username) => {
            log::info!("{username} logged in");
            let mut attributes = Attributes::new();
            attributes.insert(USERNAME_KEY.into(), username.into());
            conn.log_in(attributes).redirect("/profile")
        }

        Err(e) => {
            log::info!("login refused: {e}");
            conn.flash(FlashKind::Error, e.to_string()).redirect("/")
        }
    }
}

pub(crate) async fn profile(conn: Conn) -> Conn {
    let Some(details) = conn.session().and_then(|session| {
        Some((
            session.get_str(USERNAME_KEY)?.to_string(),
            session.id().short().to_string(),
            httpdate::fmt_http_date(session.created_at()),
        ))
    }) else {
        return conn.redirect("/");
    };

    let (username, session_prefix, created_at) = details;
    match with_flash(conn) {
        Ok(conn) => conn
            .assign("title", "Profile")
            .assign("username", username)
            .assign("session_prefix", session_prefix)
            .assign("created_at", created_at)
            .render_in_layout("profile.html", LAYOUT),
        Err(conn) => conn,
    }
}

pub(crate) async fn messages(conn: Conn) -> Conn {
    let conn = if conn.is_authenticated() {
        conn.flash(
            FlashKind::Success,
            "This is a flash message! It will show once.",
        )
    } else {
        conn
    };

    conn.redirect("/profile")
}

pub(crate) async fn logout(conn: Conn) -> Conn {
    conn.log_out().redirect("/")
}

pub(crate) async fn not_found(conn: Conn) -> Conn {
    let path = conn.path().to_string();
    conn.assign("title", "Not Found")
        .assign("path", path)
        .assign_raw("flash", "")
        .render_in_layout("not_found.html", LAYOUT)
        .with_status(404)
}
