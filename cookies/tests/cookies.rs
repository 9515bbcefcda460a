use hearth_cookies::{CookiesConnExt, CookiesHandler, SetCookie};
use trillium::Conn;
use trillium_testing::prelude::*;

async fn echo_session(conn: Conn) -> Conn {
    let body = conn
        .cookies()
        .get("session_id")
        .unwrap_or("none")
        .to_string();
    conn.ok(body)
}

#[test]
fn reads_request_cookies() {
    let _ = env_logger::builder().is_test(true).try_init();
    let handler = (CookiesHandler::new(), echo_session);

    assert_ok!(get("/").on(&handler), "none");
    assert_ok!(
        get("/")
            .with_request_header("cookie", "theme=dark; session_id=abc123")
            .on(&handler),
        "abc123"
    );
}

#[test]
fn malformed_cookie_header_degrades_to_no_cookie() {
    let handler = (CookiesHandler::new(), echo_session);

    assert_ok!(
        get("/")
            .with_request_header("cookie", ";;session_id;=abc; ===")
            .on(&handler),
        "none"
    );
}

#[test]
fn no_set_cookie_without_changes() {
    let handler = (CookiesHandler::new(), echo_session);
    let conn = get("/")
        .with_request_header("cookie", "session_id=abc123")
        .on(&handler);
    assert!(conn.response_headers().get_str("set-cookie").is_none());
}

#[test]
fn queued_cookies_are_sent() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        conn.with_cookie(SetCookie::new("session_id", "first"))
            .with_cookie(SetCookie::removal("session_id"))
            .ok("ok")
    });

    assert_ok!(
        get("/").on(&handler),
        "ok",
        "set-cookie" => "session_id=; Path=/; Max-Age=0"
    );
}
