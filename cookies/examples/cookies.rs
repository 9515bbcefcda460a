use hearth_cookies::{CookiesConnExt, CookiesHandler, SetCookie};
use trillium::Conn;

pub fn main() {
    env_logger::init();

    trillium_smol::run((CookiesHandler::new(), |conn: Conn| async move {
        let visits = conn
            .cookies()
            .get("visits")
            .and_then(|visits| visits.parse::<u64>().ok())
            .unwrap_or_default();

        conn.with_cookie(SetCookie::new("visits", (visits + 1).to_string()))
            .ok(format!("visits: {visits}"))
    }));
}
