use hearth_cookies::CookiesHandler;
use hearth_sessions::{Attributes, FlashQueue, SessionConnExt, SessionHandler, SessionStore};
use serde_json::json;
use trillium::Conn;

pub fn main() {
    env_logger::init();

    trillium_smol::run((
        CookiesHandler::new(),
        SessionHandler::new(SessionStore::new(), FlashQueue::new()),
        |conn: Conn| async move {
            let Some(count) = conn
                .session()
                .map(|session| session.get::<usize>("count").unwrap_or_default())
            else {
                let mut attributes = Attributes::new();
                attributes.insert("count".into(), json!(1));
                return conn.log_in(attributes).ok("count: 0");
            };

            conn.with_session("count", count + 1)
                .ok(format!("count: {count}"))
        },
    ));
}
