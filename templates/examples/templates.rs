use hearth_templates::{Templates, TemplatesConnExt, TemplatesHandler};
use trillium::Conn;

pub fn main() {
    env_logger::init();

    let templates = Templates::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/examples/templates"));

    trillium_smol::run((TemplatesHandler::new(templates), |conn: Conn| async move {
        let name = conn.querystring().trim_start_matches("name=").to_string();
        conn.assign("title", "hello")
            .assign("name", if name.is_empty() { "world".into() } else { name })
            .render_in_layout("hello.html", "layout.html")
    }));
}
