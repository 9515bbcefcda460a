#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    unused_qualifications
)]

/*!
# escaping html templates for hearth

Templates are plain text with `{{name}}` placeholders and nothing else:
no loops, no conditionals, no expressions. [`render_str`] fills the
placeholders from a [`Context`] in a single pass, escaping every value
unless it was explicitly bound as a raw html fragment.

[`Templates`] is a shared registry of named bodies, and
[`TemplatesHandler`] with [`TemplatesConnExt`] make it available to a
trillium handler sequence.

```
use hearth_templates::{Templates, TemplatesConnExt, TemplatesHandler};

let templates = Templates::new()
    .with_template("layout.html", "<body>{{content}}</body>")
    .with_template("hello.html", "hello {{name}}!");

let handler = (
    TemplatesHandler::new(templates),
    |conn: trillium::Conn| async move {
        conn.assign("name", "<hearth>")
            .render_in_layout("hello.html", "layout.html")
    },
);

use trillium_testing::prelude::*;
assert_ok!(
    get("/").on(&handler),
    "<body>hello &lt;hearth&gt;!</body>",
    "content-type" => "text/html; charset=utf-8"
);
```
*/

mod context;
pub use context::{Context, Slot};

mod error;
pub use error::{Error, Result};

mod escape;
pub use escape::{escape, escape_attribute, escape_html, stringify};

mod render;
pub use render::render_str;

mod templates;
pub use templates::Templates;

mod templates_conn_ext;
pub use templates_conn_ext::TemplatesConnExt;

mod templates_handler;
pub use templates_handler::TemplatesHandler;
