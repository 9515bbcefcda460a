use crate::Context;

/**
Substitutes `{{name}}` placeholders in `body` from `context`.

The body is scanned once, left to right. A placeholder is `{{`, one or
more ascii letters, digits or underscores, then `}}`, with no
whitespace. Substituted text is never scanned again, so a value that
contains `{{...}}` comes out literally. Placeholders with no binding
and any other braces are copied through unchanged, which lets a layout
be filled in stages.

```
use hearth_templates::{render_str, Context};

let context = Context::new().with("name", "{{secret}}").with("secret", "hunter2");
assert_eq!(
    render_str("hi {{name}}, {{ name }} {{missing}}", &context),
    "hi {{secret}}, {{ name }} {{missing}}"
);
```
*/
pub fn render_str(body: &str, context: &Context) -> String {
    let mut rendered = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(open) = rest.find("{{") {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let name_len = after_open
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();

        if name_len == 0 || !after_open[name_len..].starts_with("}}") {
            // not a placeholder here; the next brace may still open one
            rendered.push('{');
            rest = &rest[open + 1..];
            continue;
        }

        let name = &after_open[..name_len];
        let end = open + 2 + name_len + 2;
        match context.get(name) {
            Some(slot) => rendered.push_str(&slot.render()),
            None => rendered.push_str(&rest[open..end]),
        }

        rest = &rest[end..];
    }

    rendered.push_str(rest);
    rendered
}
