use serde_json::Value;
use std::borrow::Cow;

/**
Escapes text for use as html element content.

`&` becomes `&amp;`, `<` becomes `&lt;`, `>` becomes `&gt;` and `"`
becomes `&quot;`. Every character is visited once, so an entity
produced for one character is never escaped again. Input that needs
no escaping is borrowed.

```
use hearth_templates::escape_html;
assert_eq!(escape_html("&<>"), "&amp;&lt;&gt;");
assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
assert_eq!(escape_html("it's fine"), "it's fine");
```
*/
pub fn escape_html(input: &str) -> Cow<'_, str> {
    escape_with(input, false)
}

/**
Escapes text for use inside a quoted html attribute value. In addition
to everything [`escape_html`] escapes, `'` becomes `&#x27;`.

Which escaper applies depends on where a placeholder sits in the
template, which the engine cannot tell. Use
[`Context::with_attribute`](crate::Context::with_attribute) for values
interpolated into attributes.

```
use hearth_templates::escape_attribute;
assert_eq!(escape_attribute("' onload='x"), "&#x27; onload=&#x27;x");
```
*/
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape_with(input, true)
}

fn escape_with(input: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"') || (attribute && c == '\'');

    let Some(first) = input.find(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 16);
    escaped.push_str(&input[..first]);

    for c in input[first..].chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' if attribute => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}

/**
The display form of a json value: `null` is empty, strings are
unquoted, numbers and booleans use their usual text, and arrays and
objects are compact json.
*/
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Stringifies then html-escapes a value
pub fn escape(value: &Value) -> String {
    escape_html(&stringify(value)).into_owned()
}
