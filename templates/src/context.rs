use crate::{escape_attribute, escape_html, stringify};
use serde_json::Value;
use std::{borrow::Cow, collections::HashMap};

/// How a context value is written into a template
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    /// stringified, then escaped with [`escape_html`]
    Escaped(Value),
    /// stringified, then escaped with [`escape_attribute`]
    Attribute(Value),
    /// written verbatim
    Raw(String),
}

impl Slot {
    /// the text substituted for a placeholder bound to this slot
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Slot::Escaped(value) => match stringify(value) {
                Cow::Borrowed(s) => escape_html(s),
                Cow::Owned(s) => Cow::Owned(escape_html(&s).into_owned()),
            },

            Slot::Attribute(value) => match stringify(value) {
                Cow::Borrowed(s) => escape_attribute(s),
                Cow::Owned(s) => Cow::Owned(escape_attribute(&s).into_owned()),
            },

            Slot::Raw(html) => Cow::Borrowed(html),
        }
    }
}

/**
Values for the placeholders of a template, keyed by placeholder name.

Values bound with [`Context::with`] or [`Context::with_attribute`] are
always escaped. Fragments bound with [`Context::with_raw`] are written
as-is; the engine cannot tell whether a raw fragment is safe, so
callers must only pass html they produced themselves, such as the
output of another render. Never bind user input as raw.

Binding the same name again replaces the earlier value, whatever its
kind.

```
use hearth_templates::{render_str, Context};

let context = Context::new()
    .with("message", "<b>hi</b>")
    .with_raw("content", "<b>hi</b>");

assert_eq!(
    render_str("{{message}} / {{content}}", &context),
    "&lt;b&gt;hi&lt;/b&gt; / <b>hi</b>"
);
```
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context(HashMap<String, Slot>);

impl Context {
    /// an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// chainable [`Context::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// chainable [`Context::insert_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_attribute(name, value);
        self
    }

    /// chainable [`Context::insert_raw`]
    pub fn with_raw(mut self, name: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert_raw(name, html);
        self
    }

    /// binds a value to be html-escaped
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), Slot::Escaped(value.into()));
    }

    /// binds a value to be attribute-escaped
    pub fn insert_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), Slot::Attribute(value.into()));
    }

    /// binds trusted html to be written verbatim
    pub fn insert_raw(&mut self, name: impl Into<String>, html: impl Into<String>) {
        self.0.insert(name.into(), Slot::Raw(html.into()));
    }

    /// binds a slot directly
    pub fn insert_slot(&mut self, name: impl Into<String>, slot: Slot) {
        self.0.insert(name.into(), slot);
    }

    /// the slot bound to `name`
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.0.get(name)
    }

    /// unbinds `name`
    pub fn remove(&mut self, name: &str) -> Option<Slot> {
        self.0.remove(name)
    }

    /// the number of bound names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// true if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> Extend<(K, Slot)> for Context {
    fn extend<T: IntoIterator<Item = (K, Slot)>>(&mut self, iter: T) {
        for (name, slot) in iter {
            self.insert_slot(name, slot);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Slot)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, Slot)>>(iter: T) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slots_escape_by_kind() {
        assert_eq!(Slot::Escaped(json!("a'<")).render(), "a'&lt;");
        assert_eq!(Slot::Attribute(json!("a'<")).render(), "a&#x27;&lt;");
        assert_eq!(Slot::Raw("a'<".into()).render(), "a'<");
        assert_eq!(Slot::Escaped(Value::Null).render(), "");
        assert_eq!(Slot::Escaped(json!(false)).render(), "false");
    }

    #[test]
    fn rebinding_replaces_kind() {
        let context = Context::new()
            .with_raw("content", "<p>")
            .with("content", "<p>");
        assert_eq!(context.len(), 1);
        assert_eq!(context.get("content"), Some(&Slot::Escaped(json!("<p>"))));
    }

    #[test]
    fn collects_from_pairs() {
        let context = [("a", Slot::Raw("x".into())), ("b", Slot::Escaped(json!(1)))]
            .into_iter()
            .collect::<Context>();
        assert_eq!(context.len(), 2);
        assert!(!context.is_empty());
    }
}
