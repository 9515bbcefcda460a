use crate::{render_str, Context, Error, Result};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

/**
A registry of named templates, shared between clones.

Templates come from three places: bodies registered directly, files
matched eagerly by a glob pattern, and files read lazily from a root
directory the first time a name is asked for. Every body is cached
once loaded, and cached bodies are never reloaded.

When reading from a root directory, a name that contains `..`, starts
with `/` or contains a backslash is reported as not found without
touching the filesystem.

```
use hearth_templates::{Context, Templates};

let templates = Templates::new().with_template("greet", "Hello {{name}}");
assert_eq!(
    templates.render("greet", &Context::new().with("name", "<hearth>")).unwrap(),
    "Hello &lt;hearth&gt;"
);
assert!(templates.render("missing", &Context::new()).unwrap_err().is_not_found());
```
*/
#[derive(Clone, Debug, Default)]
pub struct Templates {
    cache: Arc<RwLock<HashMap<String, Arc<str>>>>,
    root: Option<PathBuf>,
}

impl Templates {
    /// an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// a registry that reads `root/<name>` on first use of each name
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /**
    loads every file matching `pattern` now, registering each under its
    path as matched
    */
    pub fn glob(self, pattern: &str) -> Result<Self> {
        for path in glob::glob(pattern)? {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("skipping unreadable glob match: {e}");
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            let name = path.to_string_lossy().into_owned();
            let body = fs::read_to_string(&path).map_err(|source| Error::Io {
                name: name.clone(),
                source,
            })?;

            log::debug!("registered template {name:?}");
            self.register(name, body);
        }

        Ok(self)
    }

    /// chainable [`Templates::register`]
    pub fn with_template(self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.register(name, body);
        self
    }

    /// registers a template body under `name`, replacing any earlier body
    pub fn register(&self, name: impl Into<String>, body: impl Into<String>) {
        let body: Arc<str> = Arc::from(body.into());
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), body);
    }

    /// the raw body of the template called `name`
    pub fn load(&self, name: &str) -> Result<Arc<str>> {
        if let Some(body) = self.cached(name) {
            return Ok(body);
        }

        let Some(root) = &self.root else {
            return Err(Error::not_found(name));
        };

        if !is_safe_name(name) {
            log::warn!("refusing to load template {name:?}");
            return Err(Error::not_found(name));
        }

        let body: Arc<str> = Arc::from(read(root, name)?);
        log::debug!("loaded template {name:?} from {}", root.display());

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(name.to_string()).or_insert(body).clone())
    }

    /// renders the template called `name` against `context`
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        Ok(render_str(&self.load(name)?, context))
    }

    /// whether `name` can be loaded
    pub fn contains(&self, name: &str) -> bool {
        self.load(name).is_ok()
    }

    /// the names loaded so far, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn cached(&self, name: &str) -> Option<Arc<str>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.starts_with('/') && !name.contains('\\')
}

fn read(root: &Path, name: &str) -> Result<String> {
    let path = root.join(name);
    if !path.is_file() {
        return Err(Error::not_found(name));
    }

    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::not_found(name),
        _ => Error::Io {
            name: name.to_string(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "hearth-templates-{label}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn registered_templates() {
        let templates = Templates::new().with_template("a.html", "A {{x}}");
        assert!(templates.contains("a.html"));
        assert!(!templates.contains("b.html"));
        assert_eq!(&*templates.load("a.html").unwrap(), "A {{x}}");

        templates.register("a.html", "replaced");
        assert_eq!(&*templates.load("a.html").unwrap(), "replaced");
        assert_eq!(templates.names(), vec!["a.html".to_string()]);
    }

    #[test]
    fn missing_template_is_not_found() {
        let error = Templates::new().load("nope.html").unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "template \"nope.html\" not found");
    }

    #[test]
    fn directory_templates_are_loaded_lazily_and_cached() {
        let dir = scratch_dir("lazy");
        fs::write(dir.join("page.html"), "<h1>{{title}}</h1>").unwrap();

        let templates = Templates::from_dir(&dir);
        assert!(templates.names().is_empty());
        assert_eq!(
            templates
                .render("page.html", &Context::new().with("title", "Hi"))
                .unwrap(),
            "<h1>Hi</h1>"
        );

        fs::write(dir.join("page.html"), "changed").unwrap();
        assert_eq!(&*templates.load("page.html").unwrap(), "<h1>{{title}}</h1>");
        assert!(templates.load("absent.html").unwrap_err().is_not_found());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unsafe_names_never_reach_the_filesystem() {
        let dir = scratch_dir("traversal");
        let inner = dir.join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(dir.join("secret.txt"), "secret").unwrap();

        let templates = Templates::from_dir(&inner);
        for name in [
            "../secret.txt",
            "..",
            "a/../../secret.txt",
            "/etc/passwd",
            "..\\secret.txt",
            "",
        ] {
            assert!(templates.load(name).unwrap_err().is_not_found(), "{name}");
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn glob_registers_matches_eagerly() {
        let dir = scratch_dir("glob");
        fs::write(dir.join("one.html"), "1").unwrap();
        fs::write(dir.join("two.html"), "2").unwrap();
        fs::write(dir.join("skip.txt"), "x").unwrap();

        let pattern = format!("{}/*.html", dir.display());
        let templates = Templates::new().glob(&pattern).unwrap();
        assert_eq!(templates.names().len(), 2);

        let one = dir.join("one.html").to_string_lossy().into_owned();
        assert_eq!(&*templates.load(&one).unwrap(), "1");

        assert!(matches!(
            Templates::new().glob("[unclosed"),
            Err(Error::Pattern(_))
        ));

        fs::remove_dir_all(dir).unwrap();
    }
}
