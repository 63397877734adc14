//! Navigation requests handed to a [`Navigator`](super::Navigator).

use serde::Serialize;
use url::form_urlencoded;

/// A single `goTo(path, params, {replaceHistory})` call.
///
/// Query parameters are escaped when they are added, so [`location`](Self::location)
/// is always safe to hand to a router verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    path: String,
    query: Option<String>,
    replace_history: bool,
}

impl NavigationRequest {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            replace_history: false,
        }
    }

    /// Appends `name=value` to the query string, form-urlencoding both.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        let mut serializer = form_urlencoded::Serializer::new(self.query.take().unwrap_or_default());
        serializer.append_pair(name, value);
        self.query = Some(serializer.finish());
        self
    }

    /// Replaces the current history entry instead of pushing a new one.
    pub fn replacing_history(mut self) -> Self {
        self.replace_history = true;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The escaped query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn replace_history(&self) -> bool {
        self.replace_history
    }

    /// `path?query`, ready for the router.
    pub fn location(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Decoded value of the first parameter called `name`.
    pub fn param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}
