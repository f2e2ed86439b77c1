//! Declarative route table.
//!
//! Routes are declared as `(verb, pattern, endpoint, params)` with patterns in
//! a library-neutral `{name}` placeholder syntax, then compiled into an axum
//! router. Literal segments match exactly and case-sensitively. Patterns do not
//! overlap, so no priority rules are needed.

use std::collections::BTreeMap;

use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;
use thiserror::Error;

use snippetbox_core::SnippetId;

pub mod snippets;
pub mod system;

/// Prefix under which static assets are served.
pub const STATIC_PREFIX: &str = "/static";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Home,
    SnippetView,
    SnippetCreateForm,
    SnippetCreateSubmit,
    Health,
}

/// Type a path placeholder is extracted as.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Positive integer snippet id; anything else is "not found".
    SnippetId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Route {
    pub verb: Verb,
    pub pattern: &'static str,
    pub endpoint: Endpoint,
    pub params: &'static [(&'static str, ParamKind)],
}

pub const ROUTES: &[Route] = &[
    Route {
        verb: Verb::Get,
        pattern: "/",
        endpoint: Endpoint::Home,
        params: &[],
    },
    Route {
        verb: Verb::Get,
        pattern: "/snippet/view/{id}",
        endpoint: Endpoint::SnippetView,
        params: &[("id", ParamKind::SnippetId)],
    },
    Route {
        verb: Verb::Get,
        pattern: "/snippet/create",
        endpoint: Endpoint::SnippetCreateForm,
        params: &[],
    },
    Route {
        verb: Verb::Post,
        pattern: "/snippet/create",
        endpoint: Endpoint::SnippetCreateSubmit,
        params: &[],
    },
    Route {
        verb: Verb::Get,
        pattern: "/health",
        endpoint: Endpoint::Health,
        params: &[],
    },
];

/// Path of the view page for `id`.
pub fn snippet_view_path(id: SnippetId) -> String {
    format!("/snippet/view/{id}")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} has an empty or malformed placeholder")]
    BadPlaceholder(String),

    #[error("pattern {pattern:?} placeholders do not match declared params")]
    ParamMismatch { pattern: String },

    #[error("{verb:?} {pattern:?} is declared twice")]
    Duplicate { verb: Verb, pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| RouteError::MissingLeadingSlash(pattern.to_string()))?;

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        for raw in rest.split('/') {
            let seg = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if is_ident(name) => Segment::Param(name.to_string()),
                Some(_) => return Err(RouteError::BadPlaceholder(pattern.to_string())),
                None if raw.contains(['{', '}', ':', '*']) => {
                    return Err(RouteError::BadPlaceholder(pattern.to_string()));
                }
                None => Segment::Literal(raw.to_string()),
            };
            segments.push(seg);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render in axum's path syntax (`/:name` placeholders).
    pub fn to_axum_path(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for seg in &self.segments {
            out.push('/');
            match seg {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Param(name) => {
                    out.push(':');
                    out.push_str(name);
                }
            }
        }
        out
    }
}

fn is_ident(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a route table and return each route with its compiled pattern.
pub fn compile(routes: &[Route]) -> Result<Vec<(Route, RoutePattern)>, RouteError> {
    let mut seen = Vec::with_capacity(routes.len());
    let mut compiled = Vec::with_capacity(routes.len());

    for route in routes {
        let pattern = RoutePattern::parse(route.pattern)?;

        let mut placeholders: Vec<&str> = pattern.param_names().collect();
        let mut declared: Vec<&str> = route.params.iter().map(|(name, _)| *name).collect();
        placeholders.sort_unstable();
        declared.sort_unstable();
        if placeholders != declared {
            return Err(RouteError::ParamMismatch {
                pattern: route.pattern.to_string(),
            });
        }

        if seen.contains(&(route.verb, route.pattern)) {
            return Err(RouteError::Duplicate {
                verb: route.verb,
                pattern: route.pattern.to_string(),
            });
        }
        seen.push((route.verb, route.pattern));

        compiled.push((*route, pattern));
    }
    Ok(compiled)
}

fn bind(router: MethodRouter, verb: Verb, endpoint: Endpoint) -> MethodRouter {
    let filter = verb.filter();
    match endpoint {
        Endpoint::Home => router.on(filter, snippets::home),
        Endpoint::SnippetView => router.on(filter, snippets::view),
        Endpoint::SnippetCreateForm => router.on(filter, snippets::create_form),
        Endpoint::SnippetCreateSubmit => router.on(filter, snippets::create_submit),
        Endpoint::Health => router.on(filter, system::health),
    }
}

/// Router for every entry in `routes`. Paths that match but have no entry for
/// the request method answer 405.
pub fn router(routes: &[Route]) -> Result<Router, RouteError> {
    let mut by_path: BTreeMap<String, MethodRouter> = BTreeMap::new();
    for (route, pattern) in compile(routes)? {
        let path = pattern.to_axum_path();
        let existing = by_path.remove(&path).unwrap_or_else(MethodRouter::new);
        by_path.insert(path, bind(existing, route.verb, route.endpoint));
    }

    Ok(by_path
        .into_iter()
        .fold(Router::new(), |r, (path, methods)| r.route(&path, methods)))
}
