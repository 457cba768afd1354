use super::pattern::{split_path, RouteParams, RoutePattern};
use super::RouteError;

struct Route<H> {
    pattern: RoutePattern,
    handler: H,
}

#[derive(Debug)]
pub struct RouteMatch<'t, H> {
    pub pattern: &'t RoutePattern,
    pub handler: &'t H,
    pub params: RouteParams,
}

pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RouteTable::register`].
    pub fn route(mut self, template: &str, handler: H) -> Result<Self, RouteError> {
        self.register(template, handler)?;
        Ok(self)
    }

    pub fn register(&mut self, template: &str, handler: H) -> Result<(), RouteError> {
        let pattern = RoutePattern::parse(template)?;
        for existing in &self.routes {
            if existing.pattern.same_shape(&pattern) {
                return Err(RouteError::Duplicate {
                    template: pattern.template().to_string(),
                    existing: existing.pattern.template().to_string(),
                });
            }
            if existing.pattern.covers(&pattern) {
                return Err(RouteError::Shadowed {
                    template: pattern.template().to_string(),
                    by: existing.pattern.template().to_string(),
                });
            }
            if existing.pattern.overlaps(&pattern) && existing.pattern.less_literal_at_divergence(&pattern) {
                return Err(RouteError::Misordered {
                    template: pattern.template().to_string(),
                    by: existing.pattern.template().to_string(),
                });
            }
        }
        self.routes.push(Route { pattern, handler });
        Ok(())
    }

    /// First pattern, in registration order, that matches `path`.
    pub fn dispatch(&self, path: &str) -> Option<RouteMatch<'_, H>> {
        let segments = split_path(path)?;
        self.routes.iter().find_map(|route| {
            route.pattern.match_segments(&segments).map(|params| RouteMatch {
                pattern: &route.pattern,
                handler: &route.handler,
                params,
            })
        })
    }

    /// Replays `(path, expected template)` samples and fails on the first one
    /// that lands anywhere else. `None` as expectation asserts no match.
    pub fn verify<'a>(&self, samples: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> Result<(), RouteError> {
        for (path, expected) in samples {
            let actual = self.dispatch(path).map(|m| m.pattern.template().to_string());
            let expected_template = expected.map(|t| {
                RoutePattern::parse(t)
                    .map(|p| p.template().to_string())
                    .unwrap_or_else(|_| t.to_string())
            });
            if actual != expected_template {
                return Err(RouteError::SelfCheck {
                    path: path.to_string(),
                    expected: expected_template.unwrap_or_else(|| "no match".to_string()),
                    actual,
                });
            }
        }
        Ok(())
    }

}
