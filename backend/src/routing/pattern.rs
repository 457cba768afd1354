use std::fmt;

use super::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == segment,
            Segment::Param(_) => !segment.is_empty(),
        }
    }
}

/// A path template such as `sessions/{id}/join`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let trimmed = template.trim_matches('/');
        let mut segments = Vec::new();
        if !trimmed.is_empty() {
            for raw in trimmed.split('/') {
                if raw.is_empty() {
                    return Err(invalid("empty segment"));
                }
                let segment = match raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                    Some("") => return Err(invalid("parameter without a name")),
                    Some(name) if name.contains(['{', '}']) => return Err(invalid("nested braces")),
                    Some(name) => {
                        let repeated = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if repeated {
                            return Err(invalid("parameter name used twice"));
                        }
                        Segment::Param(name.to_string())
                    }
                    None if raw.contains(['{', '}']) => return Err(invalid("stray brace in literal segment")),
                    None => Segment::Literal(raw.to_string()),
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            template: format!("/{trimmed}"),
            segments,
        })
    }

    /// Normalised template, always with a single leading slash.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Both patterns match exactly the same paths (parameter names aside).
    pub fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                (Segment::Param(_), Segment::Param(_)) => true,
                _ => false,
            })
    }

    /// Every path `other` matches is matched by `self` as well.
    pub fn covers(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|pair| match pair {
                (Segment::Param(_), _) => true,
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                (Segment::Literal(_), Segment::Param(_)) => false,
            })
    }

    /// Some path is matched by both patterns.
    pub fn overlaps(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                _ => true,
            })
    }

    /// At the first segment where the two patterns differ, `self` has a
    /// parameter and `other` a literal.
    pub fn less_literal_at_divergence(&self, other: &RoutePattern) -> bool {
        for pair in self.segments.iter().zip(&other.segments) {
            match pair {
                (Segment::Literal(a), Segment::Literal(b)) if a == b => continue,
                (Segment::Param(_), Segment::Param(_)) => continue,
                (Segment::Param(_), Segment::Literal(_)) => return true,
                _ => return false,
            }
        }
        false
    }

    pub fn match_segments(&self, path: &[&str]) -> Option<RouteParams> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut params = RouteParams::default();
        for (segment, value) in self.segments.iter().zip(path) {
            if !segment.matches(value) {
                return None;
            }
            if let Segment::Param(name) = segment {
                params.pairs.push((name.clone(), (*value).to_string()));
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Parameter values captured by a match, exactly as they appeared in the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pairs: Vec<(String, String)>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Splits a request path into segments, ignoring the leading and trailing
/// slash. Returns `None` for paths with empty inner segments (`a//b`), which
/// no pattern can match.
pub fn split_path(path: &str) -> Option<Vec<&str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}
