//! Path templates.
//!
//! A template is a `/`-delimited list of segments. Each segment is either a
//! literal that must match exactly or a `{name}` placeholder that captures
//! the whole candidate segment:
//!
//! ```text
//! /activity/{activity_id}    matches  /activity/152342   → activity_id = "152342"
//!                            rejects  /activity/152342/x  (segment count differs)
//! ```
//!
//! There are no wildcards, no partial-segment placeholders and no regex.
//! Captured values are returned exactly as they appear in the path; they are
//! not percent-decoded.

use std::collections::HashMap;

/// Why a template was rejected by [`PathPattern::compile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unclosed `{{` in segment `{segment}` of `{template}`")]
    Unclosed { template: String, segment: String },

    #[error("unmatched `}}` in segment `{segment}` of `{template}`")]
    Unopened { template: String, segment: String },

    #[error("placeholder must span the whole segment, found `{segment}` in `{template}`")]
    Partial { template: String, segment: String },

    #[error("empty placeholder name in `{template}`")]
    EmptyName { template: String },

    #[error("placeholder `{name}` appears more than once in `{template}`")]
    Duplicate { template: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
    names: Vec<String>,
}

impl PathPattern {
    /// Compiles `template`, validating every placeholder.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut names: Vec<String> = Vec::new();

        for raw in template.split('/') {
            let segment = parse_segment(template, raw)?;
            if let Segment::Param(name) = &segment {
                if names.contains(name) {
                    return Err(PatternError::Duplicate {
                        template: template.to_owned(),
                        name: name.clone(),
                    });
                }
                names.push(name.clone());
            }
            segments.push(segment);
        }

        Ok(Self { template: template.to_owned(), segments, names })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str { &self.template }

    /// Placeholder names, in template order.
    pub fn param_names(&self) -> &[String] { &self.names }

    /// Tests `path` against the pattern. On a match, returns the captured
    /// parameters keyed by placeholder name.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::with_capacity(self.names.len());
        let mut candidate = path.split('/');

        for segment in &self.segments {
            let value = candidate.next()?;
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_owned());
                }
            }
        }

        // Leftover candidate segments mean the path is longer than the template.
        if candidate.next().is_some() {
            return None;
        }
        Some(params)
    }
}

fn parse_segment(template: &str, raw: &str) -> Result<Segment, PatternError> {
    let opens = raw.matches('{').count();
    let closes = raw.matches('}').count();

    if opens == 0 && closes == 0 {
        return Ok(Segment::Literal(raw.to_owned()));
    }

    let err_segment = || raw.to_owned();
    if opens > closes {
        return Err(PatternError::Unclosed { template: template.to_owned(), segment: err_segment() });
    }
    if closes > opens {
        return Err(PatternError::Unopened { template: template.to_owned(), segment: err_segment() });
    }

    let name = raw
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.contains(['{', '}']))
        .ok_or_else(|| PatternError::Partial {
            template: template.to_owned(),
            segment: err_segment(),
        })?;

    if name.is_empty() {
        return Err(PatternError::EmptyName { template: template.to_owned() });
    }
    Ok(Segment::Param(name.to_owned()))
}
