//! Accept header evaluation.
//!
//! # Responsibilities
//! - Parse media ranges and their quality values
//! - Decide whether a concrete MIME type is acceptable
//!
//! # Design Decisions
//! - The most specific matching range decides the quality
//! - `q=0` marks a type as not acceptable
//! - A bare `*/*` carries no preference and never selects a type
//! - Malformed ranges are skipped rather than failing the request

#[derive(Debug, Clone, PartialEq)]
struct MediaRange {
    kind: String,
    subtype: String,
    quality: f32,
}

impl MediaRange {
    fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split(';');
        let (kind, subtype) = parts.next()?.trim().split_once('/')?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() || (kind == "*" && subtype != "*") {
            return None;
        }

        let mut quality = 1.0;
        for param in parts {
            if let Some((key, value)) = param.split_once('=') {
                if key.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?;
                    if !(0.0..=1.0).contains(&quality) {
                        return None;
                    }
                }
            }
        }

        Some(Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            quality,
        })
    }

    /// 3 for an exact match, 2 for `type/*`, 1 for `*/*`, 0 for no match.
    fn specificity(&self, kind: &str, subtype: &str) -> u8 {
        if self.kind == "*" {
            1
        } else if self.kind != kind {
            0
        } else if self.subtype == "*" {
            2
        } else if self.subtype == subtype {
            3
        } else {
            0
        }
    }
}

/// Parsed client preferences from an Accept header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
    ranges: Vec<MediaRange>,
}

impl AcceptHeader {
    /// Parse a header value. Unusable ranges are dropped.
    pub fn parse(header: &str) -> Self {
        let ranges = header.split(',').filter_map(MediaRange::parse).collect();
        Self { ranges }
    }

    /// Whether the client explicitly accepts `mime`.
    pub fn accepts(&self, mime: &str) -> bool {
        let Some((kind, subtype)) = mime.split_once('/') else {
            return false;
        };
        let (kind, subtype) = (kind.to_ascii_lowercase(), subtype.to_ascii_lowercase());

        let mut best: Option<(u8, f32)> = None;
        for range in &self.ranges {
            let specificity = range.specificity(&kind, &subtype);
            if specificity == 0 {
                continue;
            }
            if best.map_or(true, |(current, _)| specificity > current) {
                best = Some((specificity, range.quality));
            }
        }

        matches!(best, Some((specificity, quality)) if specificity > 1 && quality > 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
