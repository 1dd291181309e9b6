//! Parser for CSS gradient stop lists.
//!
//! Accepts the stop syntax of CSS `linear-gradient()` without the function
//! wrapper: comma separated stops, each one of
//!
//! - `color`
//! - `color position`
//! - `color position position` (a flat band)
//! - `position` (a color hint, the midpoint between its neighbors)
//!
//! Positions are plain numbers or percentages (`25%` is `0.25`). Colors are
//! anything [`Color::from_str`] understands, including functional notations
//! with spaces and commas inside parentheses.

use crate::blend::interpolate_rgb;
use crate::color::Color;
use crate::error::GradientError;
use crate::stops::Stop;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
struct PartialStop {
    position: Option<f64>,
    color: Option<Color>,
}

/// Parses a CSS stop list into stops covering at least [0, 1].
///
/// A list that starts after 0 or ends before 1 is padded with its first or
/// last color; positions outside [0, 1] are kept as given. Missing positions are spread evenly between their positioned neighbors,
/// and a position smaller than its predecessor is raised to match it. The
/// result is non-decreasing but not yet filtered for zero-width stops;
/// [`StopList::from_stops`](crate::StopList::from_stops) does that.
pub fn parse_stops(s: &str) -> Result<Vec<Stop>, GradientError> {
    let mut stops = Vec::new();
    for part in split_outside_parens(s, ',') {
        push_stop(&mut stops, part)?;
    }

    match stops.first() {
        None => return Err(invalid(s, "no stops")),
        Some(first) if first.color.is_none() => {
            return Err(invalid(s, "the first stop must have a color"))
        }
        Some(_) => {}
    }

    resolve_hints(&mut stops, s)?;

    let mut stops: Vec<(Option<f64>, Color)> = stops
        .into_iter()
        .map(|p| p.color.map(|c| (p.position, c)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid(s, "unresolved color hint"))?;

    if let Some((p, c)) = stops.first().copied() {
        if p.is_some_and(|p| p > 0.0) {
            stops.insert(0, (Some(0.0), c));
        }
    }
    if let Some((p, c)) = stops.last().copied() {
        if p.is_some_and(|p| p < 1.0) {
            stops.push((Some(1.0), c));
        }
    }

    let mut resolved: Vec<Stop> = Vec::with_capacity(stops.len());
    for i in 0..stops.len() {
        let (position, color) = stops[i];
        let position = match position {
            Some(p) => p,
            None => {
                // The last stop always has a position, so a successor exists.
                let prev = resolved.last().map_or(0.0, |s| s.position);
                let (j, next) = stops[i + 1..]
                    .iter()
                    .enumerate()
                    .find_map(|(k, (p, _))| p.map(|p| (i + 1 + k, p)))
                    .ok_or_else(|| invalid(s, "no position after an unpositioned stop"))?;
                prev + (next - prev) / (j - i + 1) as f64
            }
        };
        let position = match resolved.last() {
            Some(prev) => position.max(prev.position),
            None => position,
        };
        resolved.push(Stop::new(position, color));
    }
    Ok(resolved)
}

/// Fills in endpoint positions and turns color hints into midpoint colors.
fn resolve_hints(stops: &mut [PartialStop], source: &str) -> Result<(), GradientError> {
    let last = stops.len() - 1;
    for i in 0..stops.len() {
        if i == 0 && stops[i].position.is_none() {
            stops[i].position = Some(0.0);
        }
        if i == last {
            if stops[i].position.is_none() {
                stops[i].position = Some(1.0);
            }
            if stops[i].color.is_none() {
                return Err(invalid(source, "the last stop must have a color"));
            }
            continue;
        }
        if stops[i].color.is_none() {
            let (Some(prev), Some(next)) = (stops[i - 1].color, stops[i + 1].color) else {
                return Err(invalid(source, "a color hint must sit between two colors"));
            };
            stops[i].color = Some(interpolate_rgb(prev, next, 0.5));
        }
    }
    Ok(())
}

fn push_stop(stops: &mut Vec<PartialStop>, part: &str) -> Result<(), GradientError> {
    let tokens = split_outside_parens(part, ' ');
    let tokens: Vec<&str> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
    let bad = || invalid(part, "expected `color`, `color pos`, `color pos pos` or `pos`");

    match tokens[..] {
        [token] => {
            let stop = if let Ok(color) = Color::from_str(token) {
                PartialStop {
                    position: None,
                    color: Some(color),
                }
            } else if let Some(position) = parse_position(token) {
                PartialStop {
                    position: Some(position),
                    color: None,
                }
            } else {
                return Err(bad());
            };
            stops.push(stop);
        }
        [color, position] => {
            let color = Color::from_str(color).map_err(|_| bad())?;
            let position = parse_position(position).ok_or_else(bad)?;
            stops.push(PartialStop {
                position: Some(position),
                color: Some(color),
            });
        }
        [color, start, end] => {
            let color = Some(Color::from_str(color).map_err(|_| bad())?);
            let start = parse_position(start).ok_or_else(bad)?;
            let end = parse_position(end).ok_or_else(bad)?;
            stops.push(PartialStop {
                position: Some(start),
                color,
            });
            stops.push(PartialStop {
                position: Some(end),
                color,
            });
        }
        _ => return Err(bad()),
    }
    Ok(())
}

/// A finite number, or a percentage mapped to a fraction.
fn parse_position(s: &str) -> Option<f64> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Splits on `sep` except inside parentheses.
fn split_outside_parens(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn invalid(source: &str, reason: &str) -> GradientError {
    GradientError::InvalidFormat(format!("{reason} in `{}`", source.trim()))
}
