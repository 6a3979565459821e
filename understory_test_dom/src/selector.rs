// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny compound-selector matcher: `tag`, `.class`, `#id` and their concatenations.

/// One parsed compound selector such as `li.item#first`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound<'a> {
    pub(crate) tag: Option<&'a str>,
    pub(crate) id: Option<&'a str>,
    pub(crate) classes: Vec<&'a str>,
}

impl<'a> Compound<'a> {
    /// Parses a compound selector. Returns `None` for anything with combinators
    /// or attribute/pseudo syntax, which never matches.
    pub(crate) fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty()
            || selector.contains(|c: char| c.is_whitespace() || "[]:>+~,*".contains(c))
        {
            return None;
        }
        let mut out = Self::default();
        let mut rest = selector;
        let first_marker = rest.find(['.', '#']).unwrap_or(rest.len());
        if first_marker > 0 {
            out.tag = Some(&rest[..first_marker]);
        }
        rest = &rest[first_marker..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '.' => out.classes.push(name),
                _ => out.id = Some(name),
            }
            rest = &body[end..];
        }
        Some(out)
    }

    pub(crate) fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.tag.is_none_or(|t| t.eq_ignore_ascii_case(tag))
            && self.id.is_none_or(|want| id == Some(want))
            && self.classes.iter().all(|c| classes.iter().any(|have| have == c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_parts() {
        let c = Compound::parse("li.item.active#first").unwrap();
        assert_eq!(c.tag, Some("li"));
        assert_eq!(c.id, Some("first"));
        assert_eq!(c.classes, vec!["item", "active"]);
    }

    #[test]
    fn rejects_combinators() {
        assert!(Compound::parse("ul li").is_none());
        assert!(Compound::parse("a > b").is_none());
        assert!(Compound::parse("").is_none());
        assert!(Compound::parse(".").is_none());
    }

    #[test]
    fn matching_requires_every_part() {
        let classes = vec!["item".to_string(), "active".to_string()];
        let c = Compound::parse(".item").unwrap();
        assert!(c.matches("div", None, &classes));
        let c = Compound::parse("li.item").unwrap();
        assert!(!c.matches("div", None, &classes));
        let c = Compound::parse("#x.item").unwrap();
        assert!(c.matches("div", Some("x"), &classes));
        assert!(!c.matches("div", Some("y"), &classes));
    }
}
