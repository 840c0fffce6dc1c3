//! Declaration selection by kind, visibility and name
//!
//! Raw command-line flags are collected in a [`SelectionConfig`], then
//! resolved once into an immutable [`Selection`] that carries the defaults
//! already applied and the compiled name pattern.

use regex::Regex;

use crate::error::{GosigError, Result};
use crate::extractors::{DeclKind, Declaration};

/// A set of declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindMask(u8);

impl KindMask {
    pub const EMPTY: KindMask = KindMask(0);
    pub const ALL: KindMask = KindMask(0b1111);

    pub fn with(self, kind: DeclKind) -> Self {
        KindMask(self.0 | kind.bit())
    }

    pub fn contains(self, kind: DeclKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<DeclKind> for KindMask {
    fn from_iter<I: IntoIterator<Item = DeclKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindMask::EMPTY, KindMask::with)
    }
}

/// Selection flags as given on the command line. Nothing set by default.
#[derive(Debug, Clone, Default)]
pub struct SelectionConfig {
    /// Show private declarations
    pub private: bool,
    /// Show public declarations
    pub public: bool,
    pub imports: bool,
    pub functions: bool,
    pub globals: bool,
    pub types: bool,
    /// Name pattern; `None` matches everything
    pub pattern: Option<String>,
}

impl SelectionConfig {
    fn kinds(&self) -> KindMask {
        [
            (self.imports, DeclKind::Import),
            (self.functions, DeclKind::Function),
            (self.globals, DeclKind::Global),
            (self.types, DeclKind::Type),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, kind)| kind)
        .collect()
    }
}

/// Resolved selection criteria.
#[derive(Debug, Clone)]
pub struct Selection {
    kinds: KindMask,
    show_public: bool,
    show_private: bool,
    pattern: Option<Regex>,
}

impl Selection {
    /// Apply defaults and compile the name pattern.
    ///
    /// No visibility flag means both, no kind flag means all kinds.
    pub fn from_config(config: &SelectionConfig) -> Result<Self> {
        let pattern = match &config.pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| GosigError::Pattern {
                pattern: pattern.clone(),
                source,
            })?),
            None => None,
        };

        let (show_public, show_private) = if !config.public && !config.private {
            (true, true)
        } else {
            (config.public, config.private)
        };

        let kinds = match config.kinds() {
            mask if mask.is_empty() => KindMask::ALL,
            mask => mask,
        };

        Ok(Self {
            kinds,
            show_public,
            show_private,
            pattern,
        })
    }

    /// Everything passes.
    pub fn all() -> Self {
        Self {
            kinds: KindMask::ALL,
            show_public: true,
            show_private: true,
            pattern: None,
        }
    }

    pub fn kinds(&self) -> KindMask {
        self.kinds
    }

    /// Whether `decl` should be emitted.
    pub fn matches(&self, decl: &Declaration) -> bool {
        if !self.kinds.contains(decl.kind) {
            return false;
        }
        let visible = decl.kind == DeclKind::Import
            || (self.show_public && decl.public)
            || (self.show_private && !decl.public);
        if !visible {
            return false;
        }
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(&decl.match_key))
    }

    /// Emitted declarations of a file, in order.
    pub fn select<'a>(
        &'a self,
        declarations: &'a [Declaration],
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        declarations.iter().filter(move |decl| self.matches(decl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(kind: DeclKind, name: &str) -> Declaration {
        Declaration::named(kind, name, format!("{} {}", kind, name))
    }

    fn import(path: &str) -> Declaration {
        Declaration {
            kind: DeclKind::Import,
            public: true,
            match_key: path.to_string(),
            rendered: format!("import {}", path),
        }
    }

    fn sample() -> Vec<Declaration> {
        vec![
            import("\"fmt\""),
            decl(DeclKind::Type, "Point"),
            decl(DeclKind::Type, "point"),
            decl(DeclKind::Function, "New"),
            decl(DeclKind::Function, "helper"),
            decl(DeclKind::Global, "Max"),
            decl(DeclKind::Global, "count"),
        ]
    }

    fn selected(config: SelectionConfig) -> Vec<String> {
        let selection = Selection::from_config(&config).expect("valid config");
        selection
            .select(&sample())
            .map(|d| d.match_key.clone())
            .collect()
    }

    #[test]
    fn test_defaults_select_everything() {
        assert_eq!(selected(SelectionConfig::default()).len(), sample().len());
    }

    #[test]
    fn test_kind_mask_from_flags() {
        let config = SelectionConfig {
            functions: true,
            globals: true,
            ..Default::default()
        };
        assert_eq!(selected(config), vec!["New", "helper", "Max", "count"]);
    }

    #[test]
    fn test_public_only() {
        let config = SelectionConfig {
            public: true,
            ..Default::default()
        };
        assert_eq!(selected(config), vec!["\"fmt\"", "Point", "New", "Max"]);
    }

    #[test]
    fn test_private_only_still_shows_imports() {
        let config = SelectionConfig {
            private: true,
            ..Default::default()
        };
        assert_eq!(
            selected(config),
            vec!["\"fmt\"", "point", "helper", "count"]
        );
    }

    #[test]
    fn test_type_mask_with_anchored_pattern() {
        let config = SelectionConfig {
            types: true,
            pattern: Some("^Point$".to_string()),
            ..Default::default()
        };
        assert_eq!(selected(config), vec!["Point"]);
    }

    #[test]
    fn test_pattern_applies_with_default_flags() {
        let config = SelectionConfig {
            pattern: Some("(?i)^p".to_string()),
            ..Default::default()
        };
        assert_eq!(selected(config), vec!["Point", "point"]);
    }

    #[test]
    fn test_methods_with_same_name_match_together() {
        let decls = vec![
            Declaration::named(
                DeclKind::Function,
                "Area",
                "func (Circle) Area() float64".to_string(),
            ),
            Declaration::named(
                DeclKind::Function,
                "Area",
                "func (Square) Area() float64".to_string(),
            ),
        ];
        let config = SelectionConfig {
            pattern: Some("^Area$".to_string()),
            ..Default::default()
        };
        let selection = Selection::from_config(&config).unwrap();
        assert_eq!(selection.select(&decls).count(), 2);

        // The receiver is not part of the match key.
        let config = SelectionConfig {
            pattern: Some("Circle".to_string()),
            ..Default::default()
        };
        let selection = Selection::from_config(&config).unwrap();
        assert_eq!(selection.select(&decls).count(), 0);
    }

    #[test]
    fn test_invalid_pattern() {
        let config = SelectionConfig {
            pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        let err = Selection::from_config(&config).unwrap_err();
        assert!(matches!(err, GosigError::Pattern { .. }));
    }

    #[test]
    fn test_kind_mask_collect() {
        let mask: KindMask = [DeclKind::Import, DeclKind::Type].into_iter().collect();
        assert!(mask.contains(DeclKind::Import));
        assert!(mask.contains(DeclKind::Type));
        assert!(!mask.contains(DeclKind::Function));
        assert_eq!(Selection::all().kinds(), KindMask::ALL);
    }
}
