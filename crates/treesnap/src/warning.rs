//! Recoverable problems collected while laying out a tree.

use std::fmt;

use log::warn;

use treesnap_core::identifier::Id;

/// Which kind of reference a [`Warning::DanglingReference`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Prerequisite,
    MutuallyExclusive,
}

/// A non-fatal problem. The affected placement is skipped or replaced by a
/// placeholder and the rest of the tree renders normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `focus` references `target`, which is not in the tree.
    DanglingReference {
        focus: Id,
        target: Id,
        kind: ReferenceKind,
    },
    /// A sprite is not in the catalog.
    MissingSprite { focus: Option<Id>, sprite: Id },
    /// A sprite is known but its texture dimensions are not.
    MissingSpriteSize { sprite: Id },
    /// No localised text exists for `key`.
    MissingLocalisation { focus: Id, key: Id },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference { focus, target, kind } => {
                let kind = match kind {
                    ReferenceKind::Prerequisite => "prerequisite",
                    ReferenceKind::MutuallyExclusive => "mutually exclusive",
                };
                write!(f, "focus `{focus}` has unknown {kind} focus `{target}`")
            }
            Self::MissingSprite {
                focus: Some(focus),
                sprite,
            } => write!(f, "focus `{focus}` uses unknown sprite `{sprite}`"),
            Self::MissingSprite {
                focus: None,
                sprite,
            } => write!(f, "unknown sprite `{sprite}`"),
            Self::MissingSpriteSize { sprite } => {
                write!(f, "texture size of sprite `{sprite}` is unknown")
            }
            Self::MissingLocalisation { focus, key } => {
                write!(f, "focus `{focus}` has no localised text for `{key}`")
            }
        }
    }
}

/// An ordered collection of warnings that deduplicates repeats.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it. Repeats of an already recorded warning
    /// are dropped.
    pub fn push(&mut self, warning: Warning) {
        if self.items.contains(&warning) {
            return;
        }
        warn!(warning:% = warning; "Layout warning");
        self.items.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_warning_recorded_once() {
        let mut warnings = Warnings::new();
        let missing = Warning::MissingSprite {
            focus: None,
            sprite: Id::new("GFX_focus_link_up_down"),
        };
        warnings.push(missing.clone());
        warnings.push(missing);
        warnings.push(Warning::MissingSpriteSize {
            sprite: Id::new("GFX_focus_link_up_down"),
        });

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_display_names_both_ends() {
        let warning = Warning::DanglingReference {
            focus: Id::new("GER_rhineland"),
            target: Id::new("GER_missing"),
            kind: ReferenceKind::Prerequisite,
        };
        assert_eq!(
            warning.to_string(),
            "focus `GER_rhineland` has unknown prerequisite focus `GER_missing`"
        );
    }
}
