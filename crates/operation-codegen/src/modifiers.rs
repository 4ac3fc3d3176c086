// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Java modifiers and the derivations applied to generated declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A Java declaration modifier.
///
/// Variants are declared in the canonical source order, so an ordered set
/// renders them the way `javac` would expect them written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

pub type ModifierSet = BTreeSet<Modifier>;

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "abstract" => Modifier::Abstract,
            "default" => Modifier::Default,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "strictfp" => Modifier::Strictfp,
            other => return Err(format!("unknown modifier `{other}`")),
        })
    }
}

/// Modifiers for a generated top-level class.
///
/// Generated classes never nest inside their source type, so `static` is dropped.
pub fn class_modifiers(source: &ModifierSet) -> ModifierSet {
    let mut result = source.clone();
    result.remove(&Modifier::Static);
    result
}

/// Modifiers for the constructor of a generated class: `public` or nothing.
pub fn constructor_modifiers(source: &ModifierSet) -> ModifierSet {
    let mut result = ModifierSet::new();
    if class_modifiers(source).contains(&Modifier::Public) {
        result.insert(Modifier::Public);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[Modifier]) -> ModifierSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_static_is_stripped() {
        let derived = class_modifiers(&set(&[Modifier::Static, Modifier::Public]));
        assert_eq!(derived, set(&[Modifier::Public]));
    }

    #[test]
    fn test_empty_stays_empty() {
        assert!(class_modifiers(&ModifierSet::new()).is_empty());
        assert!(constructor_modifiers(&ModifierSet::new()).is_empty());
    }

    #[test]
    fn test_constructor_keeps_only_public() {
        assert_eq!(
            constructor_modifiers(&set(&[Modifier::Public])),
            set(&[Modifier::Public])
        );
        assert_eq!(
            constructor_modifiers(&set(&[Modifier::Public, Modifier::Abstract, Modifier::Static])),
            set(&[Modifier::Public])
        );
        assert!(constructor_modifiers(&set(&[Modifier::Protected])).is_empty());
    }

    #[test]
    fn test_canonical_order() {
        let rendered: Vec<_> = set(&[Modifier::Final, Modifier::Abstract, Modifier::Public])
            .iter()
            .map(Modifier::as_str)
            .collect();
        assert_eq!(rendered, vec!["public", "abstract", "final"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("static".parse::<Modifier>(), Ok(Modifier::Static));
        assert!("sealed".parse::<Modifier>().is_err());
    }
}
