//! Physical behaviour classification of surface names.
//!
//! Every surface exported from the world is named after its block type. The
//! name alone decides whether the baked geometry gets a collider and how its
//! alpha is handled. Rules are evaluated top to bottom and the first match
//! wins, so their order is part of the contract.

use std::fmt;

use crate::material::tokens::NameTokens;

/// How a material treats texture alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlphaMode {
    Opaque,
    AlphaClip,
    AlphaBlend,
}

impl fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlphaMode::Opaque => "Opaque",
            AlphaMode::AlphaClip => "AlphaClip",
            AlphaMode::AlphaBlend => "AlphaBlend",
        };
        f.write_str(name)
    }
}

/// Batching key for geometry that shares physical behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialGroupKey {
    pub collidable: bool,
    pub alpha_mode: AlphaMode,
}

impl MaterialGroupKey {
    pub const fn new(collidable: bool, alpha_mode: AlphaMode) -> Self {
        Self { collidable, alpha_mode }
    }
}

impl fmt::Display for MaterialGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alpha_mode)?;
        if self.collidable {
            f.write_str("_Collision")?;
        }
        Ok(())
    }
}

/// What a rule looks at
#[derive(Clone, Copy, Debug)]
pub enum Condition {
    /// The raw name equals one of these, case-sensitive
    ExactName(&'static [&'static str]),
    /// At least one of these tokens is present
    AnyToken(&'static [&'static str]),
    /// Every one of these tokens is present
    AllTokens(&'static [&'static str]),
}

/// One row of the classification table
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub label: &'static str,
    /// The rule is skipped when any of these tokens is present
    pub unless_any: &'static [&'static str],
    pub condition: Condition,
    pub group: MaterialGroupKey,
}

impl Rule {
    fn matches(&self, name: &str, tokens: &NameTokens) -> bool {
        if tokens.contains_any(self.unless_any) {
            return false;
        }
        match self.condition {
            Condition::ExactName(names) => names.iter().any(|n| *n == name),
            Condition::AnyToken(wanted) => tokens.contains_any(wanted),
            Condition::AllTokens(wanted) => tokens.contains_all(wanted),
        }
    }
}

/// Tokens that mark a full block, which is never thin decoration
const SOLID_MARKERS: &[&str] = &["block", "path", "ore"];

/// Thin decorative plants and effects
const DECORATIVE: &[&str] = &[
    "grass", "mushroom", "seagrass", "tallgrass", "rose", "lily", "fern", "bush", "kelp",
    "daisy", "lilac", "sunflower", "peony", "dandelion", "poppy", "sapling", "fire",
];

/// Result when no rule matches: solid and opaque
pub const DEFAULT_GROUP: MaterialGroupKey = MaterialGroupKey::new(true, AlphaMode::Opaque);

/// The classification table, in evaluation order
pub const RULES: &[Rule] = &[
    Rule {
        label: "special surfaces",
        unless_any: &[],
        condition: Condition::ExactName(&[
            "Cobweb", "Vines", "Sugar_Cane", "Wheat", "Potato", "Carrot",
            "Lily_Pad", "Ladder", "Monster_Spawner", "Cactus",
        ]),
        group: MaterialGroupKey::new(true, AlphaMode::AlphaClip),
    },
    Rule {
        label: "doors and torches",
        unless_any: &[],
        condition: Condition::AnyToken(&["door", "torch"]),
        group: MaterialGroupKey::new(false, AlphaMode::AlphaClip),
    },
    Rule {
        label: "glass, rails and leaves",
        unless_any: &[],
        condition: Condition::AnyToken(&["glass", "rail", "leaves"]),
        group: MaterialGroupKey::new(true, AlphaMode::AlphaClip),
    },
    Rule {
        label: "water",
        unless_any: &[],
        condition: Condition::AnyToken(&["water"]),
        group: MaterialGroupKey::new(false, AlphaMode::AlphaBlend),
    },
    Rule {
        label: "ice",
        unless_any: &[],
        condition: Condition::AnyToken(&["ice"]),
        group: MaterialGroupKey::new(true, AlphaMode::AlphaBlend),
    },
    Rule {
        label: "redstone wire",
        unless_any: &[],
        condition: Condition::AllTokens(&["redstone", "wire"]),
        group: MaterialGroupKey::new(false, AlphaMode::AlphaClip),
    },
    Rule {
        label: "decoration",
        unless_any: SOLID_MARKERS,
        condition: Condition::AnyToken(DECORATIVE),
        group: MaterialGroupKey::new(false, AlphaMode::AlphaClip),
    },
    Rule {
        label: "snow layer",
        unless_any: SOLID_MARKERS,
        condition: Condition::AnyToken(&["snow"]),
        group: MaterialGroupKey::new(false, AlphaMode::Opaque),
    },
];

/// First rule matching a name, if any
pub fn matching_rule(name: &str, tokens: &NameTokens) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(name, tokens))
}

/// Classify an already tokenised name
pub fn classify_tokens(name: &str, tokens: &NameTokens) -> MaterialGroupKey {
    matching_rule(name, tokens).map_or(DEFAULT_GROUP, |rule| rule.group)
}

/// Classify a surface name. Total and deterministic.
pub fn classify(name: &str) -> MaterialGroupKey {
    classify_tokens(name, &NameTokens::split(name))
}
