//! Surface classification and shared material setup

pub mod tokens;
pub mod classifier;
pub mod config;
pub mod cache;

pub use tokens::NameTokens;
pub use classifier::{
    classify, classify_tokens, matching_rule, AlphaMode, Condition, MaterialGroupKey, Rule,
    DEFAULT_GROUP, RULES,
};
pub use config::{BlendMode, MaterialConfig, Shading};
pub use cache::SharedMaterialCache;
