//! Lowering configuration.

use serde::{Deserialize, Serialize};

/// How constants and simple-case keys pick their kernel literal kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralClassification {
    /// Declared type first, then the runtime type of the value
    #[default]
    Typed,
    /// Every literal is a number literal, as older planners expect
    LegacyNumber,
}

/// What MEMBER OF tests for containment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberOfLowering {
    /// `contains(element, collection)`
    #[default]
    Element,
    /// `contains(this, collection)`, ignoring the element operand
    LegacyThis,
}

/// Options controlling criteria lowering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoweringOptions {
    pub literal_classification: LiteralClassification,
    pub member_of: MemberOfLowering,
}

impl LoweringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the kernel shapes older planners were written against
    pub fn legacy() -> Self {
        Self {
            literal_classification: LiteralClassification::LegacyNumber,
            member_of: MemberOfLowering::LegacyThis,
        }
    }

    pub fn with_literal_classification(mut self, classification: LiteralClassification) -> Self {
        self.literal_classification = classification;
        self
    }

    pub fn with_member_of(mut self, member_of: MemberOfLowering) -> Self {
        self.member_of = member_of;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_typed() {
        let options = LoweringOptions::new();
        assert_eq!(options.literal_classification, LiteralClassification::Typed);
        assert_eq!(options.member_of, MemberOfLowering::Element);
    }

    #[test]
    fn test_builders() {
        let options = LoweringOptions::new().with_member_of(MemberOfLowering::LegacyThis);
        assert_eq!(options.literal_classification, LiteralClassification::Typed);
        assert_eq!(options.member_of, MemberOfLowering::LegacyThis);

        let legacy = LoweringOptions::legacy();
        assert_eq!(
            legacy,
            LoweringOptions::new()
                .with_literal_classification(LiteralClassification::LegacyNumber)
                .with_member_of(MemberOfLowering::LegacyThis)
        );
    }

    #[test]
    fn test_options_from_json() {
        let options: LoweringOptions =
            serde_json::from_str(r#"{"literal_classification": "legacy_number"}"#).unwrap();
        assert_eq!(
            options,
            LoweringOptions::new().with_literal_classification(LiteralClassification::LegacyNumber)
        );

        let json = serde_json::to_string(&LoweringOptions::legacy()).unwrap();
        assert_eq!(
            json,
            r#"{"literal_classification":"legacy_number","member_of":"legacy_this"}"#
        );
        assert_eq!(
            serde_json::from_str::<LoweringOptions>(&json).unwrap(),
            LoweringOptions::legacy()
        );
        assert_eq!(
            serde_json::from_str::<LoweringOptions>("{}").unwrap(),
            LoweringOptions::default()
        );
    }
}
