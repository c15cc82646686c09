//! Conditions and condition groups, shared by triggers and widget
//! visibility rules.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

mp_core::representable_enum! {
    /// How a condition compares its field against its value.
    pub enum MatchType {
        Equal = 0 => "equal",
        Contains = 1 => "contains",
        StartsWith = 2 => "starts_with",
        GreaterThan = 3 => "greater_than",
        LesserThan = 4 => "lesser_than",
        NotEqual = 5 => "not_equal",
        NotContains = 6 => "not_contains",
        IsEmpty = 7 => "is_empty",
        IsNotEmpty = 8 => "is_not_empty",
    }
}

mp_core::representable_enum! {
    /// How a group combines its conditions.
    pub enum LogicalOperator {
        And = 0 => "and",
        Or = 1 => "or",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field_name: String,
    pub value: String,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltCondition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "MatchType", with = "mp_core::enums::code")]
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltCondition {
    pub field_name: String,
    pub value: String,
    pub match_type: MatchType,
}

impl Buildable for Condition {
    const ENTITY: &'static str = "Condition";
    type Built = BuiltCondition;
    type NonBuilt = NonBuiltCondition;

    fn from_built(built: BuiltCondition) -> Result<Self, ConversionError> {
        Ok(Self {
            field_name: built.field_name,
            value: built.value,
            match_type: built.match_type,
        })
    }

    fn from_non_built(non_built: NonBuiltCondition) -> Result<Self, ConversionError> {
        Ok(Self {
            field_name: non_built.field_name,
            value: non_built.value,
            match_type: non_built.match_type,
        })
    }

    fn to_built(&self) -> BuiltCondition {
        BuiltCondition {
            field_name: self.field_name.clone(),
            value: self.value.clone(),
            match_type: self.match_type,
        }
    }

    fn to_non_built(&self) -> NonBuiltCondition {
        NonBuiltCondition {
            field_name: self.field_name.clone(),
            value: self.value.clone(),
            match_type: self.match_type,
        }
    }
}

/// Conditions joined by a single logical operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
    pub logical_operator: LogicalOperator,
}

impl Default for ConditionGroup {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            logical_operator: LogicalOperator::And,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltConditionGroup {
    #[serde(rename = "Conditions", default)]
    pub conditions: Vec<BuiltCondition>,
    #[serde(rename = "LogicalOperator", with = "mp_core::enums::code")]
    pub logical_operator: LogicalOperator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltConditionGroup {
    #[serde(default)]
    pub conditions: Vec<NonBuiltCondition>,
    pub logical_operator: LogicalOperator,
}

impl ConditionGroup {
    pub(crate) fn from_built_parts(
        conditions: Vec<BuiltCondition>,
        logical_operator: LogicalOperator,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            conditions: conditions
                .into_iter()
                .map(Condition::from_built)
                .collect::<Result<_, _>>()?,
            logical_operator,
        })
    }

    pub(crate) fn from_non_built_parts(
        conditions: Vec<NonBuiltCondition>,
        logical_operator: LogicalOperator,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            conditions: conditions
                .into_iter()
                .map(Condition::from_non_built)
                .collect::<Result<_, _>>()?,
            logical_operator,
        })
    }

    pub(crate) fn built_conditions(&self) -> Vec<BuiltCondition> {
        self.conditions.iter().map(Condition::to_built).collect()
    }

    pub(crate) fn non_built_conditions(&self) -> Vec<NonBuiltCondition> {
        self.conditions.iter().map(Condition::to_non_built).collect()
    }
}

impl Buildable for ConditionGroup {
    const ENTITY: &'static str = "ConditionGroup";
    type Built = BuiltConditionGroup;
    type NonBuilt = NonBuiltConditionGroup;

    fn from_built(built: BuiltConditionGroup) -> Result<Self, ConversionError> {
        Self::from_built_parts(built.conditions, built.logical_operator)
    }

    fn from_non_built(non_built: NonBuiltConditionGroup) -> Result<Self, ConversionError> {
        Self::from_non_built_parts(non_built.conditions, non_built.logical_operator)
    }

    fn to_built(&self) -> BuiltConditionGroup {
        BuiltConditionGroup {
            conditions: self.built_conditions(),
            logical_operator: self.logical_operator,
        }
    }

    fn to_non_built(&self) -> NonBuiltConditionGroup {
        NonBuiltConditionGroup {
            conditions: self.non_built_conditions(),
            logical_operator: self.logical_operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::enums::has_unique_members;
    use mp_core::RepresentableEnum;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn group_built_round_trip() {
        let built = json!({
            "Conditions": [
                {"FieldName": "[Event.deviceVendor]", "Value": "Okta", "MatchType": 0},
                {"FieldName": "[Alert.Name]", "Value": "phish", "MatchType": 1}
            ],
            "LogicalOperator": 1
        });
        let group = ConditionGroup::from_built_value(built.clone()).unwrap();
        assert_eq!(group.logical_operator, LogicalOperator::Or);
        assert_eq!(group.conditions[1].match_type, MatchType::Contains);
        assert_eq!(group.to_built_value().unwrap(), built);
    }

    #[test]
    fn group_non_built_round_trip() {
        let non_built = json!({
            "conditions": [
                {"field_name": "[Alert.Severity]", "value": "high", "match_type": "not_equal"}
            ],
            "logical_operator": "and"
        });
        let group = ConditionGroup::from_non_built_value(non_built.clone()).unwrap();
        assert_eq!(group.to_non_built_value().unwrap(), non_built);
    }

    #[test]
    fn dialects_map_onto_each_other() {
        let group = ConditionGroup::from_non_built_value(json!({
            "conditions": [{"field_name": "f", "value": "", "match_type": "IS_EMPTY"}],
            "logical_operator": "OR"
        }))
        .unwrap();
        assert_eq!(
            group.to_built_value().unwrap(),
            json!({
                "Conditions": [{"FieldName": "f", "Value": "", "MatchType": 7}],
                "LogicalOperator": 1
            })
        );
    }

    #[test]
    fn unknown_match_type_fails() {
        let err = Condition::from_non_built_value(json!({
            "field_name": "f", "value": "v", "match_type": "regex"
        }))
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MatchType"), "{msg}");
        assert!(msg.contains("regex"), "{msg}");
    }

    #[test]
    fn enums_are_unique() {
        assert!(has_unique_members::<MatchType>());
        assert!(has_unique_members::<LogicalOperator>());
        assert_eq!(MatchType::members().len(), 9);
    }

    proptest! {
        #[test]
        fn condition_survives_both_dialects(
            field in "[A-Za-z.\\[\\]]{1,24}",
            value in ".{0,16}",
            idx in 0usize..9,
        ) {
            let condition = Condition {
                field_name: field,
                value,
                match_type: MatchType::members()[idx],
            };
            let via_built = Condition::from_built(condition.to_built()).unwrap();
            let via_non_built = Condition::from_non_built(condition.to_non_built()).unwrap();
            prop_assert_eq!(&via_built, &condition);
            prop_assert_eq!(&via_non_built, &condition);
        }

        #[test]
        fn match_type_tokens_round_trip(idx in 0usize..9) {
            let member = MatchType::members()[idx];
            prop_assert_eq!(MatchType::from_string(member.as_str()).unwrap(), member);
        }
    }
}
