//! Integration test: every playbook enum reads back from its token and code.

use std::fmt::Debug;

use mp_content::playbook::{OverviewType, PlaybookType, TriggerType, WidgetSize, WidgetType};
use mp_core::enums::has_unique_members;
use mp_core::RepresentableEnum;
use proptest::prelude::*;

/// Mix the case of `token` by the bits of `mask`.
fn mixed_case(token: &str, mask: u64) -> String {
    token
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask >> (i % 64)) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

fn assert_round_trips<E: RepresentableEnum + Debug>(mask: u64) {
    assert!(has_unique_members::<E>(), "{}", E::NAME);
    for &member in E::members() {
        let token = mixed_case(member.as_str(), mask);
        assert_eq!(E::from_string(&token).unwrap(), member, "{}: {token}", E::NAME);
        assert_eq!(E::from_code(member.code()).unwrap(), member, "{}", E::NAME);
    }
}

#[test]
fn test_playbook_enums_round_trip() {
    assert_round_trips::<TriggerType>(0);
    assert_round_trips::<WidgetType>(0);
    assert_round_trips::<WidgetSize>(0);
    assert_round_trips::<OverviewType>(0);
    assert_round_trips::<PlaybookType>(0);
}

#[test]
fn test_known_tokens_and_codes() {
    let table: &[(&str, i64, &str)] = &[
        (TriggerType::NAME, TriggerType::GetInputs.code(), TriggerType::GetInputs.as_str()),
        (WidgetType::NAME, WidgetType::Html.code(), WidgetType::Html.as_str()),
        (WidgetSize::NAME, WidgetSize::ThirdWidth.code(), WidgetSize::ThirdWidth.as_str()),
        (OverviewType::NAME, OverviewType::SystemCase.code(), OverviewType::SystemCase.as_str()),
        (PlaybookType::NAME, PlaybookType::Block.code(), PlaybookType::Block.as_str()),
    ];
    let expected: &[(&str, i64, &str)] = &[
        ("TriggerType", 11, "get_inputs"),
        ("WidgetType", 3, "html"),
        ("WidgetSize", 3, "third_width"),
        ("OverviewType", 3, "system_case"),
        ("PlaybookType", 1, "block"),
    ];
    assert_eq!(table, expected);
}

#[test]
fn test_unknown_values_are_rejected() {
    assert!(TriggerType::from_code(12).is_err());
    assert!(WidgetSize::from_code(0).is_err());
    assert!(PlaybookType::from_string("workflow").is_err());
    assert!(OverviewType::from_string("system-case").is_err());
}

proptest! {
    #[test]
    fn prop_tokens_ignore_case(mask in any::<u64>()) {
        assert_round_trips::<TriggerType>(mask);
        assert_round_trips::<WidgetType>(mask);
        assert_round_trips::<WidgetSize>(mask);
        assert_round_trips::<OverviewType>(mask);
        assert_round_trips::<PlaybookType>(mask);
    }
}
