use std::collections::HashSet;

use binlog_core::{ColumnType, symbol_to_type_code, type_code_to_symbol};

#[test]
fn forward_and_inverse_maps_agree_for_every_code() {
    for code in 0..=u8::MAX {
        if let Some(symbol) = type_code_to_symbol(code) {
            assert_eq!(symbol_to_type_code(symbol), code, "code {code}");
        }
    }
    for symbol in ColumnType::ALL {
        assert_eq!(type_code_to_symbol(symbol.code()), Some(symbol));
    }
}

#[test]
fn unassigned_codes_have_no_symbol() {
    for code in 17..=245u8 {
        assert_eq!(type_code_to_symbol(code), None, "code {code}");
    }
    let assigned = (0..=u8::MAX).filter_map(type_code_to_symbol).count();
    assert_eq!(assigned, ColumnType::ALL.len());
}

#[test]
fn legacy_and_new_generation_codes() {
    assert_eq!(type_code_to_symbol(1), Some(ColumnType::Tiny));
    assert_eq!(type_code_to_symbol(8), Some(ColumnType::LongLong));
    assert_eq!(type_code_to_symbol(15), Some(ColumnType::VarChar));
    assert_eq!(type_code_to_symbol(16), Some(ColumnType::Bit));
    assert_eq!(type_code_to_symbol(246), Some(ColumnType::NewDecimal));
    assert_eq!(type_code_to_symbol(252), Some(ColumnType::Blob));
    assert_eq!(type_code_to_symbol(254), Some(ColumnType::String));
    assert_eq!(type_code_to_symbol(255), Some(ColumnType::Geometry));
}

#[test]
fn names_are_unique_and_parse_back() {
    let names: HashSet<_> = ColumnType::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), ColumnType::ALL.len());

    for symbol in ColumnType::ALL {
        assert_eq!(symbol.name().parse::<ColumnType>(), Ok(symbol));
        assert_eq!(symbol.to_string(), symbol.name());
    }
}

#[test]
fn unknown_name_is_rejected() {
    let err = "json".parse::<ColumnType>().expect_err("json is not in the table");
    assert_eq!(err.to_string(), "unknown column type 'json'");
}

#[test]
fn try_from_returns_code_on_gap() {
    assert_eq!(ColumnType::try_from(3), Ok(ColumnType::Long));
    assert_eq!(ColumnType::try_from(100), Err(100));
    assert_eq!(u8::from(ColumnType::Set), 248);
}

#[test]
fn metadata_requirement_matches_variable_shapes() {
    assert!(ColumnType::VarChar.needs_metadata());
    assert!(ColumnType::Blob.needs_metadata());
    assert!(ColumnType::Enum.needs_metadata());
    assert!(!ColumnType::Long.needs_metadata());
    assert!(!ColumnType::String.needs_metadata());
}
