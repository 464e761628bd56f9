//! Unit tests for column conversions

use bizreg_core::domain::entities::company::Industry;
use bizreg_core::domain::entities::user::Gender;

use crate::database::mysql::{parse_code, parse_uuid};

#[test]
fn test_parse_uuid_column() {
    let id = uuid::Uuid::new_v4();
    assert_eq!(parse_uuid("users.id", &id.to_string()).unwrap(), id);

    let err = parse_uuid("users.id", "42").unwrap_err();
    assert!(err.to_string().contains("users.id"));
}

#[test]
fn test_parse_coded_columns() {
    assert_eq!(parse_code::<Gender>("users.gender", "f").unwrap(), Gender::Female);
    assert_eq!(
        parse_code::<Industry>("company_profile.industry", "Media & Entertainment").unwrap(),
        Industry::MediaEntertainment
    );
    assert!(parse_code::<Industry>("company_profile.industry", "Mining").is_err());
}
