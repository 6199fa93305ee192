use serde_json::Value;

/// Response shapes whose known keys are matched regardless of ASCII case.
///
/// [`normalize_keys`](Self::normalize_keys) rewrites a key such as `"Bills"`
/// to the declared field name `"bills"` before deserialization. Keys that
/// match no field are left untouched and end up in the `extra` map verbatim.
pub trait KnownFields {
    /// Serialized names of the record's own fields.
    const FIELDS: &'static [&'static str];

    fn normalize_keys(value: &mut Value);
}

/// Untyped bodies are passed through as sent.
impl KnownFields for Value {
    const FIELDS: &'static [&'static str] = &[];

    fn normalize_keys(_value: &mut Value) {}
}

/// Declares a record's field names and the fields that hold nested records
/// (objects or arrays of objects).
macro_rules! known_fields {
    ($ty:ty { $($field:literal $(=> $nested:ty)?),* $(,)? }) => {
        impl $crate::types::KnownFields for $ty {
            const FIELDS: &'static [&'static str] = &[$($field),*];

            fn normalize_keys(value: &mut ::serde_json::Value) {
                $crate::types::rename_known_keys(value, Self::FIELDS);
                $($( $crate::types::normalize_nested::<$nested>(value, $field); )?)*
            }
        }
    };
}

mod meta;
pub use self::meta::{CountRef, Extra, LatestAction, Pagination};

mod bill;
pub use self::bill::{Bill, BillDetail, BillResponse, BillType, BillsPage, Sponsor};

mod member;
pub use self::member::{BioguideId, Depiction, Member, MemberDetail, MemberResponse, MembersPage};

mod amendment;
pub use self::amendment::{Amendment, AmendmentsPage};

/// Renames keys equal to one of `fields` ignoring ASCII case. An exact key
/// always wins; a second spelling of an already present field stays as is.
pub(crate) fn rename_known_keys(value: &mut Value, fields: &[&'static str]) {
    let Value::Object(map) = value else {
        return;
    };
    let renames: Vec<(String, &'static str)> = map
        .keys()
        .filter(|key| !fields.iter().any(|field| *field == key.as_str()))
        .filter_map(|key| {
            fields
                .iter()
                .find(|field| field.eq_ignore_ascii_case(key))
                .map(|field| (key.clone(), *field))
        })
        .collect();
    for (from, to) in renames {
        if map.contains_key(to) {
            continue;
        }
        if let Some(v) = map.remove(&from) {
            map.insert(to.to_string(), v);
        }
    }
}

pub(crate) fn normalize_nested<T: KnownFields>(value: &mut Value, field: &str) {
    match value.get_mut(field) {
        Some(Value::Array(items)) => items.iter_mut().for_each(T::normalize_keys),
        Some(nested) => T::normalize_keys(nested),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeSet;

    /// Every non-`extra` key a record serializes must be declared, and
    /// every declared name must be a real field.
    fn assert_fields_match<T: KnownFields + DeserializeOwned + Serialize>(minimal: Value) {
        let record: T = serde_json::from_value(minimal).unwrap();
        let serialized = serde_json::to_value(&record).unwrap();
        let keys: BTreeSet<&str> = serialized
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let declared: BTreeSet<&str> = T::FIELDS.iter().copied().collect();
        assert_eq!(keys, declared, "{}", std::any::type_name::<T>());
    }

    #[test]
    fn declared_fields_match_serde_names() {
        assert_fields_match::<Pagination>(json!({}));
        assert_fields_match::<LatestAction>(json!({}));
        assert_fields_match::<CountRef>(json!({}));
        assert_fields_match::<Bill>(json!({"congress": 1, "number": "1", "type": "HR"}));
        assert_fields_match::<Sponsor>(json!({"bioguideId": "X000001"}));
        assert_fields_match::<BillDetail>(json!({"congress": 1, "number": "1", "type": "HR"}));
        assert_fields_match::<BillsPage>(json!({}));
        assert_fields_match::<Depiction>(json!({}));
        assert_fields_match::<Member>(json!({"bioguideId": "X000001"}));
        assert_fields_match::<MemberDetail>(json!({"bioguideId": "X000001"}));
        assert_fields_match::<MembersPage>(json!({}));
        assert_fields_match::<Amendment>(json!({"congress": 1, "number": "1", "type": "SAMDT"}));
        assert_fields_match::<AmendmentsPage>(json!({}));
    }

    #[test]
    fn envelope_fields_declared() {
        assert_eq!(BillResponse::FIELDS, ["bill"]);
        assert_eq!(MemberResponse::FIELDS, ["member"]);
    }

    #[test]
    fn renames_nested_keys_and_keeps_unknown_ones() {
        let mut value = json!({
            "BILLS": [{
                "Congress": 118,
                "number": "1",
                "TYPE": "HR",
                "LatestAction": {"ActionDate": "2024-01-02", "Weird": 1},
                "Laws": []
            }],
            "pagination": {"Count": 1},
            "Request": {"Format": "json"}
        });
        BillsPage::normalize_keys(&mut value);

        let bill = &value["bills"][0];
        assert_eq!(bill["congress"], 118);
        assert_eq!(bill["type"], "HR");
        assert_eq!(bill["latestAction"]["actionDate"], "2024-01-02");
        assert_eq!(bill["latestAction"]["Weird"], 1);
        assert!(bill.get("Laws").is_some());
        assert_eq!(value["pagination"]["count"], 1);
        assert_eq!(value["Request"]["Format"], "json");
    }

    #[test]
    fn exact_key_wins_over_other_spelling() {
        let mut value = json!({"bills": [], "Bills": [{"congress": 1}]});
        BillsPage::normalize_keys(&mut value);
        assert_eq!(value["bills"], json!([]));
        assert!(value.get("Bills").is_some());
    }
}
