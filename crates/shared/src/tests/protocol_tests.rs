use super::*;
use serde_json::json;

#[test]
fn decodes_promoted_item_fields() {
    let raw = RawMenuItem::from_value(json!({
        "promoted": true,
        "vegetarian": false,
        "id": 7,
        "name": "Test",
        "notes": "",
        "bitcoin": 150,
        "image": "/t.png",
    }));

    let item = raw.validate().expect("valid item");
    assert!(item.is_promoted);
    assert!(!item.is_vegetarian);
    assert_eq!(item.id, ItemId(7));
    assert_eq!(item.name, "Test");
    assert_eq!(item.price_units, 150);
    assert_eq!(item.image_path, "/t.png");
}

#[test]
fn mistyped_field_decodes_to_none_without_failing_record() {
    let raw = RawMenuItem::from_value(json!({
        "id": 3,
        "name": "Classic",
        "bitcoin": "twelve",
        "image": "/classic.png",
        "vegetarian": "yes",
    }));

    assert_eq!(raw.id, Some(3));
    assert_eq!(raw.bitcoin, None);
    assert_eq!(raw.vegetarian, None);
    assert_eq!(raw.validate(), Err(ItemRejection::MissingField("bitcoin")));
}

#[test]
fn optional_fields_default_when_absent() {
    let item = RawMenuItem::from_value(json!({
        "id": 4,
        "name": "Plain",
        "bitcoin": 0,
        "image": "/plain.png",
    }))
    .validate()
    .expect("valid item");

    assert_eq!(item.notes, "");
    assert!(!item.is_vegetarian);
    assert!(!item.is_promoted);
    assert_eq!(item.price_label(), "฿0");
}

#[test]
fn rejects_non_positive_id_and_blank_name() {
    let zero_id = RawMenuItem {
        id: Some(0),
        name: Some("Zero".to_string()),
        bitcoin: Some(1),
        image: Some("/z.png".to_string()),
        ..RawMenuItem::default()
    };
    assert_eq!(zero_id.validate(), Err(ItemRejection::NonPositiveId(0)));

    let blank = RawMenuItem {
        id: Some(1),
        name: Some("   ".to_string()),
        bitcoin: Some(1),
        image: Some("/b.png".to_string()),
        ..RawMenuItem::default()
    };
    assert_eq!(blank.validate(), Err(ItemRejection::EmptyName));
}

#[test]
fn non_object_entry_is_an_empty_record() {
    assert_eq!(RawMenuItem::from_value(json!(42)), RawMenuItem::default());
}

#[test]
fn purchase_request_uses_wire_field_names() {
    let body = serde_json::to_value(PurchaseRequest {
        id: ItemId(9),
        bitcoin: 300,
    })
    .expect("encode");
    assert_eq!(body, json!({ "id": 9, "bitcoin": 300 }));
}
