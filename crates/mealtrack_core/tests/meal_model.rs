use mealtrack_core::{Meal, MealValidationError};

#[test]
fn try_new_accepts_rating_bounds() {
    let zero = Meal::try_new("Zero", None, 0).unwrap();
    assert_eq!(zero.rating(), 0);

    let max = Meal::try_new("Max", None, 5).unwrap();
    assert_eq!(max.rating(), 5);
}

#[test]
fn try_new_keeps_exact_field_values() {
    for rating in 0..=5 {
        let meal = Meal::try_new("Ramen", Some(vec![0xFF, 0xD8]), rating).unwrap();
        assert_eq!(meal.name(), "Ramen");
        assert_eq!(meal.image(), Some(&[0xFF, 0xD8][..]));
        assert_eq!(i32::from(meal.rating()), rating);
    }
}

#[test]
fn try_new_rejects_empty_name_for_any_image_or_rating() {
    for image in [None, Some(Vec::new()), Some(vec![1, 2, 3])] {
        for rating in [-1, 0, 3, 5, 6] {
            let err = Meal::try_new("", image.clone(), rating).unwrap_err();
            assert_eq!(err, MealValidationError::EmptyName);
        }
    }
}

#[test]
fn try_new_rejects_rating_outside_bounds() {
    for rating in [i32::MIN, -100, -1, 6, 7, 255, 256, i32::MAX] {
        let err = Meal::try_new("Negative", None, rating).unwrap_err();
        assert_eq!(
            err,
            MealValidationError::RatingOutOfRange {
                rating: i64::from(rating)
            }
        );
    }
}

#[test]
fn absent_and_empty_images_are_distinct() {
    let absent = Meal::try_new("Plain", None, 1).unwrap();
    let empty = Meal::try_new("Plain", Some(Vec::new()), 1).unwrap();

    assert_eq!(absent.image(), None);
    assert_eq!(empty.image(), Some(&[][..]));
    assert_ne!(absent, empty);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let meal = Meal::try_new("Sushi", Some(b"png".to_vec()), 3).unwrap();

    let json = serde_json::to_value(&meal).unwrap();
    assert_eq!(json["name"], "Sushi");
    assert_eq!(json["image"], "cG5n");
    assert_eq!(json["rating"], 3);

    let decoded: Meal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, meal);
}

#[test]
fn deserialize_treats_missing_image_as_absent() {
    let value = serde_json::json!({ "name": "Tea", "rating": 2 });
    let meal: Meal = serde_json::from_value(value).unwrap();
    assert_eq!(meal.image(), None);
}

#[test]
fn deserialize_treats_missing_rating_as_zero_stars() {
    let value = serde_json::json!({ "name": "Old", "image": null });
    let meal: Meal = serde_json::from_value(value).unwrap();
    assert_eq!(meal.name(), "Old");
    assert_eq!(meal.rating(), 0);
}

#[test]
fn deserialize_rejects_invalid_records() {
    let cases = [
        serde_json::json!({ "name": "", "image": null, "rating": 2 }),
        serde_json::json!({ "name": "Late", "image": null, "rating": 9 }),
        serde_json::json!({ "name": "Late", "image": null, "rating": -1 }),
        serde_json::json!({ "image": null, "rating": 2 }),
        serde_json::json!({ "name": "BadImage", "image": "not base64!", "rating": 2 }),
    ];

    for value in cases {
        assert!(
            serde_json::from_value::<Meal>(value.clone()).is_err(),
            "expected decode failure for {value}"
        );
    }
}

#[test]
fn deserialize_reports_validation_message() {
    let value = serde_json::json!({ "name": "Late", "image": null, "rating": 9 });
    let err = serde_json::from_value::<Meal>(value).unwrap_err();
    assert!(
        err.to_string().contains("meal rating (9) must be between 0 and 5"),
        "unexpected error: {err}"
    );
}
