use dashboard_core::{export_csv, Column, FieldValue, GridQuery, Record};

#[test]
fn export_has_visible_headers_and_filtered_rows() {
    let rows = vec![
        Record {
            id: Some("hidden-id".into()),
            name: Some(FieldValue::from("Soup, hearty")),
            rating: Some(FieldValue::from(4)),
            ..Record::default()
        },
        Record {
            name: Some(FieldValue::from("Stew")),
            rating: Some(FieldValue::from(2)),
            ..Record::default()
        },
    ];
    let mut query = GridQuery::default();
    query.set_filter(Column::Rating, ">3");

    let csv = export_csv(&rows, &query);
    let lines: Vec<_> = csv.split("\r\n").collect();

    assert_eq!(
        lines[0],
        "name,url,category,author,summary,rating,rating_count,review_count,ingredients,\
         directions,prep,cook,total,servings,yield,calories"
    );
    assert_eq!(lines[1], "\"Soup, hearty\",,,,,4,,,,,,,,,,");
    assert_eq!(lines[2], "");
    assert_eq!(lines.len(), 3);
    assert!(!csv.contains("hidden-id"));
}

#[test]
fn json_typed_fields_export_as_display_text() {
    let rows = vec![Record {
        name: Some(FieldValue::from("Porridge")),
        summary: Some(FieldValue::Bool(false)),
        servings: Some(FieldValue::Null),
        ingredients: Some(FieldValue::Nested(serde_json::json!(["oats", "milk"]))),
        ..Record::default()
    }];

    let csv = export_csv(&rows, &GridQuery::default());
    let row = csv.split("\r\n").nth(1).unwrap();

    assert_eq!(row, "Porridge,,,,false,,,,\"[\"\"oats\"\",\"\"milk\"\"]\",,,,,,,");
}
