use dashboard_core::{build_box_plot, chart_input, Column, FieldValue, Record, UNCATEGORIZED};
use pretty_assertions::assert_eq;

fn dish(category: &str, rating: Option<FieldValue>) -> Record {
    Record {
        category: Some(FieldValue::from(category)),
        rating,
        ..Record::default()
    }
}

#[test]
fn chart_input_never_contains_uncategorized() {
    let categories = ["main", UNCATEGORIZED, "", "Uncategorized", UNCATEGORIZED, "dessert"];
    let rows: Vec<Record> = categories
        .iter()
        .map(|c| dish(c, Some(FieldValue::from(3))))
        .collect();

    let input = chart_input(&rows);
    assert_eq!(input.len(), 4);
    assert!(input.iter().all(|r| r.display(Column::Category) != UNCATEGORIZED));
}

#[test]
fn groups_follow_first_appearance_and_skip_non_numeric() {
    let rows = vec![
        dish("main", Some(FieldValue::from(4))),
        dish("dessert", Some(FieldValue::text("5"))),
        dish("main", Some(FieldValue::text("2"))),
        dish("main", Some(FieldValue::text("great"))),
        dish("dessert", None),
        dish(UNCATEGORIZED, Some(FieldValue::from(1))),
    ];

    let plot = build_box_plot(&rows);
    let names: Vec<_> = plot.groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(names, vec!["main", "dessert"]);

    let main = &plot.groups[0];
    assert_eq!(main.count, 2);
    assert_eq!(main.min, 2.0);
    assert_eq!(main.median, 3.0);
    assert_eq!(main.max, 4.0);
    assert_eq!(plot.groups[1].count, 1);
    assert_eq!(plot.value_range(), Some((2.0, 5.0)));
}

#[test]
fn all_uncategorized_yields_empty_plot() {
    let rows = vec![
        dish(UNCATEGORIZED, Some(FieldValue::from(4))),
        dish(UNCATEGORIZED, Some(FieldValue::from(2))),
    ];
    let plot = build_box_plot(&rows);
    assert!(plot.is_empty());
    assert_eq!(plot.value_range(), None);
}
