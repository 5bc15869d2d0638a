use emojipick::catalog::{BuildOptions, InvalidRecordPolicy, SKIN_TONES, SectionOrders, build};
use emojipick::dataset;
use emojipick::insert::{PlainTextField, TextTarget};
use emojipick::widget::PickerContent;
use emojipick::{
    Catalog, EntryId, FieldKind, PickerError, PickerWidget, Provider, RawEmojiRecord, query,
};

fn bundled_catalog(options: &BuildOptions) -> Catalog {
    let records = dataset::bundled().unwrap();
    build(&records, &SectionOrders::default(), options).unwrap()
}

fn short_names(catalog: &Catalog) -> Vec<&str> {
    catalog.records().iter().map(|r| r.short_name.as_str()).collect()
}

fn content() -> PickerContent {
    let records = dataset::bundled().unwrap();
    PickerContent::build(&records, &SectionOrders::default(), &BuildOptions::default(), false)
        .unwrap()
}

#[test]
fn bundled_catalog_is_ordered_by_priority() {
    let catalog = bundled_catalog(&BuildOptions::default());
    let labels: Vec<&str> = catalog.categories().iter().map(|c| c.label()).collect();
    assert_eq!(
        labels,
        ["People", "Nature", "Foods", "Activity", "Places", "Objects", "Symbols", "Flags"]
    );
    assert_eq!(catalog.len(), 45);

    let sizes: Vec<usize> = catalog.categories().iter().map(|c| c.len()).collect();
    assert_eq!(sizes, [11, 6, 6, 5, 4, 4, 5, 4]);
}

#[test]
fn entries_follow_sort_order_within_category() {
    let catalog = bundled_catalog(&BuildOptions::default());
    let people = catalog.category("People").unwrap();
    let names: Vec<&str> = catalog
        .entries(people)
        .iter()
        .map(|r| r.short_name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "grinning", "smiley", "smile", "joy", "wink", "sunglasses", "disappointed", "wave",
            "clap", "+1", "-1"
        ]
    );

    for (_, entries) in catalog.sections() {
        assert!(entries.windows(2).all(|w| w[0].sort_order <= w[1].sort_order));
    }
}

#[test]
fn skin_tones_never_reach_the_catalog() {
    let catalog = bundled_catalog(&BuildOptions {
        provider: None,
        ..BuildOptions::default()
    });
    assert!(catalog.category(SKIN_TONES).is_none());
    assert!(catalog.records().iter().all(|r| r.category != SKIN_TONES));
    assert!(!short_names(&catalog).contains(&"skin-tone-2"));
    assert!(!short_names(&catalog).contains(&"flag-placeholder"));
}

#[test]
fn provider_without_image_drops_entries() {
    let twitter = bundled_catalog(&BuildOptions::default());
    assert!(!short_names(&twitter).contains(&"flag-placeholder"));
    assert!(short_names(&twitter).contains(&"hash"));

    let messenger = bundled_catalog(&BuildOptions {
        provider: Some(Provider::Messenger),
        ..BuildOptions::default()
    });
    assert_eq!(messenger.len(), 44);
    assert!(!short_names(&messenger).contains(&"hash"));
}

#[test]
fn build_is_deterministic() {
    let first = bundled_catalog(&BuildOptions::default());
    let second = bundled_catalog(&BuildOptions::default());
    assert_eq!(first, second);
}

#[test]
fn build_leaves_input_untouched() {
    let records = dataset::bundled().unwrap();
    let before = serde_json::to_string(&records).unwrap();
    build(&records, &SectionOrders::default(), &BuildOptions::default()).unwrap();
    assert_eq!(serde_json::to_string(&records).unwrap(), before);
}

#[test]
fn missing_priority_is_a_configuration_error() {
    let records = dataset::bundled().unwrap();
    let defaults = SectionOrders::default();
    let orders: SectionOrders = defaults
        .labels()
        .filter(|label| *label != "Foods")
        .map(|label| (label, defaults.priority(label).unwrap()))
        .collect();

    let err = build(&records, &orders, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, PickerError::Configuration { category } if category == "Foods"));
}

#[test]
fn invalid_records_follow_policy() {
    let mut records = dataset::bundled().unwrap();
    records.push(RawEmojiRecord {
        short_name: Some("broken".to_string()),
        category: Some("Objects".to_string()),
        ..RawEmojiRecord::default()
    });

    let skipped = build(&records, &SectionOrders::default(), &BuildOptions::default()).unwrap();
    assert_eq!(skipped.len(), 45);

    let abort = BuildOptions {
        invalid_records: InvalidRecordPolicy::Abort,
        ..BuildOptions::default()
    };
    let err = build(&records, &SectionOrders::default(), &abort).unwrap_err();
    assert!(matches!(err, PickerError::InvalidRecord { .. }));
}

#[test]
fn empty_query_resets_to_everything() {
    let content = content();
    let result = query(content.index(), "");
    assert!(result.is_reset());
    assert_eq!(result.match_count(), content.catalog().len());
    for category in content.catalog().categories() {
        assert_eq!(result.matches_in(category), category.len());
    }
}

#[test]
fn query_ignores_case() {
    let content = content();
    let result = query(content.index(), "PIZ");
    let names: Vec<&str> = result
        .matches()
        .map(|id| content.catalog().get(id).unwrap().short_name.as_str())
        .collect();
    assert_eq!(names, ["pizza"]);
}

#[test]
fn query_with_no_match_reports_no_results() {
    let content = content();
    let result = query(content.index(), "zzzzzznotreal");
    assert!(result.has_no_results());
    assert_eq!(result.match_count(), 0);
    assert!(
        content
            .catalog()
            .categories()
            .iter()
            .all(|c| result.matches_in(c) == 0)
    );
}

#[test]
fn query_matches_aliases() {
    let content = content();
    let result = query(content.index(), "+1");
    let names: Vec<&str> = result
        .matches()
        .map(|id| content.catalog().get(id).unwrap().short_name.as_str())
        .collect();
    assert_eq!(names, ["+1"]);

    let thumbs = query(content.index(), "thumbsup");
    assert_eq!(thumbs.match_count(), 1);
}

#[test]
fn regex_metacharacters_are_literal() {
    let content = content();
    for q in ["(", "*", "[", "+", ".*"] {
        let result = query(content.index(), q);
        assert!(!result.is_reset(), "{q} should not reset");
    }
    assert!(query(content.index(), "(").has_no_results());
    assert!(query(content.index(), ".*").has_no_results());
}

#[test]
fn widget_builds_once() {
    let mut widget = PickerWidget::new(
        dataset::bundled().unwrap(),
        SectionOrders::default(),
        BuildOptions::default(),
    );
    let first = widget.attach(FieldKind::PlainText);
    let second = widget.attach(FieldKind::Editable);

    assert!(widget.open(first).unwrap());
    assert!(widget.open(second).unwrap());
    assert!(!widget.is_open(first));
    widget.search("piz").unwrap();
    widget.init().unwrap();
    assert_eq!(widget.builds(), 1);
}

#[test]
fn widget_inserts_over_partial_shorthand() {
    let mut widget = PickerWidget::new(
        dataset::bundled().unwrap(),
        SectionOrders::default(),
        BuildOptions::default(),
    );
    let pizza = widget
        .search("pizza")
        .unwrap()
        .matches()
        .next()
        .unwrap();

    let mut field = PlainTextField::new("lunch :piz");
    widget.select(pizza, &mut field).unwrap();
    assert_eq!(field.text(), "lunch :pizza: ");
    assert_eq!(widget.render_to_string(field.text()).unwrap(), "lunch \u{1F355} ");
}

#[test]
fn tab_icons_resolve_in_bundled_dataset() {
    let widget = PickerWidget::new(
        dataset::bundled().unwrap(),
        SectionOrders::default(),
        BuildOptions::default(),
    );
    let content = widget.init().unwrap();
    for category in content.catalog().categories() {
        let icon = widget.tab_icon(category.label()).unwrap();
        assert!(icon.is_some(), "{} has no icon", category.label());
    }
    assert_eq!(widget.tab_icon("People").unwrap(), Some(EntryId(5)));
}
