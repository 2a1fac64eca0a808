use proptest::prelude::*;
use tabula_engine::{
    ColumnLayout, ColumnPreferences, filter_records, paginate, sort_records, total_pages,
};
use tabula_model::{
    ColumnFilter, ColumnId, PageState, QueryState, Record, SortDirection, SortState, Value,
};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-50i64..50).prop_map(Value::Int),
        (-50.0f64..50.0).prop_map(Value::Float),
        "[a-zA-Z]{0,4}".prop_map(Value::Text),
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((value_strategy(), value_strategy()), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                Record::new()
                    .with("id", i as i64)
                    .with("a", a)
                    .with("b", b)
            })
            .collect()
    })
}

/// Records whose "text" column holds only text and whose "num" column holds
/// only numbers, with gaps.
fn typed_records_strategy() -> impl Strategy<Value = Vec<Record>> {
    let text = prop::option::of("[a-cA-C]{0,2}");
    let num = prop::option::of(prop_oneof![
        (-20i64..20).prop_map(Value::Int),
        (-20.0f64..20.0).prop_map(Value::Float),
    ]);
    prop::collection::vec((text, num), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (text, num))| {
                Record::new()
                    .with("id", i as i64)
                    .with("text", text)
                    .with("num", num)
            })
            .collect()
    })
}

fn query_strategy() -> impl Strategy<Value = QueryState> {
    (
        "[a-zA-Z0-9]{0,3}",
        prop::option::of((prop_oneof![Just("a"), Just("b"), Just("zz")], value_strategy())),
    )
        .prop_map(|(term, filter)| QueryState {
            search_term: term,
            column_filter: filter.map(|(field, value)| ColumnFilter::new(field, value)),
        })
}

fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.display("id")).collect()
}

proptest! {
    #[test]
    fn filter_never_grows(records in records_strategy(), query in query_strategy()) {
        let filtered = filter_records(&records, &query);
        prop_assert!(filtered.len() <= records.len());
    }

    #[test]
    fn empty_query_is_identity(records in records_strategy()) {
        let filtered = filter_records(&records, &QueryState::default());
        let all: Vec<&Record> = records.iter().collect();
        prop_assert_eq!(filtered, all);
    }

    #[test]
    fn filter_keeps_input_order(records in records_strategy(), query in query_strategy()) {
        let filtered = filter_records(&records, &query);
        let positions: Vec<i64> = filtered
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_f64))
            .map(|v| v as i64)
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sort_is_idempotent(
        records in typed_records_strategy(),
        key in prop_oneof![Just("text"), Just("num")],
    ) {
        let sort = SortState::by(key, SortDirection::Asc);
        let once = sort_records(records.iter().collect(), &sort);
        let twice = sort_records(once.clone(), &sort);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn sort_is_a_permutation(records in records_strategy(), desc in any::<bool>()) {
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let sorted = sort_records(records.iter().collect(), &SortState::by("a", direction));
        let mut got = ids(&sorted);
        let mut want: Vec<String> = records.iter().map(|r| r.display("id")).collect();
        got.sort();
        want.sort();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn desc_reverses_asc(values in prop::collection::vec(-1000i64..1000, 0..40)) {
        let records: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new().with("id", i as i64).with("n", *v))
            .collect();
        let asc = sort_records(records.iter().collect(), &SortState::by("n", SortDirection::Asc));
        let mut desc = sort_records(records.iter().collect(), &SortState::by("n", SortDirection::Desc));
        desc.reverse();
        prop_assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn pagination_bounds(len in 0usize..200, size in 1usize..30, index in 0usize..50) {
        let items: Vec<usize> = (0..len).collect();
        let state = PageState::new(size).unwrap().at(index);
        let page = paginate(&items, state);
        prop_assert_eq!(page.total_pages, std::cmp::max(1, len.div_ceil(size)));
        prop_assert_eq!(page.total_pages, total_pages(len, size));
        prop_assert!(page.visible.len() <= size);
        prop_assert!(page.state.page_index < page.total_pages);
        if index < page.total_pages {
            prop_assert_eq!(page.state.page_index, index);
        }
    }

    #[test]
    fn column_partition_holds(
        ops in prop::collection::vec((0u8..10, 0usize..6, 0usize..6), 0..30),
    ) {
        let declared: Vec<ColumnId> = ["client", "status", "date", "owner", "notes"]
            .iter()
            .map(|id| ColumnId::new(*id).unwrap())
            .collect();
        let mut prefs = ColumnPreferences::new(declared.clone(), &declared[..3]);
        let ghost = ColumnId::new("ghost").unwrap();

        for (op, target, other) in ops {
            let column = declared.get(target).unwrap_or(&ghost);
            let second = declared.get(other).unwrap_or(&ghost);
            let _ = match op {
                0 => prefs.move_to_hidden(column),
                1 => prefs.move_to_visible(column),
                2 => prefs.move_up(column),
                3 => prefs.move_down(column),
                4 => {
                    prefs.move_all_to_hidden();
                    Ok(())
                }
                5 => {
                    prefs.move_all_to_visible();
                    Ok(())
                }
                6 => {
                    prefs.reset_to_defaults();
                    Ok(())
                }
                7 => {
                    prefs.reset(&[second.clone(), column.clone(), second.clone()]);
                    Ok(())
                }
                8 => {
                    prefs.apply_layout(&ColumnLayout {
                        visible: vec![column.clone(), ghost.clone()],
                        hidden: Vec::new(),
                    });
                    Ok(())
                }
                _ => {
                    prefs.apply_layout(&ColumnLayout {
                        visible: vec![second.clone()],
                        hidden: vec![column.clone(), second.clone(), ghost.clone(), column.clone()],
                    });
                    Ok(())
                }
            };

            let mut all: Vec<ColumnId> =
                prefs.visible().iter().chain(prefs.hidden()).cloned().collect();
            prop_assert_eq!(all.len(), declared.len());
            all.sort();
            let mut expected = declared.clone();
            expected.sort();
            prop_assert_eq!(all, expected);
        }
    }
}
