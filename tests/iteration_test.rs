use mosaicrs::core::error::Error;
use mosaicrs::core::hier_index::Label;
use mosaicrs::core::index::Index;
use mosaicrs::frame::Frame;
use mosaicrs::virtual_frame::VirtualFrame;

fn source_frame() -> Frame<String, i64> {
    let rows: Vec<String> = (0..6).map(|i| format!("r{}", i)).collect();
    let cols: Vec<String> = (0..3).map(|i| format!("c{}", i)).collect();
    let values: Vec<i64> = (0..18).collect();
    Frame::new(Index::new(rows), Index::new(cols), values).unwrap()
}

#[test]
fn test_iter_rows_over_row_partitions() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    let rows: Vec<Vec<i64>> = vf
        .iter_array(1)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], vec![0, 1, 2]);
    assert_eq!(rows[5], vec![15, 16, 17]);
}

#[test]
fn test_iter_columns_over_column_partitions() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 1, false, None).unwrap();
    let cols: Vec<Vec<i64>> = vf
        .iter_array(0)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(cols.len(), 3);
    assert_eq!(cols[0], vec![0, 3, 6, 9, 12, 15]);
    assert_eq!(cols[2], vec![2, 5, 8, 11, 14, 17]);
}

#[test]
fn test_orthogonal_direction_rejected() {
    let by_rows = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    assert!(matches!(
        by_rows.iter_array(0),
        Err(Error::UnsupportedIterationDirection)
    ));

    let by_cols = VirtualFrame::from_frame(&source_frame(), 2, 1, false, None).unwrap();
    assert!(matches!(
        by_cols.iter_array(1),
        Err(Error::UnsupportedIterationDirection)
    ));
}

#[test]
fn test_invalid_iteration_axis() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    assert!(matches!(vf.iter_array(2), Err(Error::InvalidAxis(2))));
}

#[test]
fn test_iter_array_items_pairs_unified_labels() {
    let vf = VirtualFrame::from_frame(&source_frame(), 4, 0, false, None).unwrap();
    let items: Vec<(Label<String>, Vec<i64>)> = vf
        .iter_array_items(1)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[4].0, Label::Flat("r4".to_string()));
    assert_eq!(items[4].1, vec![12, 13, 14]);
}

#[test]
fn test_iter_series_carries_opposite_labels_and_name() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    let series: Vec<_> = vf
        .iter_series(1)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(series.len(), 6);
    assert_eq!(series[3].name(), Some("r3"));
    assert_eq!(series[3].values(), &[9, 10, 11]);
    assert_eq!(
        series[3].index().as_flat().unwrap().values(),
        &["c0", "c1", "c2"]
    );
}

#[test]
fn test_iter_series_items_with_retained_labels() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 0, true, None).unwrap();
    let items: Vec<_> = vf
        .iter_series_items(1)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(
        items[2].0,
        Label::Pair("r2".to_string(), "r2".to_string())
    );
}

#[test]
fn test_items_supported_only_for_column_partitions() {
    let by_cols = VirtualFrame::from_frame(&source_frame(), 2, 1, false, None).unwrap();
    let items: Vec<_> = by_cols
        .items()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].0, Label::Flat("c1".to_string()));
    assert_eq!(items[1].1.values(), &[1, 4, 7, 10, 13, 16]);

    let by_rows = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    assert!(by_rows.items().is_err());
}

#[test]
fn test_iterators_are_fresh_per_invocation() {
    let vf = VirtualFrame::from_frame(&source_frame(), 2, 0, false, None).unwrap();
    let first: Vec<Vec<i64>> = vf
        .iter_array(1)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let second: Vec<Vec<i64>> = vf
        .iter_array(1)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(first, second);
}
