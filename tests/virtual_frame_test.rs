use mosaicrs::core::hier_index::Label;
use mosaicrs::core::index::Index;
use mosaicrs::core::select::{LabelSelect, PosSelect};
use mosaicrs::frame::Frame;
use mosaicrs::virtual_frame::VirtualFrame;

/// 10 rows r0..r9, 3 columns c0..c2, values 0..30 row-major
fn source_frame() -> Frame<String, i64> {
    let rows: Vec<String> = (0..10).map(|i| format!("r{}", i)).collect();
    let cols: Vec<String> = (0..3).map(|i| format!("c{}", i)).collect();
    let values: Vec<i64> = (0..30).collect();
    Frame::new(Index::new(rows), Index::new(cols), values).unwrap()
}

fn row_partitioned(chunksize: usize, retain_labels: bool) -> VirtualFrame<String, i64> {
    VirtualFrame::from_frame(&source_frame(), chunksize, 0, retain_labels, None).unwrap()
}

#[test]
fn test_shape_and_size() {
    let vf = row_partitioned(4, false);
    assert_eq!(vf.shape().unwrap(), (10, 3));
    assert_eq!(vf.size().unwrap(), 30);
    assert_eq!(vf.ndim(), 2);
}

#[test]
fn test_flat_labels_concatenate_partition_locals() {
    let vf = row_partitioned(4, false);
    let index = vf.index().unwrap().as_flat().unwrap();
    let expected: Vec<String> = (0..10).map(|i| format!("r{}", i)).collect();
    assert_eq!(index.values(), expected.as_slice());
    let columns = vf.columns().unwrap().as_flat().unwrap();
    assert_eq!(columns.values(), &["c0", "c1", "c2"]);
}

#[test]
fn test_retained_labels_are_hierarchical() {
    let vf = row_partitioned(4, true);
    let index = vf.index().unwrap().as_hier().unwrap();
    assert_eq!(index.len(), 10);
    assert_eq!(
        index.get_pair(4),
        Some(&("r4".to_string(), "r4".to_string()))
    );
    assert_eq!(
        index.get_pair(9),
        Some(&("r8".to_string(), "r9".to_string()))
    );
}

#[test]
fn test_scenario_rows_3_4_5_touch_two_partitions() {
    // chunksize 4 over 10 rows: partitions of sizes 4, 4, 2
    let vf = row_partitioned(4, false);
    assert_eq!(vf.bus().len(), 3);

    let result = vf
        .iloc(PosSelect::List(vec![3, 4, 5]), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.shape(), (3, 3));
    let labels = result.row_index().as_flat().unwrap();
    assert_eq!(labels.values(), &["r3", "r4", "r5"]);
    assert_eq!(result.values(), &[9, 10, 11, 12, 13, 14, 15, 16, 17]);
}

#[test]
fn test_selection_order_follows_global_positions_per_partition() {
    // partitions merge in key first-occurrence order; positions inside a
    // partition come back in global position order
    let vf = row_partitioned(4, false);
    let result = vf
        .iloc(PosSelect::List(vec![5, 3, 4]), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    let labels = result.row_index().as_flat().unwrap();
    assert_eq!(labels.values(), &["r4", "r5", "r3"]);
}

#[test]
fn test_selection_independent_of_bus_load_order() {
    let vf = row_partitioned(4, false);
    // warm the last partition first; the result must not change
    vf.iloc(PosSelect::At(9), PosSelect::All).unwrap();
    let result = vf
        .iloc(PosSelect::List(vec![3, 4, 5]), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(
        result.row_index().as_flat().unwrap().values(),
        &["r3", "r4", "r5"]
    );
}

#[test]
fn test_single_partition_selection_passes_through() {
    let vf = row_partitioned(4, false);
    let result = vf
        .iloc(PosSelect::Range(0..4), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.shape(), (4, 3));
    // flat local labels, no partition level added
    let labels = result.row_index().as_flat().unwrap();
    assert_eq!(labels.values(), &["r0", "r1", "r2", "r3"]);

    // identical to extracting from the partition directly
    let partition = vf.bus().get_by_position(0).unwrap();
    let direct = partition
        .extract(&PosSelect::Mask(vec![true; 4]), &PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.values(), direct.values());
    assert_eq!(result.row_index(), direct.row_index());
}

#[test]
fn test_single_partition_selection_retains_outer_label() {
    let vf = row_partitioned(4, true);
    let result = vf
        .iloc(PosSelect::Range(4..8), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    let hier = result.row_index().as_hier().unwrap();
    assert_eq!(
        hier.get_pair(0),
        Some(&("r4".to_string(), "r4".to_string()))
    );
    assert_eq!(hier.span_of(&"r4".to_string()), Some(0..4));
}

#[test]
fn test_scalar_scalar_returns_bare_element() {
    let vf = row_partitioned(4, false);
    let elem = vf
        .iloc(PosSelect::At(7), PosSelect::At(2))
        .unwrap()
        .into_elem()
        .unwrap();
    assert_eq!(elem, 23);
}

#[test]
fn test_scalar_row_returns_series() {
    let vf = row_partitioned(4, false);
    let series = vf
        .iloc(PosSelect::At(5), PosSelect::All)
        .unwrap()
        .into_series()
        .unwrap();
    assert_eq!(series.values(), &[15, 16, 17]);
    assert_eq!(
        series.index().as_flat().unwrap().values(),
        &["c0", "c1", "c2"]
    );
}

#[test]
fn test_zero_extent_slice_returns_empty_result() {
    let vf = row_partitioned(4, false);
    let result = vf
        .iloc(PosSelect::Range(5..5), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.shape(), (0, 3));
    assert!(result.row_index().as_flat().unwrap().is_empty());

    let retained = row_partitioned(4, true);
    let result = retained
        .iloc(PosSelect::Range(5..5), PosSelect::All)
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.shape(), (0, 3));
    assert!(result.row_index().as_hier().unwrap().is_empty());
}

#[test]
fn test_round_trip_every_chunksize() {
    let source = source_frame();
    for chunksize in 1..=10 {
        let vf = VirtualFrame::from_frame(&source, chunksize, 0, false, None).unwrap();
        let back = vf.to_frame().unwrap();
        assert_eq!(back.shape(), source.shape());
        assert_eq!(back.row_index(), source.row_index());
        assert_eq!(back.column_index(), source.column_index());
        assert_eq!(back.values(), source.values());
    }
}

#[test]
fn test_round_trip_retained_inner_labels() {
    let source = source_frame();
    for chunksize in [1, 3, 4, 10] {
        let vf = VirtualFrame::from_frame(&source, chunksize, 0, true, None).unwrap();
        let back = vf.to_frame().unwrap();
        assert_eq!(back.shape(), source.shape());
        assert_eq!(back.values(), source.values());
        let inner = back.row_index().as_hier().unwrap().inner_index();
        assert_eq!(inner.values(), source.row_index().as_flat().unwrap().values());
    }
}

#[test]
fn test_loc_selection() {
    let vf = row_partitioned(4, false);
    let series = vf
        .loc(LabelSelect::range("r2".to_string(), "r5".to_string()), LabelSelect::at("c1".to_string()))
        .unwrap()
        .into_series()
        .unwrap();
    assert_eq!(series.values(), &[7, 10, 13, 16]);
    assert_eq!(series.name(), Some("c1"));
}

#[test]
fn test_loc_pair_and_outer_on_retained_labels() {
    let vf = row_partitioned(4, true);
    let series = vf
        .loc_rows(LabelSelect::pair("r4".to_string(), "r5".to_string()))
        .unwrap()
        .into_series()
        .unwrap();
    assert_eq!(series.values(), &[15, 16, 17]);

    let block = vf
        .loc_rows(LabelSelect::outer("r4".to_string()))
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(block.shape(), (4, 3));
}

#[test]
fn test_column_indexer_and_dict_interface() {
    let vf = row_partitioned(4, false);

    let series = vf
        .col(LabelSelect::at("c2".to_string()))
        .unwrap()
        .into_series()
        .unwrap();
    assert_eq!(series.values(), &[2, 5, 8, 11, 14, 17, 20, 23, 26, 29]);

    let keys: Vec<Label<String>> = vf.keys().unwrap().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0], Label::Flat("c0".to_string()));

    assert!(vf.contains(&Label::Flat("c1".to_string())).unwrap());
    assert!(!vf.contains(&Label::Flat("zz".to_string())).unwrap());

    let column = vf.get(&Label::Flat("c1".to_string())).unwrap().unwrap();
    assert_eq!(column.values(), &[1, 4, 7, 10, 13, 16, 19, 22, 25, 28]);
    assert!(vf.get(&Label::Flat("zz".to_string())).unwrap().is_none());
}

#[test]
fn test_column_partitioned_extraction() {
    let source = source_frame();
    let vf = VirtualFrame::from_frame(&source, 2, 1, false, None).unwrap();
    assert_eq!(vf.bus().len(), 2);
    assert_eq!(vf.shape().unwrap(), (10, 3));

    // column key order decides partition merge order
    let result = vf
        .iloc(PosSelect::All, PosSelect::List(vec![2, 0]))
        .unwrap()
        .into_frame()
        .unwrap();
    assert_eq!(result.shape(), (10, 2));
    assert_eq!(
        result.column_index().as_flat().unwrap().values(),
        &["c2", "c0"]
    );
    assert_eq!(result.get(0, 0), Some(&2));
    assert_eq!(result.get(0, 1), Some(&0));
    assert_eq!(result.get(9, 0), Some(&29));

    let series = vf
        .iloc(PosSelect::All, PosSelect::At(1))
        .unwrap()
        .into_series()
        .unwrap();
    assert_eq!(series.values(), &[1, 4, 7, 10, 13, 16, 19, 22, 25, 28]);
}

#[test]
fn test_rename_shares_axis_state() {
    let vf = row_partitioned(4, false);
    vf.shape().unwrap();
    let renamed = vf.rename(Some("renamed".to_string()));
    assert_eq!(renamed.name(), Some("renamed"));
    assert_eq!(renamed.shape().unwrap(), vf.shape().unwrap());
}

#[test]
fn test_values_materialize_row_major() {
    let vf = row_partitioned(3, false);
    let values = vf.values().unwrap();
    assert_eq!(values, (0..30).collect::<Vec<i64>>());
}

#[test]
fn test_display_materializes() {
    let vf = row_partitioned(4, false);
    let rendered = vf.display().unwrap();
    assert!(rendered.contains("c0"));
    assert!(rendered.contains("r0"));
}
