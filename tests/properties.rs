//! End-to-end checks of the documented statistical properties.

use getinsights::processing::correlation::pearson;
use getinsights::processing::skewness::Skewness;
use getinsights::data::load_csv_reader;
use getinsights::{
    classify, project, ChartType, CorrelationMatrix, Dataset, Record, SkewnessStats, SummaryStats,
    Value, Workspace,
};
use rstest::rstest;

fn numbers(values: &[f64]) -> Vec<f64> {
    values.to_vec()
}

#[rstest]
#[case(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0])]
#[case(&[5.0, -3.0, 12.5, 0.0, 0.0, 7.25, 100.0])]
#[case(&[42.0])]
#[case(&[2.0, 1.0])]
#[case(&[9.0, 9.0, 9.0, 1.0, 1.0, -20.0, 3.0, 8.0])]
fn five_numbers_are_ordered(#[case] values: &[f64]) {
    let s = SummaryStats::compute(&numbers(values)).unwrap();
    assert!(s.min <= s.q1);
    assert!(s.q1 <= s.median);
    assert!(s.median <= s.q3);
    assert!(s.q3 <= s.max);
    assert_eq!(s.count, values.len());
}

#[test]
fn one_to_ten_summary() {
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let s = SummaryStats::compute(&values).unwrap();
    assert_eq!((s.min, s.max, s.median), (1.0, 10.0, 6.0));
    assert!((s.mean - 5.5).abs() < 1e-12);
    assert!((s.std_dev - 2.872).abs() < 1e-3);
}

#[test]
fn outlier_fence_example() {
    let s = SummaryStats::compute(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0]).unwrap();
    assert_eq!((s.q1, s.q3, s.iqr), (3.0, 8.0, 5.0));
    assert_eq!(s.fence(), (-4.5, 15.5));
    assert_eq!(s.outliers, vec![100.0]);
}

#[rstest]
#[case(&[1.0, 1.0, 2.0, 2.0, 3.0], &[1.0, 2.0], false)]
#[case(&[1.0, 2.0, 3.0, 4.0, 5.0], &[], true)]
#[case(&[3.0, 3.0, 3.0, 1.0], &[3.0], false)]
fn modes_and_uniqueness(#[case] values: &[f64], #[case] modes: &[f64], #[case] all_unique: bool) {
    let summary = SummaryStats::compute(values).unwrap();
    let skew = SkewnessStats::compute(values).unwrap();
    assert_eq!(summary.modes, modes);
    assert_eq!(skew.modes, modes);
    assert_eq!(skew.all_unique, all_unique);
}

#[rstest]
#[case(0.0)]
#[case(7.5)]
#[case(-3.0)]
fn zero_variance_column(#[case] v: f64) {
    let values = vec![v; 6];
    let summary = SummaryStats::compute(&values).unwrap();
    assert_eq!(summary.std_dev, 0.0);
    assert_eq!(summary.modes, vec![v]);
    let skew = SkewnessStats::compute(&values).unwrap();
    assert_eq!(skew.skewness, Skewness::ZeroVariance);
    assert_eq!(skew.skewness.value(), 0.0);
}

fn ramp_and_flat(v: f64, len: usize) -> Dataset {
    Dataset::from_records(
        (0..len)
            .map(|i| Record::new().with("x", i as f64).with("flat", v))
            .collect(),
    )
}

#[rstest]
fn inexact_constant_column_is_degenerate_everywhere(
    #[values(0.1, 1.1, 7.7)] v: f64,
    #[values(3, 7, 10)] len: usize,
) {
    let values = vec![v; len];
    let summary = SummaryStats::compute(&values).unwrap();
    assert_eq!(summary.std_dev, 0.0);
    assert_eq!(summary.mean, v);

    let skew = SkewnessStats::compute(&values).unwrap();
    assert_eq!(skew.std_dev, 0.0);
    assert_eq!(skew.skewness, Skewness::ZeroVariance);

    let ds = ramp_and_flat(v, len);
    let c = classify(&ds);
    assert_eq!(c.numeric_fields, vec!["x", "flat"]);
    let m = CorrelationMatrix::compute(&ds, &c.numeric_fields);
    assert_eq!(m.between("x", "flat"), Some(0.0));
    assert_eq!(m.between("flat", "x"), Some(0.0));
    assert_eq!(m.between("flat", "flat"), Some(1.0));
    assert!(m.rows().iter().flatten().all(|r| r.is_finite()));
}

#[test]
fn median_definitions_differ_for_even_counts() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(SummaryStats::compute(&values).unwrap().median, 3.0);
    assert_eq!(SkewnessStats::compute(&values).unwrap().median, 2.5);
}

fn mixed_dataset() -> Dataset {
    Dataset::from_records(
        [
            ("A", 10.0, 1.5, 4.0),
            ("B", 20.0, 2.0, 4.0),
            ("A", 15.0, 9.0, 4.0),
            ("C", 40.0, 0.5, 4.0),
            ("B", 35.0, 3.0, 4.0),
        ]
        .iter()
        .map(|&(cat, amount, noise, flat)| {
            Record::new()
                .with("category", cat)
                .with("amount", amount)
                .with("noise", noise)
                .with("flat", flat)
        })
        .collect(),
    )
}

#[test]
fn correlation_matrix_properties() {
    let ds = mixed_dataset();
    let c = classify(&ds);
    assert_eq!(c.numeric_fields, vec!["amount", "noise", "flat"]);

    let m = CorrelationMatrix::compute(&ds, &c.numeric_fields);
    for i in 0..m.len() {
        assert_eq!(m.get(i, i), Some(1.0));
        for j in 0..m.len() {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
    }
    assert_eq!(m.between("amount", "flat"), Some(0.0));
    assert_eq!(m.between("flat", "flat"), Some(1.0));
}

#[test]
fn self_correlation_of_varied_data_is_one() {
    let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    assert!((pearson(&x, &x).value() - 1.0).abs() < 1e-12);
}

#[test]
fn pie_projection_example() {
    let ds = Dataset::from_records(vec![
        Record::new().with("category", "A").with("amount", 10.0),
        Record::new().with("category", "B").with("amount", 20.0),
    ]);
    let d = project(ChartType::Pie, &ds, Some("category"), Some("amount"));
    assert_eq!(d.series[0].labels, vec![Value::from("A"), Value::from("B")]);
    assert_eq!(d.series[0].values, vec![Value::Number(10.0), Value::Number(20.0)]);
}

#[rstest]
#[case("bar", 1)]
#[case("line", 1)]
#[case("scatter", 1)]
#[case("pie", 1)]
#[case("box", 2)]
#[case("histogram", 1)]
#[case("sunburst", 1)]
fn every_chart_type_projects(#[case] tag: &str, #[case] series: usize) {
    let ds = mixed_dataset();
    let d = project(ChartType::from_tag(tag), &ds, Some("category"), Some("amount"));
    assert_eq!(d.series.len(), series);
}

#[test]
fn csv_to_workspace() {
    let csv = "region,sales,date\nnorth,100,2024-01-01\nsouth,250,2024-01-02\neast,175,2024-01-03\nwest,,2024-01-04\n";
    let mut ws = Workspace::with_dataset(load_csv_reader(csv.as_bytes()).unwrap());
    let c = ws.classification().clone();
    // The blank sales cell keeps the column out of the numeric list.
    assert!(c.numeric_fields.is_empty());
    assert_eq!(c.date_fields, vec!["date"]);
    assert!(ws.correlation().ready().is_none());

    let hist = ws.projection(ChartType::Histogram, Some("sales"), None);
    assert_eq!(hist.series[0].x.len(), 4);
    assert_eq!(hist.series[0].x[3], Value::Missing);
}
