//! # Constraint Derivation Properties
//!
//! Exercises the renewable fuel rules across arbitrary ledger values: the
//! retention and deferral caps always match, and the prior-year snapshot
//! branch never installs a cap without also removing the editable cell.

use proptest::prelude::*;

use lcfs_core::{FuelCategory, SummaryRow};
use lcfs_schema::{build_columns, CellConstraint, LedgerLayout, SchemaParams};

fn ledger(base: [f64; 3], caps: [Option<f64>; 3]) -> Vec<SummaryRow> {
    (1..=11)
        .map(|line| {
            let mut row = SummaryRow::with_line(line);
            for (i, fuel) in FuelCategory::all().iter().enumerate() {
                if line == 4 {
                    row.set_number(fuel.as_str(), base[i]);
                }
                if line == 7 {
                    if let Some(cap) = caps[i] {
                        row.set_number(fuel.cap_field(), cap);
                    }
                }
            }
            row
        })
        .collect()
}

#[test]
fn worked_example() {
    let rows = ledger([150_000.0, 0.0, 0.0], [Some(5_000.0), None, None]);
    let params = SchemaParams::new(true, "2025", true);
    let columns = build_columns(&rows, &params, &LedgerLayout::renewable_fuel());
    let gasoline = columns.iter().find(|c| c.id == "gasoline").unwrap();

    assert_eq!(gasoline.constraint(5), Some(CellConstraint::between(0, 7_500)));
    assert_eq!(gasoline.constraint(7), Some(CellConstraint::between(0, 7_500)));
    assert!(!gasoline.editable_cells.contains(&6));
    assert_eq!(gasoline.constraint(6), Some(CellConstraint::between(0, 5_000)));
}

proptest! {
    #[test]
    fn retention_and_deferral_share_the_cap(
        base in prop::array::uniform3(0.0f64..1.0e9),
        period in 2019i32..2035,
    ) {
        let rows = ledger(base, [None, None, None]);
        let params = SchemaParams::new(true, period.to_string(), false);
        let columns = build_columns(&rows, &params, &LedgerLayout::renewable_fuel());
        for (i, fuel) in FuelCategory::all().iter().enumerate() {
            let column = columns.iter().find(|c| c.id == fuel.as_str()).unwrap();
            let expected = (0.05 * base[i]).round() as i64;
            prop_assert_eq!(column.constraint(5), Some(CellConstraint::between(0, expected)));
            prop_assert_eq!(column.constraint(5), column.constraint(7));
        }
    }

    #[test]
    fn snapshot_branch_is_atomic(
        caps in prop::array::uniform3(prop::option::of(0.0f64..1.0e7)),
        has_caps in any::<bool>(),
    ) {
        let rows = ledger([1_000.0; 3], caps);
        let params = SchemaParams::new(true, "2030", has_caps);
        let columns = build_columns(&rows, &params, &LedgerLayout::renewable_fuel());
        for column in columns.iter().filter(|c| FuelCategory::all().iter().any(|f| f.as_str() == c.id)) {
            let editable = column.editable_cells.contains(&6);
            let max = column.constraint(6).and_then(|c| c.max);
            prop_assert!(editable != max.is_some());
            prop_assert_eq!(column.constraint(6).and_then(|c| c.min), Some(0));
        }
    }

    #[test]
    fn read_only_schema_never_editable(base in 0.0f64..1.0e9, has_caps in any::<bool>()) {
        let rows = ledger([base; 3], [Some(base); 3]);
        let params = SchemaParams::new(false, "2030", has_caps);
        let columns = build_columns(&rows, &params, &LedgerLayout::renewable_fuel());
        prop_assert!(columns.iter().all(|c| !c.editable));
    }
}
