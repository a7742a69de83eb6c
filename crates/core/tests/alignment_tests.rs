use chrono::NaiveDate;

use btc_tracker_core::errors::CoreError;
use btc_tracker_core::models::currency::Currency;
use btc_tracker_core::models::price::{PricePoint, PriceSeries};
use btc_tracker_core::models::transaction::{Ledger, Transaction};
use btc_tracker_core::services::alignment_service::AlignmentService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A flat daily series over `[from, to]`, BRL at 5× the USD price.
fn flat_series(from: NaiveDate, to: NaiveDate, usd: f64) -> PriceSeries {
    let mut points = Vec::new();
    let mut date = from;
    while date <= to {
        points.push(PricePoint::new(date, usd, usd * 5.0));
        date = date.succ_opt().unwrap();
    }
    PriceSeries::new(points)
}

fn two_purchase_ledger() -> Ledger {
    Ledger::new(vec![
        Transaction::new(d(2024, 1, 1), 0.1, 4000.0, 20000.0),
        Transaction::new(d(2024, 1, 10), 0.05, 2500.0, 12500.0),
    ])
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Alignment completeness & ordering
// ═══════════════════════════════════════════════════════════════════

mod completeness {
    use super::*;

    #[test]
    fn one_aligned_day_per_price_point_in_order() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        assert_eq!(aligned.len(), series.len());
        for (day, point) in aligned.iter().zip(series.points()) {
            assert_eq!(day.date, point.date);
            assert_eq!(day.price_usd, point.price_usd);
            assert_eq!(day.price_brl, point.price_brl);
        }
    }

    #[test]
    fn empty_series_aligns_to_empty() {
        let svc = AlignmentService::new();
        let aligned = svc
            .align(&two_purchase_ledger(), &PriceSeries::default())
            .unwrap();
        assert!(aligned.is_empty());
    }

    #[test]
    fn empty_ledger_aligns_with_no_transactions_and_no_dca() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2024, 1, 1), d(2024, 1, 5), 40000.0);
        let aligned = svc.align(&Ledger::empty(), &series).unwrap();

        assert_eq!(aligned.len(), 5);
        for day in &aligned {
            assert!(!day.has_transaction());
            assert_eq!(day.dca_usd, None);
            assert_eq!(day.dca_brl, None);
        }
    }

    #[test]
    fn transaction_attached_only_on_its_date() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        for day in &aligned {
            let expected = day.date == d(2024, 1, 1) || day.date == d(2024, 1, 10);
            assert_eq!(day.has_transaction(), expected, "on {}", day.date);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Input ordering enforcement
// ═══════════════════════════════════════════════════════════════════

mod input_order {
    use super::*;

    #[test]
    fn date_regression_fails() {
        let svc = AlignmentService::new();
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 2), 40000.0, 200000.0),
            PricePoint::new(d(2024, 1, 1), 41000.0, 205000.0),
        ]);

        match svc.align(&Ledger::empty(), &series).unwrap_err() {
            CoreError::InvalidInputOrder { prev, next } => {
                assert_eq!(prev, d(2024, 1, 2));
                assert_eq!(next, d(2024, 1, 1));
            }
            other => panic!("Expected InvalidInputOrder, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_date_fails() {
        let svc = AlignmentService::new();
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 1), 40000.0, 200000.0),
            PricePoint::new(d(2024, 1, 1), 40100.0, 200500.0),
        ]);
        assert!(svc.align(&Ledger::empty(), &series).is_err());
    }

    #[test]
    fn regression_late_in_series_still_detected() {
        let svc = AlignmentService::new();
        let mut points = flat_series(d(2024, 1, 1), d(2024, 1, 5), 40000.0)
            .points()
            .to_vec();
        points.push(PricePoint::new(d(2024, 1, 3), 40000.0, 200000.0));
        let result = svc.align(&Ledger::empty(), &PriceSeries::new(points));
        assert!(result.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Running cost basis (DCA)
// ═══════════════════════════════════════════════════════════════════

mod running_dca {
    use super::*;

    #[test]
    fn dca_is_none_before_first_purchase() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        for day in aligned.iter().filter(|day| day.date < d(2024, 1, 1)) {
            assert_eq!(day.dca_usd, None, "on {}", day.date);
            assert_eq!(day.dca_brl, None, "on {}", day.date);
        }
    }

    #[test]
    fn purchase_day_dca_already_reflects_that_purchase() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        let first_buy = aligned.iter().find(|day| day.date == d(2024, 1, 1)).unwrap();
        assert!((first_buy.dca_usd.unwrap() - 40000.0).abs() < 1e-9);
        assert!((first_buy.dca_brl.unwrap() - 200000.0).abs() < 1e-9);
    }

    #[test]
    fn dca_held_constant_between_purchases() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        for day in aligned
            .iter()
            .filter(|day| day.date >= d(2024, 1, 1) && day.date < d(2024, 1, 10))
        {
            assert!((day.dca_usd.unwrap() - 40000.0).abs() < 1e-9, "on {}", day.date);
        }
    }

    #[test]
    fn second_purchase_updates_dca() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);
        let aligned = svc.align(&two_purchase_ledger(), &series).unwrap();

        // (4000 + 2500) / (0.1 + 0.05)
        let last = aligned.last().unwrap();
        assert_eq!(last.date, d(2024, 1, 10));
        assert!((last.dca_usd.unwrap() - 43333.333333).abs() < 1e-4);
    }

    #[test]
    fn dca_matches_independent_recomputation() {
        let svc = AlignmentService::new();
        let ledger = Ledger::new(vec![
            Transaction::new(d(2024, 1, 2), 0.1, 4200.0, 21000.0),
            Transaction::new(d(2024, 1, 5), 0.03, 1500.0, 7500.0),
            Transaction::new(d(2024, 1, 9), 0.25, 11000.0, 55000.0),
        ])
        .unwrap();
        let series = flat_series(d(2024, 1, 1), d(2024, 1, 12), 42000.0);
        let aligned = svc.align(&ledger, &series).unwrap();

        for day in &aligned {
            // Truncate the ledger to date ≤ day and recompute from scratch.
            let (btc, cost): (f64, f64) = ledger
                .transactions()
                .iter()
                .filter(|t| t.date <= day.date)
                .fold((0.0, 0.0), |(b, c), t| (b + t.btc_amount, c + t.cost_usd));

            if btc > 0.0 {
                assert!(
                    (day.dca_usd.unwrap() - cost / btc).abs() < 1e-9,
                    "on {}",
                    day.date
                );
            } else {
                assert_eq!(day.dca_usd, None, "on {}", day.date);
            }
        }
    }

    #[test]
    fn dca_accessor_matches_fields() {
        let svc = AlignmentService::new();
        let series = flat_series(d(2024, 1, 1), d(2024, 1, 2), 40000.0);
        let ledger = Ledger::new(vec![Transaction::new(d(2024, 1, 1), 0.1, 4000.0, 20000.0)])
            .unwrap();
        let aligned = svc.align(&ledger, &series).unwrap();

        assert_eq!(aligned[0].dca(Currency::Usd), aligned[0].dca_usd);
        assert_eq!(aligned[0].dca(Currency::Brl), aligned[0].dca_brl);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Determinism
// ═══════════════════════════════════════════════════════════════════

mod determinism {
    use super::*;

    #[test]
    fn align_twice_yields_identical_output() {
        let svc = AlignmentService::new();
        let ledger = two_purchase_ledger();
        let series = flat_series(d(2023, 12, 17), d(2024, 1, 10), 40000.0);

        let a = svc.align(&ledger, &series).unwrap();
        let b = svc.align(&ledger, &series).unwrap();
        assert_eq!(a, b);
    }
}
