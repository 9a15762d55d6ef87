#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use unitrack::libs::query::{average_cycle_minutes, Period, QueryView};
    use unitrack::libs::unit::{MaintenanceRecord, MaintenanceStatus, ProductionRecord, Tables};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(ns: &str, date: NaiveDate, h: u32, m: u32) -> ProductionRecord {
        ProductionRecord {
            ns: ns.to_string(),
            date,
            time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        }
    }

    fn sample_tables() -> Tables {
        Tables {
            production: vec![
                record("A", date(2024, 1, 1), 8, 0),
                record("B", date(2024, 1, 1), 9, 0),
                record("C", date(2024, 1, 2), 8, 0),
            ],
            maintenance: vec![
                MaintenanceRecord {
                    ns: "M1".to_string(),
                    status: MaintenanceStatus::InStock,
                    date: date(2024, 1, 2),
                    time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                },
                MaintenanceRecord {
                    ns: "M2".to_string(),
                    status: MaintenanceStatus::InProduction,
                    date: date(2024, 1, 1),
                    time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_daily_counts() {
        let tables = sample_tables();
        let counts = QueryView::new(&tables).daily_counts();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&date(2024, 1, 1)], 2);
        assert_eq!(counts[&date(2024, 1, 2)], 1);
        assert_eq!(counts.values().sum::<usize>(), tables.production.len());
    }

    #[test]
    fn test_daily_counts_empty() {
        let tables = Tables::default();
        assert!(QueryView::new(&tables).daily_counts().is_empty());
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let tables = sample_tables();
        let view = QueryView::new(&tables);

        let first_day = view.filter_by_date_range(date(2024, 1, 1), date(2024, 1, 1));
        let names: Vec<_> = first_day.iter().map(|record| record.ns.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert_eq!(view.filter_by_date_range(date(2024, 1, 1), date(2024, 1, 2)).len(), 3);
        assert_eq!(view.count_in_range(date(2024, 1, 2), date(2024, 12, 31)), 1);
    }

    #[test]
    fn test_filter_widening_never_shrinks() {
        let tables = sample_tables();
        let view = QueryView::new(&tables);

        let narrow = view.filter_by_date_range(date(2024, 1, 2), date(2024, 1, 2));
        let wide = view.filter_by_date_range(date(2023, 12, 1), date(2024, 2, 1));
        assert!(narrow.len() <= wide.len());
        assert!(narrow.iter().all(|record| wide.contains(record)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let tables = sample_tables();
        let view = QueryView::new(&tables);

        assert!(view.filter_by_date_range(date(2024, 1, 2), date(2024, 1, 1)).is_empty());
        assert_eq!(view.count_in_range(date(2024, 1, 2), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_filter_by_open_period() {
        let tables = sample_tables();
        let view = QueryView::new(&tables);

        let since = Period::new(Some(date(2024, 1, 2)), None);
        let until = Period::new(None, Some(date(2024, 1, 1)));
        assert_eq!(view.filter_by_period(&since).len(), 1);
        assert_eq!(view.filter_by_period(&until).len(), 2);
        assert_eq!(view.filter_by_period(&Period::default()).len(), 3);
        assert!(Period::default().is_unbounded());
        assert!(!since.is_unbounded());
    }

    #[test]
    fn test_period_display() {
        assert_eq!(Period::new(Some(date(2024, 1, 2)), None).to_string(), "since 2024-01-02");
        assert_eq!(Period::new(None, Some(date(2024, 1, 2))).to_string(), "until 2024-01-02");
        assert_eq!(
            Period::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 2))).to_string(),
            "2024-01-01 .. 2024-01-02"
        );
        assert_eq!(Period::default().to_string(), "all records");
    }

    #[test]
    fn test_average_cycle_minutes() {
        assert_eq!(average_cycle_minutes(&[]), 0.0);
        assert_eq!(average_cycle_minutes(&[record("A", date(2024, 1, 1), 8, 0)]), 0.0);

        // 08:00 .. 09:00 next day is 1500 minutes over three records.
        let tables = Tables {
            production: vec![
                record("A", date(2024, 1, 1), 8, 0),
                record("B", date(2024, 1, 2), 9, 0),
                record("C", date(2024, 1, 1), 12, 0),
            ],
            maintenance: Vec::new(),
            ..Default::default()
        };
        let average = QueryView::new(&tables).average_cycle_minutes();
        assert!((average - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_stats() {
        let tables = sample_tables();
        let stats = QueryView::new(&tables).summary_stats(date(2024, 1, 2));

        assert_eq!(stats.total_produced, 3);
        assert_eq!(stats.last_ns.as_deref(), Some("C"));
        assert_eq!(stats.maintenance_count, 2);
        assert_eq!(stats.maintenance_today, 1);
        assert_eq!(stats.production_today, 1);
        assert!((stats.daily_average - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_stats_empty() {
        let tables = Tables::default();
        let stats = QueryView::new(&tables).summary_stats(date(2024, 1, 1));

        assert_eq!(stats.total_produced, 0);
        assert_eq!(stats.last_ns, None);
        assert_eq!(stats.daily_average, 0.0);
    }
}
