#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rusqlite::Connection;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use unitrack::db::store::{RecordStore, SqliteStore};
use unitrack::libs::error::{LedgerError, StoreError};
    use unitrack::libs::ledger::UnitLedger;
    use unitrack::libs::unit::{MaintenanceRecord, MaintenanceStatus, ProductionRecord, Tables, UnreadableRow};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl StoreTestContext {
        fn db_path(&self) -> PathBuf {
            self.temp_dir.path().join("unitrack.db")
        }

        /// Creates both tables in the layout the store writes and runs `rows`.
        fn seed(&self, rows: &str) {
            let conn = Connection::open(self.db_path()).unwrap();
            conn.execute_batch(
                "CREATE TABLE Producao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);
                 CREATE TABLE Manutencao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Status TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);",
            )
            .unwrap();
            conn.execute_batch(rows).unwrap();
        }

        fn production_rows(&self) -> Vec<(String, String, String)> {
            let conn = Connection::open(self.db_path()).unwrap();
            let mut stmt = conn.prepare("SELECT NS, Date, Time FROM Producao ORDER BY id").unwrap();
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
                })
                .unwrap()
                .map(|row| row.unwrap())
                .collect();
            rows
        }
    }

    fn sample_tables() -> Tables {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Tables {
            production: vec![
                ProductionRecord {
                    ns: "SN1".to_string(),
                    date,
                    time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                },
                ProductionRecord {
                    ns: "SN2".to_string(),
                    date,
                    time: NaiveTime::from_hms_opt(9, 15, 30).unwrap(),
                },
            ],
            maintenance: vec![
                MaintenanceRecord {
                    ns: "SN3".to_string(),
                    status: MaintenanceStatus::InProduction,
                    date,
                    time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                },
                MaintenanceRecord {
                    ns: "SN4".to_string(),
                    status: MaintenanceStatus::InStock,
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
                },
            ],
            ..Default::default()
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_missing_file_loads_empty(ctx: &mut StoreTestContext) {
        let store = SqliteStore::new(ctx.db_path());

        let tables = store.load();
        assert!(tables.is_empty());
        assert!(!ctx.db_path().exists());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_garbage_file_loads_empty(ctx: &mut StoreTestContext) {
        fs::write(ctx.db_path(), b"this is not a database").unwrap();
        let store = SqliteStore::new(ctx.db_path());

        assert!(store.load().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_save_and_load(ctx: &mut StoreTestContext) {
        let mut store = SqliteStore::new(ctx.db_path());
        let tables = sample_tables();

        store.save(&tables).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, tables);

        // Saving what was loaded changes nothing.
        store.save(&loaded).unwrap();
        assert_eq!(store.load(), tables);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_save_replaces_previous_contents(ctx: &mut StoreTestContext) {
        let mut store = SqliteStore::new(ctx.db_path());
        store.save(&sample_tables()).unwrap();

        let mut smaller = sample_tables();
        smaller.production.truncate(1);
        smaller.maintenance.clear();
        store.save(&smaller).unwrap();

        assert_eq!(store.load(), smaller);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_status_labels_on_disk(ctx: &mut StoreTestContext) {
        let mut store = SqliteStore::new(ctx.db_path());
        store.save(&sample_tables()).unwrap();

        let conn = Connection::open(ctx.db_path()).unwrap();
        let mut stmt = conn.prepare("SELECT NS, Status, Date, Time FROM Manutencao ORDER BY id").unwrap();
        let rows: Vec<(String, String, String, String)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .unwrap()
            .map(|row| row.unwrap())
            .collect();

        assert_eq!(
            rows,
            vec![
                ("SN3".to_string(), "Produção".to_string(), "2024-01-01".to_string(), "10:00:00".to_string()),
                ("SN4".to_string(), "Estoque".to_string(), "2024-01-02".to_string(), "11:30:00".to_string()),
            ]
        );
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_save_into_missing_directory_fails(ctx: &mut StoreTestContext) {
        let mut store = SqliteStore::new(ctx.temp_dir.path().join("nope").join("unitrack.db"));

        assert!(store.save(&sample_tables()).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_load_keeps_unreadable_rows_aside(ctx: &mut StoreTestContext) {
        ctx.seed(
            "INSERT INTO Producao (NS, Date, Time) VALUES ('OK1', '2024-03-01', '07:00:00');
             INSERT INTO Producao (NS, Date, Time) VALUES ('BAD1', '01/03/2024', '07:00:00');
             INSERT INTO Manutencao (NS, Status, Date, Time) VALUES ('OK2', 'Producao', '2024-03-01', '08:00:00');
             INSERT INTO Manutencao (NS, Status, Date, Time) VALUES ('BAD2', 'Quebrada', '2024-03-01', '08:00:00');",
        );

        let tables = SqliteStore::new(ctx.db_path()).load();
        assert_eq!(tables.production.len(), 1);
        assert_eq!(tables.production[0].ns, "OK1");
        assert_eq!(tables.maintenance.len(), 1);
        assert_eq!(tables.maintenance[0].ns, "OK2");
        assert_eq!(tables.maintenance[0].status, MaintenanceStatus::InProduction);
        assert_eq!(
            tables.unreadable,
            vec![
                UnreadableRow::Production {
                    ns: "BAD1".to_string(),
                    date: "01/03/2024".to_string(),
                    time: "07:00:00".to_string(),
                },
                UnreadableRow::Maintenance {
                    ns: "BAD2".to_string(),
                    status: "Quebrada".to_string(),
                    date: "2024-03-01".to_string(),
                    time: "08:00:00".to_string(),
                },
            ]
        );
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_hand_edited_row_survives_write_through(ctx: &mut StoreTestContext) {
        ctx.seed(
            "INSERT INTO Producao (NS, Date, Time) VALUES ('OK1', '2024-03-01', '07:00:00');
             INSERT INTO Producao (NS, Date, Time) VALUES ('HAND', '2024-03-01', '07:00');
             INSERT INTO Manutencao (NS, Status, Date, Time) VALUES ('ODD', 'Quebrada', '2024-03-01', '08:00:00');",
        );

        let mut ledger = UnitLedger::open(SqliteStore::new(ctx.db_path()));
        assert_eq!(ledger.unreadable().len(), 2);
        ledger.produce("NEW").unwrap();
        ledger.close().unwrap();

        let rows = ctx.production_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ("OK1".to_string(), "2024-03-01".to_string(), "07:00:00".to_string()));
        assert_eq!(rows[1].0, "NEW");
        assert_eq!(rows[2], ("HAND".to_string(), "2024-03-01".to_string(), "07:00".to_string()));
        let conn = Connection::open(ctx.db_path()).unwrap();
        let status: String = conn
            .query_row("SELECT Status FROM Manutencao WHERE NS = 'ODD'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "Quebrada");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_missing_table_loads_as_empty(ctx: &mut StoreTestContext) {
        let conn = Connection::open(ctx.db_path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE Producao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);
             INSERT INTO Producao (NS, Date, Time) VALUES ('OK1', '2024-03-01', '07:00:00');",
        )
        .unwrap();
        drop(conn);

        let store = SqliteStore::new(ctx.db_path());
        let tables = store.load();
        assert_eq!(tables.production.len(), 1);
        assert!(tables.maintenance.is_empty());
        assert!(!store.is_read_protected());

        let mut ledger = UnitLedger::open(store);
        ledger.produce("NEW").unwrap();

        let names: Vec<_> = ctx.production_rows().into_iter().map(|(ns, _, _)| ns).collect();
        assert_eq!(names, vec!["OK1", "NEW"]);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_unreadable_table_blocks_saving(ctx: &mut StoreTestContext) {
        let conn = Connection::open(ctx.db_path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE Producao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);
             CREATE TABLE Manutencao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Date TEXT NOT NULL);
             INSERT INTO Producao (NS, Date, Time) VALUES ('OK1', '2024-03-01', '07:00:00');
             INSERT INTO Manutencao (NS, Date) VALUES ('M1', '2024-03-01');",
        )
        .unwrap();
        drop(conn);

        let mut ledger = UnitLedger::open(SqliteStore::new(ctx.db_path()));
        assert!(ledger.store().is_read_protected());
        assert_eq!(ledger.production().len(), 1);

        let err = ledger.produce("NEW").unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(StoreError::Unreadable { .. })));
        assert!(ledger.production().iter().all(|record| record.ns != "NEW"));

        let conn = Connection::open(ctx.db_path()).unwrap();
        let kept: i64 = conn
            .query_row("SELECT COUNT(*) FROM Manutencao", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kept, 1);
        assert_eq!(ctx.production_rows().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_garbage_file_is_not_overwritten(ctx: &mut StoreTestContext) {
        fs::write(ctx.db_path(), b"this is not a database").unwrap();
        let mut store = SqliteStore::new(ctx.db_path());

        assert!(store.load().is_empty());
        assert!(store.is_read_protected());
        assert!(matches!(store.save(&sample_tables()), Err(StoreError::Unreadable { .. })));
        assert_eq!(fs::read(ctx.db_path()).unwrap(), b"this is not a database");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_legacy_duplicates_resolved_on_open(ctx: &mut StoreTestContext) {
        let conn = Connection::open(ctx.db_path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE Producao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);
             CREATE TABLE Manutencao (id INTEGER PRIMARY KEY, NS TEXT NOT NULL, Status TEXT NOT NULL, Date TEXT NOT NULL, Time TEXT NOT NULL);
             INSERT INTO Producao (NS, Date, Time) VALUES ('DUP', '2024-03-01', '07:00:00');
             INSERT INTO Producao (NS, Date, Time) VALUES ('DUP', '2024-03-02', '07:00:00');
             INSERT INTO Producao (NS, Date, Time) VALUES ('BOTH', '2024-03-01', '09:00:00');
             INSERT INTO Manutencao (NS, Status, Date, Time) VALUES ('BOTH', 'Estoque', '2024-03-03', '08:00:00');",
        )
        .unwrap();
        drop(conn);

        let ledger = UnitLedger::open(SqliteStore::new(ctx.db_path()));
        let production = ledger.production();
        assert_eq!(production.len(), 1);
        assert_eq!(production[0].ns, "DUP");
        assert_eq!(production[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let maintenance = ledger.maintenance();
        assert_eq!(maintenance.len(), 1);
        assert_eq!(maintenance[0].ns, "BOTH");
        assert_eq!(maintenance[0].status, MaintenanceStatus::InStock);
    }
}
