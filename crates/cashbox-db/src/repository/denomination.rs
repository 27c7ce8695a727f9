//! # Denomination Repository
//!
//! Database operations for denominations and the change handed out from them.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  What the repository owns                               │
//! │                                                                         │
//! │  Identity     insert() assigns the row id through assign_id()          │
//! │               insert_with_id() stores an id chosen by the seed script  │
//! │                                                                         │
//! │  Hydration    rows ──► DenominationRecord ──► Denomination::hydrate()  │
//! │                                                                         │
//! │  Mutations    apply(id, command)   load → apply → save, one tx         │
//! │               withdraw(id, ref)    load → withdraw → save              │
//! │                                    + change_records row, one tx        │
//! │                                                                         │
//! │  Relation     change_records(id)   replaces an owned list on the       │
//! │                                    entity                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cashbox_core::validation::{validate_image_url, validate_new_denomination, validate_quantity};
use cashbox_core::{
    ChangeRecord, CoreError, Denomination, DenominationCommand, DenominationEvent, DenominationId,
    DenominationRecord, Money, QuantityPolicy,
};
use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const SELECT_DENOMINATION: &str = r#"
    SELECT
        id,
        face_value_cents,
        kind,
        quantity,
        image_url,
        description,
        is_active
    FROM denominations
"#;

/// Repository for denomination database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.denominations();
///
/// let mut coin = Denomination::new(Money::from_cents(50), 100, DenominationKind::Coin,
///     "/img/50c.png", "50 centavos");
/// let id = repo.insert(&mut coin).await?;
///
/// let (coin, change) = repo.withdraw(id, Some("receipt-0042")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DenominationRepository {
    pool: SqlitePool,
    policy: QuantityPolicy,
}

impl DenominationRepository {
    /// Creates a new DenominationRepository.
    pub fn new(pool: SqlitePool, policy: QuantityPolicy) -> Self {
        DenominationRepository { pool, policy }
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// Inserts a new denomination and assigns it the generated row id.
    ///
    /// ## Returns
    /// * `Ok(DenominationId)` - the id now also set on `denomination`
    /// * `Err(DbError::Core(IdentityAlreadyAssigned))` - already stored; both
    ///   `current` and `attempted` carry the id the entity already has
    /// * `Err(DbError::Core(Validation(..)))` - invalid input, nothing written
    pub async fn insert(&self, denomination: &mut Denomination) -> DbResult<DenominationId> {
        if let Some(current) = denomination.id() {
            return Err(CoreError::IdentityAlreadyAssigned {
                current: current.get(),
                attempted: current.get(),
            }
            .into());
        }

        validate_new_denomination(denomination, self.policy)?;

        debug!(
            description = %denomination.description(),
            face_value = %denomination.face_value(),
            "Inserting denomination"
        );

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO denominations (
                face_value_cents, kind, quantity, image_url, description,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(denomination.face_value().cents())
        .bind(denomination.kind())
        .bind(denomination.quantity())
        .bind(denomination.image_url())
        .bind(denomination.description())
        .bind(denomination.is_active())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = DenominationId::new(result.last_insert_rowid());
        denomination.assign_id(id)?;

        debug!(id = %id, "Denomination inserted");
        Ok(id)
    }

    /// Inserts a denomination whose id was assigned by the caller.
    ///
    /// ## Usage
    /// Seeding and bulk loads, where ids must be stable across installs:
    /// ```rust,ignore
    /// let mut note = Denomination::new(...);
    /// note.assign_id(1)?;
    /// repo.insert_with_id(&note).await?;
    /// ```
    ///
    /// ## Returns
    /// * `Err(DbError::Core(IdentityNotAssigned))` - no id on the entity
    /// * `Err(DbError::UniqueViolation)` - id already taken
    pub async fn insert_with_id(&self, denomination: &Denomination) -> DbResult<DenominationId> {
        let id = denomination.id().ok_or(CoreError::IdentityNotAssigned)?;

        validate_new_denomination(denomination, self.policy)?;

        debug!(id = %id, description = %denomination.description(), "Inserting denomination with id");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO denominations (
                id, face_value_cents, kind, quantity, image_url, description,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(id)
        .bind(denomination.face_value().cents())
        .bind(denomination.kind())
        .bind(denomination.quantity())
        .bind(denomination.image_url())
        .bind(denomination.description())
        .bind(denomination.is_active())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, id),
            other => other,
        })?;

        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Gets a denomination by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Denomination))` - found, hydrated with this repository's policy
    /// * `Ok(None)` - no such id
    pub async fn get_by_id(&self, id: DenominationId) -> DbResult<Option<Denomination>> {
        let mut conn = self.pool.acquire().await?;
        let record = fetch_record(&mut conn, id).await?;

        Ok(record.map(|r| self.hydrate(r)))
    }

    /// Lists denominations, bills first, then by face value descending.
    ///
    /// ## Arguments
    /// * `active_only` - skip denominations taken out of circulation
    pub async fn list(&self, active_only: bool) -> DbResult<Vec<Denomination>> {
        let sql = format!(
            "{} WHERE (?1 = 0 OR is_active = 1) \
             ORDER BY CASE kind WHEN 'bill' THEN 0 ELSE 1 END, face_value_cents DESC",
            SELECT_DENOMINATION
        );

        let records: Vec<DenominationRecord> = sqlx::query_as(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), active_only, "Listed denominations");
        Ok(records.into_iter().map(|r| self.hydrate(r)).collect())
    }

    /// Change records for a denomination, oldest first.
    pub async fn change_records(&self, id: DenominationId) -> DbResult<Vec<ChangeRecord>> {
        let records: Vec<ChangeRecord> = sqlx::query_as(
            r#"
            SELECT id, denomination_id, units, reference, created_at
            FROM change_records
            WHERE denomination_id = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts stored denominations, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM denominations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Cash value on hand across active denominations.
    ///
    /// Denominations in deficit count as zero, matching
    /// [`Denomination::total_value`].
    pub async fn total_on_hand(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(face_value_cents * MAX(quantity, 0)), 0)
            FROM denominations
            WHERE is_active = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Persists the mutable state of a denomination (quantity, image, active).
    ///
    /// The new quantity is judged by this repository's policy, not the
    /// entity's. A quantity equal to the stored one is not re-checked, so rows
    /// already in deficit can still be activated or deactivated.
    ///
    /// ## Returns
    /// * `Err(DbError::Core(IdentityNotAssigned))` - never inserted
    /// * `Err(DbError::NotFound)` - no row with that id
    /// * `Err(DbError::Core(Validation(..)))` - quantity or image URL refused,
    ///   nothing written
    pub async fn save(&self, denomination: &Denomination) -> DbResult<()> {
        let id = denomination.id().ok_or(CoreError::IdentityNotAssigned)?;

        let mut tx = self.begin_write().await?;

        let stored = fetch_record(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Denomination", id))?;

        store(&mut tx, denomination, stored.quantity, self.policy).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Loads a denomination, applies a command and saves it, in one
    /// transaction.
    ///
    /// `Withdraw` through here records no change; use [`Self::withdraw`] when
    /// units physically leave the till.
    pub async fn apply(
        &self,
        id: DenominationId,
        command: DenominationCommand,
    ) -> DbResult<(Denomination, DenominationEvent)> {
        let mut tx = self.begin_write().await?;

        let mut denomination = fetch_record(&mut tx, id)
            .await?
            .map(|r| self.hydrate(r))
            .ok_or(CoreError::DenominationNotFound(id.get()))?;
        let previous_quantity = denomination.quantity();

        let event = denomination.apply(command)?;
        store(&mut tx, &denomination, previous_quantity, self.policy).await?;

        tx.commit().await?;

        log_event(id, &event);
        Ok((denomination, event))
    }

    /// Hands out one unit of a denomination as change.
    ///
    /// ## What This Does (one transaction)
    /// 1. Loads the denomination
    /// 2. Refuses if it is inactive
    /// 3. Withdraws one unit under this repository's policy
    /// 4. Saves the new quantity
    /// 5. Inserts a change record pointing at the denomination
    ///
    /// Any failure rolls back every step.
    pub async fn withdraw(
        &self,
        id: DenominationId,
        reference: Option<&str>,
    ) -> DbResult<(Denomination, ChangeRecord)> {
        let mut tx = self.begin_write().await?;

        let mut denomination = fetch_record(&mut tx, id)
            .await?
            .map(|r| self.hydrate(r))
            .ok_or(CoreError::DenominationNotFound(id.get()))?;
        let previous_quantity = denomination.quantity();

        denomination.ensure_active()?;
        let event = denomination.apply(DenominationCommand::Withdraw)?;
        store(&mut tx, &denomination, previous_quantity, self.policy).await?;

        let change = ChangeRecord {
            id: generate_change_record_id(),
            denomination_id: id,
            units: 1,
            reference: reference.map(str::to_string),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO change_records (id, denomination_id, units, reference, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&change.id)
        .bind(change.denomination_id)
        .bind(change.units)
        .bind(&change.reference)
        .bind(change.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        log_event(id, &event);
        Ok((denomination, change))
    }

    /// Starts a transaction holding the write lock from `BEGIN`, so
    /// concurrent writers queue on the busy timeout.
    async fn begin_write(&self) -> DbResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    fn hydrate(&self, record: DenominationRecord) -> Denomination {
        Denomination::hydrate(record).with_policy(self.policy)
    }
}

// =============================================================================
// Connection-level helpers (shared by pool and transaction paths)
// =============================================================================

async fn fetch_record(
    conn: &mut SqliteConnection,
    id: DenominationId,
) -> DbResult<Option<DenominationRecord>> {
    let sql = format!("{} WHERE id = ?1", SELECT_DENOMINATION);

    let record = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(record)
}

async fn store(
    conn: &mut SqliteConnection,
    denomination: &Denomination,
    previous_quantity: i64,
    policy: QuantityPolicy,
) -> DbResult<()> {
    let id = denomination.id().ok_or(CoreError::IdentityNotAssigned)?;

    if denomination.quantity() != previous_quantity {
        validate_quantity(denomination.quantity(), policy)?;
    }
    validate_image_url(denomination.image_url())?;

    debug!(id = %id, quantity = denomination.quantity(), "Saving denomination");

    let result = sqlx::query(
        r#"
        UPDATE denominations SET
            quantity = ?2,
            image_url = ?3,
            is_active = ?4,
            updated_at = ?5
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(denomination.quantity())
    .bind(denomination.image_url())
    .bind(denomination.is_active())
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Denomination", id));
    }

    Ok(())
}

fn log_event(id: DenominationId, event: &DenominationEvent) {
    if let Some(quantity) = event.deficit() {
        warn!(id = %id, quantity, "Denomination is in deficit");
    }
    info!(id = %id, ?event, "Denomination updated");
}

/// Generates a new change record ID.
pub fn generate_change_record_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use cashbox_core::DenominationKind;

    async fn repo(policy: QuantityPolicy) -> DenominationRepository {
        let db = Database::new(DbConfig::in_memory().quantity_policy(policy))
            .await
            .unwrap();
        db.denominations()
    }

    fn fifty_cents(quantity: i64) -> Denomination {
        Denomination::new(
            Money::from_cents(50),
            quantity,
            DenominationKind::Coin,
            "/img/50c.png",
            "50 centavos",
        )
    }

    fn hundred_reais(quantity: i64) -> Denomination {
        Denomination::new(
            Money::from_cents(10000),
            quantity,
            DenominationKind::Bill,
            "/img/100.png",
            "100 reais",
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(100);

        let id = repo.insert(&mut coin).await.unwrap();

        assert_eq!(coin.id(), Some(id));

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, coin);
        assert!(stored.is_active());
    }

    #[tokio::test]
    async fn test_insert_twice_is_refused() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(100);
        repo.insert(&mut coin).await.unwrap();

        let id = coin.id().unwrap().get();

        let err = repo.insert(&mut coin).await.unwrap_err();

        match err {
            DbError::Core(CoreError::IdentityAlreadyAssigned { current, attempted }) => {
                assert_eq!(current, id);
                assert_eq!(attempted, id);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_validates_input() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut blank = Denomination::new(
            Money::from_cents(100),
            1,
            DenominationKind::Coin,
            "/img/1.png",
            "",
        );

        let err = repo.insert(&mut blank).await.unwrap_err();

        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
        assert!(blank.id().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_with_id_for_seeding() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut note = hundred_reais(10);
        note.assign_id(1).unwrap();

        let id = repo.insert_with_id(&note).await.unwrap();
        assert_eq!(id, DenominationId::new(1));

        let err = repo.insert_with_id(&note).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let unassigned = fifty_cents(1);
        let err = repo.insert_with_id(&unassigned).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::IdentityNotAssigned)));
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let repo = repo(QuantityPolicy::Reject).await;
        assert!(repo.get_by_id(DenominationId::new(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_persists_mutations() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(100);
        let id = repo.insert(&mut coin).await.unwrap();

        coin.adjust(200, "/img/50c-v2.png").unwrap();
        coin.deactivate();
        repo.save(&coin).await.unwrap();

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity(), 200);
        assert_eq!(stored.image_url(), "/img/50c-v2.png");
        assert!(!stored.is_active());
    }

    #[tokio::test]
    async fn test_save_requires_stored_row() {
        let repo = repo(QuantityPolicy::Reject).await;

        let err = repo.save(&fifty_cents(1)).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::IdentityNotAssigned)));

        let mut ghost = fifty_cents(1);
        ghost.assign_id(77).unwrap();
        let err = repo.save(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_judges_quantity_by_repository_policy() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(10);
        let id = repo.insert(&mut coin).await.unwrap();

        let mut lenient = coin.clone().with_policy(QuantityPolicy::AllowDeficit);
        lenient.adjust(-5, "/img/50c.png").unwrap();

        let err = repo.save(&lenient).await.unwrap_err();

        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), 10);
    }

    #[tokio::test]
    async fn test_save_and_apply_refuse_bad_image_url() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(10);
        let id = repo.insert(&mut coin).await.unwrap();

        coin.adjust(20, "").unwrap();
        let err = repo.save(&coin).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));

        let err = repo
            .apply(
                id,
                DenominationCommand::Adjust {
                    quantity: 20,
                    image_url: "  has space ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity(), 10);
        assert_eq!(stored.image_url(), "/img/50c.png");
    }

    #[tokio::test]
    async fn test_strict_repository_keeps_existing_deficit_rows_usable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let lenient = DenominationRepository::new(db.pool().clone(), QuantityPolicy::AllowDeficit);
        let strict = DenominationRepository::new(db.pool().clone(), QuantityPolicy::Reject);

        let mut coin = fifty_cents(-3);
        let id = lenient.insert(&mut coin).await.unwrap();

        strict.apply(id, DenominationCommand::Deactivate).await.unwrap();
        assert!(!strict.get_by_id(id).await.unwrap().unwrap().is_active());

        let err = strict
            .apply(
                id,
                DenominationCommand::Adjust {
                    quantity: -4,
                    image_url: "/img/50c.png".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::NegativeQuantity { quantity: -4 })
        ));
    }

    #[tokio::test]
    async fn test_list_orders_bills_first_and_filters_inactive() {
        let repo = repo(QuantityPolicy::Reject).await;

        let mut coin = fifty_cents(10);
        let mut note = hundred_reais(2);
        let mut small_note = Denomination::new(
            Money::from_cents(200),
            5,
            DenominationKind::Bill,
            "/img/2.png",
            "2 reais",
        );
        repo.insert(&mut coin).await.unwrap();
        repo.insert(&mut small_note).await.unwrap();
        let note_id = repo.insert(&mut note).await.unwrap();

        let all = repo.list(false).await.unwrap();
        let labels: Vec<&str> = all.iter().map(|d| d.description()).collect();
        assert_eq!(labels, vec!["100 reais", "2 reais", "50 centavos"]);

        repo.apply(note_id, DenominationCommand::Deactivate)
            .await
            .unwrap();

        let active = repo.list(true).await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|d| d.is_active()));
    }

    #[tokio::test]
    async fn test_withdraw_records_change() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(100);
        let id = repo.insert(&mut coin).await.unwrap();

        for _ in 0..3 {
            repo.withdraw(id, Some("receipt-0042")).await.unwrap();
        }

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity(), 97);

        let records = repo.change_records(id).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.denomination_id == id && r.units == 1));
        assert_eq!(records[0].reference.as_deref(), Some("receipt-0042"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_withdrawals_all_succeed() {
        let path = std::env::temp_dir().join(format!("cashbox-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let repo = db.denominations();

        let mut coin = fifty_cents(100);
        let id = repo.insert(&mut coin).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.withdraw(id, None).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), 80);
        assert_eq!(repo.change_records(id).await.unwrap().len(), 20);

        db.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_withdraw_empty_rolls_back_under_reject() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(0);
        let id = repo.insert(&mut coin).await.unwrap();

        let err = repo.withdraw(id, None).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientQuantity { available: 0, .. })
        ));
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), 0);
        assert!(repo.change_records(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_into_deficit_under_allow_deficit() {
        let repo = repo(QuantityPolicy::AllowDeficit).await;
        let mut coin = fifty_cents(1);
        let id = repo.insert(&mut coin).await.unwrap();

        repo.withdraw(id, None).await.unwrap();
        let (coin, _) = repo.withdraw(id, None).await.unwrap();

        assert_eq!(coin.quantity(), -1);
        assert!(coin.is_in_deficit());
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), -1);
        assert_eq!(repo.change_records(id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_withdraw_refuses_inactive_denomination() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(10);
        let id = repo.insert(&mut coin).await.unwrap();
        repo.apply(id, DenominationCommand::Deactivate).await.unwrap();

        let err = repo.withdraw(id, None).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Core(CoreError::DenominationInactive { .. })
        ));
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), 10);
    }

    #[tokio::test]
    async fn test_withdraw_unknown_denomination() {
        let repo = repo(QuantityPolicy::Reject).await;

        let err = repo.withdraw(DenominationId::new(9), None).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::DenominationNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_apply_adjust_returns_event() {
        let repo = repo(QuantityPolicy::Reject).await;
        let mut coin = fifty_cents(5);
        let id = repo.insert(&mut coin).await.unwrap();

        let (coin, event) = repo
            .apply(
                id,
                DenominationCommand::Adjust {
                    quantity: 60,
                    image_url: "/img/50c-v2.png".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(coin.quantity(), 60);
        assert_eq!(
            event,
            DenominationEvent::Adjusted {
                previous_quantity: 5,
                quantity: 60,
                image_url: "/img/50c-v2.png".to_string(),
            }
        );

        let err = repo
            .apply(
                id,
                DenominationCommand::Adjust {
                    quantity: -1,
                    image_url: "/img/50c-v2.png".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::NegativeQuantity { quantity: -1 })
        ));
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().quantity(), 60);
    }

    #[tokio::test]
    async fn test_total_on_hand_ignores_inactive_and_deficit() {
        let repo = repo(QuantityPolicy::AllowDeficit).await;

        let mut coins = fifty_cents(10); // R$5.00
        let mut notes = hundred_reais(3); // R$300.00
        let mut short = Denomination::new(
            Money::from_cents(25),
            -4,
            DenominationKind::Coin,
            "/img/25c.png",
            "25 centavos",
        );
        repo.insert(&mut coins).await.unwrap();
        let notes_id = repo.insert(&mut notes).await.unwrap();
        repo.insert(&mut short).await.unwrap();

        assert_eq!(repo.total_on_hand().await.unwrap(), Money::from_cents(30500));

        repo.apply(notes_id, DenominationCommand::Deactivate)
            .await
            .unwrap();
        assert_eq!(repo.total_on_hand().await.unwrap(), Money::from_cents(500));
    }
}
