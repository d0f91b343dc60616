//! Core cost ledger for the duplex construction tracker.
//!
//! The ledger owns every financial record of the fleet: material purchases
//! and labor payments, each with an owned set of file attachments, plus the
//! labor contracts the payments draw from. All multi-row writes run inside
//! one database transaction; any failure before commit drops the
//! transaction and rolls the whole operation back.

use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use sea_orm::{
    ActiveValue, Condition, DatabaseConnection, DatabaseTransaction, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};

pub use analytics::{
    ActivityEvent, ActivityKind, DuplexCostRow, MonthlyChange, SpendingSummary,
};
pub use error::LedgerError;
pub use money::Money;
pub use principal::{Principal, Role};
pub use purchase_kinds::PurchaseKind;
pub use purchases::{Purchase, PurchaseDraft};
pub use reconcile::AttachmentDelta;
pub use work_payments::{WorkPayment, WorkPaymentDraft};
pub use work_projects::{WorkProject, WorkProjectDraft, WorkProjectSummary};
pub use work_types::WorkType;

mod analytics;
mod error;
mod money;
mod payment_attachments;
mod principal;
mod purchase_attachments;
mod purchase_kinds;
mod purchases;
pub mod reconcile;
mod work_payments;
mod work_projects;
mod work_types;

type ResultLedger<T> = Result<T, LedgerError>;

/// Calendar used for the site-local day filter on purchase listings.
const SITE_TZ: Tz = chrono_tz::Asia::Riyadh;

/// Which calendar a day-granularity range is evaluated in.
///
/// Plain `YYYY-MM-DD` inputs compare the UTC day of `created_at`; full
/// datetime inputs compare the site-local day instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayBasis {
    Utc,
    SiteLocal,
}

/// Inclusive day range over `created_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub basis: DayBasis,
}

impl CreatedRange {
    fn contains(&self, created_at: DateTime<Utc>) -> bool {
        let day = match self.basis {
            DayBasis::Utc => created_at.date_naive(),
            DayBasis::SiteLocal => created_at.with_timezone(&SITE_TZ).date_naive(),
        };
        self.start <= day && day <= self.end
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub range: Option<CreatedRange>,
    pub duplex_number: Option<i32>,
    pub kind: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub project_id: Option<i64>,
    pub duplex_number: Option<i32>,
}

#[derive(Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    // ── Purchases ──────────────────────────────────────────────────────

    /// Creates a purchase together with its attachment rows.
    ///
    /// The duplicate guard runs before the transaction opens; the scalar
    /// row and the attachments are then written atomically, so a failed
    /// attachment insert leaves no purchase behind.
    pub async fn create_purchase(
        &self,
        draft: PurchaseDraft,
        attachment_paths: &[String],
        principal: &Principal,
    ) -> ResultLedger<Purchase> {
        draft.validate()?;
        if self.purchase_duplicate_exists(&draft).await? {
            return Err(LedgerError::Duplicate(
                "a purchase with the same name, duplex number, kind and date already exists"
                    .to_string(),
            ));
        }

        let now = Utc::now();
        let desired: BTreeSet<String> = attachment_paths.iter().cloned().collect();
        let delta = reconcile::diff(&BTreeSet::new(), &desired);

        let txn = self.database.begin().await?;
        let model = purchases::active_from_draft(&draft, &principal.full_name, now)
            .insert(&txn)
            .await?;
        insert_purchase_attachments(&txn, model.id, &delta.to_insert, now).await?;
        txn.commit().await?;
        tracing::debug!(purchase_id = model.id, "purchase committed");

        self.purchase(model.id).await
    }

    /// Full-field overwrite of a purchase plus attachment reconciliation.
    ///
    /// Attachment deletes are scoped by owning id *and* path so that two
    /// records sharing a literal path never clobber each other.
    pub async fn update_purchase(
        &self,
        id: i64,
        draft: PurchaseDraft,
        attachment_paths: &[String],
    ) -> ResultLedger<Purchase> {
        draft.validate()?;

        let txn = self.database.begin().await?;
        if purchases::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(LedgerError::NotFound(format!("purchase {id}")));
        }

        purchases::active_overwrite(id, &draft).update(&txn).await?;

        let existing: BTreeSet<String> = purchase_attachments::Entity::find()
            .filter(purchase_attachments::Column::PurchaseId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|attachment| attachment.attachment_path)
            .collect();
        let desired: BTreeSet<String> = attachment_paths.iter().cloned().collect();
        let delta = reconcile::diff(&existing, &desired);

        for path in &delta.to_delete {
            purchase_attachments::Entity::delete_many()
                .filter(purchase_attachments::Column::PurchaseId.eq(id))
                .filter(purchase_attachments::Column::AttachmentPath.eq(path.as_str()))
                .exec(&txn)
                .await?;
        }
        insert_purchase_attachments(&txn, id, &delta.to_insert, Utc::now()).await?;
        txn.commit().await?;
        tracing::debug!(purchase_id = id, "purchase update committed");

        self.purchase(id).await
    }

    /// Deletes a purchase; its attachments go with it via the cascading
    /// foreign key, not an application-level step.
    pub async fn delete_purchase(&self, id: i64) -> ResultLedger<()> {
        if purchases::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!("purchase {id}")));
        }
        purchases::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Returns one purchase joined with its attachment paths.
    pub async fn purchase(&self, id: i64) -> ResultLedger<Purchase> {
        let model = purchases::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))?;
        let paths = purchase_attachments::Entity::find()
            .filter(purchase_attachments::Column::PurchaseId.eq(id))
            .order_by_asc(purchase_attachments::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(|attachment| attachment.attachment_path)
            .collect();
        Ok(Purchase::from_parts(model, paths))
    }

    /// Lists purchases, newest first, attachments joined.
    pub async fn list_purchases(&self, filter: &PurchaseFilter) -> ResultLedger<Vec<Purchase>> {
        let mut query =
            purchases::Entity::find().order_by_desc(purchases::Column::CreatedAt);
        if let Some(duplex_number) = filter.duplex_number {
            query = query.filter(purchases::Column::DuplexNumber.eq(duplex_number));
        }
        if let Some(kind) = &filter.kind {
            query = query.filter(purchases::Column::Kind.eq(kind.as_str()));
        }

        let models: Vec<purchases::Model> = query
            .all(&self.database)
            .await?
            .into_iter()
            .filter(|model| {
                filter
                    .range
                    .as_ref()
                    .is_none_or(|range| range.contains(model.created_at))
            })
            .collect();

        let ids: Vec<i64> = models.iter().map(|model| model.id).collect();
        let mut paths = self.purchase_attachment_map(&ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let attachment_paths = paths.remove(&model.id).unwrap_or_default();
                Purchase::from_parts(model, attachment_paths)
            })
            .collect())
    }

    async fn purchase_duplicate_exists(&self, draft: &PurchaseDraft) -> ResultLedger<bool> {
        let day = draft.purchase_date.date_naive();
        let rows = purchases::Entity::find()
            .filter(purchases::Column::Name.eq(draft.name.as_str()))
            .filter(purchases::Column::DuplexNumber.eq(draft.duplex_number))
            .filter(purchases::Column::Kind.eq(draft.kind.as_str()))
            .all(&self.database)
            .await?;
        // Day-granularity compare happens here rather than in SQL so the
        // guard behaves the same on every backend.
        Ok(rows.iter().any(|row| row.purchase_date.date_naive() == day))
    }

    async fn purchase_attachment_map(
        &self,
        ids: &[i64],
    ) -> ResultLedger<HashMap<i64, Vec<String>>> {
        let mut by_record: HashMap<i64, Vec<String>> = HashMap::new();
        if ids.is_empty() {
            return Ok(by_record);
        }
        let attachments = purchase_attachments::Entity::find()
            .filter(purchase_attachments::Column::PurchaseId.is_in(ids.to_vec()))
            .order_by_asc(purchase_attachments::Column::Id)
            .all(&self.database)
            .await?;
        for attachment in attachments {
            by_record
                .entry(attachment.purchase_id)
                .or_default()
                .push(attachment.attachment_path);
        }
        Ok(by_record)
    }

    // ── Work payments ──────────────────────────────────────────────────

    /// Records a labor payment against an existing project.
    ///
    /// Stamps the principal's email as the creator (purchases stamp the
    /// full name; the asymmetry is intentional, see DESIGN.md).
    pub async fn create_work_payment(
        &self,
        draft: WorkPaymentDraft,
        attachment_paths: &[String],
        principal: &Principal,
    ) -> ResultLedger<WorkPayment> {
        draft.validate()?;
        if work_projects::Entity::find_by_id(draft.project_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!(
                "work project {}",
                draft.project_id
            )));
        }
        if self.payment_duplicate_exists(&draft).await? {
            return Err(LedgerError::Duplicate(
                "a payment with the same project, amount and date already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let desired: BTreeSet<String> = attachment_paths.iter().cloned().collect();
        let delta = reconcile::diff(&BTreeSet::new(), &desired);

        let txn = self.database.begin().await?;
        let model = work_payments::active_from_draft(&draft, &principal.email, now)
            .insert(&txn)
            .await?;
        insert_payment_attachments(&txn, model.id, &delta.to_insert, now).await?;
        txn.commit().await?;
        tracing::debug!(payment_id = model.id, "work payment committed");

        self.work_payment(model.id).await
    }

    /// Full-field overwrite of a payment, including the caller-supplied
    /// `created_by`, plus attachment reconciliation. Bumps `updated_at`.
    pub async fn update_work_payment(
        &self,
        id: i64,
        draft: WorkPaymentDraft,
        attachment_paths: &[String],
        created_by: &str,
    ) -> ResultLedger<WorkPayment> {
        draft.validate()?;

        let txn = self.database.begin().await?;
        if work_payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!("work payment {id}")));
        }

        work_payments::active_overwrite(id, &draft, created_by, Utc::now())
            .update(&txn)
            .await?;

        let existing: BTreeSet<String> = payment_attachments::Entity::find()
            .filter(payment_attachments::Column::PaymentId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|attachment| attachment.attachment_path)
            .collect();
        let desired: BTreeSet<String> = attachment_paths.iter().cloned().collect();
        let delta = reconcile::diff(&existing, &desired);

        for path in &delta.to_delete {
            payment_attachments::Entity::delete_many()
                .filter(payment_attachments::Column::PaymentId.eq(id))
                .filter(payment_attachments::Column::AttachmentPath.eq(path.as_str()))
                .exec(&txn)
                .await?;
        }
        insert_payment_attachments(&txn, id, &delta.to_insert, Utc::now()).await?;
        txn.commit().await?;
        tracing::debug!(payment_id = id, "work payment update committed");

        self.work_payment(id).await
    }

    pub async fn delete_work_payment(&self, id: i64) -> ResultLedger<()> {
        if work_payments::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!("work payment {id}")));
        }
        work_payments::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Returns one payment joined with its project name and attachments.
    pub async fn work_payment(&self, id: i64) -> ResultLedger<WorkPayment> {
        let (model, project) = work_payments::Entity::find_by_id(id)
            .find_also_related(work_projects::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("work payment {id}")))?;
        let paths = payment_attachments::Entity::find()
            .filter(payment_attachments::Column::PaymentId.eq(id))
            .order_by_asc(payment_attachments::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(|attachment| attachment.attachment_path)
            .collect();
        Ok(WorkPayment::from_parts(
            model,
            project.map(|p| p.name),
            paths,
        ))
    }

    /// Lists payments, most recent payment date first.
    pub async fn list_work_payments(
        &self,
        filter: &PaymentFilter,
    ) -> ResultLedger<Vec<WorkPayment>> {
        let mut query =
            work_payments::Entity::find().order_by_desc(work_payments::Column::PaidOn);
        if let Some(project_id) = filter.project_id {
            query = query.filter(work_payments::Column::ProjectId.eq(project_id));
        }
        if let Some(duplex_number) = filter.duplex_number {
            query = query.filter(work_payments::Column::DuplexNumber.eq(duplex_number));
        }

        let rows: Vec<(work_payments::Model, Option<work_projects::Model>)> = query
            .find_also_related(work_projects::Entity)
            .all(&self.database)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|(model, _)| model.id).collect();
        let mut paths = self.payment_attachment_map(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|(model, project)| {
                let attachment_paths = paths.remove(&model.id).unwrap_or_default();
                WorkPayment::from_parts(model, project.map(|p| p.name), attachment_paths)
            })
            .collect())
    }

    async fn payment_duplicate_exists(&self, draft: &WorkPaymentDraft) -> ResultLedger<bool> {
        let day = draft.paid_on.date_naive();
        let rows = work_payments::Entity::find()
            .filter(work_payments::Column::ProjectId.eq(draft.project_id))
            .filter(work_payments::Column::AmountMinor.eq(draft.amount.minor()))
            .all(&self.database)
            .await?;
        Ok(rows.iter().any(|row| row.paid_on.date_naive() == day))
    }

    async fn payment_attachment_map(
        &self,
        ids: &[i64],
    ) -> ResultLedger<HashMap<i64, Vec<String>>> {
        let mut by_record: HashMap<i64, Vec<String>> = HashMap::new();
        if ids.is_empty() {
            return Ok(by_record);
        }
        let attachments = payment_attachments::Entity::find()
            .filter(payment_attachments::Column::PaymentId.is_in(ids.to_vec()))
            .order_by_asc(payment_attachments::Column::Id)
            .all(&self.database)
            .await?;
        for attachment in attachments {
            by_record
                .entry(attachment.payment_id)
                .or_default()
                .push(attachment.attachment_path);
        }
        Ok(by_record)
    }

    // ── Work projects ──────────────────────────────────────────────────

    pub async fn create_work_project(
        &self,
        draft: WorkProjectDraft,
        principal: &Principal,
    ) -> ResultLedger<WorkProject> {
        draft.validate()?;
        let model = work_projects::active_from_draft(&draft, &principal.email, Utc::now())
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Returns one project with its payment rollup.
    pub async fn work_project(&self, id: i64) -> ResultLedger<WorkProjectSummary> {
        let model = work_projects::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("work project {id}")))?;
        let total_paid: Money = work_payments::Entity::find()
            .filter(work_payments::Column::ProjectId.eq(id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|payment| Money::from_minor(payment.amount_minor))
            .sum();
        Ok(summarize_project(model.into(), total_paid))
    }

    /// Lists all projects with their rollups, newest first.
    pub async fn list_work_projects(&self) -> ResultLedger<Vec<WorkProjectSummary>> {
        let projects = work_projects::Entity::find()
            .order_by_desc(work_projects::Column::CreatedAt)
            .all(&self.database)
            .await?;
        let mut paid_by_project: HashMap<i64, Money> = HashMap::new();
        for payment in work_payments::Entity::find().all(&self.database).await? {
            *paid_by_project.entry(payment.project_id).or_default() +=
                Money::from_minor(payment.amount_minor);
        }
        Ok(projects
            .into_iter()
            .map(|model| {
                let total_paid = paid_by_project.remove(&model.id).unwrap_or_default();
                summarize_project(model.into(), total_paid)
            })
            .collect())
    }

    /// Payments of one project, attachments joined, newest first.
    pub async fn project_payments(&self, project_id: i64) -> ResultLedger<Vec<WorkPayment>> {
        if work_projects::Entity::find_by_id(project_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!("work project {project_id}")));
        }
        self.list_work_payments(&PaymentFilter {
            project_id: Some(project_id),
            duplex_number: None,
        })
        .await
    }

    // ── Category catalogs (admin) ──────────────────────────────────────

    pub async fn create_purchase_kind(
        &self,
        name: &str,
        name_ar: &str,
        principal: &Principal,
    ) -> ResultLedger<PurchaseKind> {
        principal.require_admin()?;
        if name.trim().is_empty() || name_ar.trim().is_empty() {
            return Err(LedgerError::Validation(
                "name and name_ar must not be empty".to_string(),
            ));
        }
        let clash = purchase_kinds::Entity::find()
            .filter(
                Condition::any()
                    .add(purchase_kinds::Column::Name.eq(name))
                    .add(purchase_kinds::Column::NameAr.eq(name_ar)),
            )
            .one(&self.database)
            .await?;
        if clash.is_some() {
            return Err(LedgerError::Duplicate(
                "a purchase kind with this name already exists".to_string(),
            ));
        }
        let model = purchase_kinds::active_new(name, name_ar, &principal.email, Utc::now())
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    pub async fn list_purchase_kinds(&self) -> ResultLedger<Vec<PurchaseKind>> {
        Ok(purchase_kinds::Entity::find()
            .order_by_desc(purchase_kinds::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(PurchaseKind::from)
            .collect())
    }

    pub async fn delete_purchase_kind(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ResultLedger<()> {
        principal.require_admin()?;
        if purchase_kinds::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(LedgerError::NotFound(format!("purchase kind {id}")));
        }
        purchase_kinds::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    pub async fn create_work_type(
        &self,
        name: &str,
        principal: &Principal,
    ) -> ResultLedger<WorkType> {
        principal.require_admin()?;
        if name.trim().is_empty() {
            return Err(LedgerError::Validation("name must not be empty".to_string()));
        }
        let model = work_types::active_new(name, Utc::now())
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    pub async fn list_work_types(&self) -> ResultLedger<Vec<WorkType>> {
        Ok(work_types::Entity::find()
            .order_by_asc(work_types::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(WorkType::from)
            .collect())
    }

    // ── Analytics (read-only) ──────────────────────────────────────────

    /// Fleet-wide spending summary as of the given instant.
    pub async fn summary(&self, as_of: DateTime<Utc>) -> ResultLedger<SpendingSummary> {
        let payments = work_payments::Entity::find().all(&self.database).await?;
        let purchases_rows = purchases::Entity::find().all(&self.database).await?;

        let (year, month) = (as_of.year(), as_of.month());
        let (last_year, last_month) = analytics::previous_month(year, month);

        let mut total_labor = Money::ZERO;
        let mut current_labor = Money::ZERO;
        let mut previous_labor = Money::ZERO;
        for payment in &payments {
            let amount = Money::from_minor(payment.amount_minor);
            total_labor += amount;
            if analytics::in_month(payment.paid_on, year, month) {
                current_labor += amount;
            }
            if analytics::in_month(payment.paid_on, last_year, last_month) {
                previous_labor += amount;
            }
        }

        let mut total_material = Money::ZERO;
        let mut current_material = Money::ZERO;
        let mut previous_material = Money::ZERO;
        for purchase in &purchases_rows {
            let price = Money::from_minor(purchase.price_minor);
            total_material += price;
            if analytics::in_month(purchase.purchase_date, year, month) {
                current_material += price;
            }
            if analytics::in_month(purchase.purchase_date, last_year, last_month) {
                previous_material += price;
            }
        }

        Ok(SpendingSummary {
            total_spending: total_labor + total_material,
            labor_costs: total_labor,
            material_costs: total_material,
            monthly_change: MonthlyChange {
                total_spending: analytics::monthly_change(
                    current_labor + current_material,
                    previous_labor + previous_material,
                ),
                labor_costs: analytics::monthly_change(current_labor, previous_labor),
                material_costs: analytics::monthly_change(current_material, previous_material),
            },
        })
    }

    /// Per-duplex cost table: one row for every duplex in `range`, zeros
    /// included, ascending duplex order.
    pub async fn duplex_costs(
        &self,
        range: RangeInclusive<i32>,
    ) -> ResultLedger<Vec<DuplexCostRow>> {
        let payments = work_payments::Entity::find().all(&self.database).await?;
        let purchases_rows = purchases::Entity::find().all(&self.database).await?;

        let mut labor: HashMap<i32, (Money, DateTime<Utc>)> = HashMap::new();
        for payment in payments {
            let entry = labor
                .entry(payment.duplex_number)
                .or_insert((Money::ZERO, DateTime::UNIX_EPOCH));
            entry.0 += Money::from_minor(payment.amount_minor);
            entry.1 = entry.1.max(payment.updated_at);
        }

        let mut material: HashMap<i32, (Money, DateTime<Utc>)> = HashMap::new();
        for purchase in purchases_rows {
            let entry = material
                .entry(purchase.duplex_number)
                .or_insert((Money::ZERO, DateTime::UNIX_EPOCH));
            entry.0 += Money::from_minor(purchase.price_minor);
            entry.1 = entry.1.max(purchase.created_at);
        }

        Ok(range
            .map(|duplex_number| {
                let (labor_cost, labor_updated) = labor
                    .get(&duplex_number)
                    .copied()
                    .unwrap_or((Money::ZERO, DateTime::UNIX_EPOCH));
                let (material_cost, material_updated) = material
                    .get(&duplex_number)
                    .copied()
                    .unwrap_or((Money::ZERO, DateTime::UNIX_EPOCH));
                DuplexCostRow {
                    duplex_number,
                    labor_cost,
                    material_cost,
                    total: labor_cost + material_cost,
                    last_updated: labor_updated.max(material_updated),
                }
            })
            .collect())
    }

    /// Merged creation events across purchases and payments, newest first.
    pub async fn recent_activity(
        &self,
        principal: &Principal,
    ) -> ResultLedger<Vec<ActivityEvent>> {
        principal.require_admin()?;

        let mut events = Vec::new();
        for purchase in purchases::Entity::find().all(&self.database).await? {
            let amount = Money::from_minor(purchase.price_minor);
            events.push(ActivityEvent {
                kind: ActivityKind::Purchase,
                record_id: purchase.id,
                created_by: purchase.created_by,
                duplex_number: purchase.duplex_number,
                amount,
                occurred_at: purchase.created_at,
                details: format!("Duplex: {}, Amount: {}", purchase.duplex_number, amount),
            });
        }
        for payment in work_payments::Entity::find().all(&self.database).await? {
            let amount = Money::from_minor(payment.amount_minor);
            events.push(ActivityEvent {
                kind: ActivityKind::WorkPayment,
                record_id: payment.id,
                created_by: payment.created_by,
                duplex_number: payment.duplex_number,
                amount,
                occurred_at: payment.created_at,
                details: format!("Duplex: {}, Amount: {}", payment.duplex_number, amount),
            });
        }
        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(events)
    }
}

fn summarize_project(project: WorkProject, total_paid: Money) -> WorkProjectSummary {
    let remaining = project.total_price - total_paid;
    WorkProjectSummary {
        project,
        total_paid,
        remaining,
    }
}

async fn insert_purchase_attachments(
    txn: &DatabaseTransaction,
    purchase_id: i64,
    paths: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> ResultLedger<()> {
    if paths.is_empty() {
        return Ok(());
    }
    let rows = paths.iter().map(|path| purchase_attachments::ActiveModel {
        id: ActiveValue::NotSet,
        purchase_id: ActiveValue::Set(purchase_id),
        attachment_path: ActiveValue::Set(path.clone()),
        created_at: ActiveValue::Set(now),
    });
    purchase_attachments::Entity::insert_many(rows)
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_payment_attachments(
    txn: &DatabaseTransaction,
    payment_id: i64,
    paths: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> ResultLedger<()> {
    if paths.is_empty() {
        return Ok(());
    }
    let rows = paths.iter().map(|path| payment_attachments::ActiveModel {
        id: ActiveValue::NotSet,
        payment_id: ActiveValue::Set(payment_id),
        attachment_path: ActiveValue::Set(path.clone()),
        created_at: ActiveValue::Set(now),
    });
    payment_attachments::Entity::insert_many(rows)
        .exec(txn)
        .await?;
    Ok(())
}
