//! Collaborator-backed routing.
//!
//! The assessor and orchestrator are pure. This module gathers their input
//! from whatever backs a `RecallDataSource` (court case, adjustment, recall
//! and calculation services in production, fixtures in tests), fetching
//! every collection concurrently.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use shared_types::{
    Adjustment, AppError, CalculationBreakdown, CourtCase, EditContext, ExistingRecall,
    RoutingConfig, RoutingRequest, RoutingResponse, SmartRoutingResponse, ValidationMessage,
};
use uuid::Uuid;

use super::orchestrator::{
    degraded_response, enrich_with_breakdown, route, route_with_smart_filtering,
};

/// Read access to everything routing needs for one prisoner.
#[async_trait]
pub trait RecallDataSource: Send + Sync {
    async fn court_cases(&self, noms_id: &str) -> Result<Vec<CourtCase>, AppError>;

    async fn adjustments(&self, noms_id: &str) -> Result<Vec<Adjustment>, AppError>;

    async fn existing_recalls(&self, noms_id: &str) -> Result<Vec<ExistingRecall>, AppError>;

    /// Validation messages from the latest release date calculation.
    async fn validation_messages(&self, noms_id: &str) -> Result<Vec<ValidationMessage>, AppError>;

    /// Per-sentence release dates, when the calculation service has them.
    async fn calculation_breakdown(
        &self,
        _noms_id: &str,
    ) -> Result<Option<CalculationBreakdown>, AppError> {
        Ok(None)
    }
}

struct PrisonerRecord {
    court_cases: Vec<CourtCase>,
    adjustments: Vec<Adjustment>,
    existing_recalls: Vec<ExistingRecall>,
    validation_messages: Vec<ValidationMessage>,
    breakdown: Option<CalculationBreakdown>,
}

async fn fetch_record<S>(source: &S, noms_id: &str) -> Result<PrisonerRecord, AppError>
where
    S: RecallDataSource + ?Sized,
{
    let (court_cases, adjustments, existing_recalls, validation_messages, breakdown) = tokio::try_join!(
        source.court_cases(noms_id),
        source.adjustments(noms_id),
        source.existing_recalls(noms_id),
        source.validation_messages(noms_id),
        source.calculation_breakdown(noms_id),
    )?;
    Ok(PrisonerRecord {
        court_cases,
        adjustments,
        existing_recalls,
        validation_messages,
        breakdown,
    })
}

/// Fetch a prisoner's record and route a recall with a known revocation
/// date. A failed fetch produces the degraded manual-review response.
pub async fn route_from_source<S>(
    source: &S,
    noms_id: &str,
    revocation_date: NaiveDate,
    edit_context: Option<EditContext>,
) -> RoutingResponse
where
    S: RecallDataSource + ?Sized,
{
    let started_at = Utc::now();
    let record = match fetch_record(source, noms_id).await {
        Ok(record) => record,
        Err(err) => return degraded_response(noms_id, 0, 0, &err, started_at, Uuid::new_v4()),
    };

    route(RoutingRequest {
        noms_id: noms_id.to_string(),
        court_cases: enrich_with_breakdown(&record.court_cases, record.breakdown.as_ref()),
        adjustments: record.adjustments,
        existing_recalls: record.existing_recalls,
        validation_messages: record.validation_messages,
        revocation_date: Some(revocation_date),
        edit_context,
    })
}

/// Fetch a prisoner's record and run smart routing.
pub async fn smart_route_from_source<S>(
    source: &S,
    noms_id: &str,
    edit_context: Option<&EditContext>,
    config: &RoutingConfig,
) -> Result<SmartRoutingResponse, AppError>
where
    S: RecallDataSource + ?Sized,
{
    let record = fetch_record(source, noms_id).await?;
    Ok(route_with_smart_filtering(
        noms_id,
        &record.court_cases,
        &record.adjustments,
        &record.existing_recalls,
        record.breakdown.as_ref(),
        &record.validation_messages,
        edit_context,
        config,
    ))
}
