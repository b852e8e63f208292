use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use hopn_core::payment::SavedCard;
use hopn_core::ModalParams;
use hopn_fare::{BookingFlow, BookingReceipt, FareQuote, SpecialRequest, SpecialRequestModal};
use hopn_shared::Destination;
use hopn_trip::luggage::{normalize_luggage, primary, set_primary};
use hopn_trip::passengers::MAX_PASSENGERS;
use hopn_trip::{
    validate_luggage, validate_oversized, AddLuggageModal, LuggageItem, OversizedCounts, PassengerCounts, TripSnapshot,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    state::{AppState, BookingSession, SharedSession},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips", post(create_trip))
        .route("/v1/trips/{id}", get(get_trip).delete(discard_trip))
        .route("/v1/trips/{id}/route", put(set_route))
        .route("/v1/trips/{id}/passengers", put(set_passengers))
        .route("/v1/trips/{id}/luggage", put(set_luggage))
        .route("/v1/trips/{id}/luggage/oversized", put(set_oversized))
        .route("/v1/trips/{id}/fares", post(load_fares))
        .route("/v1/trips/{id}/fares/select", post(select_fare))
        .route("/v1/trips/{id}/special-request", put(set_special_request))
        .route("/v1/trips/{id}/confirm", post(confirm_fare))
        .route("/v1/trips/{id}/coupon", put(apply_coupon))
        .route("/v1/trips/{id}/payment", put(set_payment))
        .route("/v1/trips/{id}/book", post(book_ride))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    pub id: Uuid,
    pub state: &'static str,
    pub trip: TripSnapshot,
    pub passenger_text: String,
    pub luggage_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fares: Option<FaresView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<BookingReceipt>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaresView {
    pub quotes: Vec<FareQuote>,
    pub selected_id: Option<String>,
    pub can_confirm: bool,
    pub special_request: Option<SpecialRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmView {
    pub quote: FareQuote,
    pub pay_method: Option<SavedCard>,
    pub pay_label: Option<String>,
    pub coupon: Option<String>,
    pub special_request: Option<SpecialRequest>,
}

fn view(id: Uuid, session: &BookingSession) -> TripView {
    let flow = session.flow.as_ref();
    TripView {
        id,
        state: session.state_name(),
        trip: session.draft.snapshot(),
        passenger_text: session.draft.chip_text(),
        luggage_summary: session.draft.luggage_summary(),
        fares: flow.and_then(BookingFlow::fare_options).map(|options| FaresView {
            quotes: options.quotes().to_vec(),
            selected_id: options.selected().map(|q| q.id.clone()),
            can_confirm: options.can_confirm(),
            special_request: options.special_request(),
        }),
        confirm: flow.and_then(BookingFlow::confirm_request).map(|confirm| {
            let pay_method = confirm.pay_method();
            ConfirmView {
                quote: confirm.quote().clone(),
                pay_label: pay_method.as_ref().map(SavedCard::label),
                pay_method,
                coupon: confirm.coupon().map(str::to_string),
                special_request: confirm.special_request(),
            }
        }),
        receipt: flow.and_then(BookingFlow::receipt).cloned(),
    }
}

async fn find(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .lock()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Trip {} not found", id)))
}

/// Draft edits make any fetched prices stale; a booked ride can no longer change
fn reopen_draft(session: &mut BookingSession) -> Result<(), AppError> {
    if session.flow.as_ref().and_then(BookingFlow::receipt).is_some() {
        return Err(AppError::ConflictError("Trip is already booked".to_string()));
    }
    session.flow = None;
    Ok(())
}

fn flow_mut(session: &mut BookingSession) -> Result<&mut BookingFlow, AppError> {
    session
        .flow
        .as_mut()
        .ok_or_else(|| AppError::ConflictError("Fares have not been loaded".to_string()))
}

fn wrong_state(flow: &BookingFlow, action: &str) -> AppError {
    AppError::ConflictError(format!("Cannot {} while {}", action, flow.state().name()))
}

async fn create_trip(State(state): State<AppState>) -> (StatusCode, Json<TripView>) {
    let id = Uuid::new_v4();
    let session = BookingSession::new();
    let body = view(id, &session);
    state.sessions.lock().await.insert(id, Arc::new(Mutex::new(session)));
    info!("Trip {} created", id);
    (StatusCode::CREATED, Json(body))
}

async fn get_trip(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let session = trip.lock().await;
    Ok(Json(view(id, &session)))
}

async fn discard_trip(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    state
        .sessions
        .lock()
        .await
        .remove(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("Trip {} not found", id)))?;
    info!("Trip {} discarded", id);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start: Option<Destination>,
    pub dest: Option<Destination>,
    pub when: Option<DateTime<Utc>>,
}

async fn set_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    reopen_draft(&mut session)?;

    if let Some(start) = req.start {
        session.draft.open_start_picker()?.complete(start);
    }
    if let Some(dest) = req.dest {
        session.draft.open_dest_picker()?.complete(dest);
    }
    if let Some(when) = req.when {
        session.draft.open_schedule()?.complete(when);
    }
    Ok(Json(view(id, &session)))
}

async fn set_passengers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(counts): Json<PassengerCounts>,
) -> Result<Json<TripView>, AppError> {
    if [counts.adults, counts.children, counts.infants]
        .iter()
        .any(|&n| n > MAX_PASSENGERS)
    {
        return Err(AppError::ValidationError(format!(
            "Passenger counts must be at most {}",
            MAX_PASSENGERS
        )));
    }

    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    reopen_draft(&mut session)?;
    session.draft.open_passengers()?.complete(counts);
    Ok(Json(view(id, &session)))
}

async fn set_luggage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(items): Json<Vec<LuggageItem>>,
) -> Result<Json<TripView>, AppError> {
    validate_luggage(&items)?;
    let items = normalize_luggage(&set_primary(&items, primary(&items).cloned()));

    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    reopen_draft(&mut session)?;
    session.draft.open_luggage()?.complete(items);
    Ok(Json(view(id, &session)))
}

/// Same path as the oversized sheet opened from the luggage sheet
async fn set_oversized(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(counts): Json<OversizedCounts>,
) -> Result<Json<TripView>, AppError> {
    validate_oversized(&counts)?;

    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    reopen_draft(&mut session)?;

    let mut sheet = AddLuggageModal::open(session.draft.open_luggage()?);
    sheet.open_oversized()?.complete(counts);
    sheet.done()?;
    Ok(Json(view(id, &session)))
}

async fn load_fares(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    reopen_draft(&mut session)?;

    let quotes = state.quotes.generate(&session.draft.snapshot());
    info!("Trip {} received {} quotes", id, quotes.len());
    session.flow = Some(BookingFlow::start(quotes, None));
    Ok(Json(view(id, &session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectFareRequest {
    pub quote_id: String,
}

async fn select_fare(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectFareRequest>,
) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    let flow = flow_mut(&mut session)?;
    match flow.fare_options_mut() {
        Some(options) => options.select(&req.quote_id)?,
        None => return Err(wrong_state(flow, "select a fare")),
    }
    Ok(Json(view(id, &session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRequestBody {
    pub enabled: bool,
    #[serde(default)]
    pub request: Option<SpecialRequest>,
}

/// Drive the editor the way the sheet would and save
fn save_special_request(params: ModalParams<SpecialRequest>, request: Option<SpecialRequest>) -> Result<(), AppError> {
    let mut modal = SpecialRequestModal::open(params);
    if let Some(request) = request {
        modal.set_caring_pet(request.caring_pet)?;
        modal.set_quiet_ride(request.quiet_ride)?;
        modal.set_note(&request.note)?;
    }
    modal.save()?;
    Ok(())
}

async fn set_special_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SpecialRequestBody>,
) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    let flow = flow_mut(&mut session)?;

    if let Some(options) = flow.fare_options() {
        if let Some(params) = options.toggle_special_request(body.enabled)? {
            save_special_request(params, body.request)?;
        }
    } else if let Some(confirm) = flow.confirm_request() {
        if body.enabled {
            save_special_request(confirm.open_special_request()?, body.request)?;
        } else {
            confirm.clear_special_request()?;
        }
    } else {
        return Err(wrong_state(flow, "edit the special request"));
    }
    Ok(Json(view(id, &session)))
}

async fn confirm_fare(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    flow_mut(&mut session)?.confirm_and_request()?;
    Ok(Json(view(id, &session)))
}

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub code: String,
}

async fn apply_coupon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CouponRequest>,
) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    let flow = flow_mut(&mut session)?;
    match flow.confirm_request_mut() {
        Some(confirm) => confirm.apply_coupon(&req.code),
        None => return Err(wrong_state(flow, "apply a coupon")),
    }
    Ok(Json(view(id, &session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub customer_id: String,
    pub processor_token: String,
}

async fn set_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    let flow = flow_mut(&mut session)?;
    let Some(confirm) = flow.confirm_request() else {
        return Err(wrong_state(flow, "change the payment method"));
    };
    // Only this trip's lock is held while the card is created
    let picker = confirm.open_payment()?;

    let card = state
        .payments
        .create_card(&req.customer_id, &req.processor_token)
        .await?;
    info!("Trip {} paying with {}", id, card.id);
    picker.complete(card);
    Ok(Json(view(id, &session)))
}

async fn book_ride(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<TripView>, AppError> {
    let trip = find(&state, id).await?;
    let mut session = trip.lock().await;
    let snapshot = session.draft.snapshot();

    let receipt = flow_mut(&mut session)?.submit(&snapshot, state.booking.as_ref()).await?;
    info!("Trip {} booked as {}", id, receipt.booking_id);
    Ok(Json(view(id, &session)))
}
