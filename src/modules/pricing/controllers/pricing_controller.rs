//! Pricing endpoints: forward quotes, inverse-solved prices, regime comparison
//!
//! Controllers stay thin: deserialize, resolve collaborators, call the pure
//! services, round for display, persist a record. All arithmetic lives in
//! the services.

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, Result};
use crate::modules::exchange::services::RateConverter;
use crate::modules::pricing::models::{DualRegimeResult, DutyRegime, ItemEconomics, PriceQuote};
use crate::modules::pricing::services::{PriceSolver, RegimeComparator};
use crate::modules::records::models::{CalculationKind, CalculationRecord};
use crate::modules::tariffs::services::TariffResolver;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsPayload {
    pub purchase_cost: Decimal,
    #[serde(default)]
    pub outsource_fee: Decimal,
    #[serde(default)]
    pub packaging_fee: Decimal,
    #[serde(default)]
    pub domestic_shipping: Decimal,
    #[serde(default)]
    pub international_shipping: Decimal,
}

impl EconomicsPayload {
    fn to_economics(&self) -> Result<ItemEconomics> {
        ItemEconomics::new(
            self.purchase_cost,
            self.outsource_fee,
            self.packaging_fee,
            self.domestic_shipping,
            self.international_shipping,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangePayload {
    pub domestic_currency: Currency,
    pub foreign_currency: Currency,
    /// Domestic units per 1 foreign unit
    pub base_rate: Decimal,
    /// Defaults to the configured FX safety margin when omitted
    pub safety_margin_percent: Option<Decimal>,
    /// When the base rate was quoted. Staleness is the caller's concern;
    /// the engine only echoes it into the saved record.
    pub quoted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub economics: EconomicsPayload,
    pub price: Decimal,
    #[serde(default)]
    pub shipping_price: Decimal,
    pub marketplace: String,
    pub category: String,
    pub jurisdiction: String,
    pub classification: String,
    pub origin_country: String,
    pub exchange: ExchangePayload,
    pub duty_regime: DutyRegime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedPriceRequest {
    pub economics: EconomicsPayload,
    /// Defaults to the configured target margin when omitted
    pub target_margin_percent: Option<Decimal>,
    pub marketplace: String,
    pub category: String,
    pub jurisdiction: String,
    pub classification: String,
    pub origin_country: String,
    pub exchange: ExchangePayload,
    pub duty_regime: DutyRegime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRegimesRequest {
    pub economics: EconomicsPayload,
    pub target_margin_percent: Option<Decimal>,
    /// Estimated international shipping charged to the buyer, foreign currency
    #[serde(default)]
    pub estimated_shipping: Decimal,
    pub marketplace: String,
    pub category: String,
    pub jurisdiction: String,
    pub classification: String,
    pub origin_country: String,
    pub exchange: ExchangePayload,
}

/// Forward projection for a given sale price
///
/// POST /quotes
pub async fn compute_quote(
    state: web::Data<AppState>,
    payload: web::Json<QuoteRequest>,
) -> Result<HttpResponse> {
    let req = payload.into_inner();
    let economics = req.economics.to_economics()?;

    let schedule = state
        .fee_schedules
        .schedule_for(&req.marketplace, &req.category)
        .await?;
    let rule = state
        .tariff_rules
        .rule_for(&req.jurisdiction, &req.classification)
        .await?;
    let effective = TariffResolver::new().resolve(&rule, &req.origin_country)?;
    let rate = effective_rate(&state, &req.exchange)?;

    let quote = PriceSolver::new().evaluate(
        &economics,
        req.price,
        req.shipping_price,
        &schedule,
        &effective,
        rate,
        req.duty_regime,
    )?;

    let record = CalculationRecord::new(
        CalculationKind::SingleQuote,
        serde_json::to_value(&req)?,
        serde_json::to_value(&quote)?,
    );
    let record_id = state.records.save(record).await?;

    let rendered = rounded_quote(
        &quote,
        req.exchange.domestic_currency,
        req.exchange.foreign_currency,
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "quote": rendered,
        "record_id": record_id,
    })))
}

/// Inverse-solved price for a target margin
///
/// POST /quotes/recommended-price
pub async fn compute_recommended_price(
    state: web::Data<AppState>,
    payload: web::Json<RecommendedPriceRequest>,
) -> Result<HttpResponse> {
    let req = payload.into_inner();
    let economics = req.economics.to_economics()?;
    let target_margin = req
        .target_margin_percent
        .unwrap_or(state.pricing.default_target_margin_percent);

    let schedule = state
        .fee_schedules
        .schedule_for(&req.marketplace, &req.category)
        .await?;
    let rule = state
        .tariff_rules
        .rule_for(&req.jurisdiction, &req.classification)
        .await?;
    let effective = TariffResolver::new().resolve(&rule, &req.origin_country)?;
    let rate = effective_rate(&state, &req.exchange)?;

    let solver = PriceSolver::new();
    let price = solver.solve_target_margin(
        &economics,
        target_margin,
        &schedule,
        &effective,
        rate,
        req.duty_regime,
    )?;
    let quote = solver.evaluate(
        &economics,
        price,
        Decimal::ZERO,
        &schedule,
        &effective,
        rate,
        req.duty_regime,
    )?;

    let record = CalculationRecord::new(
        CalculationKind::SingleQuote,
        serde_json::to_value(&req)?,
        serde_json::to_value(&quote)?,
    );
    let record_id = state.records.save(record).await?;

    let foreign = req.exchange.foreign_currency;
    let rendered = rounded_quote(&quote, req.exchange.domestic_currency, foreign);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "recommended_price": foreign.round(price),
        "target_margin_percent": target_margin,
        "quote": rendered,
        "record_id": record_id,
    })))
}

/// DDU/DDP comparison with a strategy recommendation
///
/// POST /quotes/compare-regimes
pub async fn compare_regimes(
    state: web::Data<AppState>,
    payload: web::Json<CompareRegimesRequest>,
) -> Result<HttpResponse> {
    let req = payload.into_inner();
    let economics = req.economics.to_economics()?;
    let target_margin = req
        .target_margin_percent
        .unwrap_or(state.pricing.default_target_margin_percent);

    let schedule = state
        .fee_schedules
        .schedule_for(&req.marketplace, &req.category)
        .await?;
    let rule = state
        .tariff_rules
        .rule_for(&req.jurisdiction, &req.classification)
        .await?;
    let rate = effective_rate(&state, &req.exchange)?;

    let result = RegimeComparator::new().compare(
        &economics,
        &schedule,
        &rule,
        &req.origin_country,
        rate,
        target_margin,
        req.estimated_shipping,
    )?;

    let record = CalculationRecord::new(
        CalculationKind::RegimeComparison,
        serde_json::to_value(&req)?,
        serde_json::to_value(&result)?,
    );
    let record_id = state.records.save(record).await?;

    let rendered = rounded_comparison(
        &result,
        req.exchange.domestic_currency,
        req.exchange.foreign_currency,
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "comparison": rendered,
        "record_id": record_id,
    })))
}

fn effective_rate(state: &AppState, exchange: &ExchangePayload) -> Result<Decimal> {
    let margin = exchange
        .safety_margin_percent
        .unwrap_or(state.pricing.fx_safety_margin_percent);
    RateConverter::new().effective_rate(exchange.base_rate, margin)
}

/// Display rounding: foreign amounts to the foreign currency's scale,
/// domestic amounts to the domestic scale, percentages to 2 decimals.
/// Breakdown formulas keep full precision for auditability.
fn rounded_quote(quote: &PriceQuote, domestic: Currency, foreign: Currency) -> PriceQuote {
    PriceQuote {
        duty_regime: quote.duty_regime,
        sell_price: foreign.round(quote.sell_price),
        shipping_price: foreign.round(quote.shipping_price),
        revenue: foreign.round(quote.revenue),
        duty: foreign.round(quote.duty),
        tax: foreign.round(quote.tax),
        commission: foreign.round(quote.commission),
        payment_fee: foreign.round(quote.payment_fee),
        per_order_fee: foreign.round(quote.per_order_fee),
        total_fees: foreign.round(quote.total_fees),
        net_foreign: foreign.round(quote.net_foreign),
        net_domestic: domestic.round(quote.net_domestic),
        total_cost_domestic: domestic.round(quote.total_cost_domestic),
        profit_domestic: domestic.round(quote.profit_domestic),
        margin_percent: quote.margin_percent.round_dp(2),
        roi_percent: quote.roi_percent.round_dp(2),
        breakdown: quote.breakdown.clone(),
    }
}

fn rounded_comparison(
    result: &DualRegimeResult,
    domestic: Currency,
    foreign: Currency,
) -> DualRegimeResult {
    DualRegimeResult {
        ddu: rounded_quote(&result.ddu, domestic, foreign),
        ddp: rounded_quote(&result.ddp, domestic, foreign),
        price_delta: foreign.round(result.price_delta),
        delta_percent: result.delta_percent.round_dp(2),
        competitiveness: result.competitiveness,
        coupon: result.coupon.clone(),
    }
}

/// Configure pricing routes
pub fn configure_pricing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotes")
            .route("", web::post().to(compute_quote))
            .route(
                "/recommended-price",
                web::post().to(compute_recommended_price),
            )
            .route("/compare-regimes", web::post().to(compare_regimes)),
    );
}
