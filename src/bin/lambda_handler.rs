//! AWS Lambda handler for running trade simulations
//!
//! Accepts trade parameters via JSON and returns the full three-party
//! simulation result. Wired for API Gateway v2 HTTP events with CORS so a
//! browser front end can call it directly.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue, Method};
use chrono::Utc;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use policy_trade::{ScenarioRunner, SimulationResult, TradeParams};

/// Input parameters for the simulation
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    /// Policy year the sale happens in (default: 10)
    #[serde(default = "default_sale_year")]
    pub sale_year: u32,

    /// Seller premium over cash value in percent (default: 5)
    #[serde(default = "default_seller_premium")]
    pub seller_premium_pct: f64,

    /// Broker fee in percent (default: 2)
    #[serde(default = "default_broker_fee")]
    pub broker_fee_pct: f64,
}

fn default_sale_year() -> u32 {
    10
}
fn default_seller_premium() -> f64 {
    5.0
}
fn default_broker_fee() -> f64 {
    2.0
}

/// Output from the simulation
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    /// Effective (clamped) parameters the simulation ran with
    pub sale_year: u32,
    pub seller_premium_pct: f64,
    pub broker_fee_pct: f64,

    pub result: SimulationResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_breakeven_year: Option<u32>,

    pub generated_at: String,
    pub execution_time_ms: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn error_response(status: i64, message: &str) -> ApiGatewayV2httpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    ApiGatewayV2httpResponse {
        status_code: status,
        headers: cors_headers(),
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

fn json_response(response: &SimulationResponse) -> ApiGatewayV2httpResponse {
    match serde_json::to_string(response) {
        Ok(body) => ApiGatewayV2httpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: Some(Body::Text(body)),
            ..Default::default()
        },
        Err(err) => error_response(500, &format!("Serialization failed: {}", err)),
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.payload.request_context.http.method == Method::OPTIONS {
        return Ok(ApiGatewayV2httpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: None,
            ..Default::default()
        });
    }

    // Parse request body; an absent body runs the defaults
    let body_str = event.payload.body.unwrap_or_else(|| "{}".to_string());

    let request: SimulationRequest = match serde_json::from_str(&body_str) {
        Ok(request) => request,
        Err(err) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", err)));
        }
    };

    let params = TradeParams::new(
        request.sale_year,
        request.seller_premium_pct,
        request.broker_fee_pct,
    )
    .clamped();

    let runner = ScenarioRunner::new();
    let result = runner.run(&params);

    let response = SimulationResponse {
        sale_year: params.sale_year,
        seller_premium_pct: params.seller_premium_pct,
        broker_fee_pct: params.broker_fee_pct,
        buyer_breakeven_year: result.buyer_breakeven_year(),
        result,
        generated_at: Utc::now().to_rfc3339(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
