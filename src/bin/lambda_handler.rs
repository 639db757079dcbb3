//! AWS Lambda handler for scenario comparisons
//!
//! Accepts simulation inputs and scenarios as JSON and returns each active
//! scenario's projection along with chart-ready sampled series.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Local;
use dividend_projection::{
    chart::{ChartSeries, ViewMode},
    scenario::{default_scenarios, Scenario, ScenarioResults, ScenarioRunner, SimulationInputs},
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::info;
use serde::{Deserialize, Serialize};

/// Input configuration for the comparison
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub initial_capital: f64,
    pub monthly_dividend: f64,
    pub target_amount: f64,

    /// Scenarios to compare (default: the four built-in rates)
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,

    /// Chart granularity (default: quarterly)
    #[serde(default)]
    pub view_mode: ViewMode,
}

/// Output from the comparison
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// False when any input is non-positive; results are then empty
    pub valid: bool,
    pub results: ScenarioResults,
    pub chart: Vec<ChartSeries>,
    pub execution_time_ms: u64,
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &SimulationResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: SimulationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let inputs = SimulationInputs {
        initial_capital: request.initial_capital,
        monthly_dividend: request.monthly_dividend,
        target_amount: request.target_amount,
    };

    let valid = inputs.is_valid();
    let results = if valid {
        ScenarioRunner::new().run_scenarios(&inputs, &request.scenarios)
    } else {
        ScenarioResults::default()
    };

    let today = Local::now().date_naive();
    let chart = results
        .iter()
        .map(|r| ChartSeries::from_result(r, request.view_mode, today))
        .collect();

    let execution_time_ms = start.elapsed().as_millis() as u64;
    info!("compared {} scenarios in {} ms", results.len(), execution_time_ms);

    json_response(&SimulationResponse {
        valid,
        results,
        chart,
        execution_time_ms,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn post(body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .body(Body::from(body))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_preflight() {
        let request = lambda_http::http::Request::builder()
            .method("OPTIONS")
            .body(Body::Empty)
            .unwrap();
        let response = handler(request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = handler(post("{ not json")).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        let json = body_json(&response);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_non_positive_inputs_are_invalid() {
        let body = r#"{"initialCapital": 0, "monthlyDividend": 100, "targetAmount": 1000}"#;
        let response = handler(post(body)).await.unwrap();

        assert_eq!(response.status(), 200);
        let json = body_json(&response);
        assert_eq!(json["valid"], false);
        assert_eq!(json["results"], Value::Array(vec![]));
        assert_eq!(json["chart"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_default_scenarios_compared() {
        let body = r#"{"initialCapital": 1000000, "monthlyDividend": 10000, "targetAmount": 2000000}"#;
        let response = handler(post(body)).await.unwrap();
        let json = body_json(&response);

        assert_eq!(json["valid"], true);
        let results = json["results"].as_array().unwrap();
        // Only the active defaults, in order
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "A");
        assert_eq!(results[1]["id"], "B");
        assert_eq!(json["chart"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_request_cannot_raise_ceiling() {
        let body = r##"{
            "initialCapital": 1000,
            "monthlyDividend": 1,
            "targetAmount": 2000,
            "projection": { "maxMonths": 5000 },
            "scenarios": [
                { "id": "none", "name": "None", "rate": 0, "color": "#cccccc", "active": true }
            ]
        }"##;
        let response = handler(post(body)).await.unwrap();
        let json = body_json(&response);

        assert_eq!(json["results"][0]["months"], 600);
        assert_eq!(json["results"][0]["history"].as_array().unwrap().len(), 600);
    }
}
