//! AWS Lambda handler for running solvency projections
//!
//! Accepts a policy plan as JSON through a Lambda Function URL and returns
//! the year-by-year trajectory, the depletion year and optional
//! approximate rows past the projection horizon.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use trust_fund_solvency::projection::{ApproximateRow, Depletion, ProjectionSummary, DEFAULT_END_YEAR};
use trust_fund_solvency::{PolicyInputs, ProjectionConfig, ScenarioRunner, YearlyResult};

/// Input for a single projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Complete set of policy levers
    pub inputs: PolicyInputs,

    /// Last year to project (default: 2098)
    #[serde(default = "default_end_year")]
    pub end_year: u32,

    /// Append approximate rows through this year
    #[serde(default)]
    pub extend_through: Option<u32>,
}

fn default_end_year() -> u32 { DEFAULT_END_YEAR }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub yearly: Vec<YearlyResult>,
    pub depletion: Option<Depletion>,
    pub summary: ProjectionSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extended: Vec<ApproximateRow>,
    pub execution_time_ms: u64,
}

fn response(status_code: i64, body: String) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, message: &str) -> LambdaFunctionUrlResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status_code, body)
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;
    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }
    let body = request.body.unwrap_or_else(|| "{}".to_string());
    Ok(project_body(&body)?)
}

/// Parse a request body, run the projection and build the reply
fn project_body(body: &str) -> Result<LambdaFunctionUrlResponse, serde_json::Error> {
    let start = std::time::Instant::now();

    let request: ProjectionRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("Invalid JSON: {}", e))),
    };

    let runner = ScenarioRunner::new();
    let config = ProjectionConfig {
        end_year: request.end_year,
        ..Default::default()
    };
    let result = match runner.run(&request.inputs, config) {
        Ok(result) => result,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let extended = match request.extend_through {
        Some(year) => match runner.extend(&result, year) {
            Ok(rows) => rows,
            Err(e) => return Ok(error_response(400, &e.to_string())),
        },
        None => Vec::new(),
    };

    let body = ProjectionResponse {
        summary: result.summary(),
        depletion: result.depletion,
        yearly: result.yearly,
        extended,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(response(200, serde_json::to_string(&body)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
