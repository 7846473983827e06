use std::io;

use anyhow::{Context, Result};
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use greeter_core::config::load_config;
use greeter_core::envelope::{encode_response, load_request, read_request};
use greeter_core::handler::GreetingHandler;
use greeter_core::telemetry::{TracingLog, init_tracing};
use tracing::debug;

/// Invokes the handler once outside of Lambda.
///
/// Usage: `greeter-invoke [EVENT_FILE|-] [CONFIG_FILE]`
///
/// Reads an API Gateway proxy event as JSON from `EVENT_FILE` (stdin when
/// omitted or `-`) and prints the response envelope to stdout. Logs go to
/// stderr so the output stays pipeable.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let event_path = args.next();
    let config_path = args.next();

    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.telemetry)?;

    let request = read_event(event_path.as_deref())?;
    let response = invoke(&request);

    println!("{}", encode_response(&response)?);
    Ok(())
}

fn read_event(path: Option<&str>) -> Result<ApiGatewayProxyRequest> {
    match path {
        None | Some("-") => {
            debug!("Reading event from stdin");
            read_request(io::stdin().lock()).context("Failed to read event from stdin")
        }
        Some(path) => {
            load_request(path).with_context(|| format!("Failed to read event from {}", path))
        }
    }
}

fn invoke(request: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
    GreetingHandler::new(TracingLog).handle(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::envelope::{decode_request, response_body};

    #[test]
    fn test_invoke_sample_event() {
        let response = invoke(&read_event(Some("../events/hello.json")).unwrap());
        assert_eq!(response.status_code, 200);
        assert_eq!(response_body(&response), "Hello, World!\n");
    }

    #[test]
    fn test_invoke_missing_name_event() {
        let request = decode_request(include_str!("../../events/missing-name.json")).unwrap();
        assert_eq!(invoke(&request).status_code, 400);
    }

    #[test]
    fn test_read_event_missing_file() {
        let err = read_event(Some("/nonexistent/event.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/event.json"));
    }
}
