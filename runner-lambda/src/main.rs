use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use greeter_core::config::load_config;
use greeter_core::handler::GreetingHandler;
use greeter_core::telemetry::{RequestLog, TracingLog, init_tracing};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::info;

/// Adapts the runtime's event loop to the handler. Request-level problems
/// are already folded into the response, so this never returns `Err`.
pub async fn lambda_handler<L: RequestLog>(
    handler: &GreetingHandler<L>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    Ok(handler.handle(&event.payload))
}

/// Entry point for the AWS Lambda custom runtime (`provided.al2023`).
///
/// The runtime decodes each API Gateway proxy event and serializes the
/// returned response.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = load_config(None)?;
    init_tracing(&config.telemetry)?;
    info!("Greeter Lambda runtime starting");

    let handler = GreetingHandler::new(TracingLog);
    lambda_runtime::run(service_fn(|event| lambda_handler(&handler, event))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::envelope::{decode_request, response_body};
    use greeter_core::telemetry::RecordingLog;
    use lambda_runtime::Context;

    const HELLO_EVENT: &str = include_str!("../../events/hello.json");
    const MISSING_NAME_EVENT: &str = include_str!("../../events/missing-name.json");

    fn event(payload: &str) -> LambdaEvent<ApiGatewayProxyRequest> {
        LambdaEvent::new(decode_request(payload).unwrap(), Context::default())
    }

    #[tokio::test]
    async fn test_lambda_handler_greets() {
        let handler = GreetingHandler::new(RecordingLog::new());
        let response = lambda_handler(&handler, event(HELLO_EVENT)).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response_body(&response), "Hello, World!\n");
        assert_eq!(handler.log().records().len(), 7);
    }

    #[tokio::test]
    async fn test_lambda_handler_missing_name_is_not_an_error() {
        let handler = GreetingHandler::new(RecordingLog::new());
        let response = lambda_handler(&handler, event(MISSING_NAME_EVENT))
            .await
            .unwrap();

        assert_eq!(response.status_code, 400);
        assert_eq!(response_body(&response), "");
    }

    #[tokio::test]
    async fn test_response_envelope_shape() {
        let handler = GreetingHandler::new(RecordingLog::new());
        let payload = HELLO_EVENT.replace(r#""name": "World""#, r#""name": "<script>""#);
        let response = lambda_handler(&handler, event(&payload)).await.unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], "Hello, <script>!\n");
        assert_eq!(value["headers"]["content-type"], "text/plain; charset=utf-8");
    }
}
