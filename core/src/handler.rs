use aws_lambda_events::encodings::Body;
use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderValue};
use tracing::Level;

use crate::envelope::{
    ApiGatewayProxyRequest, ApiGatewayProxyResponse, request_body, response_body,
};
use crate::errors::RequestError;
use crate::telemetry::RequestLog;

pub const NAME_PARAMETER: &str = "name";
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

const START_SEPARATOR: &str =
    "----------------------------------------------------------------------";
const FINISH_SEPARATOR: &str =
    "......................................................................";

pub fn greeting(name: &str) -> String {
    format!("Hello, {}!\n", name)
}

/// Turns a gateway request into a plain-text greeting.
///
/// `handle` never fails: a missing `name` parameter becomes a 400 response.
/// The value is echoed verbatim into a `text/plain` body, so it must not be
/// served under an HTML content type without escaping.
pub struct GreetingHandler<L> {
    log: L,
}

impl<L: RequestLog> GreetingHandler<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn handle(&self, request: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
        self.log_start(request);

        match request.query_string_parameters.first(NAME_PARAMETER) {
            Some(name) => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8));
                let response = ApiGatewayProxyResponse {
                    status_code: 200,
                    headers,
                    body: Some(Body::Text(greeting(name))),
                    ..Default::default()
                };
                self.log_finish_ok(&response);
                response
            }
            None => {
                let err = RequestError::MissingParameter {
                    name: NAME_PARAMETER.to_string(),
                };
                let response = ApiGatewayProxyResponse {
                    status_code: i64::from(err.status_code()),
                    ..Default::default()
                };
                self.log_finish_error(&err, &response);
                response
            }
        }
    }

    fn log_start(&self, request: &ApiGatewayProxyRequest) {
        self.log.record(Level::INFO, START_SEPARATOR);
        self.log.record(Level::INFO, "API Start:");
        self.log
            .record(Level::INFO, &format!("Request body: [{}]", request_body(request)));
        self.log.record(
            Level::INFO,
            &format!(
                "Query string parameters: [{:?}]",
                request.query_string_parameters
            ),
        );
    }

    fn log_finish_ok(&self, response: &ApiGatewayProxyResponse) {
        self.log
            .record(Level::INFO, &format!("API Response: {}", response_body(response)));
        self.log.record(Level::INFO, "API Finish [OK].");
        self.log.record(Level::INFO, FINISH_SEPARATOR);
    }

    fn log_finish_error(&self, err: &RequestError, response: &ApiGatewayProxyResponse) {
        self.log
            .record(Level::INFO, &format!("API Response: [{}]", response_body(response)));
        self.log
            .record(Level::ERROR, &format!("API Finish [ERROR]: {}", err));
        self.log.record(Level::INFO, FINISH_SEPARATOR);
    }
}
