pub mod config;
pub mod envelope;
pub mod errors;
pub mod handler;
pub mod telemetry;

pub use config::{GreeterConfig, TelemetryConfig, load_config};
pub use envelope::{ApiGatewayProxyRequest, ApiGatewayProxyResponse, decode_request};
pub use errors::{GreeterError, RequestError, Result};
pub use handler::GreetingHandler;
pub use telemetry::{NullLog, RecordingLog, RequestLog, TracingLog, init_tracing};
