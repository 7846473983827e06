use std::io::Read;

pub use aws_lambda_events::encodings::Body;
pub use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};

use crate::errors::Result;

/// Decodes an API Gateway proxy event. `null` maps and bodies come back empty.
pub fn decode_request(raw: &str) -> Result<ApiGatewayProxyRequest> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_request<R: Read>(mut reader: R) -> Result<ApiGatewayProxyRequest> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    decode_request(&raw)
}

pub fn load_request(path: &str) -> Result<ApiGatewayProxyRequest> {
    let raw = std::fs::read_to_string(path)?;
    decode_request(&raw)
}

pub fn encode_response(response: &ApiGatewayProxyResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

pub fn request_body(request: &ApiGatewayProxyRequest) -> &str {
    request.body.as_deref().unwrap_or_default()
}

/// Text of a response body; binary payloads that are not UTF-8 read as empty.
pub fn response_body(response: &ApiGatewayProxyResponse) -> &str {
    match &response.body {
        Some(Body::Text(text)) => text,
        Some(Body::Binary(bytes)) => std::str::from_utf8(bytes).unwrap_or_default(),
        _ => "",
    }
}
