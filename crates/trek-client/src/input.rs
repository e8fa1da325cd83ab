use protocol::PredictionRequest;

/// Builds the request for one submit event from the current field value.
///
/// An absent or whitespace-only field becomes an empty location; the service
/// decides what an empty location means.
pub fn collect(field: Option<&str>) -> PredictionRequest {
    let location = field.map(str::trim).unwrap_or_default();
    PredictionRequest::new(location)
}
