use serde::Serialize;

/// Envelope for every successful JSON document: `{ "data": ... }`.
///
/// Form posts never use it; they answer with a redirect instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
