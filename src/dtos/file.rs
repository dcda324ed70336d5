use serde::Serialize;

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
}
