use serde::{Deserialize, Serialize};

/// This is the information sent by the client to extract text from a screenshot.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextRequest {
    pub image_data_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExtractTextResponse {
    pub text: String,
}
