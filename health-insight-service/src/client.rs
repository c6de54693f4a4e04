use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::{
    error::ClientError,
    models::{
        ActivityRequest, ActivityResponse, MedicalRequest, MedicalResponse, SymptomRequest,
        SymptomResponse,
    },
    service::{ACTIVITY_ROUTE, MEDICAL_ROUTE, SYMPTOMS_ROUTE},
};

/// Typed caller for the three analysis endpoints.
///
/// One POST per call: no retry, no de-duplication, no cancellation.
#[derive(Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, ClientError> {
        self.post(ACTIVITY_ROUTE, request).await
    }

    pub async fn analyze_medical(
        &self,
        request: &MedicalRequest,
    ) -> Result<MedicalResponse, ClientError> {
        self.post(MEDICAL_ROUTE, request).await
    }

    pub async fn analyze_symptoms(
        &self,
        request: &SymptomRequest,
    ) -> Result<SymptomResponse, ClientError> {
        self.post(SYMPTOMS_ROUTE, request).await
    }

    async fn post<B, R>(&self, route: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, route);
        debug!(url = %url, "Posting analysis request");

        let response = self.http.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(url = %url, status = %status, "Analysis request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AnalysisClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
