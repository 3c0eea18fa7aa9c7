//! Request/response API for the analysis service.
//!
//! Plain single-exchange endpoints: record listing and detail, the one-shot
//! classifier verdict, and aggregate statistics. These share the client and
//! error decoding of the streaming path but involve no framing.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::{FeedError, MailSiftClient};
use crate::http::{build_http_client, decorate_request};

/// One row of a paginated email listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSummary {
    pub id: u64,
    pub message_id: String,
    pub sender: String,
    pub subject: Option<String>,
    pub received_date: Option<String>,
    pub is_phishing: bool,
    pub phishing_score: f64,
    pub has_attachment: bool,
}

/// A page of email summaries.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailPage {
    pub emails: Vec<EmailSummary>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
}

/// Full detail for one email record.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRecord {
    pub id: u64,
    pub message_id: String,
    pub sender: String,
    pub recipient: String,
    pub subject: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub received_date: Option<String>,
    pub is_phishing: bool,
    pub phishing_score: f64,
    pub detection_method: String,
    pub analysis_result: Value,
    pub has_attachment: bool,
    pub attachment_info: Value,
    pub links: Vec<String>,
    pub spf_pass: Option<bool>,
    pub dkim_pass: Option<bool>,
    pub dmarc_pass: Option<bool>,
}

/// Verdict from the one-shot (non-streaming) analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisOutcome {
    pub message: String,
    pub is_phishing: bool,
    pub phishing_score: f64,
    pub detection_method: String,
    pub analysis_result: Value,
}

/// Aggregate statistics over the caller's mailbox.
#[derive(Debug, Clone, Deserialize)]
pub struct MailStats {
    pub total_emails: u64,
    pub phishing_emails: u64,
    pub phishing_percentage: f64,
    pub detection_methods: HashMap<String, u64>,
}

impl MailSiftClient {
    /// List email records, newest first.
    ///
    /// `phishing_only` of `Some(true)`/`Some(false)` filters by verdict;
    /// `None` returns everything.
    pub async fn list_emails(
        &self,
        page: u64,
        per_page: u64,
        phishing_only: Option<bool>,
    ) -> Result<EmailPage, FeedError> {
        let mut url = format!(
            "{}/emails/?page={}&per_page={}",
            self.api_base(),
            page,
            per_page
        );
        if let Some(flag) = phishing_only {
            url.push_str(&format!("&is_phishing={}", flag));
        }
        self.get_json(&url).await
    }

    /// Fetch full detail for one email record.
    pub async fn fetch_email(&self, email_id: u64) -> Result<EmailRecord, FeedError> {
        let url = format!("{}/emails/{}", self.api_base(), email_id);
        self.get_json(&url).await
    }

    /// Run the one-shot classifier over a record and return its verdict.
    pub async fn analyze_email(&self, email_id: u64) -> Result<AnalysisOutcome, FeedError> {
        let url = format!("{}/emails/{}/analyze", self.api_base(), email_id);
        self.get_json(&url).await
    }

    /// Aggregate statistics over the caller's records.
    pub async fn stats(&self) -> Result<MailStats, FeedError> {
        let url = format!("{}/api/stats", self.api_base());
        self.get_json(&url).await
    }

    /// GET a JSON endpoint, decoding error bodies on non-2xx.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let http_client = build_http_client(self.transport_options())?;
        let req = decorate_request(http_client.get(url), &self.transport_options().provider);

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::handle_error_response(status, &body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_page_decodes() {
        let body = r#"{
            "emails": [{
                "id": 3,
                "message_id": "<abc@mail>",
                "sender": "alice@example.com",
                "subject": "Invoice",
                "received_date": "2025-05-01T10:00:00",
                "is_phishing": true,
                "phishing_score": 87.5,
                "has_attachment": false
            }],
            "total": 1,
            "pages": 1,
            "current_page": 1
        }"#;
        let page: EmailPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.emails.len(), 1);
        assert_eq!(page.emails[0].sender, "alice@example.com");
        assert!(page.emails[0].is_phishing);
    }

    #[test]
    fn test_stats_decode() {
        let body = r#"{
            "total_emails": 40,
            "phishing_emails": 8,
            "phishing_percentage": 20.0,
            "detection_methods": {"ml": 5, "ai": 2, "rules": 1}
        }"#;
        let stats: MailStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.total_emails, 40);
        assert_eq!(stats.detection_methods["ml"], 5);
    }

    #[test]
    fn test_email_record_tolerates_nullable_fields() {
        let body = r#"{
            "id": 9,
            "message_id": "<x@mail>",
            "sender": "bob@example.com",
            "recipient": "me@example.com",
            "subject": null,
            "body_text": null,
            "body_html": "<p>hi</p>",
            "received_date": null,
            "is_phishing": false,
            "phishing_score": 0.0,
            "detection_method": "none",
            "analysis_result": {},
            "has_attachment": false,
            "attachment_info": [],
            "links": [],
            "spf_pass": null,
            "dkim_pass": true,
            "dmarc_pass": null
        }"#;
        let record: EmailRecord = serde_json::from_str(body).unwrap();
        assert!(record.subject.is_none());
        assert_eq!(record.dkim_pass, Some(true));
    }
}
