#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use flowsense_contact::{
    ContactForm, ContactSubmission, Error, Field, ProxyReply, Relay, RelayOptions, Result,
    Transport,
};
use serde_json::Value;
use wiremock::MockServer;

pub const API_KEY: &str = "qv_test_key";

/// Records every submission and answers with a canned reply.
pub struct RecordingTransport {
    reply: std::result::Result<ProxyReply, String>,
    pub sent: Mutex<Vec<ContactSubmission>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: Value) -> Self {
        Self {
            reply: Ok(ProxyReply { status, body }),
            sent: Mutex::new(vec![]),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Err("connection refused".to_owned()),
            sent: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, submission: &ContactSubmission) -> Result<ProxyReply> {
        self.sent.lock().unwrap().push(submission.clone());

        self.reply.clone().map_err(Error::Server)
    }
}

pub fn jane_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.open();
    form.edit(Field::FirstName, "Jane");
    form.edit(Field::Email, "jane@x.com");
    form
}

pub fn relay_for(server: &MockServer) -> Relay {
    Relay::new(RelayOptions {
        url: format!("{}/webhook", server.uri()),
        api_key_header: "x-api-key".to_owned(),
        api_key: API_KEY.to_owned(),
        timeout: None,
    })
    .unwrap()
}
