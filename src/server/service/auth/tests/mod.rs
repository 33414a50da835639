use std::sync::Mutex;

use futures::future::BoxFuture;
use hostel_test_utils::prelude::*;

use crate::{
    model::user::RegisterDto,
    server::{
        error::{auth::AuthError, hostel::HostelError, mail::MailError, Error},
        service::{auth::AuthService, mail::Mailer},
    },
};


/// Records every verification link instead of sending it
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send_verification<'a>(
        &'a self,
        email: &'a str,
        verification_url: &'a str,
    ) -> BoxFuture<'a, Result<(), MailError>> {
        Box::pin(async move {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), verification_url.to_string()));

            Ok(())
        })
    }
}

/// Fails every delivery
struct FailingMailer;

impl Mailer for FailingMailer {
    fn send_verification<'a>(
        &'a self,
        email: &'a str,
        _verification_url: &'a str,
    ) -> BoxFuture<'a, Result<(), MailError>> {
        Box::pin(async move {
            Err(MailError::Delivery {
                email: email.to_string(),
                reason: "SMTP relay unavailable".to_string(),
            })
        })
    }
}

const APP_URL: &str = "https://hostel.example.edu";

fn register_dto(course_id: i32) -> RegisterDto {
    RegisterDto {
        name: "Asha Rao".to_string(),
        email: "Asha.Rao@college.edu".to_string(),
        password: "hostel-pass-1".to_string(),
        roll_no: "cs2023001".to_string(),
        course_id,
        contact_no: "9876543210".to_string(),
        date_of_birth: "2004-05-17".to_string(),
        address: "12 College Road, Pune".to_string(),
    }
}
