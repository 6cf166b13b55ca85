//! Status poller
//!
//! Polls the homework status API on a fixed period and relays the newest
//! status change to the notification channel. Failures of any kind are
//! reported to the channel and retried on the next cycle.

use std::sync::Arc;
use std::time::Duration;

use homework_client::ClientError;
use homework_core::{
    StatusError, current_date, error_notification, render_notification, validate_response,
};
use thiserror::Error;
use tokio::time;
use tracing::{debug, error, info};

use crate::repository::StatusRepository;
use crate::service::Notifier;

/// Reason a poll cycle failed
#[derive(Debug, Error)]
pub enum PollError {
    /// Status could not be fetched
    #[error("status API request failed: {0}")]
    Api(#[from] ClientError),

    /// Response or submission record has an unexpected shape
    #[error(transparent)]
    Response(#[from] StatusError),
}

/// What a single poll cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No submissions changed since the cursor
    Idle,
    /// A status notification was delivered and the cursor moved
    Delivered { cursor: i64 },
    /// A status notification was rendered but could not be sent
    Undelivered,
    /// The cycle failed; `reported` tells whether the error reached the chat
    Failed { reported: bool },
    /// The cycle failed with the error already reported last time
    Suppressed,
}

/// Poller that checks for status changes once per retry period
pub struct StatusPoller {
    statuses: Arc<dyn StatusRepository>,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    /// Lower bound for the next status request
    cursor: i64,
    /// Last error message sent to the chat
    last_error: Option<String>,
}

impl StatusPoller {
    /// Creates a new poller starting from `cursor`
    pub fn new(
        statuses: Arc<dyn StatusRepository>,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            statuses,
            notifier,
            retry_period,
            cursor,
            last_error: None,
        }
    }

    /// Current cursor
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Error message most recently reported to the chat
    #[cfg(test)]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts the polling loop
    ///
    /// Never returns; the process runs until it is killed.
    pub async fn run(&mut self) {
        info!(
            "Starting status poller (interval: {:?}, from_date: {})",
            self.retry_period, self.cursor
        );

        loop {
            let outcome = self.poll_once().await;
            debug!("Poll cycle finished: {:?} (cursor: {})", outcome, self.cursor());

            time::sleep(self.retry_period).await;
        }
    }

    /// Performs a single poll cycle
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.check_statuses().await {
            Ok(outcome) => outcome,
            Err(e) => self.report_failure(&e).await,
        }
    }

    async fn check_statuses(&mut self) -> Result<CycleOutcome, PollError> {
        let response = self.statuses.fetch_statuses(self.cursor).await?;
        let homeworks = validate_response(&response)?;

        let Some(newest) = homeworks.first() else {
            debug!("No new statuses");
            return Ok(CycleOutcome::Idle);
        };

        let message = render_notification(newest)?;
        if !self.notify(&message).await {
            return Ok(CycleOutcome::Undelivered);
        }

        self.cursor = current_date(&response).unwrap_or(self.cursor);
        self.last_error = None;

        Ok(CycleOutcome::Delivered {
            cursor: self.cursor,
        })
    }

    async fn report_failure(&mut self, failure: &PollError) -> CycleOutcome {
        let message = error_notification(failure);
        error!("{}", message);

        if self.last_error.as_deref() == Some(message.as_str()) {
            debug!("Same error already reported, not sending again");
            return CycleOutcome::Suppressed;
        }

        let reported = self.notify(&message).await;
        self.last_error = Some(message);

        CycleOutcome::Failed { reported }
    }

    /// Sends a message, logging instead of propagating delivery failures
    async fn notify(&self, message: &str) -> bool {
        info!("Sending message: \"{}\"", message);

        match self.notifier.send(message).await {
            Ok(()) => {
                debug!("Message sent: \"{}\"", message);
                true
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued responses; an exhausted queue answers with no changes
    #[derive(Default)]
    struct FakeStatuses {
        responses: Mutex<VecDeque<homework_client::Result<Value>>>,
        requested: Mutex<Vec<i64>>,
    }

    impl FakeStatuses {
        fn with(responses: Vec<homework_client::Result<Value>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::default(),
            })
        }

        fn requested(&self) -> Vec<i64> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusRepository for FakeStatuses {
        async fn fetch_statuses(&self, from_date: i64) -> homework_client::Result<Value> {
            self.requested.lock().unwrap().push(from_date);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "homeworks": [], "current_date": from_date })))
        }
    }

    /// Records every message; fails the first `failures` sends
    #[derive(Default)]
    struct FakeNotifier {
        sent: Mutex<Vec<String>>,
        failures: Mutex<usize>,
    }

    impl FakeNotifier {
        fn failing(failures: usize) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::default(),
                failures: Mutex::new(failures),
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn send(&self, message: &str) -> homework_client::Result<()> {
            self.sent.lock().unwrap().push(message.to_string());
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(ClientError::api_error(502, "Bad Gateway"));
            }
            Ok(())
        }
    }

    fn transport_error() -> ClientError {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        ClientError::RequestFailed(err)
    }

    fn approved(current_date: i64) -> homework_client::Result<Value> {
        Ok(json!({
            "homeworks": [{ "homework_name": "proj1", "status": "approved" }],
            "current_date": current_date,
        }))
    }

    fn poller(statuses: Arc<FakeStatuses>, notifier: Arc<FakeNotifier>) -> StatusPoller {
        StatusPoller::new(statuses, notifier, Duration::from_secs(600), 100)
    }

    #[tokio::test]
    async fn test_empty_response_is_idle() {
        let statuses = FakeStatuses::with(vec![Ok(json!({ "homeworks": [], "current_date": 1000 }))]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses.clone(), notifier.clone());

        assert_eq!(poller.poll_once().await, CycleOutcome::Idle);
        assert!(notifier.sent().is_empty());
        assert_eq!(poller.cursor(), 100);
        assert_eq!(statuses.requested(), vec![100]);
    }

    #[tokio::test]
    async fn test_new_status_is_sent_and_cursor_advances() {
        let statuses = FakeStatuses::with(vec![approved(2000)]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses.clone(), notifier.clone());

        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Delivered { cursor: 2000 }
        );
        assert_eq!(
            notifier.sent(),
            vec![
                "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
                    .to_string()
            ]
        );

        poller.poll_once().await;
        assert_eq!(statuses.requested(), vec![100, 2000]);
    }

    #[tokio::test]
    async fn test_only_newest_submission_is_reported() {
        let statuses = FakeStatuses::with(vec![Ok(json!({
            "homeworks": [
                { "homework_name": "proj2", "status": "reviewing" },
                { "homework_name": "proj1", "status": "rejected" },
            ],
            "current_date": 3000,
        }))]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses, notifier.clone());

        poller.poll_once().await;
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("proj2"));
        assert!(sent[0].ends_with("Работа взята на проверку ревьюером."));
    }

    #[tokio::test]
    async fn test_failed_delivery_keeps_cursor() {
        let statuses = FakeStatuses::with(vec![approved(2000), approved(2500)]);
        let notifier = FakeNotifier::failing(1);
        let mut poller = poller(statuses.clone(), notifier.clone());

        assert_eq!(poller.poll_once().await, CycleOutcome::Undelivered);
        assert_eq!(poller.cursor(), 100);

        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Delivered { cursor: 2500 }
        );
        assert_eq!(statuses.requested(), vec![100, 100]);
        assert_eq!(notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_and_retried() {
        let statuses = FakeStatuses::with(vec![Err(transport_error()), approved(2000)]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses, notifier.clone());

        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Failed { reported: true }
        );
        let sent = notifier.sent();
        assert!(sent[0].starts_with("Сбой в работе программы: status API request failed: HTTP request failed"));
        assert_eq!(poller.last_error(), Some(sent[0].as_str()));

        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Delivered { cursor: 2000 }
        );
        assert_eq!(poller.last_error(), None);
    }

    #[tokio::test]
    async fn test_identical_errors_are_reported_once() {
        let statuses = FakeStatuses::with(vec![
            Err(ClientError::api_error(500, "Internal Server Error")),
            Err(ClientError::api_error(500, "Internal Server Error")),
            Err(ClientError::api_error(503, "Service Unavailable")),
        ]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses, notifier.clone());

        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Failed { reported: true }
        );
        assert_eq!(poller.poll_once().await, CycleOutcome::Suppressed);
        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Failed { reported: true }
        );

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("status 500"));
        assert!(sent[1].contains("status 503"));
    }

    #[tokio::test]
    async fn test_error_is_remembered_even_if_not_delivered() {
        let statuses = FakeStatuses::with(vec![
            Ok(json!({ "current_date": 1000 })),
            Ok(json!({ "current_date": 1000 })),
        ]);
        let notifier = FakeNotifier::failing(1);
        let mut poller = poller(statuses, notifier.clone());

        // First send fails, the repeat is suppressed rather than retried
        assert_eq!(
            poller.poll_once().await,
            CycleOutcome::Failed { reported: false }
        );
        assert_eq!(poller.poll_once().await, CycleOutcome::Suppressed);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_shape_errors_are_reported() {
        let statuses = FakeStatuses::with(vec![
            Ok(json!({ "homeworks": {}, "current_date": 1000 })),
            Ok(json!({ "homeworks": [{ "homework_name": "proj1", "status": "lost" }], "current_date": 1000 })),
            Ok(json!({ "homeworks": [{ "status": "approved" }], "current_date": 1000 })),
        ]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses, notifier.clone());

        for _ in 0..3 {
            assert_eq!(
                poller.poll_once().await,
                CycleOutcome::Failed { reported: true }
            );
        }

        let sent = notifier.sent();
        assert!(sent[0].contains("must be a list"));
        assert!(sent[1].contains("unknown homework status: lost"));
        assert!(sent[2].contains("missing expected key: homework_name"));
        assert_eq!(poller.cursor(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_once_per_retry_period() {
        let statuses = FakeStatuses::with(vec![
            Err(ClientError::api_error(500, "Internal Server Error")),
            Err(ClientError::api_error(500, "Internal Server Error")),
            approved(2000),
        ]);
        let notifier = FakeNotifier::failing(0);
        let mut poller = poller(statuses.clone(), notifier.clone());

        // Cycles start at 0s, 600s, 1200s and 1800s
        let result = time::timeout(Duration::from_secs(2000), poller.run()).await;
        assert!(result.is_err());

        assert_eq!(statuses.requested(), vec![100, 100, 100, 2000]);
        assert_eq!(notifier.sent().len(), 2);
        assert_eq!(poller.cursor(), 2000);
    }
}
