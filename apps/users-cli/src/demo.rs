use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use users_info::contract::model::{NewUser, User, UserPatch};
use users_info::domain::error::{DomainError, ErrorKind};
use users_info::domain::service::Service;

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    Absent,
    InvalidArgument,
    Conflict,
    NotFound,
    Storage,
}

impl From<ErrorKind> for Outcome {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => Self::InvalidArgument,
            ErrorKind::Conflict => Self::Conflict,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Storage => Self::Storage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub expected: Outcome,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    pub fn as_expected(&self) -> bool {
        self.expected == self.outcome
    }
}

#[derive(Default)]
struct Recorder {
    reports: Vec<StepReport>,
}

impl Recorder {
    fn record(
        &mut self,
        step: &'static str,
        expected: Outcome,
        result: Result<Option<User>, DomainError>,
    ) {
        let report = match result {
            Ok(user) => StepReport {
                step,
                expected,
                outcome: if user.is_some() { Outcome::Ok } else { Outcome::Absent },
                user,
                error: None,
            },
            Err(e) => StepReport {
                step,
                expected,
                outcome: e.kind().into(),
                user: None,
                error: Some(e.to_string()),
            },
        };
        if report.as_expected() {
            info!(step, outcome = ?report.outcome, "Demo step finished");
        } else {
            warn!(step, outcome = ?report.outcome, expected = ?expected, "Demo step deviated");
        }
        self.reports.push(report);
    }
}

/// Walk one account through its whole lifecycle, including the rejected
/// duplicate registration.
pub fn run_lifecycle(service: &Service) -> Vec<StepReport> {
    let mut rec = Recorder::default();

    let created = service.create_user(NewUser::new("alice", "alice@x.com"));
    let id = created.as_ref().ok().and_then(|u| u.id);
    rec.record("create alice", Outcome::Ok, created.map(Some));

    rec.record(
        "create duplicate username",
        Outcome::Conflict,
        service
            .create_user(NewUser::new("alice", "bob@x.com"))
            .map(Some),
    );

    rec.record(
        "update email",
        Outcome::Ok,
        service.update_user(id, UserPatch::email("new@x.com")).map(Some),
    );

    rec.record(
        "deactivate",
        Outcome::Ok,
        service
            .deactivate_user(id)
            .and_then(|()| service.get_user_by_id(id)),
    );

    rec.record(
        "delete",
        Outcome::Absent,
        service.delete_user(id).map(|()| None),
    );

    rec.record(
        "get deleted user",
        Outcome::Absent,
        service.get_user_by_id(id),
    );

    rec.reports
}

/// Three users, the second one deactivated.
pub fn seed(service: &Service) -> Result<()> {
    for (username, email) in [
        ("alice", "alice@x.com"),
        ("bob", "bob@x.com"),
        ("carol", "carol@x.com"),
    ] {
        service.create_user(NewUser::new(username, email))?;
    }
    let bob = service
        .get_user_by_username("bob")?
        .and_then(|u| u.id);
    service.deactivate_user(bob)?;
    Ok(())
}
