//! Declarative view table and the route guard.
//!
//! Route hierarchy:
//!
//! ```text
//! /login                guest only
//! /dashboard            protected
//! /patients             protected
//! /patients/add         protected (matched before /patients/:id)
//! /patients/:id         protected, :id is a positive integer
//! /reminders            protected
//! /profile              protected
//! ```
//!
//! The guard is evaluated once per navigation against a [`SessionSnapshot`].

use serde::Serialize;

use crate::session::SessionSnapshot;
use crate::types::DbId;

/// A screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum View {
    Login,
    Dashboard,
    Patients,
    AddPatient,
    PatientDetail(DbId),
    Reminders,
    Profile,
}

impl View {
    /// Canonical path, used as the redirect target.
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Patients => "/patients".into(),
            Self::AddPatient => "/patients/add".into(),
            Self::PatientDetail(id) => format!("/patients/{id}"),
            Self::Reminders => "/reminders".into(),
            Self::Profile => "/profile".into(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Login => Access::GuestOnly,
            _ => Access::Protected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only reachable without a session; signed-in users go to the dashboard.
    GuestOnly,
    Protected,
}

/// One segment of a route pattern.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Literal(&'static str),
    Id,
}

struct Route {
    pattern: &'static [Segment],
    build: fn(Option<DbId>) -> View,
}

use Segment::{Id, Literal};

/// Matched top to bottom; first hit wins.
static ROUTES: &[Route] = &[
    Route {
        pattern: &[Literal("login")],
        build: |_| View::Login,
    },
    Route {
        pattern: &[Literal("dashboard")],
        build: |_| View::Dashboard,
    },
    Route {
        pattern: &[Literal("patients")],
        build: |_| View::Patients,
    },
    Route {
        pattern: &[Literal("patients"), Literal("add")],
        build: |_| View::AddPatient,
    },
    Route {
        pattern: &[Literal("patients"), Id],
        build: |id| View::PatientDetail(id.unwrap_or_default()),
    },
    Route {
        pattern: &[Literal("reminders")],
        build: |_| View::Reminders,
    },
    Route {
        pattern: &[Literal("profile")],
        build: |_| View::Profile,
    },
];

/// Outcome of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session recovery has not finished; show a placeholder.
    Loading,
    Render(View),
    Redirect(View),
}

/// Map a path to a view, ignoring leading/trailing slashes and any query
/// string. Returns `None` for `/` and unknown paths.
pub fn match_path(path: &str) -> Option<View> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ROUTES.iter().find_map(|route| {
        if route.pattern.len() != segments.len() {
            return None;
        }
        let mut id = None;
        for (segment, part) in route.pattern.iter().zip(&segments) {
            match segment {
                Literal(lit) if lit == part => {}
                Literal(_) => return None,
                Id => id = Some(parse_id(part)?),
            }
        }
        Some((route.build)(id))
    })
}

fn parse_id(part: &str) -> Option<DbId> {
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// Decide what to show for `path` given the current session.
pub fn resolve(path: &str, session: SessionSnapshot) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Loading;
    }

    let view = match_path(path);

    if !session.is_authenticated {
        return match view {
            Some(View::Login) => GuardDecision::Render(View::Login),
            _ => GuardDecision::Redirect(View::Login),
        };
    }

    match view {
        Some(v) if v.access() == Access::Protected => GuardDecision::Render(v),
        _ => GuardDecision::Redirect(View::Dashboard),
    }
}
